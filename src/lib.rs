pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::app::state::AppState;
pub use crate::core::catalog::{kind_of, successor_of, FruitKind, FRUITS, WINNING_RANK};
pub use crate::core::components::{Fruit, FruitRadius};
pub use crate::core::config::GameConfig;
pub use crate::core::session::GameSession;
