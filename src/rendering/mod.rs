pub mod assets;
pub mod camera;
pub mod hud;
pub mod preview;
