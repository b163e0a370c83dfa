pub mod drop;
pub mod game_over;
pub mod merge;
pub mod restart;
pub mod spawn;
