use bevy::prelude::*;

/// High-level app lifecycle state.
/// Loading -> Playing.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Waiting for every fruit sprite to reach a terminal load state.
    #[default]
    Loading,
    /// Active gameplay (drops accepted, tick systems live).
    Playing,
}
