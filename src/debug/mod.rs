#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::core::components::Fruit;
#[cfg(feature = "debug")]
use crate::core::session::GameSession;
#[cfg(feature = "debug")]
use crate::gameplay::game_over::DangerState;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugLogState>()
            .add_systems(Update, debug_logging_system);
    }
}

#[cfg(feature = "debug")]
#[derive(Resource)]
struct DebugLogState {
    time_accum: f32,
    log_interval: f32,
}

#[cfg(feature = "debug")]
impl Default for DebugLogState {
    fn default() -> Self {
        Self {
            time_accum: 0.0,
            log_interval: 5.0,
        }
    }
}

#[cfg(feature = "debug")]
fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugLogState>,
    fruits: Query<(), With<Fruit>>,
    session: Res<GameSession>,
    danger: Res<DangerState>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "SIM t={:.1}s fruits={} score={} next={} danger={:?} over={} won={}",
            time.elapsed_secs(),
            fruits.iter().count(),
            session.score,
            session.next_rank,
            *danger,
            session.game_over,
            session.game_won
        );
    }
}
