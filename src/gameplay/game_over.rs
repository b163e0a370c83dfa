use std::time::Duration;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{Fruit, FruitRadius};
use crate::core::config::GameConfig;
use crate::core::session::GameSession;
use crate::core::system_order::PostPhysicsAdjustSet;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DangerState>().add_systems(
            Update,
            monitor_danger_line
                .in_set(PostPhysicsAdjustSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

/// Single-slot deadline for the overflow condition. Advanced by tick delta,
/// never by wall clock: a restart writes `Clear` and nothing stale can fire
/// afterwards.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum DangerState {
    #[default]
    Clear,
    /// A violation began; time left before the run ends.
    Pending { remaining: Duration },
    Over,
}

/// Advances the danger state machine by one tick. Returns true exactly on
/// the `Pending -> Over` edge.
pub fn advance_danger(
    state: &mut DangerState,
    violating: bool,
    dt: Duration,
    grace: Duration,
) -> bool {
    match state {
        DangerState::Clear => {
            if violating {
                *state = DangerState::Pending { remaining: grace };
            }
            false
        }
        DangerState::Pending { remaining } => {
            if !violating {
                // The stack dipped back under the line; a transient bounce
                // through it never ends the run.
                *state = DangerState::Clear;
                false
            } else if dt >= *remaining {
                *state = DangerState::Over;
                true
            } else {
                *remaining -= dt;
                false
            }
        }
        DangerState::Over => false,
    }
}

/// A fruit violates when its top edge crosses the danger line.
pub fn monitor_danger_line(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    fruits: Query<(&Transform, &FruitRadius), With<Fruit>>,
    mut state: ResMut<DangerState>,
    mut session: ResMut<GameSession>,
) {
    if session.game_over || session.game_won {
        return;
    }
    let line_y = cfg.world.danger_line_y();
    let violating = fruits
        .iter()
        .any(|(tf, radius)| tf.translation.y + radius.0 > line_y);
    let grace = Duration::from_secs_f32(cfg.game_over.grace_secs.max(0.0));
    if advance_danger(&mut state, violating, time.delta(), grace) {
        session.game_over = true;
        warn!(
            target: "game_over",
            "stack stayed above the danger line for {:.1}s; game over at score {}",
            cfg.game_over.grace_secs,
            session.score
        );
    }
}
