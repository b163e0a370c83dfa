use bevy::prelude::*;

use crate::core::components::Fruit;
use crate::core::config::GameConfig;
use crate::core::session::GameSession;
use crate::gameplay::drop::DropCooldown;
use crate::gameplay::game_over::DangerState;

/// Request to abandon the current run and start a fresh one.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct RestartRequested;

pub struct RestartPlugin;

impl Plugin for RestartPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RestartRequested>()
            .add_systems(Update, (request_restart_on_key, apply_restart).chain());
    }
}

fn request_restart_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut restarts: EventWriter<RestartRequested>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        restarts.write(RestartRequested);
    }
}

/// Clears fruit bodies and all per-run state. The boundary bodies stay put.
/// Both deferred deadlines (drop cooldown, danger grace) are plain data and
/// are wiped here, so neither can fire against the fresh run.
pub fn apply_restart(
    mut restarts: EventReader<RestartRequested>,
    fruits: Query<Entity, With<Fruit>>,
    mut session: ResMut<GameSession>,
    mut danger: ResMut<DangerState>,
    mut cooldown: ResMut<DropCooldown>,
    cfg: Res<GameConfig>,
    mut commands: Commands,
) {
    if restarts.is_empty() {
        return;
    }
    restarts.clear();
    for entity in fruits.iter() {
        commands.entity(entity).despawn();
    }
    session.reset(&mut rand::thread_rng(), cfg.drop.initial_fruit_range);
    *danger = DangerState::Clear;
    cooldown.clear();
    info!(target: "restart", "new run started");
}
