use bevy::input::touch::Touch;
use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::catalog;
use crate::core::config::{GameConfig, WorldConfig};
use crate::core::session::GameSession;
use crate::core::system_order::PrePhysicsSet;
use crate::gameplay::spawn::spawn_fruit;
use crate::rendering::assets::FruitAssets;

pub struct DropPlugin;

impl Plugin for DropPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerWorld>()
            .init_resource::<DropCooldown>()
            .add_systems(
                Update,
                (track_pointer, drop_on_release, tick_drop_cooldown)
                    .chain()
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

/// Last known pointer x in world space; `None` while the pointer is outside
/// the window.
#[derive(Resource, Default, Debug)]
pub struct PointerWorld {
    pub x: Option<f32>,
}

/// Single-slot drop cooldown. `None` means no unlock pending; restarting
/// clears the slot, so a stale unlock can never fire into a fresh run.
#[derive(Resource, Default, Debug)]
pub struct DropCooldown {
    timer: Option<Timer>,
}

impl DropCooldown {
    pub fn arm(&mut self, secs: f32) {
        self.timer = Some(Timer::from_seconds(secs.max(0.0), TimerMode::Once));
    }

    pub fn clear(&mut self) {
        self.timer = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}

/// Clamp a requested drop x so the fruit stays inside the play area.
pub fn clamp_drop_x(x: f32, radius: f32, world: &WorldConfig) -> f32 {
    let limit = (world.half_width() - radius).max(0.0);
    x.clamp(-limit, limit)
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// The touch to aim with: a held touch, or the touch that lifted this frame.
/// `Touches::iter` stops reporting a touch the moment it ends, which is
/// exactly the frame the drop fires on; without the just-released fallback a
/// tap on a touch-only device would clear the pointer before the drop reads
/// it.
fn active_touch(touches: &Touches) -> Option<&Touch> {
    touches
        .iter()
        .next()
        .or_else(|| touches.iter_just_released().next())
}

fn primary_pointer_world_pos(
    window: &Window,
    touches: &Touches,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    if let Some(touch) = active_touch(touches) {
        return cursor_world_pos(camera_q, touch.position());
    }
    let cursor = window.cursor_position()?;
    cursor_world_pos(camera_q, cursor)
}

fn track_pointer(
    windows_q: Query<&Window>,
    touches: Res<Touches>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<PointerWorld>,
) {
    let Ok(window) = windows_q.single() else {
        pointer.x = None;
        return;
    };
    pointer.x = primary_pointer_world_pos(window, &touches, &camera_q).map(|p| p.x);
}

/// Pointer release turns into one falling body of the current rank.
/// Requests while locked or after the run ended are ignored, not errors.
pub fn drop_on_release(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    pointer: Res<PointerWorld>,
    mut session: ResMut<GameSession>,
    mut cooldown: ResMut<DropCooldown>,
    cfg: Res<GameConfig>,
    assets: Res<FruitAssets>,
    mut commands: Commands,
) {
    let released = buttons.just_released(MouseButton::Left)
        || touches.iter_just_released().next().is_some();
    if !released || !session.can_drop() {
        return;
    }
    let Some(x) = pointer.x else {
        return;
    };

    let rank = session.take_drop(&mut rand::thread_rng(), cfg.drop.initial_fruit_range);
    cooldown.arm(cfg.drop.cooldown_secs);

    let Some(kind) = catalog::kind_of(rank) else {
        return;
    };
    let at = Vec2::new(
        clamp_drop_x(x, kind.radius, &cfg.world),
        cfg.world.spawn_y(),
    );
    spawn_fruit(&mut commands, &assets, &cfg.fruit, rank, at);
    info!(target: "drop", "dropped {} at x={:.1}", kind.name, at.x);
}

fn tick_drop_cooldown(
    time: Res<Time>,
    mut cooldown: ResMut<DropCooldown>,
    mut session: ResMut<GameSession>,
) {
    let Some(timer) = cooldown.timer.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).finished() {
        cooldown.timer = None;
        session.drop_locked = false;
    }
}
