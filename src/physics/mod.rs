use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Boundary, DangerLine};
use crate::core::config::GameConfig;

/// Wrapper configuring Rapier and spawning the static arena bodies.
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            100.0,
        ))
        .add_systems(Startup, spawn_arena);
    }
}

/// Floor, two side walls and the danger-line sensor. Spawned once; a restart
/// leaves them in place and only clears the fruit bodies.
pub fn spawn_arena(mut commands: Commands, cfg: Res<GameConfig>) {
    let world = &cfg.world;
    let half_w = world.half_width();
    let half_h = world.half_height();
    let half_t = world.wall_thickness * 0.5;
    let wall_color = Color::srgba(0.55, 0.42, 0.28, 0.9);

    let walls = [
        ("Floor", Vec2::new(0.0, -half_h + half_t), Vec2::new(half_w, half_t)),
        ("WallLeft", Vec2::new(-half_w + half_t, 0.0), Vec2::new(half_t, half_h)),
        ("WallRight", Vec2::new(half_w - half_t, 0.0), Vec2::new(half_t, half_h)),
    ];
    for (name, pos, half_extents) in walls {
        commands
            .spawn((
                Name::new(name),
                Boundary,
                RigidBody::Fixed,
                Collider::cuboid(half_extents.x, half_extents.y),
                Transform::from_translation(pos.extend(0.0)),
                GlobalTransform::default(),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite {
                        color: wall_color,
                        custom_size: Some(half_extents * 2.0),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }

    // Thin sensor marking the overflow height. Contacts with it are never
    // resolved; the game-over monitor reads fruit positions instead.
    commands
        .spawn((
            Name::new("DangerLine"),
            Boundary,
            DangerLine,
            RigidBody::Fixed,
            Collider::cuboid(half_w, 1.0),
            Sensor,
            Transform::from_xyz(0.0, world.danger_line_y(), 0.0),
            GlobalTransform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite {
                    color: Color::srgba(1.0, 0.9, 0.2, 0.6),
                    custom_size: Some(Vec2::new(world.width, 2.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}
