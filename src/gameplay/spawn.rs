use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::catalog;
use crate::core::components::{Fruit, FruitRadius};
use crate::core::config::FruitBodyConfig;
use crate::rendering::assets::FruitAssets;

/// Spawns one dynamic fruit body with its visual child. `rank` must be a
/// valid catalog index; anything else is a programmer error and panics.
pub fn spawn_fruit(
    commands: &mut Commands,
    assets: &FruitAssets,
    body: &FruitBodyConfig,
    rank: usize,
    position: Vec2,
) -> Entity {
    let kind = catalog::kind_of(rank)
        .unwrap_or_else(|| panic!("rank {rank} outside the fruit catalog"));

    let mut fruit = commands.spawn((
        Name::new(kind.name),
        Fruit { rank },
        FruitRadius(kind.radius),
        RigidBody::Dynamic,
        Collider::ball(kind.radius),
        Restitution::coefficient(body.restitution),
        Friction::coefficient(body.friction),
        ColliderMassProperties::Density(body.density),
        ActiveEvents::COLLISION_EVENTS,
        Velocity::zero(),
        Transform::from_translation(position.extend(0.0)),
        GlobalTransform::default(),
        Visibility::default(),
    ));
    fruit.with_children(|parent| {
        if assets.sprite_loaded(rank) {
            parent.spawn((
                Sprite {
                    image: assets.sprites[rank].clone(),
                    custom_size: Some(Vec2::splat(kind.radius * 2.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
        } else {
            // Sprite missing or failed to load: flat colored circle.
            parent.spawn((
                Mesh2d(assets.circle.clone()),
                MeshMaterial2d(assets.palette[rank].clone()),
                Transform::from_xyz(0.0, 0.0, 0.2).with_scale(Vec3::splat(kind.radius * 2.0)),
            ));
        }
    });
    fruit.id()
}
