use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::catalog::{self, FruitKind};
use crate::core::config::GameConfig;
use crate::core::session::GameSession;
use crate::gameplay::drop::{clamp_drop_x, PointerWorld};
use crate::rendering::assets::FruitAssets;

/// Ghost of the fruit about to be dropped, following the pointer at spawn
/// height. Rebuilt whenever the current rank changes.
#[derive(Component)]
struct PreviewFruit {
    rank: usize,
}

pub struct PreviewPlugin;

impl Plugin for PreviewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_preview.run_if(in_state(AppState::Playing)));
    }
}

fn update_preview(
    pointer: Res<PointerWorld>,
    session: Res<GameSession>,
    cfg: Res<GameConfig>,
    assets: Res<FruitAssets>,
    mut preview_q: Query<(Entity, &mut Transform, &mut Visibility, &PreviewFruit)>,
    mut commands: Commands,
) {
    let rank = session.current_rank;
    let Some(kind) = catalog::kind_of(rank) else {
        return;
    };
    let shown = pointer.x.is_some() && !session.game_over && !session.game_won;
    let x = pointer
        .x
        .map_or(0.0, |x| clamp_drop_x(x, kind.radius, &cfg.world));
    let at = Vec3::new(x, cfg.world.spawn_y(), 0.5);

    match preview_q.single_mut() {
        Ok((entity, mut tf, mut visibility, preview)) => {
            if preview.rank != rank {
                commands.entity(entity).despawn();
                spawn_preview(&mut commands, &assets, rank, kind, at, shown);
                return;
            }
            tf.translation = at;
            *visibility = if shown {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
        Err(_) => spawn_preview(&mut commands, &assets, rank, kind, at, shown),
    }
}

fn spawn_preview(
    commands: &mut Commands,
    assets: &FruitAssets,
    rank: usize,
    kind: &FruitKind,
    at: Vec3,
    shown: bool,
) {
    let visibility = if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    commands
        .spawn((
            Name::new("PreviewFruit"),
            PreviewFruit { rank },
            Transform::from_translation(at),
            GlobalTransform::default(),
            visibility,
        ))
        .with_children(|parent| {
            if assets.sprite_loaded(rank) {
                parent.spawn(Sprite {
                    image: assets.sprites[rank].clone(),
                    color: Color::srgba(1.0, 1.0, 1.0, 0.6),
                    custom_size: Some(Vec2::splat(kind.radius * 2.0)),
                    ..default()
                });
            } else {
                parent.spawn((
                    Mesh2d(assets.circle.clone()),
                    MeshMaterial2d(assets.palette[rank].clone()),
                    Transform::from_scale(Vec3::splat(kind.radius * 2.0)),
                ));
            }
        });
}
