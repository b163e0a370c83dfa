use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;
use smallvec::SmallVec;

use crate::app::state::AppState;
use crate::core::catalog::{self, WINNING_RANK};
use crate::core::components::Fruit;
use crate::core::config::GameConfig;
use crate::core::session::GameSession;
use crate::core::system_order::PostPhysicsAdjustSet;
use crate::gameplay::spawn::spawn_fruit;
use crate::rendering::assets::FruitAssets;

pub struct MergePlugin;

impl Plugin for MergePlugin {
    fn build(&self, app: &mut App) {
        // No-op when the Rapier plugin already registered the event.
        app.add_event::<CollisionEvent>().add_systems(
            Update,
            resolve_merges
                .in_set(PostPhysicsAdjustSet)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

/// A fruit body as the planner sees it: identity, rank, position.
#[derive(Debug, Clone, Copy)]
pub struct MergeBody {
    pub entity: Entity,
    pub rank: usize,
    pub position: Vec2,
}

/// Planned outcome for one equal-rank pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePlan {
    pub consumed: [Entity; 2],
    pub spawn_rank: usize,
    pub midpoint: Vec2,
    pub score: u32,
    pub wins: bool,
}

/// Turns one tick's collision pairs into merge outcomes. Pairs whose ranks
/// differ are left alone, as are top-rank pairs (the watermelon has no
/// successor; two of them just keep colliding). A body consumed by an
/// earlier pair is dead and is never reused within the same tick.
pub fn plan_merges(pairs: &[(MergeBody, MergeBody)]) -> SmallVec<[MergePlan; 4]> {
    let mut consumed: HashSet<Entity> = HashSet::new();
    let mut plans = SmallVec::new();
    for (a, b) in pairs {
        if a.rank != b.rank {
            continue;
        }
        if consumed.contains(&a.entity) || consumed.contains(&b.entity) {
            continue;
        }
        let Some(next) = catalog::successor_of(a.rank) else {
            continue;
        };
        let Some(kind) = catalog::kind_of(next) else {
            continue;
        };
        consumed.insert(a.entity);
        consumed.insert(b.entity);
        plans.push(MergePlan {
            consumed: [a.entity, b.entity],
            spawn_rank: next,
            midpoint: (a.position + b.position) * 0.5,
            score: kind.score,
            wins: next == WINNING_RANK,
        });
    }
    plans
}

/// Applies the tick's merges: two equal-rank bodies out, one successor in at
/// their midpoint, successor's score added. Entities already despawned by an
/// earlier tick simply fail the query lookup and are skipped.
pub fn resolve_merges(
    mut collisions: EventReader<CollisionEvent>,
    fruits: Query<(&Fruit, &Transform)>,
    mut session: ResMut<GameSession>,
    cfg: Res<GameConfig>,
    assets: Res<FruitAssets>,
    mut commands: Commands,
) {
    if session.game_over {
        collisions.clear();
        return;
    }

    let mut pairs: Vec<(MergeBody, MergeBody)> = Vec::new();
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };
        let (Ok((fruit_a, tf_a)), Ok((fruit_b, tf_b))) = (fruits.get(*a), fruits.get(*b))
        else {
            continue;
        };
        pairs.push((
            MergeBody {
                entity: *a,
                rank: fruit_a.rank,
                position: tf_a.translation.truncate(),
            },
            MergeBody {
                entity: *b,
                rank: fruit_b.rank,
                position: tf_b.translation.truncate(),
            },
        ));
    }
    if pairs.is_empty() {
        return;
    }

    for plan in plan_merges(&pairs) {
        for entity in plan.consumed {
            commands.entity(entity).despawn();
        }
        spawn_fruit(&mut commands, &assets, &cfg.fruit, plan.spawn_rank, plan.midpoint);
        session.score += plan.score;
        if plan.wins && !session.game_won {
            session.game_won = true;
            info!(target: "merge", "watermelon made; run won at score {}", session.score);
        }
    }
}
