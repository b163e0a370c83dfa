use bevy::prelude::*;
use rand::Rng;

use crate::core::catalog::FRUITS;
use crate::core::config::GameConfig;

/// Mutable state of one run. Owned by the ECS as a plain resource; tick and
/// input systems mutate it directly, so no state is ever captured by value
/// in callbacks.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub score: u32,
    /// Rank of the fruit about to be dropped.
    pub current_rank: usize,
    /// Rank queued after that, shown in the HUD.
    pub next_rank: usize,
    pub drop_locked: bool,
    pub game_over: bool,
    pub game_won: bool,
}

impl GameSession {
    pub fn new(rng: &mut impl Rng, initial_range: usize) -> Self {
        let range = clamped_range(initial_range);
        Self {
            score: 0,
            current_rank: rng.gen_range(0..range),
            next_rank: rng.gen_range(0..range),
            drop_locked: false,
            game_over: false,
            game_won: false,
        }
    }

    /// True while drop requests are accepted.
    pub fn can_drop(&self) -> bool {
        !self.drop_locked && !self.game_over && !self.game_won
    }

    /// Locks dropping and shifts the queue: the queued rank becomes current
    /// and a fresh one is drawn. Returns the rank to drop.
    pub fn take_drop(&mut self, rng: &mut impl Rng, initial_range: usize) -> usize {
        let dropped = self.current_rank;
        self.drop_locked = true;
        self.current_rank = self.next_rank;
        self.next_rank = rng.gen_range(0..clamped_range(initial_range));
        dropped
    }

    pub fn reset(&mut self, rng: &mut impl Rng, initial_range: usize) {
        *self = Self::new(rng, initial_range);
    }
}

fn clamped_range(initial_range: usize) -> usize {
    initial_range.clamp(1, FRUITS.len())
}

impl FromWorld for GameSession {
    fn from_world(world: &mut World) -> Self {
        let range = world
            .get_resource::<GameConfig>()
            .map_or_else(|| GameConfig::default().drop.initial_fruit_range, |c| {
                c.drop.initial_fruit_range
            });
        Self::new(&mut rand::thread_rng(), range)
    }
}
