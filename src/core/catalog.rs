//! Static fruit table. Rank == index into [`FRUITS`]; every fruit merges into
//! the next rank, except the watermelon which tops out the chain.
use bevy::color::Srgba;

/// One entry in the merge chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FruitKind {
    pub name: &'static str,
    /// Collider radius in world units.
    pub radius: f32,
    /// Points awarded when a merge produces this fruit.
    pub score: u32,
    /// Flat fallback color when the sprite is unavailable.
    pub color: Srgba,
    /// Asset path of the sprite image.
    pub sprite: &'static str,
}

/// Rank of the watermelon; producing one wins the run.
pub const WINNING_RANK: usize = 10;

const fn rgb(red: f32, green: f32, blue: f32) -> Srgba {
    Srgba {
        red,
        green,
        blue,
        alpha: 1.0,
    }
}

#[rustfmt::skip]
pub const FRUITS: [FruitKind; 11] = [
    FruitKind { name: "cherry",     radius: 20.0,  score: 10,  color: rgb(0.86, 0.11, 0.22), sprite: "fruits/00_cherry.png" },
    FruitKind { name: "strawberry", radius: 30.0,  score: 20,  color: rgb(0.91, 0.30, 0.33), sprite: "fruits/01_strawberry.png" },
    FruitKind { name: "grape",      radius: 40.0,  score: 30,  color: rgb(0.58, 0.44, 0.86), sprite: "fruits/02_grape.png" },
    FruitKind { name: "tangerine",  radius: 50.0,  score: 40,  color: rgb(1.00, 0.63, 0.26), sprite: "fruits/03_tangerine.png" },
    FruitKind { name: "orange",     radius: 60.0,  score: 50,  color: rgb(1.00, 0.55, 0.00), sprite: "fruits/04_orange.png" },
    FruitKind { name: "apple",      radius: 70.0,  score: 60,  color: rgb(0.84, 0.17, 0.13), sprite: "fruits/05_apple.png" },
    FruitKind { name: "pear",       radius: 80.0,  score: 70,  color: rgb(0.85, 0.44, 0.84), sprite: "fruits/06_pear.png" },
    FruitKind { name: "peach",      radius: 90.0,  score: 80,  color: rgb(0.54, 0.17, 0.89), sprite: "fruits/07_peach.png" },
    FruitKind { name: "pineapple",  radius: 100.0, score: 90,  color: rgb(0.29, 0.00, 0.51), sprite: "fruits/08_pineapple.png" },
    FruitKind { name: "melon",      radius: 110.0, score: 100, color: rgb(0.00, 0.00, 0.80), sprite: "fruits/09_melon.png" },
    FruitKind { name: "watermelon", radius: 120.0, score: 110, color: rgb(0.00, 0.75, 1.00), sprite: "fruits/10_watermelon.png" },
];

/// Catalog lookup; `None` outside `[0, 10]`.
pub fn kind_of(rank: usize) -> Option<&'static FruitKind> {
    FRUITS.get(rank)
}

/// Rank produced when two fruits of `rank` merge; `None` for the watermelon
/// (and for ranks outside the catalog).
pub fn successor_of(rank: usize) -> Option<usize> {
    (rank < WINNING_RANK).then_some(rank + 1)
}
