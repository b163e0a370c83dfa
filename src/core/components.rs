use bevy::prelude::*;

/// Rank tag for a fruit entity (the parent holding the physics body and
/// collider; visuals live on a child).
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fruit {
    pub rank: usize,
}

/// Logical radius used for the collider, visual scale and the danger-line test.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct FruitRadius(pub f32);

/// Marker for the static boundary bodies (floor, walls, sensor line).
#[derive(Component)]
pub struct Boundary;

/// Marker for the danger-line sensor near the top of the arena.
#[derive(Component)]
pub struct DangerLine;
