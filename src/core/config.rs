use std::{fs, path::Path};

use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;

use crate::core::catalog::{FRUITS, WINNING_RANK};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Fruit Drop".into(),
        }
    }
}

/// Fixed play-area dimensions, centered at the origin, y-up.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    /// Distance below the top edge where dropped fruits appear.
    pub spawn_offset: f32,
    /// Distance below the top edge of the danger line.
    pub danger_line_offset: f32,
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 700.0,
            wall_thickness: 20.0,
            spawn_offset: 20.0,
            danger_line_offset: 60.0,
        }
    }
}
impl WorldConfig {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }
    pub fn spawn_y(&self) -> f32 {
        self.half_height() - self.spawn_offset
    }
    pub fn danger_line_y(&self) -> f32 {
        self.half_height() - self.danger_line_offset
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DropConfig {
    /// Seconds between consecutive drops.
    pub cooldown_secs: f32,
    /// Droppable ranks are drawn uniformly from `[0, initial_fruit_range)`.
    /// The one difficulty knob.
    pub initial_fruit_range: usize,
}
impl Default for DropConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 0.5,
            initial_fruit_range: 4,
        }
    }
}

/// Body properties shared by every fruit. Near-zero friction and density
/// keep merges responsive.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FruitBodyConfig {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}
impl Default for FruitBodyConfig {
    fn default() -> Self {
        Self {
            restitution: 0.2,
            friction: 0.05,
            density: 0.001,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameOverConfig {
    /// Seconds a fruit may stay above the danger line before the run ends.
    pub grace_secs: f32,
}
impl Default for GameOverConfig {
    fn default() -> Self {
        Self { grace_secs: 3.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub drop: DropConfig,
    pub fruit: FruitBodyConfig,
    pub game_over: GameOverConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg = ron::from_str(&txt)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    /// Non-fatal sanity checks, logged at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            w.push("world dimensions must be > 0".into());
        }
        let widest = FRUITS[WINNING_RANK].radius * 2.0;
        if self.world.width > 0.0 && self.world.width < widest {
            w.push(format!(
                "world.width {} narrower than the largest fruit ({widest})",
                self.world.width
            ));
        }
        if self.world.danger_line_offset >= self.world.height {
            w.push(format!(
                "world.danger_line_offset {} below the floor",
                self.world.danger_line_offset
            ));
        }
        if self.drop.cooldown_secs < 0.0 {
            w.push(format!(
                "drop.cooldown_secs {} negative -> treated as instant unlock",
                self.drop.cooldown_secs
            ));
        }
        if self.drop.initial_fruit_range == 0 {
            w.push("drop.initial_fruit_range is 0; clamped to 1".into());
        }
        if self.drop.initial_fruit_range > FRUITS.len() {
            w.push(format!(
                "drop.initial_fruit_range {} exceeds the catalog ({}); clamped",
                self.drop.initial_fruit_range,
                FRUITS.len()
            ));
        }
        if !(0.0..=1.5).contains(&self.fruit.restitution) {
            w.push(format!(
                "fruit.restitution {} outside recommended 0..1.5",
                self.fruit.restitution
            ));
        }
        if self.fruit.friction < 0.0 {
            w.push("fruit.friction negative".into());
        }
        if self.fruit.density <= 0.0 {
            w.push("fruit.density must be > 0".into());
        }
        if self.game_over.grace_secs <= 0.0 {
            w.push(format!(
                "game_over.grace_secs {} not positive; any overflow ends the run immediately",
                self.game_over.grace_secs
            ));
        }
        w
    }
}
