use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::catalog::FRUITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpriteSlot {
    Pending,
    Loaded,
    /// Load failed; the colored circle mesh stands in.
    Fallback,
}

/// Shared handles for fruit visuals, one slot per rank.
#[derive(Resource, Debug, Clone)]
pub struct FruitAssets {
    pub circle: Handle<Mesh>,
    pub palette: Vec<Handle<ColorMaterial>>,
    pub sprites: Vec<Handle<Image>>,
    slots: Vec<SpriteSlot>,
}

impl FruitAssets {
    pub fn sprite_loaded(&self, rank: usize) -> bool {
        self.slots.get(rank) == Some(&SpriteSlot::Loaded)
    }

    /// Handles only, nothing behind them. For headless tests.
    pub fn placeholder() -> Self {
        Self {
            circle: Handle::default(),
            palette: vec![Handle::default(); FRUITS.len()],
            sprites: vec![Handle::default(); FRUITS.len()],
            slots: vec![SpriteSlot::Fallback; FRUITS.len()],
        }
    }
}

pub struct FruitAssetsPlugin;

impl Plugin for FruitAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_fruit_assets).add_systems(
            Update,
            poll_sprite_loads.run_if(in_state(AppState::Loading)),
        );
    }
}

fn load_fruit_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let circle = meshes.add(Mesh::from(Circle { radius: 0.5 }));
    let palette = FRUITS
        .iter()
        .map(|kind| materials.add(Color::Srgba(kind.color)))
        .collect();
    let sprites = FRUITS
        .iter()
        .map(|kind| asset_server.load(kind.sprite))
        .collect();
    commands.insert_resource(FruitAssets {
        circle,
        palette,
        sprites,
        slots: vec![SpriteSlot::Pending; FRUITS.len()],
    });
}

/// Readiness gate: wait until every sprite reaches a terminal load state.
/// A failed load is logged and counts as done, so the game never hangs on a
/// missing asset.
fn poll_sprite_loads(
    asset_server: Res<AssetServer>,
    mut assets: ResMut<FruitAssets>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let mut resolved: Vec<(usize, SpriteSlot)> = Vec::new();
    let mut pending = 0usize;
    for (rank, handle) in assets.sprites.iter().enumerate() {
        if assets.slots[rank] != SpriteSlot::Pending {
            continue;
        }
        match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => resolved.push((rank, SpriteSlot::Loaded)),
            Some(LoadState::Failed(err)) => {
                error!(
                    target: "fruit_assets",
                    "sprite {} failed to load: {err}; using flat circle",
                    FRUITS[rank].sprite
                );
                resolved.push((rank, SpriteSlot::Fallback));
            }
            _ => pending += 1,
        }
    }
    for (rank, slot) in resolved {
        assets.slots[rank] = slot;
    }
    if pending == 0 && assets.slots.iter().all(|s| *s != SpriteSlot::Pending) {
        let loaded = assets
            .slots
            .iter()
            .filter(|s| **s == SpriteSlot::Loaded)
            .count();
        info!(
            target: "fruit_assets",
            "fruit sprites ready ({loaded} of {} loaded)",
            FRUITS.len()
        );
        next_state.set(AppState::Playing);
    }
}
