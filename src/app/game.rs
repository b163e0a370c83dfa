use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::session::GameSession;
use crate::core::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
#[cfg(feature = "debug")]
use crate::debug::DebugPlugin;
use crate::gameplay::drop::DropPlugin;
use crate::gameplay::game_over::GameOverPlugin;
use crate::gameplay::merge::MergePlugin;
use crate::gameplay::restart::RestartPlugin;
use crate::physics::PhysicsSetupPlugin;
use crate::rendering::assets::FruitAssetsPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::preview::PreviewPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<GameSession>()
            .init_state::<AppState>()
            .configure_sets(
                Update,
                (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
            )
            .add_plugins((
                CameraPlugin,
                FruitAssetsPlugin,
                PhysicsSetupPlugin,
                DropPlugin,
                MergePlugin,
                GameOverPlugin,
                RestartPlugin,
                PreviewPlugin,
                HudPlugin,
                #[cfg(feature = "debug")]
                DebugPlugin,
            ));
    }
}
