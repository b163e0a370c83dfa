use bevy::prelude::*;

use fruit_drop::core::config::GameConfig;
use fruit_drop::GamePlugin;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Load configuration (fall back to defaults if missing). The logger is
    // not up yet, so startup diagnostics go to stderr.
    let cfg = match GameConfig::load_from_file("assets/config/game.ron") {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config: {e:#}; using defaults");
            GameConfig::default()
        }
    };
    for warning in cfg.validate() {
        eprintln!("config: {warning}");
    }

    App::new()
        .insert_resource(cfg.clone())
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.world.width, cfg.world.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins(GamePlugin)
        .run();
}
