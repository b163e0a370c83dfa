use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
    }
}

// Window logical size == world size, so the default 2D camera frames the
// arena exactly.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2d));
}
