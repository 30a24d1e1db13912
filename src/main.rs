//! Start-up for the cube viewer, with window, plugins, and resources.

use bevy::{prelude::*, window::*};

use rubik_cube_3d::utils::{
    config::ConfigPlugin, debug_functions::DebugFunctionsPlugin,
    systems_logic::SystemsLogicPlugin,
};

/// Entry point for the application
fn main() {
    let window = Some(Window {
        title: "Rubik's Cube".into(),
        #[cfg(target_arch = "wasm32")]
        canvas: Some("#cube-canvas".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    });

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: window,
                ..default()
            }),
            // After the default plugins so configuration warnings reach the log
            ConfigPlugin,
            SystemsLogicPlugin,
            DebugFunctionsPlugin,
        ))
        .run();
}
