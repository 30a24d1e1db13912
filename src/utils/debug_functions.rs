//! Debug functions for the viewer.
use bevy::{prelude::*, window::*};

use crate::utils::constants::cube_constants::{CUBLET_SPACING, SLICE_THRESHOLD};
use crate::utils::face::Face;

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_vsync, visualize_slice_thresholds));
    }
}

/// Toggles VSync when the 'V' key is pressed.
fn toggle_vsync(input: Res<ButtonInput<KeyCode>>, mut window: Query<&mut Window>) {
    if !input.just_pressed(KeyCode::KeyV) {
        return;
    }
    let Ok(mut window) = window.single_mut() else {
        return;
    };

    window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
        PresentMode::AutoNoVsync
    } else {
        PresentMode::AutoVsync
    };

    info!("PRESENT_MODE: {:?}", window.present_mode);
}

/// Corners of the square where the selection plane of `face` cuts the cube.
pub fn slice_threshold_outline(face: Face) -> [Vec3; 4] {
    let normal = face.axis();
    let center = normal * SLICE_THRESHOLD;
    let half = CUBLET_SPACING * 1.5;
    let (tangent, bitangent) = normal.any_orthonormal_pair();
    [
        center + (tangent + bitangent) * half,
        center + (tangent - bitangent) * half,
        center - (tangent + bitangent) * half,
        center - (tangent - bitangent) * half,
    ]
}

/// Draws the six slice selection planes when the 'G' key toggles them on.
fn visualize_slice_thresholds(
    mut gizmos: Gizmos,
    input: Res<ButtonInput<KeyCode>>,
    mut show_slices: Local<bool>,
) {
    if input.just_pressed(KeyCode::KeyG) {
        *show_slices = !*show_slices;
        info!("Slice threshold visualization: {}", *show_slices);
    }

    if *show_slices {
        for face in Face::ALL {
            let corners = slice_threshold_outline(face);
            for i in 0..corners.len() {
                gizmos.line(corners[i], corners[(i + 1) % corners.len()], face.color());
            }
        }
    }
}
