//! Implementation of a damped orbit camera around the cube, driven by mouse and touch.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::touch::Touch;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use std::f32::consts::{PI, TAU};

use crate::utils::config::CameraConfig;
use crate::utils::constants::camera_3d_constants::{CAMERA_3D_POLAR_EPSILON, CAMERA_3D_ZOOM_STEP};

/// Orbit state of the camera, in spherical coordinates around `target`.
/// Panning is not supported, the camera always looks at `target`.
#[derive(Component, Debug, Clone)]
pub struct OrbitController {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around Y, measured from +Z toward +X
    pub azimuth: f32,
    /// Angle from +Y
    pub polar: f32,
    // Rotation still to be applied, drained by damping
    pub azimuth_delta: f32,
    pub polar_delta: f32,
    // Radius multiplier collected since the last update
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl OrbitController {
    pub fn new(position: Vec3, target: Vec3, config: &CameraConfig) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar,
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            zoom_scale: 1.0,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping_factor: config.damping_factor.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
        }
    }

    /// Queues a rotation for a pointer drag of `delta` pixels on a viewport `viewport_height` tall.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.azimuth_delta -= TAU * delta.x / viewport_height * self.rotate_speed;
        self.polar_delta -= TAU * delta.y / viewport_height * self.rotate_speed;
    }

    /// Moves toward the target by one wheel notch per positive step, away for negative steps.
    pub fn zoom_steps(&mut self, steps: f32) {
        self.zoom_scale *= CAMERA_3D_ZOOM_STEP.powf(self.zoom_speed * steps);
    }

    /// Scales the orbit radius by `ratio` (below one moves closer).
    pub fn zoom_ratio(&mut self, ratio: f32) {
        if ratio.is_finite() && ratio > 0.0 {
            self.zoom_scale *= ratio;
        }
    }

    /// Applies the damped share of pending rotation and zoom, returns the new camera position.
    pub fn update(&mut self) -> Vec3 {
        let damping = self.damping_factor;
        if damping > 0.0 {
            self.azimuth += self.azimuth_delta * damping;
            self.polar += self.polar_delta * damping;
            self.azimuth_delta *= 1.0 - damping;
            self.polar_delta *= 1.0 - damping;
        } else {
            self.azimuth += self.azimuth_delta;
            self.polar += self.polar_delta;
            self.azimuth_delta = 0.0;
            self.polar_delta = 0.0;
        }

        self.polar = self
            .polar
            .clamp(CAMERA_3D_POLAR_EPSILON, PI - CAMERA_3D_POLAR_EPSILON);
        self.radius = (self.radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);
        self.zoom_scale = 1.0;

        self.position()
    }

    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_polar * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_polar * self.azimuth.cos(),
                )
    }
}

/// Touch tracking for the orbit camera: one finger rotates, two fingers pinch to zoom.
#[derive(Resource, Default, Debug)]
pub struct OrbitTouchState {
    pub pinch_distance: Option<f32>,
}

fn viewport_height(windows: &Query<&Window, With<PrimaryWindow>>) -> f32 {
    windows
        .single()
        .map(|window| window.height())
        .unwrap_or(0.0)
}

/// Drag with the left mouse button to orbit, scroll to zoom.
pub fn orbit_mouse_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut controllers: Query<&mut OrbitController>,
) {
    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let scroll: f32 = mouse_wheel.read().map(|wheel| wheel.y.signum()).sum();

    let Ok(mut controller) = controllers.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        controller.rotate_by_pixels(drag, viewport_height(&windows));
    }
    if scroll != 0.0 {
        controller.zoom_steps(scroll);
    }
}

/// Touch gestures for the orbit camera.
pub fn orbit_touch_input(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut touch_state: ResMut<OrbitTouchState>,
    mut controllers: Query<&mut OrbitController>,
) {
    let Ok(mut controller) = controllers.single_mut() else {
        return;
    };

    let active: Vec<&Touch> = touches.iter().collect();
    match active.as_slice() {
        [touch] => {
            touch_state.pinch_distance = None;
            controller.rotate_by_pixels(touch.delta(), viewport_height(&windows));
        }
        [first, second, ..] => {
            let distance = first.position().distance(second.position());
            if let Some(previous) = touch_state.pinch_distance {
                if distance > 0.0 {
                    controller.zoom_ratio(previous / distance);
                }
            }
            touch_state.pinch_distance = Some(distance);
        }
        [] => touch_state.pinch_distance = None,
    }
}

/// Moves the camera to the controller's position, looking at its target.
pub fn update_orbit_camera(mut cameras: Query<(&mut OrbitController, &mut Transform)>) {
    for (mut controller, mut transform) in cameras.iter_mut() {
        transform.translation = controller.update();
        transform.look_at(controller.target, Vec3::Y);
    }
}

/// Keeps the camera aspect ratio in sync with the window on every resize.
pub fn sync_camera_aspect(
    mut resized: MessageReader<WindowResized>,
    mut projections: Query<&mut Projection, With<OrbitController>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    if last.width <= 0.0 || last.height <= 0.0 {
        return;
    }

    for mut projection in projections.iter_mut() {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = last.width / last.height;
        }
    }
    debug!("Viewport resized to {}x{}", last.width, last.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::camera_3d_constants::{
        CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
    };

    fn initial_controller() -> OrbitController {
        OrbitController::new(
            Vec3::new(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z),
            Vec3::ZERO,
            &CameraConfig::default(),
        )
    }

    #[test]
    fn test_spherical_round_trip_keeps_start_position() {
        let controller = initial_controller();
        let start = Vec3::new(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z);
        assert!((controller.position() - start).length() < 1e-2);
    }

    #[test]
    fn test_idle_update_does_not_move() {
        let mut controller = initial_controller();
        let before = controller.position();
        let after = controller.update();
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn test_damping_spreads_rotation_over_frames() {
        let mut controller = initial_controller();
        let start_azimuth = controller.azimuth;
        controller.rotate_by_pixels(Vec2::new(-100.0, 0.0), 800.0);
        let total = controller.azimuth_delta;

        controller.update();
        let first = controller.azimuth - start_azimuth;
        assert!((first - total * controller.damping_factor).abs() < 1e-5);

        for _ in 0..500 {
            controller.update();
        }
        assert!((controller.azimuth - start_azimuth - total).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut controller = initial_controller();
        controller.zoom_steps(1_000.0);
        controller.update();
        assert!((controller.radius - controller.min_distance).abs() < 1e-3);

        controller.zoom_steps(-1_000.0);
        controller.update();
        assert!((controller.radius - controller.max_distance).abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_stays_off_the_poles() {
        let mut controller = initial_controller();
        controller.damping_factor = 0.0;
        controller.polar_delta = 10.0;
        controller.update();
        assert!(controller.polar < PI);
        controller.polar_delta = -20.0;
        controller.update();
        assert!(controller.polar > 0.0);
    }

    #[test]
    fn test_pinch_ratio_ignores_degenerate_values() {
        let mut controller = initial_controller();
        controller.zoom_ratio(0.0);
        controller.zoom_ratio(f32::NAN);
        assert_eq!(controller.zoom_scale, 1.0);
        controller.zoom_ratio(0.5);
        assert_eq!(controller.zoom_scale, 0.5);
    }
}
