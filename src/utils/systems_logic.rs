//! Systems logic: registers the scene setup and the per-frame update order.
//!
//! Each frame the orbit camera moves first, then input is turned into queued moves, then the
//! cube advances its current turn. Everything runs on the main schedule, one step per frame.

use bevy::prelude::*;

use crate::utils::animation::CubeAnimation;
use crate::utils::camera::{
    OrbitTouchState, orbit_mouse_input, orbit_touch_input, sync_camera_aspect,
    update_orbit_camera,
};
use crate::utils::config::CubeConfig;
use crate::utils::constants::scene_constants::BACKGROUND_COLOR;
use crate::utils::cube::update_cube;
use crate::utils::inputs::{CubeCommand, apply_cube_commands, handle_keyboard_input};
use crate::utils::objects::{CubeStatus, RandomGen};
use crate::utils::setup::setup_environment;

// Plugin for managing all the viewer systems.
pub struct SystemsLogicPlugin;

impl Plugin for SystemsLogicPlugin {
    /// Builds the plugin by adding the systems to the app.
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND_COLOR))
            .init_resource::<OrbitTouchState>()
            .init_resource::<CubeStatus>()
            // No-ops when the config plugin already inserted them
            .init_resource::<CubeConfig>()
            .init_resource::<CubeAnimation>()
            .init_resource::<RandomGen>()
            .add_message::<CubeCommand>()
            .add_systems(Startup, setup_environment)
            .add_systems(
                Update,
                (
                    sync_camera_aspect,
                    (orbit_mouse_input, orbit_touch_input, update_orbit_camera).chain(),
                    (handle_keyboard_input, apply_cube_commands).chain(),
                    update_cube,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::ButtonState;
    use bevy::input::keyboard::{Key, KeyboardInput};
    use std::f32::consts::FRAC_PI_2;

    use crate::utils::animation::Move;
    use crate::utils::constants::animation_constants::{SCRAMBLE_MOVES, TURN_FRAMES};
    use crate::utils::cube::spawn_cube;
    use crate::utils::face::Face;
    use crate::utils::objects::{
        CubeRoot, Cublet, CubletInner, FrontLabel, PersistentCamera, Sticker,
    };
    use crate::utils::orientation::label_rotation;

    fn spawn_test_cube(
        mut commands: Commands,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        spawn_cube(&mut commands, &mut meshes, &mut materials);
    }

    /// Headless app with the cube, a camera at `camera` and the input to cube update chain.
    fn cube_app(camera: Vec3) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<CubeConfig>()
            .init_resource::<CubeAnimation>()
            .init_resource::<CubeStatus>()
            .init_resource::<RandomGen>()
            .add_message::<KeyboardInput>()
            .add_message::<CubeCommand>()
            .add_systems(Startup, spawn_test_cube)
            .add_systems(
                Update,
                (
                    (handle_keyboard_input, apply_cube_commands).chain(),
                    update_cube,
                )
                    .chain(),
            );
        app.world_mut().spawn((
            Transform::from_translation(camera).looking_at(Vec3::ZERO, Vec3::Y),
            PersistentCamera,
        ));
        app.update();
        app
    }

    fn key(key_code: KeyCode, logical_key: Key, state: ButtonState) -> KeyboardInput {
        KeyboardInput {
            key_code,
            logical_key,
            state,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        }
    }

    fn character(key_code: KeyCode, character: &str, state: ButtonState) -> KeyboardInput {
        key(key_code, Key::Character(character.into()), state)
    }

    fn run_frames(app: &mut App, frames: u32) {
        for _ in 0..frames {
            app.update();
        }
    }

    /// Offsets and base rotations of all cublets.
    fn cublet_rotations(app: &mut App) -> Vec<(Vec3, Quat)> {
        let mut query = app.world_mut().query::<(&Transform, &Cublet)>();
        query
            .iter(app.world())
            .map(|(base, cublet)| (cublet.offset, base.rotation))
            .collect()
    }

    fn assert_slice_turned(app: &mut App, in_slice: impl Fn(Vec3) -> bool, expected: Quat) {
        let rotations = cublet_rotations(app);
        assert_eq!(rotations.len(), 26);
        let turned = rotations.iter().filter(|(offset, _)| in_slice(*offset)).count();
        assert_eq!(turned, 9);

        for (offset, rotation) in rotations {
            if in_slice(offset) {
                assert!(rotation.angle_between(expected) < 1e-3, "{offset:?}");
            } else {
                assert_eq!(rotation, Quat::IDENTITY, "{offset:?}");
            }
        }
    }

    #[test]
    fn test_spawned_hierarchy() {
        let mut app = cube_app(Vec3::new(200.0, 100.0, 50.0));
        let world = app.world_mut();

        let roots: Vec<Entity> = world
            .query_filtered::<Entity, With<CubeRoot>>()
            .iter(world)
            .collect();
        assert_eq!(roots.len(), 1);
        let root = roots[0];

        let mut cublets = world.query::<(&Cublet, &ChildOf)>();
        assert_eq!(cublets.iter(world).count(), 26);
        for (_, child_of) in cublets.iter(world) {
            assert_eq!(child_of.parent(), root);
        }

        let mut inners = world.query_filtered::<(&Transform, &ChildOf), With<CubletInner>>();
        assert_eq!(inners.iter(world).count(), 26);
        for (inner, child_of) in inners.iter(world) {
            let Some(cublet) = world.get::<Cublet>(child_of.parent()) else {
                panic!("inner entity must hang below a cublet");
            };
            assert_eq!(inner.translation, cublet.offset);
        }

        let stickers = world
            .query_filtered::<Entity, With<Sticker>>()
            .iter(world)
            .count();
        assert_eq!(stickers, 54);

        let mut labels = world.query_filtered::<&ChildOf, With<FrontLabel>>();
        let labels: Vec<Entity> = labels.iter(world).map(|child_of| child_of.parent()).collect();
        assert_eq!(labels, vec![root]);
    }

    #[test]
    fn test_key_release_turns_front_slice() {
        let mut app = cube_app(Vec3::new(200.0, 100.0, 50.0));
        app.world_mut()
            .write_message(character(KeyCode::KeyQ, "q", ButtonState::Pressed));
        app.world_mut()
            .write_message(character(KeyCode::KeyQ, "q", ButtonState::Released));
        run_frames(&mut app, TURN_FRAMES);

        assert_slice_turned(
            &mut app,
            |offset| offset.x > 0.0,
            Quat::from_axis_angle(Vec3::X, -FRAC_PI_2),
        );
        assert!(app.world().resource::<CubeAnimation>().is_idle());

        let status = app.world().resource::<CubeStatus>();
        assert_eq!(status.completed_moves, 1);
        assert!(!status.solved);
    }

    #[test]
    fn test_turn_follows_camera_sector() {
        // Looking from -Z the right side of the body is the visible front
        let mut app = cube_app(Vec3::new(0.0, 100.0, -200.0));
        app.world_mut().write_message(CubeCommand::Turn {
            face: Face::Front,
            prime: false,
        });
        run_frames(&mut app, TURN_FRAMES);

        assert_slice_turned(
            &mut app,
            |offset| offset.z < 0.0,
            Quat::from_axis_angle(Face::Right.axis(), -FRAC_PI_2),
        );
        assert!(app.world().resource::<CubeAnimation>().is_idle());

        let world = app.world_mut();
        let labels: Vec<Quat> = world
            .query_filtered::<&Transform, With<FrontLabel>>()
            .iter(world)
            .map(|label| label.rotation)
            .collect();
        assert_eq!(labels, vec![label_rotation(Face::Right)]);
    }

    #[test]
    fn test_commands_play_in_order() {
        let mut app = cube_app(Vec3::new(200.0, 100.0, 50.0));
        app.world_mut()
            .write_message(character(KeyCode::KeyQ, "q", ButtonState::Released));
        app.world_mut()
            .write_message(character(KeyCode::KeyW, "w", ButtonState::Released));

        run_frames(&mut app, TURN_FRAMES);
        let animation = app.world().resource::<CubeAnimation>();
        assert_eq!(animation.current(), None);
        assert_eq!(
            animation.pending().copied().collect::<Vec<_>>(),
            vec![Move::new(Face::Up, false)]
        );

        run_frames(&mut app, TURN_FRAMES);
        assert!(app.world().resource::<CubeAnimation>().is_idle());
        assert_eq!(app.world().resource::<CubeStatus>().completed_moves, 2);
    }

    #[test]
    fn test_scramble_with_control_released_in_same_frame() {
        let mut app = cube_app(Vec3::new(200.0, 100.0, 50.0));
        for event in [
            key(KeyCode::ControlLeft, Key::Control, ButtonState::Pressed),
            character(KeyCode::KeyX, "x", ButtonState::Pressed),
            character(KeyCode::KeyX, "x", ButtonState::Released),
            key(KeyCode::ControlLeft, Key::Control, ButtonState::Released),
        ] {
            app.world_mut().write_message(event);
        }
        app.update();

        let animation = app.world().resource::<CubeAnimation>();
        assert!(animation.current().is_some());
        assert_eq!(animation.pending_len(), SCRAMBLE_MOVES - 1);
    }

    #[test]
    fn test_x_without_control_does_nothing() {
        let mut app = cube_app(Vec3::new(200.0, 100.0, 50.0));
        app.world_mut()
            .write_message(character(KeyCode::KeyX, "x", ButtonState::Released));
        app.update();

        assert!(app.world().resource::<CubeAnimation>().is_idle());
    }
}
