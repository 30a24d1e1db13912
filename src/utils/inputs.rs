//! Keyboard bindings for the cube.
//! Key releases are translated into `CubeCommand` messages, which are applied against the
//! current camera orientation before the cube update runs.

use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::utils::animation::{CubeAnimation, Trigger};
use crate::utils::config::CubeConfig;
use crate::utils::face::Face;
use crate::utils::objects::{PersistentCamera, RandomGen};
use crate::utils::orientation::calculate_front_face;

/// Something the user asked the cube to do
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeCommand {
    /// Quarter turn of the face seen from the current viewpoint
    Turn { face: Face, prime: bool },
    Trigger(Trigger),
    Scramble,
}

/// Command bound to a released key, `None` for keys without a binding.
/// Upper case letters (shift held) select the prime turn.
pub fn binding_for(key: &str, ctrl: bool) -> Option<CubeCommand> {
    let turn = |face, prime| Some(CubeCommand::Turn { face, prime });

    match key {
        "x" if ctrl => Some(CubeCommand::Scramble),
        "w" => turn(Face::Up, false),
        "W" => turn(Face::Up, true),
        "s" => turn(Face::Down, false),
        "S" => turn(Face::Down, true),
        "d" => turn(Face::Right, false),
        "D" => turn(Face::Right, true),
        "a" => turn(Face::Left, false),
        "A" => turn(Face::Left, true),
        "q" => turn(Face::Front, false),
        "Q" => turn(Face::Front, true),
        "e" => turn(Face::Back, false),
        "E" => turn(Face::Back, true),
        "z" => Some(CubeCommand::Trigger(Trigger::Left)),
        "c" => Some(CubeCommand::Trigger(Trigger::Right)),
        _ => None,
    }
}

/// Control keys currently held, followed through the keyboard event stream.
#[derive(Default, Debug)]
pub struct ControlKeys {
    left: bool,
    right: bool,
}

impl ControlKeys {
    /// Records a press or release, returns false for keys that are not Control.
    pub fn track(&mut self, key_code: KeyCode, state: ButtonState) -> bool {
        let pressed = state == ButtonState::Pressed;
        match key_code {
            KeyCode::ControlLeft => self.left = pressed,
            KeyCode::ControlRight => self.right = pressed,
            _ => return false,
        }
        true
    }

    pub fn held(&self) -> bool {
        self.left || self.right
    }
}

/// Reads key releases and emits the bound cube commands.
/// Control is tracked from the same events, so its state is the one at each release.
pub fn handle_keyboard_input(
    mut keyboard_events: MessageReader<KeyboardInput>,
    mut control: Local<ControlKeys>,
    mut cube_commands: MessageWriter<CubeCommand>,
) {
    for event in keyboard_events.read() {
        if control.track(event.key_code, event.state) {
            continue;
        }
        if event.state != ButtonState::Released {
            continue;
        }
        let Key::Character(ref key) = event.logical_key else {
            continue;
        };
        if let Some(command) = binding_for(key.as_str(), control.held()) {
            cube_commands.write(command);
        }
    }
}

/// Queues the moves for every pending command.
/// Each command takes one orientation snapshot, so a trigger's three moves share it.
pub fn apply_cube_commands(
    mut cube_commands: MessageReader<CubeCommand>,
    camera_query: Query<&Transform, With<PersistentCamera>>,
    config: Res<CubeConfig>,
    mut animation: ResMut<CubeAnimation>,
    mut random_gen: ResMut<RandomGen>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    for command in cube_commands.read() {
        let visual_front = calculate_front_face(camera_transform.translation);
        match *command {
            CubeCommand::Turn { face, prime } => {
                animation.request(face, prime, visual_front);
            }
            CubeCommand::Trigger(trigger) => {
                animation.trigger(trigger, visual_front);
            }
            CubeCommand::Scramble => {
                animation.scramble(&mut random_gen.random_gen, config.scramble.moves);
                info!("Scrambling with {} moves", config.scramble.moves);
            }
        }
        debug!(
            "{:?} seen from {}, {} moves pending",
            command,
            visual_front,
            animation.pending_len()
        );
    }
}
