//! The six body-relative face directions of the cube and their fixed lookup data.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::utils::constants::cube_constants::SLICE_THRESHOLD;

/// One of the six faces, fixed to the cube's own geometry regardless of the viewing angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    /// Faces that lie around the vertical axis and can be seen as "front".
    pub const HORIZONTAL: [Face; 4] = [Face::Front, Face::Back, Face::Left, Face::Right];

    /// Outward unit axis on the integer lattice.
    pub const fn lattice_axis(self) -> IVec3 {
        match self {
            Face::Up => IVec3::new(0, 1, 0),
            Face::Down => IVec3::new(0, -1, 0),
            Face::Left => IVec3::new(0, 0, 1),
            Face::Right => IVec3::new(0, 0, -1),
            Face::Front => IVec3::new(1, 0, 0),
            Face::Back => IVec3::new(-1, 0, 0),
        }
    }

    /// Outward unit axis, also the world axis a turn of this face rotates around.
    pub fn axis(self) -> Vec3 {
        self.lattice_axis().as_vec3()
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// Sticker color of this face on a solved cube.
    pub fn color(self) -> Color {
        match self {
            Face::Up => Color::srgb(1.0, 1.0, 0.0),
            Face::Down => Color::srgb(1.0, 1.0, 1.0),
            Face::Left => Color::srgb(0.0, 1.0, 0.0),
            Face::Right => Color::srgb(0.0, 0.0, 1.0),
            Face::Front => Color::srgb(1.0, 0.647, 0.0),
            Face::Back => Color::srgb(1.0, 0.0, 0.0),
        }
    }

    /// Rotation turning a sticker built facing +X so that it faces outward along this face.
    pub fn sticker_rotation(self) -> Quat {
        let (x, y, z) = match self {
            Face::Up => (0.0, 0.0, FRAC_PI_2),
            Face::Down => (0.0, 0.0, -FRAC_PI_2),
            Face::Left => (0.0, -FRAC_PI_2, 0.0),
            Face::Right => (0.0, FRAC_PI_2, 0.0),
            Face::Front => (0.0, 0.0, 0.0),
            Face::Back => (0.0, PI, 0.0),
        };
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Whether a cublet at this world position belongs to the slice turned by this face.
    pub fn selects(self, world_position: Vec3) -> bool {
        match self {
            Face::Up => world_position.y > SLICE_THRESHOLD,
            Face::Down => world_position.y < -SLICE_THRESHOLD,
            Face::Left => world_position.z > SLICE_THRESHOLD,
            Face::Right => world_position.z < -SLICE_THRESHOLD,
            Face::Front => world_position.x > SLICE_THRESHOLD,
            Face::Back => world_position.x < -SLICE_THRESHOLD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::Up => "UP",
            Face::Down => "DOWN",
            Face::Left => "LEFT",
            Face::Right => "RIGHT",
            Face::Front => "FRONT",
            Face::Back => "BACK",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
