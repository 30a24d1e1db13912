//! This file defines the various objects, resources, and components used by the cube viewer.
use bevy::prelude::*;
use rand_chacha::rand_core::SeedableRng;

use crate::utils::constants::cube_constants::CUBLET_SPACING;
use crate::utils::constants::game_constants::SEED;
use crate::utils::cube::faces_for;
use crate::utils::face::Face;

use rand_chacha::ChaCha8Rng;

/// Root of the cube, all cublets hang below it
#[derive(Component)]
pub struct CubeRoot;

/// One of the 26 visible small cubes.
/// Sits on the rotation-accumulating base entity, the inner entity carries the fixed translation.
#[derive(Component, Clone, Debug)]
pub struct Cublet {
    /// Faces showing a sticker, never changes after construction
    pub faces: Vec<Face>,
    /// Translation of the inner entity relative to the base
    pub offset: Vec3,
}

impl Cublet {
    pub fn new(position: IVec3) -> Self {
        Self {
            faces: faces_for(position),
            offset: position.as_vec3() * CUBLET_SPACING,
        }
    }
}

/// Inner, translated entity of a cublet
#[derive(Component)]
pub struct CubletInner;

/// Colored sticker mesh
#[derive(Component)]
pub struct Sticker;

/// Pivot of the "FRONT" label, turned toward the viewer every frame
#[derive(Component)]
pub struct FrontLabel;

/// The orbiting scene camera
#[derive(Component)]
pub struct PersistentCamera;

/// Wireframe sphere around the scene
#[derive(Component)]
pub struct Perimeter;

/// Progress of the cube since startup
#[derive(Resource, Debug)]
pub struct CubeStatus {
    pub solved: bool,
    pub completed_moves: u64,
}

impl Default for CubeStatus {
    fn default() -> Self {
        Self {
            solved: true,
            completed_moves: 0,
        }
    }
}

/// Random number generator
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    fn default() -> Self {
        Self::from_seed(SEED)
    }
}
