//! Move queue and quarter-turn animation state machine.
//!
//! A cube is either idle or animating exactly one move. Requested moves wait in a FIFO queue
//! and are started one at a time; each quarter turn is spread over a fixed number of frames.

use bevy::prelude::*;
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::f32::consts::FRAC_PI_2;
use std::ops::DerefMut;

use crate::utils::face::Face;
use crate::utils::objects::Cublet;
use crate::utils::orientation::orient_move;

/// A quarter turn of one body face, `prime` being the counter-rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub face: Face,
    pub prime: bool,
}

impl Move {
    pub const fn new(face: Face, prime: bool) -> Self {
        Self { face, prime }
    }

    pub fn inverse(self) -> Self {
        Self::new(self.face, !self.prime)
    }

    /// Uniformly random face with an even chance of being prime.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        Self::new(face, rng.random_bool(0.5))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prime {
            write!(f, "{}'", self.face)
        } else {
            write!(f, "{}", self.face)
        }
    }
}

/// Three-move macros bound to single keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// L' U' L
    Left,
    /// R U R'
    Right,
}

impl Trigger {
    pub fn moves(self) -> [Move; 3] {
        match self {
            Trigger::Left => [
                Move::new(Face::Left, true),
                Move::new(Face::Up, true),
                Move::new(Face::Left, false),
            ],
            Trigger::Right => [
                Move::new(Face::Right, false),
                Move::new(Face::Up, false),
                Move::new(Face::Right, true),
            ],
        }
    }
}

/// One frame worth of rotation for the slice of `face`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnStep {
    pub face: Face,
    pub angle: f32,
    /// Set on the last frame of the move.
    pub finished: bool,
}

impl TurnStep {
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.face.axis(), self.angle)
    }
}

/// Animation state owned by the cube: pending moves, the move in progress and its frame counter.
#[derive(Resource, Debug, Clone)]
pub struct CubeAnimation {
    queue: VecDeque<Move>,
    current: Option<Move>,
    frame: u32,
    frames_per_turn: u32,
}

impl Default for CubeAnimation {
    fn default() -> Self {
        Self::new(crate::utils::constants::animation_constants::TURN_FRAMES)
    }
}

impl CubeAnimation {
    pub fn new(frames_per_turn: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            frame: 0,
            frames_per_turn: frames_per_turn.max(1),
        }
    }

    /// Queues a move that is already expressed in body faces.
    pub fn push(&mut self, mv: Move) {
        self.queue.push_back(mv);
    }

    /// Queues a move requested relative to the visible front face.
    pub fn request(&mut self, face: Face, prime: bool, visual_front: Face) {
        self.push(Move::new(orient_move(face, visual_front), prime));
    }

    /// Queues the three moves of a trigger, all oriented against the same front face.
    pub fn trigger(&mut self, trigger: Trigger, visual_front: Face) {
        for mv in trigger.moves() {
            self.request(mv.face, mv.prime, visual_front);
        }
    }

    /// Queues `count` random body-face moves.
    pub fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) {
        self.queue.extend((0..count).map(|_| Move::random(rng)));
    }

    pub fn pending(&self) -> impl Iterator<Item = &Move> {
        self.queue.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    pub fn current(&self) -> Option<Move> {
        self.current
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// No move in progress and nothing waiting.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    /// Advances the animation by one frame and returns the rotation to apply, if any.
    pub fn advance(&mut self) -> Option<TurnStep> {
        if self.current.is_none() && self.frame == 0 {
            self.current = self.queue.pop_front();
        }

        let mv = self.current?;
        let quarter = if mv.prime { FRAC_PI_2 } else { -FRAC_PI_2 };
        self.frame += 1;

        let finished = self.frame >= self.frames_per_turn;
        if finished {
            self.frame = 0;
            self.current = None;
        }

        Some(TurnStep {
            face: mv.face,
            angle: quarter / self.frames_per_turn as f32,
            finished,
        })
    }
}

/// World position of a cublet center, from its live base rotation.
pub fn cublet_world_position(root: &Transform, base: &Transform, cublet: &Cublet) -> Vec3 {
    root.transform_point(base.transform_point(cublet.offset))
}

/// Rotates every cublet currently inside the turning slice. Returns how many were turned.
pub fn apply_turn_step<'a, T, I>(step: &TurnStep, root: &Transform, cublets: I) -> usize
where
    T: DerefMut<Target = Transform>,
    I: IntoIterator<Item = (T, &'a Cublet)>,
{
    let rotation = step.rotation();
    let mut turned = 0;
    for (mut base, cublet) in cublets {
        if step.face.selects(cublet_world_position(root, &base, cublet)) {
            base.rotation = (rotation * base.rotation).normalize();
            turned += 1;
        }
    }
    turned
}

/// Whether every visible sticker pointing in the same direction has the same color.
pub fn is_solved<'a, I>(cublets: I) -> bool
where
    I: IntoIterator<Item = (&'a Transform, &'a Cublet)>,
{
    let mut sides: HashMap<IVec3, Face> = HashMap::new();
    for (base, cublet) in cublets {
        for &face in &cublet.faces {
            let normal = (base.rotation * face.axis()).round().as_ivec3();
            if *sides.entry(normal).or_insert(face) != face {
                return false;
            }
        }
    }
    true
}
