//! Mapping between what the viewer sees as "front" and the cube's body faces.
//!
//! Moves are always requested relative to the side the user is looking at, so every
//! horizontal move is remapped through the currently visible front face before it is queued.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::utils::face::Face;

/// Body face currently seen as front, from the camera's horizontal bearing.
///
/// Recomputed on every call, the camera may have moved since the last frame.
pub fn calculate_front_face(camera_position: Vec3) -> Face {
    let flat = Vec3::new(camera_position.x, 0.0, camera_position.z).normalize_or_zero();
    let angle = flat.x.atan2(flat.z).to_degrees();
    front_face_for_angle(angle)
}

/// Buckets a bearing in degrees (as returned by `atan2(x, z)`) into one of four 90° sectors.
pub fn front_face_for_angle(angle: f32) -> Face {
    if angle > 45.0 && angle <= 135.0 {
        Face::Front
    } else if (-45.0..=45.0).contains(&angle) {
        Face::Left
    } else if (-135.0..-45.0).contains(&angle) {
        Face::Back
    } else {
        Face::Right
    }
}

/// Remaps a requested horizontal move through the visible front face. Up and down pass through.
pub fn orient_move(requested: Face, visual_front: Face) -> Face {
    use Face::*;

    match (requested, visual_front) {
        (Front, Front) => Front,
        (Front, Back) => Back,
        (Front, Right) => Right,
        (Front, Left) => Left,
        (Back, Front) => Back,
        (Back, Back) => Front,
        (Back, Right) => Left,
        (Back, Left) => Right,
        (Right, Front) => Right,
        (Right, Back) => Left,
        (Right, Right) => Back,
        (Right, Left) => Front,
        (Left, Front) => Left,
        (Left, Back) => Right,
        (Left, Right) => Front,
        (Left, Left) => Back,
        (requested, _) => requested,
    }
}

/// Yaw that turns the "FRONT" label toward the viewer.
pub fn label_rotation(visual_front: Face) -> Quat {
    let yaw = match visual_front {
        Face::Right => FRAC_PI_2,
        Face::Back => PI,
        Face::Left => PI * 1.5,
        _ => 0.0,
    };
    Quat::from_rotation_y(yaw)
}
