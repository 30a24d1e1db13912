// Constants used by the cube viewer, structured into modules.

/// Generic constants
pub mod game_constants {
    // Seed for the scramble random number generator.
    pub const SEED: u64 = 69;

    // Optional configuration file, looked up in the working directory (native only).
    pub const CONFIG_FILE_NAME: &str = "cube.toml";
}

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = 200.0;
    pub const CAMERA_3D_INITIAL_Y: f32 = 100.0;
    pub const CAMERA_3D_INITIAL_Z: f32 = 50.0;

    pub const CAMERA_3D_FOV_DEGREES: f32 = 60.0;
    pub const CAMERA_3D_NEAR: f32 = 1.0;
    pub const CAMERA_3D_FAR: f32 = 1000.0;

    // Radius range for the camera's orbit.
    pub const CAMERA_3D_MIN_RADIUS: f32 = 100.0;
    pub const CAMERA_3D_MAX_RADIUS: f32 = 500.0;

    pub const CAMERA_3D_DAMPING_FACTOR: f32 = 0.1;
    pub const CAMERA_3D_ROTATE_SPEED: f32 = 0.2;
    pub const CAMERA_3D_ZOOM_SPEED: f32 = 1.0;

    // Scale applied to the orbit radius per wheel notch at zoom speed 1.
    pub const CAMERA_3D_ZOOM_STEP: f32 = 0.95;

    // Keeps the camera off the poles so the look-at basis stays defined.
    pub const CAMERA_3D_POLAR_EPSILON: f32 = 0.000_001;
}

/// Scene surroundings
pub mod scene_constants {
    use bevy::prelude::Color;

    pub const BACKGROUND_COLOR: Color = Color::srgb(0.8, 0.8, 0.8); // 0xcccccc
    pub const FOG_DENSITY: f32 = 0.002;

    pub const PERIMETER_RADIUS: f32 = 500.0;
    pub const PERIMETER_SEGMENTS: u32 = 32;
    pub const PERIMETER_COLOR: Color = Color::WHITE;
}

/// Lighting constants
pub mod lighting_constants {
    use bevy::prelude::Color;

    pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 8_000.0;
    pub const GLOBAL_AMBIENT_LIGHT_COLOR: Color = Color::srgb(0.133, 0.133, 0.133); // 0x222222
    pub const GLOBAL_AMBIENT_LIGHT_INTENSITY: f32 = 200.0;
}

/// Cube geometry
pub mod cube_constants {
    use bevy::prelude::Color;

    // Edge length of a cublet and the gap between neighbouring cublets.
    pub const CUBLET_SIZE: f32 = 20.0;
    pub const CUBLET_SEPARATION: f32 = 3.0;
    pub const CUBLET_SPACING: f32 = CUBLET_SIZE + CUBLET_SEPARATION;

    // Stickers sit half a gap outside the cublet surface.
    pub const STICKER_OFFSET: f32 = CUBLET_SIZE / 2.0 + CUBLET_SEPARATION / 2.0;

    // World-space distance from the center a cublet must exceed to belong to an outer slice.
    pub const SLICE_THRESHOLD: f32 = 10.0;

    pub const STICKER_BACKING_COLOR: Color = Color::srgb(0.2, 0.2, 0.2); // 0x333333
}

/// Turn animation
pub mod animation_constants {
    // Frames used to animate one quarter turn.
    pub const TURN_FRAMES: u32 = 10;

    // Moves pushed by a single scramble.
    pub const SCRAMBLE_MOVES: usize = 101;
}

/// "FRONT" facing label
pub mod label_constants {
    use bevy::prelude::{Color, Vec3};

    pub const LABEL_TEXT: &str = "FRONT";
    pub const LABEL_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

    // Glyph cell size and the gap between two glyphs, in font pixels.
    pub const GLYPH_COLUMNS: usize = 5;
    pub const GLYPH_ROWS: usize = 7;
    pub const GLYPH_SPACING: usize = 1;

    pub const LABEL_PIXEL_SIZE: f32 = 16.0 / GLYPH_ROWS as f32;
    pub const LABEL_DEPTH: f32 = 1.0;

    // Offset of the label below the cube on the body front side (z is replaced by half the width).
    pub const LABEL_OFFSET: Vec3 = Vec3::new(35.0, -55.0, 0.0);
}
