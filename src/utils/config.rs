//! Optional viewer configuration (`cube.toml`), loaded once at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::animation::CubeAnimation;
use crate::utils::constants::animation_constants::{SCRAMBLE_MOVES, TURN_FRAMES};
use crate::utils::constants::camera_3d_constants::*;
use crate::utils::constants::game_constants::SEED;
use crate::utils::objects::RandomGen;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    pub scramble: ScrambleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_3D_FOV_DEGREES,
            min_distance: CAMERA_3D_MIN_RADIUS,
            max_distance: CAMERA_3D_MAX_RADIUS,
            damping_factor: CAMERA_3D_DAMPING_FACTOR,
            rotate_speed: CAMERA_3D_ROTATE_SPEED,
            zoom_speed: CAMERA_3D_ZOOM_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames_per_turn: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_turn: TURN_FRAMES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    pub moves: usize,
    pub seed: u64,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            moves: SCRAMBLE_MOVES,
            seed: SEED,
        }
    }
}

impl CubeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reads `cube.toml` from the working directory when present, defaults otherwise.
    /// The browser build always uses the defaults.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = Path::new(crate::utils::constants::game_constants::CONFIG_FILE_NAME);
            if path.exists() {
                return match Self::from_path(path) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        config
                    }
                    Err(e) => {
                        warn!("{}, using defaults", e);
                        Self::default()
                    }
                };
            }
        }
        Self::default()
    }
}

/// Loads the configuration and inserts the resources derived from it.
/// Must be added after the log plugin so load warnings are visible.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = CubeConfig::load();
        app.insert_resource(RandomGen::from_seed(config.scramble.seed))
            .insert_resource(CubeAnimation::new(config.animation.frames_per_turn))
            .insert_resource(config);
    }
}
