//! Declaration of the modules for rubik_cube_3d.

/// Various utility functions, constants, and objects
pub mod utils {
    pub mod animation;
    pub mod camera;
    pub mod config;
    pub mod constants;
    pub mod cube;
    pub mod debug_functions;
    pub mod face;
    pub mod inputs;
    pub mod macros;
    pub mod objects;
    pub mod orientation;
    pub mod setup;
    pub mod systems_logic;
}
