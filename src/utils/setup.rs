//! Setup logic for the viewer scene: camera, lights, perimeter and the cube.
use bevy::prelude::*;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;

use crate::log;
use crate::utils::camera::OrbitController;
use crate::utils::config::CubeConfig;
use crate::utils::constants::{
    camera_3d_constants::{
        CAMERA_3D_FAR, CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
        CAMERA_3D_NEAR,
    },
    lighting_constants::{
        DIRECTIONAL_LIGHT_ILLUMINANCE, GLOBAL_AMBIENT_LIGHT_COLOR, GLOBAL_AMBIENT_LIGHT_INTENSITY,
    },
    scene_constants::{
        BACKGROUND_COLOR, FOG_DENSITY, PERIMETER_COLOR, PERIMETER_RADIUS, PERIMETER_SEGMENTS,
    },
};
use crate::utils::cube::spawn_cube;
use crate::utils::objects::{Perimeter, PersistentCamera};

/// Initial scene, with the camera, lights, perimeter and the cube.
pub fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<CubeConfig>,
) {
    // Camera, orbiting the origin
    let position = Vec3::new(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_degrees.to_radians(),
            near: CAMERA_3D_NEAR,
            far: CAMERA_3D_FAR,
            ..default()
        }),
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        scene_fog(),
        OrbitController::new(position, Vec3::ZERO, &config.camera),
        PersistentCamera,
    ));

    // Key and fill lights from opposite corners
    for direction in [Vec3::ONE, Vec3::NEG_ONE] {
        commands.spawn((
            DirectionalLight {
                illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
                ..default()
            },
            Transform::from_translation(direction).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }

    // Ambient Light
    commands.insert_resource(GlobalAmbientLight {
        color: GLOBAL_AMBIENT_LIGHT_COLOR,
        brightness: GLOBAL_AMBIENT_LIGHT_INTENSITY,
        affects_lightmapped_meshes: true,
    });

    // Perimeter
    commands.spawn((
        Mesh3d(meshes.add(create_wireframe_sphere_mesh(
            PERIMETER_RADIUS,
            PERIMETER_SEGMENTS,
            PERIMETER_SEGMENTS,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: PERIMETER_COLOR,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Perimeter,
    ));

    spawn_cube(&mut commands, &mut meshes, &mut materials);

    log!("🧊 Cube ready!");
    log!("⌨️  w/s/a/d/q/e: up/down/left/right/front/back, shift for prime");
    log!("⌨️  z/c: left/right trigger, ctrl+x: scramble");
    log!("🖱️  Drag to orbit, scroll to zoom");
}

/// Exponential-squared fog in the background color.
pub fn scene_fog() -> DistanceFog {
    DistanceFog {
        color: BACKGROUND_COLOR,
        falloff: FogFalloff::ExponentialSquared {
            density: FOG_DENSITY,
        },
        ..default()
    }
}

/// Wireframe of a UV sphere as a line list: every edge of every triangle of the sphere grid.
pub fn create_wireframe_sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let vertex = |column: u32, row: u32| -> [f32; 3] {
        let u = column as f32 / width_segments as f32;
        let v = row as f32 / height_segments as f32;
        let phi = u * std::f32::consts::TAU;
        let theta = v * std::f32::consts::PI;
        [
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        ]
    };

    let mut positions = Vec::new();
    for row in 0..height_segments {
        for column in 0..width_segments {
            let a = vertex(column, row);
            let b = vertex(column, row + 1);
            let c = vertex(column + 1, row + 1);
            let d = vertex(column + 1, row);

            // Meridian, ring and quad diagonal; the pole rows collapse to single triangles
            positions.extend([a, b]);
            if row != 0 {
                positions.extend([a, d]);
            }
            if row != 0 && row != height_segments - 1 {
                positions.extend([b, d]);
            } else if row == 0 {
                positions.extend([b, c]);
            }
        }
    }

    let normals: Vec<[f32; 3]> = positions
        .iter()
        .map(|position| Vec3::from_array(*position).normalize_or_zero().to_array())
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}
