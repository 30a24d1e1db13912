//! Logic for building the cube, its facing label, and the per-frame turn animation system.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::log;
use crate::utils::animation::{CubeAnimation, apply_turn_step, is_solved};
use crate::utils::constants::cube_constants::{CUBLET_SIZE, STICKER_BACKING_COLOR, STICKER_OFFSET};
use crate::utils::constants::label_constants::*;
use crate::utils::face::Face;
use crate::utils::objects::{
    CubeRoot, CubeStatus, Cublet, CubletInner, FrontLabel, PersistentCamera, Sticker,
};
use crate::utils::orientation::{calculate_front_face, label_rotation};

/// All lattice points of a 3x3x3 cube except the hidden center.
pub fn lattice() -> impl Iterator<Item = IVec3> {
    (-1..=1).flat_map(|x| {
        (-1..=1).flat_map(move |y| {
            (-1..=1)
                .map(move |z| IVec3::new(x, y, z))
                .filter(|position| *position != IVec3::ZERO)
        })
    })
}

/// Faces exposed by the cublet at `position`: those whose axis matches a non-zero coordinate.
pub fn faces_for(position: IVec3) -> Vec<Face> {
    Face::ALL
        .into_iter()
        .filter(|face| {
            let axis = face.lattice_axis();
            (axis.x != 0 && axis.x == position.x)
                || (axis.y != 0 && axis.y == position.y)
                || (axis.z != 0 && axis.z == position.z)
        })
        .collect()
}

/// Two-triangle square in the YZ plane facing +X, shared by every sticker.
fn create_sticker_mesh() -> Mesh {
    let half = CUBLET_SIZE / 2.0;
    let positions = vec![
        [0.0, half, half],
        [0.0, -half, half],
        [0.0, -half, -half],
        [0.0, half, -half],
    ];
    let normals = vec![[1.0, 0.0, 0.0]; 4];
    let uvs = vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2, 2, 3, 0]));
    mesh
}

/// Spawns the 26 cublets and the facing label under a single root.
pub fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) -> Entity {
    let sticker_mesh = meshes.add(create_sticker_mesh());
    let backing_material = materials.add(StandardMaterial {
        base_color: STICKER_BACKING_COLOR,
        perceptual_roughness: 0.9,
        ..default()
    });
    let face_materials: Vec<(Face, Handle<StandardMaterial>)> = Face::ALL
        .into_iter()
        .map(|face| {
            let material = materials.add(StandardMaterial {
                base_color: face.color(),
                perceptual_roughness: 0.6,
                ..default()
            });
            (face, material)
        })
        .collect();
    let material_for = |face: Face| {
        face_materials
            .iter()
            .find(|(candidate, _)| *candidate == face)
            .map(|(_, material)| material.clone())
            .unwrap_or_else(|| backing_material.clone())
    };

    let root = commands
        .spawn((Transform::default(), Visibility::default(), CubeRoot))
        .id();

    let mut count = 0;
    for position in lattice() {
        let cublet = Cublet::new(position);
        let offset = cublet.offset;
        let faces = cublet.faces.clone();

        let base = commands
            .spawn((
                Transform::IDENTITY,
                Visibility::default(),
                cublet,
                ChildOf(root),
            ))
            .id();

        let inner = commands
            .spawn((
                Transform::from_translation(offset),
                Visibility::default(),
                CubletInner,
                ChildOf(base),
            ))
            .id();

        for face in faces {
            let face_node = commands
                .spawn((
                    Transform::from_rotation(face.sticker_rotation()),
                    Visibility::default(),
                    ChildOf(inner),
                ))
                .id();

            // Colored side faces outward, the dark backing faces the core
            commands.spawn((
                Mesh3d(sticker_mesh.clone()),
                MeshMaterial3d(material_for(face)),
                Transform::from_xyz(STICKER_OFFSET, 0.0, 0.0),
                Sticker,
                ChildOf(face_node),
            ));
            commands.spawn((
                Mesh3d(sticker_mesh.clone()),
                MeshMaterial3d(backing_material.clone()),
                Transform::from_xyz(STICKER_OFFSET, 0.0, 0.0)
                    .with_rotation(Quat::from_rotation_y(std::f32::consts::PI)),
                ChildOf(face_node),
            ));
        }
        count += 1;
    }

    spawn_front_label(commands, meshes, materials, root);

    info!("Spawned cube with {} cublets", count);
    root
}

/// 5x7 block glyphs for the label letters, `#` marks a lit pixel.
fn glyph(letter: char) -> Option<[&'static str; GLYPH_ROWS]> {
    let rows = match letter {
        'F' => ["#####", "#....", "#....", "####.", "#....", "#....", "#...."],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'N' => ["#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#", "#...#"],
        'T' => ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."],
        _ => return None,
    };
    Some(rows)
}

/// Width of `text` in label units.
pub fn label_width(text: &str) -> f32 {
    let letters = text.chars().count();
    if letters == 0 {
        return 0.0;
    }
    let columns = letters * (GLYPH_COLUMNS + GLYPH_SPACING) - GLYPH_SPACING;
    columns as f32 * LABEL_PIXEL_SIZE
}

/// Centers of the lit pixels of `text`, reading along +X with the baseline at y = 0.
/// Letters without a glyph leave a blank cell.
pub fn label_pixels(text: &str) -> Vec<Vec2> {
    let mut pixels = Vec::new();
    for (index, letter) in text.chars().enumerate() {
        let Some(rows) = glyph(letter) else {
            continue;
        };
        let first_column = index * (GLYPH_COLUMNS + GLYPH_SPACING);
        for (row, line) in rows.iter().enumerate() {
            for (column, cell) in line.chars().enumerate() {
                if cell != '#' {
                    continue;
                }
                let x = (first_column + column) as f32 + 0.5;
                let y = (GLYPH_ROWS - 1 - row) as f32 + 0.5;
                pixels.push(Vec2::new(x, y) * LABEL_PIXEL_SIZE);
            }
        }
    }
    pixels
}

/// Spawns the "FRONT" label on the body front side, under a pivot that turns toward the viewer.
fn spawn_front_label(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    root: Entity,
) {
    let pivot = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            FrontLabel,
            ChildOf(root),
        ))
        .id();

    // Text runs along -Z and faces +X once turned a quarter around Y
    let width = label_width(LABEL_TEXT);
    let text = commands
        .spawn((
            Transform::from_translation(LABEL_OFFSET + Vec3::Z * (width / 2.0))
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            Visibility::default(),
            ChildOf(pivot),
        ))
        .id();

    let pixel_mesh = meshes.add(Cuboid::new(LABEL_PIXEL_SIZE, LABEL_PIXEL_SIZE, LABEL_DEPTH));
    let material = materials.add(StandardMaterial {
        base_color: LABEL_COLOR,
        ..default()
    });
    for pixel in label_pixels(LABEL_TEXT) {
        commands.spawn((
            Mesh3d(pixel_mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(pixel.x, pixel.y, LABEL_DEPTH / 2.0),
            ChildOf(text),
        ));
    }
}

/// Per-frame cube update: turns the label toward the viewer, then advances the current turn.
pub fn update_cube(
    mut animation: ResMut<CubeAnimation>,
    mut status: ResMut<CubeStatus>,
    camera_query: Query<&Transform, (With<PersistentCamera>, Without<Cublet>, Without<FrontLabel>)>,
    root_query: Query<&Transform, (With<CubeRoot>, Without<Cublet>, Without<FrontLabel>)>,
    mut label_query: Query<&mut Transform, (With<FrontLabel>, Without<Cublet>)>,
    mut cublets: Query<(&mut Transform, &Cublet), (Without<CubeRoot>, Without<PersistentCamera>)>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    let Ok(root_transform) = root_query.single() else {
        return;
    };

    let visual_front = calculate_front_face(camera_transform.translation);
    for mut label in label_query.iter_mut() {
        label.rotation = label_rotation(visual_front);
    }

    let Some(step) = animation.advance() else {
        return;
    };

    let turned = apply_turn_step(&step, root_transform, cublets.iter_mut());
    if turned != 9 {
        warn!("Turn of {} moved {} cublets", step.face, turned);
    }

    if !step.finished {
        return;
    }
    status.completed_moves += 1;
    debug!(
        "Finished turn {} ({} pending)",
        step.face,
        animation.pending_len()
    );

    if animation.is_idle() {
        let solved = is_solved(cublets.iter());
        if solved != status.solved {
            status.solved = solved;
            if solved {
                log!("🎉 Cube solved after {} moves!", status.completed_moves);
            } else {
                log!("🔀 Cube is no longer solved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_skips_center() {
        let points: Vec<IVec3> = lattice().collect();
        assert_eq!(points.len(), 26);
        assert!(!points.contains(&IVec3::ZERO));
    }

    #[test]
    fn test_faces_match_non_zero_coordinates() {
        for position in lattice() {
            let faces = faces_for(position);
            let non_zero = position.to_array().iter().filter(|c| **c != 0).count();
            assert_eq!(faces.len(), non_zero, "{position:?}");
            for face in &faces {
                let axis = face.lattice_axis();
                assert_eq!(axis * position * axis, axis, "{face} on {position:?}");
            }
        }
    }

    #[test]
    fn test_cublet_kinds() {
        let counts = lattice().fold([0; 4], |mut counts, position| {
            counts[faces_for(position).len()] += 1;
            counts
        });
        // face centers, edges, corners
        assert_eq!(counts, [0, 6, 12, 8]);
    }

    #[test]
    fn test_corner_faces() {
        assert_eq!(
            faces_for(IVec3::new(1, 1, -1)),
            vec![Face::Up, Face::Right, Face::Front]
        );
        assert_eq!(faces_for(IVec3::new(0, -1, 0)), vec![Face::Down]);
    }

    #[test]
    fn test_label_pixels_fit_width() {
        let width = label_width(LABEL_TEXT);
        let pixels = label_pixels(LABEL_TEXT);
        let lit = ["F", "R", "O", "N", "T"]
            .iter()
            .filter_map(|letter| glyph(letter.chars().next().unwrap()))
            .flat_map(|rows| rows.into_iter())
            .map(|row| row.chars().filter(|c| *c == '#').count())
            .sum::<usize>();

        assert_eq!(pixels.len(), lit);
        for pixel in pixels {
            assert!(pixel.x > 0.0 && pixel.x < width);
            assert!(pixel.y > 0.0 && pixel.y < GLYPH_ROWS as f32 * LABEL_PIXEL_SIZE);
        }
    }

    #[test]
    fn test_unknown_letters_leave_blank_cell() {
        assert!(label_pixels("?").is_empty());
        assert_eq!(label_width(""), 0.0);
        assert!(label_width("F?") > label_width("F"));
    }
}
