use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::math::AABB;

/// One drawable mesh primitive, flattened into world space
pub struct Primitive {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material: usize,
}

/// Surface appearance slot; the texture map for one of these is swapped
/// in at runtime
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    pub name: String,
    pub base_color: [f32; 4],
}

/// The fixed mesh/material hierarchy loaded once at startup
pub struct LoadedModel {
    pub primitives: Vec<Primitive>,
    pub materials: Vec<MaterialDesc>,
    pub bounds: AABB,
}

/// Loads the phone asset and flattens its node tree into primitives
pub fn load_phone_asset(path: impl AsRef<Path>) -> Result<LoadedModel> {
    let path = path.as_ref();
    println!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    println!("glTF loaded:");
    println!("  Nodes: {}", gltf.nodes().count());
    println!("  Meshes: {}", gltf.meshes().count());
    println!("  Materials: {}", gltf.materials().count());

    let mut materials: Vec<MaterialDesc> = gltf
        .materials()
        .enumerate()
        .map(|(idx, material)| {
            let name = material
                .name()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("Material.{:03}", idx));
            let base_color = material.pbr_metallic_roughness().base_color_factor();
            MaterialDesc { name, base_color }
        })
        .collect();

    // Fallback slot for primitives with no material assigned
    materials.push(MaterialDesc {
        name: "Default".to_string(),
        base_color: [0.7, 0.7, 0.7, 1.0],
    });
    let default_material = materials.len() - 1;

    let mut primitives = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(
                &node,
                &buffers,
                &Mat4::IDENTITY,
                default_material,
                &mut primitives,
            )?;
        }
    }

    if primitives.is_empty() {
        anyhow::bail!("No geometry found in glTF file: {:?}", path);
    }

    let bounds = primitives
        .iter()
        .map(|p| AABB::from_points(&p.positions))
        .reduce(|a, b| a.union(&b))
        .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));

    println!(
        "Extracted {} primitives, {} materials",
        primitives.len(),
        materials.len()
    );

    Ok(LoadedModel {
        primitives,
        materials,
        bounds,
    })
}

/// Recursively flattens glTF nodes, accumulating transforms
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    default_material: usize,
    primitives: &mut Vec<Primitive>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, default_material, primitives)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, default_material, primitives)?;
    }

    Ok(())
}

/// Extracts positions, normals, UVs, and indices for each primitive of a mesh
fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    default_material: usize,
    primitives: &mut Vec<Primitive>,
) -> Result<()> {
    let mesh_name = mesh.name().unwrap_or("unnamed");

    for (prim_idx, primitive) in mesh.primitives().enumerate() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)).to_array())
            .collect();

        let normals: Vec<[f32; 3]> = if let Some(normal_reader) = reader.read_normals() {
            normal_reader
                .map(|n| {
                    transform
                        .transform_vector3(Vec3::from_array(n))
                        .normalize_or_zero()
                        .to_array()
                })
                .collect()
        } else {
            vec![[0.0, 1.0, 0.0]; positions.len()]
        };

        let uvs: Vec<[f32; 2]> = if let Some(uv_reader) = reader.read_tex_coords(0) {
            uv_reader.into_f32().collect()
        } else {
            vec![[0.0, 0.0]; positions.len()]
        };

        let indices: Vec<u32> = if let Some(index_reader) = reader.read_indices() {
            index_reader.into_u32().collect()
        } else {
            // No indices - treat as triangle list
            (0..positions.len() as u32).collect()
        };

        let material = primitive
            .material()
            .index()
            .unwrap_or(default_material);

        primitives.push(Primitive {
            name: format!("{}.{}", mesh_name, prim_idx),
            positions,
            normals,
            uvs,
            indices,
            material,
        });
    }

    Ok(())
}
