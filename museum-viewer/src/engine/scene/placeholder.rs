use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::render_settings::{
    PLACEHOLDER_COLOUR, PLACEHOLDER_KNOT_P, PLACEHOLDER_KNOT_Q, PLACEHOLDER_KNOT_RADIAL_SEGMENTS,
    PLACEHOLDER_KNOT_RADIUS, PLACEHOLDER_KNOT_TUBE, PLACEHOLDER_KNOT_TUBULAR_SEGMENTS,
    PLACEHOLDER_METALLIC, PLACEHOLDER_ROUGHNESS,
};
use std::f32::consts::TAU;

/// Stand-in shown when an artifact has no model, while a model loads, and
/// after a load failure.
#[derive(Component, Debug)]
pub struct PlaceholderExhibit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnot {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: usize,
    pub radial_segments: usize,
    pub p: u32,
    pub q: u32,
}

impl Default for TorusKnot {
    fn default() -> Self {
        Self {
            radius: PLACEHOLDER_KNOT_RADIUS,
            tube: PLACEHOLDER_KNOT_TUBE,
            tubular_segments: PLACEHOLDER_KNOT_TUBULAR_SEGMENTS,
            radial_segments: PLACEHOLDER_KNOT_RADIAL_SEGMENTS,
            p: PLACEHOLDER_KNOT_P,
            q: PLACEHOLDER_KNOT_Q,
        }
    }
}

/// Raw vertex streams, kept separate from [`Mesh`] so they can be inspected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KnotGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TorusKnot {
    fn curve_point(&self, u: f32) -> Vec3 {
        let q_over_p = self.q as f32 / self.p as f32 * u;
        let cs = q_over_p.cos();
        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * q_over_p.sin() * 0.5,
        )
    }

    /// Sweep a circular tube along the (p, q) knot curve. Rings share a seam
    /// vertex so UVs wrap cleanly.
    pub fn geometry(&self) -> KnotGeometry {
        let tubular = self.tubular_segments.max(3);
        let radial = self.radial_segments.max(3);
        let ring = radial + 1;
        let mut geometry = KnotGeometry::default();

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * self.p as f32 * TAU;
            let p1 = self.curve_point(u);
            let p2 = self.curve_point(u + 0.01);

            let tangent = p2 - p1;
            let bitangent = tangent.cross(p2 + p1).normalize_or_zero();
            let normal = bitangent.cross(tangent).normalize_or_zero();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();
                let vertex = p1 + normal * cx + bitangent * cy;

                geometry.positions.push(vertex.to_array());
                geometry
                    .normals
                    .push((vertex - p1).normalize_or_zero().to_array());
                geometry
                    .uvs
                    .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
            }
        }

        for j in 1..=tubular {
            for i in 1..=radial {
                let a = (ring * (j - 1) + (i - 1)) as u32;
                let b = (ring * j + (i - 1)) as u32;
                let c = (ring * j + i) as u32;
                let d = (ring * (j - 1) + i) as u32;
                geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        geometry
    }

    pub fn mesh(&self) -> Mesh {
        let geometry = self.geometry();
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs)
        .with_inserted_indices(Indices::U32(geometry.indices))
    }
}

pub fn placeholder_material() -> StandardMaterial {
    StandardMaterial {
        base_color: PLACEHOLDER_COLOUR,
        perceptual_roughness: PLACEHOLDER_ROUGHNESS,
        metallic: PLACEHOLDER_METALLIC,
        ..default()
    }
}

/// Spawn the placeholder knot under `parent`.
pub fn spawn_placeholder(
    commands: &mut Commands,
    parent: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let knot = commands
        .spawn((
            Mesh3d(meshes.add(TorusKnot::default().mesh())),
            MeshMaterial3d(materials.add(placeholder_material())),
            Transform::default(),
            PlaceholderExhibit,
            Name::new("Placeholder exhibit"),
        ))
        .id();
    commands.entity(parent).add_child(knot);
    knot
}
