//! Indexed triangle meshes and the two procedural shapes of the scene.

use crate::constants::*;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::atomic::{AtomicU32, Ordering};

/// Interleaved vertex layout shared with the shading program.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Stable identity for GPU buffer caching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryId(u32);

static NEXT_GEOMETRY_ID: AtomicU32 = AtomicU32::new(0);

#[derive(Debug)]
pub struct MeshData {
    id: GeometryId,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            id: GeometryId(NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed)),
            vertices,
            indices,
        }
    }

    pub fn id(&self) -> GeometryId {
        self.id
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Area-weighted smooth normals for meshes that ship without them.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from_array(positions[a]);
        let pb = Vec3::from_array(positions[b]);
        let pc = Vec3::from_array(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// (p, q) torus knot swept with a circular tube.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let (p, q) = (p.max(1) as f32, q as f32);
    let curve = |u: f32| {
        let cs = (q / p * u).cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * (q / p * u).sin() * 0.5,
        )
    };

    let mut vertices = Vec::with_capacity(((tubular_segments + 1) * (radial_segments + 1)) as usize);
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            vertices.push(Vertex {
                position: pos.to_array(),
                normal: (pos - p1).normalize().to_array(),
            });
        }
    }

    let stride = radial_segments + 1;
    let mut indices = Vec::with_capacity((tubular_segments * radial_segments * 6) as usize);
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    MeshData::new(vertices, indices)
}

/// Cylinder of `length` capped by two hemispheres of `radius`, along Y.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> MeshData {
    let cap = cap_segments.max(1);
    let half = length * 0.5;

    // latitude rings: south pole -> equator, then equator -> north pole
    let mut rings: Vec<(f32, f32, f32)> = Vec::with_capacity(2 * (cap as usize + 1));
    for k in 0..=cap {
        let a = -FRAC_PI_2 + k as f32 / cap as f32 * FRAC_PI_2;
        rings.push((-half, a.cos(), a.sin()));
    }
    for k in 0..=cap {
        let a = k as f32 / cap as f32 * FRAC_PI_2;
        rings.push((half, a.cos(), a.sin()));
    }

    let mut vertices = Vec::with_capacity(rings.len() * (radial_segments as usize + 1));
    for &(center_y, cos_a, sin_a) in &rings {
        for s in 0..=radial_segments {
            let theta = s as f32 / radial_segments as f32 * TAU;
            let dir = Vec3::new(cos_a * theta.sin(), sin_a, cos_a * theta.cos());
            vertices.push(Vertex {
                position: (Vec3::new(0.0, center_y, 0.0) + dir * radius).to_array(),
                normal: dir.to_array(),
            });
        }
    }

    let stride = radial_segments + 1;
    let mut indices = Vec::new();
    for k in 0..(rings.len() as u32 - 1) {
        for s in 0..radial_segments {
            let a = k * stride + s;
            let b = a + 1;
            let c = b + stride;
            let d = a + stride;
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    MeshData::new(vertices, indices)
}

pub fn default_torus_knot() -> MeshData {
    torus_knot(
        TORUS_KNOT_RADIUS,
        TORUS_KNOT_TUBE,
        TORUS_KNOT_TUBULAR_SEGMENTS,
        TORUS_KNOT_RADIAL_SEGMENTS,
        TORUS_KNOT_P,
        TORUS_KNOT_Q,
    )
}

pub fn default_capsule() -> MeshData {
    capsule(
        CAPSULE_RADIUS,
        CAPSULE_LENGTH,
        CAPSULE_CAP_SEGMENTS,
        CAPSULE_RADIAL_SEGMENTS,
    )
}
