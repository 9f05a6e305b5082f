use serde::{Deserialize, Serialize};

/// A 3D point or direction in model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn sub(&self, other: &Vec3) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// A triangulated surface mesh as the host hands it to a render adapter.
///
/// `normals` is per-vertex and parallel to `vertices`; `triangles` indexes
/// into both. No topology checks are performed here — a mesh with mismatched
/// normal/vertex counts or zero triangles is passed through as-is and it is
/// the consumer's job to cope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            normals,
            triangles,
        }
    }

    /// Per-vertex normals, parallel to `vertices`.
    pub fn point_normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
