use glam::{Vec2, Vec3, Vec4};

use super::{MaterialId, MeshId, NodeId, SkinDeformerId};

/// A per-corner attribute stored as a deduplicated value pool plus one index per face corner.
///
/// Every entry of `indices` is a valid offset into `values`. An attribute that was not present
/// in the document has both arrays empty.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute<T> {
    pub values: Vec<T>,
    pub indices: Vec<u32>,
}

impl<T> Default for VertexAttribute<T> {
    fn default() -> VertexAttribute<T> {
        VertexAttribute {
            values: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl<T: Copy> VertexAttribute<T> {
    pub fn exists(&self) -> bool {
        !self.values.is_empty()
    }

    /// Value seen by face corner `corner`.
    pub fn get(&self, corner: usize) -> Option<T> {
        let index = *self.indices.get(corner)?;
        self.values.get(index as usize).copied()
    }
}

/// A polygon, as a range of face corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Face {
    pub index_begin: u32,
    pub num_indices: u32,
}

impl Face {
    /// Triangles a fan or ear-clipping split of this face produces.
    pub fn num_triangles(&self) -> usize {
        (self.num_indices as usize).saturating_sub(2)
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    pub name: String,

    /// Number of control points (position values).
    pub num_vertices: usize,
    /// Number of face corners.
    pub num_indices: usize,
    pub num_faces: usize,
    pub num_triangles: usize,
    pub faces: Vec<Face>,

    pub vertex_position: VertexAttribute<Vec3>,
    pub vertex_normal: VertexAttribute<Vec3>,
    pub vertex_uv: VertexAttribute<Vec2>,
    pub vertex_tangent: VertexAttribute<Vec3>,
    pub vertex_bitangent: VertexAttribute<Vec3>,
    pub vertex_color: VertexAttribute<Vec4>,

    /// Material slot per face, empty when the document has no material layer.
    pub face_material: Vec<u32>,
    pub materials: Vec<MaterialId>,
    pub skin_deformers: Vec<SkinDeformerId>,
    pub instances: Vec<NodeId>,
}
