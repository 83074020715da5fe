use glam::DAffine3;

use super::{MeshId, NodeId, SkinClusterId, SkinDeformerId};

/// `SkinningType` of a skin deformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum SkinningMethod {
    Linear = 0,
    Rigid = 1,
    DualQuaternion = 2,
    /// Per-vertex blend between linear and dual quaternion skinning.
    BlendedDqLinear = 3,
    #[default]
    Unknown = -1,
}

impl SkinningMethod {
    pub fn from_fbx(name: &str) -> SkinningMethod {
        match name {
            "Linear" => SkinningMethod::Linear,
            "Rigid" => SkinningMethod::Rigid,
            "DualQuaternion" => SkinningMethod::DualQuaternion,
            "Blend" => SkinningMethod::BlendedDqLinear,
            _ => SkinningMethod::Unknown,
        }
    }
}

/// Skeletal skinning of one or more meshes, one [`SkinCluster`] per influencing bone.
#[derive(Debug, Clone)]
pub struct SkinDeformer {
    pub id: SkinDeformerId,
    pub name: String,
    pub skinning_method: SkinningMethod,
    pub clusters: Vec<SkinClusterId>,
    /// Meshes deformed by this skin.
    pub meshes: Vec<MeshId>,
}

/// Influence of a single bone node on a set of mesh vertices.
#[derive(Debug, Clone)]
pub struct SkinCluster {
    pub id: SkinClusterId,
    pub name: String,
    /// Node driving the cluster, `None` when the document never links one.
    pub bone_node: Option<NodeId>,
    /// Control point indices, parallel to `weights`.
    pub vertices: Vec<u32>,
    pub weights: Vec<f64>,
    /// From mesh space in the bind pose to bone space (`Transform`).
    pub geometry_to_bone: DAffine3,
    /// Bone-to-world transform at bind time (`TransformLink`).
    pub bind_to_world: DAffine3,
}
