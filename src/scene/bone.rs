use super::{BoneId, NodeId};

/// Skeleton attribute of a node.
#[derive(Debug, Clone)]
pub struct Bone {
    pub id: BoneId,
    pub name: String,
    pub radius: f64,
    pub relative_length: f64,
    /// First bone of a chain. Unrelated to [`crate::scene::Node::is_root`].
    pub is_root: bool,
    pub instances: Vec<NodeId>,
}
