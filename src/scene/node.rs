use glam::{DAffine3, DMat4, DQuat, DVec3};

use super::{BoneId, CameraId, LightId, MaterialId, MeshId, NodeId};

/// Euler rotation order of `Lcl Rotation`. `XYZ` rotates around X first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum RotationOrder {
    #[default]
    Xyz = 0,
    Xzy = 1,
    Yzx = 2,
    Yxz = 3,
    Zxy = 4,
    Zyx = 5,
    Spheric = 6,
}

impl RotationOrder {
    pub fn from_fbx(value: i64) -> RotationOrder {
        match value {
            1 => RotationOrder::Xzy,
            2 => RotationOrder::Yzx,
            3 => RotationOrder::Yxz,
            4 => RotationOrder::Zxy,
            5 => RotationOrder::Zyx,
            6 => RotationOrder::Spheric,
            _ => RotationOrder::Xyz,
        }
    }

    /// Quaternion for euler angles given in degrees.
    pub fn to_quat(self, degrees: DVec3) -> DQuat {
        let x = DQuat::from_rotation_x(degrees.x.to_radians());
        let y = DQuat::from_rotation_y(degrees.y.to_radians());
        let z = DQuat::from_rotation_z(degrees.z.to_radians());
        match self {
            RotationOrder::Xyz | RotationOrder::Spheric => z * y * x,
            RotationOrder::Xzy => y * z * x,
            RotationOrder::Yzx => x * z * y,
            RotationOrder::Yxz => z * x * y,
            RotationOrder::Zxy => y * x * z,
            RotationOrder::Zyx => x * y * z,
        }
    }
}

/// Decomposed affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    pub fn from_affine(m: &DAffine3) -> Transform {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Transform {
            translation,
            rotation,
            scale,
        }
    }

    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Column-major 4x4 matrix for a 3x4 affine transform. The projective row is always
/// `(0, 0, 0, 1)`.
pub fn column_major(m: &DAffine3) -> [f64; 16] {
    DMat4::from(*m).to_cols_array()
}

/// An element of the transform hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// `None` only for the scene root.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    pub local_transform: Transform,
    pub rotation_order: RotationOrder,
    pub node_to_parent: DAffine3,
    /// `parent.node_to_world * node_to_parent`, identity composition for the root.
    pub node_to_world: DAffine3,
    /// Offset applied to attached geometry only, not inherited by children.
    pub geometry_transform: DAffine3,
    pub visible: bool,

    pub mesh: Option<MeshId>,
    pub light: Option<LightId>,
    pub camera: Option<CameraId>,
    pub bone: Option<BoneId>,
    pub materials: Vec<MaterialId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String) -> Node {
        Node {
            id,
            name,
            parent: None,
            children: Vec::new(),
            local_transform: Transform::IDENTITY,
            rotation_order: RotationOrder::Xyz,
            node_to_parent: DAffine3::IDENTITY,
            node_to_world: DAffine3::IDENTITY,
            geometry_transform: DAffine3::IDENTITY,
            visible: true,
            mesh: None,
            light: None,
            camera: None,
            bone: None,
            materials: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn world_transform(&self) -> [f64; 16] {
        column_major(&self.node_to_world)
    }

    pub fn local_matrix(&self) -> [f64; 16] {
        column_major(&self.node_to_parent)
    }
}
