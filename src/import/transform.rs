use glam::{DAffine3, DVec3};

use crate::import::props::Props;
use crate::scene::node::RotationOrder;

fn translation(v: DVec3) -> DAffine3 {
    DAffine3::from_translation(v)
}

fn euler_xyz(degrees: DVec3) -> DAffine3 {
    DAffine3::from_quat(RotationOrder::Xyz.to_quat(degrees))
}

/// `Lcl Translation` and friends composed into the node-to-parent matrix:
///
/// `T * Roff * Rp * Rpre * R * Rpost^-1 * Rp^-1 * Soff * Sp * S * Sp^-1`
pub(crate) fn node_to_parent(props: &Props) -> (DAffine3, RotationOrder) {
    let order = RotationOrder::from_fbx(props.int("RotationOrder", 0));

    let t = props.vec3("Lcl Translation", DVec3::ZERO);
    let r = props.vec3("Lcl Rotation", DVec3::ZERO);
    let s = props.vec3("Lcl Scaling", DVec3::ONE);
    let rotation_offset = props.vec3("RotationOffset", DVec3::ZERO);
    let rotation_pivot = props.vec3("RotationPivot", DVec3::ZERO);
    let pre_rotation = props.vec3("PreRotation", DVec3::ZERO);
    let post_rotation = props.vec3("PostRotation", DVec3::ZERO);
    let scaling_offset = props.vec3("ScalingOffset", DVec3::ZERO);
    let scaling_pivot = props.vec3("ScalingPivot", DVec3::ZERO);

    let m = translation(t)
        * translation(rotation_offset)
        * translation(rotation_pivot)
        * euler_xyz(pre_rotation)
        * DAffine3::from_quat(order.to_quat(r))
        * euler_xyz(post_rotation).inverse()
        * translation(-rotation_pivot)
        * translation(scaling_offset)
        * translation(scaling_pivot)
        * DAffine3::from_scale(s)
        * translation(-scaling_pivot);
    (m, order)
}

/// `Geometric*` offset, applied to attached geometry but not inherited by children.
pub(crate) fn geometry_transform(props: &Props) -> DAffine3 {
    let t = props.vec3("GeometricTranslation", DVec3::ZERO);
    let r = props.vec3("GeometricRotation", DVec3::ZERO);
    let s = props.vec3("GeometricScaling", DVec3::ONE);
    translation(t) * euler_xyz(r) * DAffine3::from_scale(s)
}
