//! `Deformer` objects of class `Skin` and their `SubDeformer` clusters.

use glam::{DAffine3, DMat4};
use log::{debug, warn};

use crate::scene::skin::{SkinCluster, SkinDeformer, SkinningMethod};
use crate::scene::{SkinClusterId, SkinDeformerId};
use crate::types::{DocNode, Property};

pub(crate) fn read_skin(id: SkinDeformerId, name: String, object: &DocNode) -> SkinDeformer {
    let skinning_method = match object.child_str("SkinningType") {
        Some(method) => SkinningMethod::from_fbx(method),
        None => SkinningMethod::Linear,
    };
    SkinDeformer {
        id,
        name,
        skinning_method,
        clusters: Vec::new(),
        meshes: Vec::new(),
    }
}

/// A 16 element column-major matrix record, identity when missing or short.
fn matrix(object: &DocNode, name: &str) -> DAffine3 {
    match object.child_property(name).and_then(Property::to_f64_vec) {
        Some(m) if m.len() == 16 => {
            let mut cols = [0.0; 16];
            cols.copy_from_slice(&m);
            DAffine3::from_mat4(DMat4::from_cols_array(&cols))
        }
        Some(m) => {
            debug!("{} matrix has {} elements, using identity", name, m.len());
            DAffine3::IDENTITY
        }
        None => DAffine3::IDENTITY,
    }
}

pub(crate) fn read_cluster(id: SkinClusterId, name: String, object: &DocNode) -> SkinCluster {
    let indexes = object
        .child_property("Indexes")
        .and_then(Property::to_i64_vec)
        .unwrap_or_default();
    let raw_weights = object
        .child_property("Weights")
        .and_then(Property::to_f64_vec)
        .unwrap_or_default();
    if indexes.len() != raw_weights.len() {
        warn!(
            "cluster {:?}: {} indices but {} weights, ignoring the excess",
            name,
            indexes.len(),
            raw_weights.len()
        );
    }

    let mut vertices = Vec::with_capacity(indexes.len().min(raw_weights.len()));
    let mut weights = Vec::with_capacity(vertices.capacity());
    for (&index, &weight) in indexes.iter().zip(raw_weights.iter()) {
        match u32::try_from(index) {
            Ok(vertex) => {
                vertices.push(vertex);
                weights.push(weight);
            }
            Err(_) => warn!("cluster {:?}: dropping invalid vertex index {}", name, index),
        }
    }

    SkinCluster {
        id,
        name,
        bone_node: None,
        vertices,
        weights,
        geometry_to_bone: matrix(object, "Transform"),
        bind_to_world: matrix(object, "TransformLink"),
    }
}
