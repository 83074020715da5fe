//! The `fbxscene` crate loads `fbx` 3D model files into a read-only scene graph. Both the
//! binary encoding (based on the `blender` implementation of the format) and the ASCII one are
//! understood.
//!
//! A [`Scene`] owns every node, mesh, material, light, camera, bone, texture and skin deformer
//! of the file and is dropped as a whole. Entities can be reached two ways:
//!
//! - strictly, by indexing the scene with a typed id (`scene[node.mesh.unwrap()]`);
//! - through the null-tolerant [`handle`] layer, where a missing object reads as zeros and
//!   empty strings so that lookups can be chained without checks.
//!
//! ```no_run
//! let scene = fbxscene::load_file("cube.fbx")?;
//! let root = scene.handle().root_node();
//! let name = root.child(0).mesh().material(0).name();
//! println!("first material: {:?}", name);
//! # Ok::<(), fbxscene::Error>(())
//! ```

use std::path::Path;

pub mod ascii;
pub mod binary;
pub mod error;
pub mod handle;
mod import;
pub mod options;
pub mod scene;
pub mod types;

#[cfg(feature = "capi")]
pub mod capi;

pub use error::{Error, Result};
pub use handle::{
    BoneHandle, CameraHandle, Handle, LightHandle, MaterialHandle, MeshHandle, NodeHandle,
    SceneHandle, SkinClusterHandle, SkinDeformerHandle, TextureHandle,
};
pub use options::{IndexErrorHandling, LoadOptions};
pub use scene::{CoordinateAxes, CoordinateAxis, Scene, SceneSettings};

use types::Document;

/// Decode a document in either encoding. Anything without the binary magic is read as ASCII.
pub(crate) fn decode_document(data: &[u8]) -> Result<Document> {
    if binary::is_binary(data) {
        binary::decode_fbx(data)
    } else {
        ascii::decode_fbx(&String::from_utf8_lossy(data))
    }
}

/// Load a FBX file to a [`Scene`](scene/struct.Scene.html).
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Scene> {
    Scene::load(path)
}

pub fn load_file_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Scene> {
    Scene::load_with(path, options)
}

/// Load a FBX document from memory.
pub fn load_memory(data: &[u8]) -> Result<Scene> {
    Scene::from_bytes(data, &LoadOptions::default())
}

pub fn load_memory_with(data: &[u8], options: &LoadOptions) -> Result<Scene> {
    Scene::from_bytes(data, options)
}

#[cfg(test)]
mod tests;
