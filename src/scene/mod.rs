//! The scene store: a single arena owning every entity of a loaded document.
//!
//! Entities refer to each other through typed ids ([`NodeId`], [`MeshId`], ...), never through
//! pointers, so the only lifetime in play is the one of the owning [`Scene`]. Indexing the scene
//! with an id is the strict API and panics on an id from another scene; the null-tolerant
//! façade lives in [`crate::handle`].

use std::fs;
use std::ops::Index;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::handle::SceneHandle;
use crate::import;
use crate::options::LoadOptions;
use crate::types::Format;

pub mod bone;
pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod node;
pub mod skin;
pub mod texture;

pub use self::bone::Bone;
pub use self::camera::{ApertureMode, AspectMode, Camera, ProjectionMode};
pub use self::light::{Light, LightAreaShape, LightDecay, LightType};
pub use self::material::{Material, MaterialTexture};
pub use self::mesh::{Face, Mesh, VertexAttribute};
pub use self::node::{Node, RotationOrder, Transform};
pub use self::skin::{SkinCluster, SkinDeformer, SkinningMethod};
pub use self::texture::{Texture, TextureType, WrapMode};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of the entity in its scene collection.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_index(index: usize) -> $name {
                $name(index as u32)
            }
        }
    };
}

entity_id!(
    /// Index of a [`Node`] in [`Scene::nodes`]. The root is always `NodeId(0)`.
    NodeId
);
entity_id!(MeshId);
entity_id!(MaterialId);
entity_id!(LightId);
entity_id!(CameraId);
entity_id!(BoneId);
entity_id!(TextureId);
entity_id!(SkinDeformerId);
entity_id!(SkinClusterId);

/// Signed axis of the document coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum CoordinateAxis {
    PositiveX = 0,
    NegativeX = 1,
    PositiveY = 2,
    NegativeY = 3,
    PositiveZ = 4,
    NegativeZ = 5,
    #[default]
    Unknown = 6,
}

impl CoordinateAxis {
    /// From the `*Axis`/`*AxisSign` pair of `GlobalSettings`.
    pub fn from_fbx(axis: i64, sign: i64) -> CoordinateAxis {
        let negative = sign < 0;
        match (axis, negative) {
            (0, false) => CoordinateAxis::PositiveX,
            (0, true) => CoordinateAxis::NegativeX,
            (1, false) => CoordinateAxis::PositiveY,
            (1, true) => CoordinateAxis::NegativeY,
            (2, false) => CoordinateAxis::PositiveZ,
            (2, true) => CoordinateAxis::NegativeZ,
            _ => CoordinateAxis::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateAxes {
    pub right: CoordinateAxis,
    pub up: CoordinateAxis,
    pub front: CoordinateAxis,
}

/// Document-wide configuration read from `GlobalSettings`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub axes: CoordinateAxes,
    /// Length of one document unit in meters.
    pub unit_meters: f64,
}

impl Default for SceneSettings {
    fn default() -> SceneSettings {
        SceneSettings {
            axes: CoordinateAxes::default(),
            unit_meters: 0.01,
        }
    }
}

/// Where the scene came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub format: Format,
    pub version: u32,
    pub creator: String,
}

/// A fully loaded FBX scene.
///
/// Built atomically by [`Scene::load`] (or the crate-level `load_*` functions) and never
/// mutated afterwards, so a `&Scene` can be shared freely between reader threads. Dropping the
/// scene releases every entity at once.
#[derive(Debug)]
pub struct Scene {
    pub(crate) nodes: Vec<Node>,
    pub(crate) meshes: Vec<Mesh>,
    pub(crate) materials: Vec<Material>,
    pub(crate) lights: Vec<Light>,
    pub(crate) cameras: Vec<Camera>,
    pub(crate) bones: Vec<Bone>,
    pub(crate) textures: Vec<Texture>,
    pub(crate) skin_deformers: Vec<SkinDeformer>,
    pub(crate) skin_clusters: Vec<SkinCluster>,
    pub(crate) settings: SceneSettings,
    pub(crate) metadata: Metadata,
}

impl Scene {
    /// Load the document at `path` with default options.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        Scene::load_with(path, &LoadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Scene> {
        let path = path.as_ref();
        debug!("loading FBX scene from {}", path.display());

        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::from(e),
        })?;
        if let Some(limit) = options.max_file_size {
            if meta.len() > limit {
                return Err(Error::TooLarge {
                    size: meta.len(),
                    limit,
                });
            }
        }
        let data = fs::read(path)?;
        Scene::decode(&data, options, path.parent())
    }

    /// Load a document already held in memory. Relative texture paths stay unresolved.
    pub fn from_bytes(data: &[u8], options: &LoadOptions) -> Result<Scene> {
        if let Some(limit) = options.max_file_size {
            if data.len() as u64 > limit {
                return Err(Error::TooLarge {
                    size: data.len() as u64,
                    limit,
                });
            }
        }
        Scene::decode(data, options, None)
    }

    fn decode(data: &[u8], options: &LoadOptions, base_dir: Option<&Path>) -> Result<Scene> {
        let document = crate::decode_document(data)?;
        debug!("decoded {:?} document, version {}", document.format, document.version);
        let scene = import::build(&document, options, base_dir)?;
        info!(
            "loaded scene: {} nodes, {} meshes, {} materials, {} lights, {} cameras, {} bones, \
             {} textures, {} skins",
            scene.nodes.len(),
            scene.meshes.len(),
            scene.materials.len(),
            scene.lights.len(),
            scene.cameras.len(),
            scene.bones.len(),
            scene.textures.len(),
            scene.skin_deformers.len()
        );
        Ok(scene)
    }

    /// Null-tolerant view of this scene.
    pub fn handle(&self) -> SceneHandle<'_> {
        SceneHandle::from(self)
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    pub fn skin_deformers(&self) -> &[SkinDeformer] {
        &self.skin_deformers
    }

    pub fn skin_clusters(&self) -> &[SkinCluster] {
        &self.skin_clusters
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// First node named `name`, in load order.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn find_material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn find_texture(&self, name: &str) -> Option<&Texture> {
        self.textures.iter().find(|t| t.name == name)
    }

    /// Ancestors of `node`, nearest first, ending with the root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self[node].parent,
        }
    }
}

pub struct Ancestors<'s> {
    scene: &'s Scene,
    next: Option<NodeId>,
}

impl<'s> Iterator for Ancestors<'s> {
    type Item = &'s Node;

    fn next(&mut self) -> Option<&'s Node> {
        let node = &self.scene[self.next?];
        self.next = node.parent;
        Some(node)
    }
}

/// Bounds-checked counterpart of `scene[id]`.
pub trait Lookup<I> {
    type Output;

    fn lookup(&self, id: I) -> Option<&Self::Output>;
}

macro_rules! index_by_id {
    ($id:ident, $output:ident, $field:ident) => {
        impl Index<$id> for Scene {
            type Output = $output;

            #[inline]
            fn index(&self, id: $id) -> &$output {
                &self.$field[id.index()]
            }
        }

        impl Lookup<$id> for Scene {
            type Output = $output;

            #[inline]
            fn lookup(&self, id: $id) -> Option<&$output> {
                self.$field.get(id.index())
            }
        }
    };
}

index_by_id!(NodeId, Node, nodes);
index_by_id!(MeshId, Mesh, meshes);
index_by_id!(MaterialId, Material, materials);
index_by_id!(LightId, Light, lights);
index_by_id!(CameraId, Camera, cameras);
index_by_id!(BoneId, Bone, bones);
index_by_id!(TextureId, Texture, textures);
index_by_id!(SkinDeformerId, SkinDeformer, skin_deformers);
index_by_id!(SkinClusterId, SkinCluster, skin_clusters);
