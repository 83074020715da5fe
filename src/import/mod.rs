//! Builds a [`Scene`] out of a decoded [`Document`].
//!
//! Objects are created first, in document order, then wired together by the `Connections`
//! section. Once every parent link is known the hierarchy is repaired into a tree rooted at
//! the synthesized node 0, and world transforms are propagated from the root down.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use log::{debug, trace, warn};

use crate::error::Result;
use crate::options::LoadOptions;
use crate::scene::{
    BoneId, CameraId, CoordinateAxes, CoordinateAxis, LightId, MaterialId, MaterialTexture,
    Mesh, MeshId, Metadata, Node, NodeId, Scene, SceneSettings, SkinClusterId, SkinDeformerId,
    TextureId, Transform,
};
use crate::types::{DocNode, Document, Property};

mod attribute;
mod deformer;
mod material;
mod mesh;
pub(crate) mod props;
mod transform;

use self::material::Media;
use self::props::{Props, Templates};

#[derive(Debug, Clone, Copy)]
enum Object {
    Node(NodeId),
    Mesh(MeshId),
    Light(LightId),
    Camera(CameraId),
    Bone(BoneId),
    Material(MaterialId),
    Texture(TextureId),
    Video(usize),
    Skin(SkinDeformerId),
    Cluster(SkinClusterId),
}

/// `Model::Cube` in ASCII files, `Cube\0\x01Model` in binary ones.
fn object_name(raw: &str) -> &str {
    if let Some(pos) = raw.find("\0\x01") {
        &raw[..pos]
    } else if let Some(pos) = raw.find("::") {
        &raw[pos + 2..]
    } else {
        raw
    }
}

struct Builder<'a> {
    options: &'a LoadOptions,
    base_dir: Option<&'a Path>,
    scene: Scene,
    objects: HashMap<i64, Object>,
    parents: Vec<Option<NodeId>>,
    videos: Vec<Media>,
}

impl<'a> Builder<'a> {
    fn new(
        document: &Document,
        options: &'a LoadOptions,
        base_dir: Option<&'a Path>,
    ) -> Builder<'a> {
        let scene = Scene {
            nodes: vec![Node::new(NodeId(0), String::new())],
            meshes: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            cameras: Vec::new(),
            bones: Vec::new(),
            textures: Vec::new(),
            skin_deformers: Vec::new(),
            skin_clusters: Vec::new(),
            settings: SceneSettings::default(),
            metadata: Metadata {
                format: document.format,
                version: document.version,
                creator: String::new(),
            },
        };
        Builder {
            options,
            base_dir,
            scene,
            objects: HashMap::new(),
            parents: vec![None],
            videos: Vec::new(),
        }
    }

    fn read_object(&mut self, object: &DocNode, templates: &Templates) -> Result<()> {
        let uid = match object.property(0).and_then(Property::as_i64) {
            Some(uid) => uid,
            None => {
                trace!("skipping {} object without id", object.name);
                return Ok(());
            }
        };
        let name = object_name(object.property(1).and_then(Property::as_str).unwrap_or(""));
        let class = object.property(2).and_then(Property::as_str).unwrap_or("");
        let template = |object_type: &str, name: &str| templates.get(object_type, name);

        let entity = match (object.name.as_str(), class) {
            ("Model", _) => {
                let props = Props::from_object(object, template("Model", "FbxNode"));
                let id = NodeId::from_index(self.scene.nodes.len());
                let mut node = Node::new(id, name.to_string());
                let (node_to_parent, rotation_order) = transform::node_to_parent(&props);
                node.node_to_parent = node_to_parent;
                node.local_transform = Transform::from_affine(&node_to_parent);
                node.rotation_order = rotation_order;
                node.geometry_transform = transform::geometry_transform(&props);
                node.visible = props.real("Visibility", 1.0) > 0.0 && props.bool("Show", true);
                self.scene.nodes.push(node);
                self.parents.push(None);
                Object::Node(id)
            }
            ("Geometry", "Mesh") => {
                let id = MeshId::from_index(self.scene.meshes.len());
                let mut mesh = Mesh {
                    id,
                    name: name.to_string(),
                    num_vertices: 0,
                    num_indices: 0,
                    num_faces: 0,
                    num_triangles: 0,
                    faces: Vec::new(),
                    vertex_position: Default::default(),
                    vertex_normal: Default::default(),
                    vertex_uv: Default::default(),
                    vertex_tangent: Default::default(),
                    vertex_bitangent: Default::default(),
                    vertex_color: Default::default(),
                    face_material: Vec::new(),
                    materials: Vec::new(),
                    skin_deformers: Vec::new(),
                    instances: Vec::new(),
                };
                if !self.options.ignore_geometry {
                    mesh::read_geometry(&mut mesh, object, self.options.index_error_handling)?;
                }
                self.scene.meshes.push(mesh);
                Object::Mesh(id)
            }
            ("NodeAttribute", "Light") => {
                let props = Props::from_object(object, template("NodeAttribute", "FbxLight"));
                let id = LightId::from_index(self.scene.lights.len());
                self.scene.lights.push(attribute::read_light(id, name.to_string(), &props));
                Object::Light(id)
            }
            ("NodeAttribute", "Camera") => {
                let props = Props::from_object(object, template("NodeAttribute", "FbxCamera"));
                let id = CameraId::from_index(self.scene.cameras.len());
                self.scene.cameras.push(attribute::read_camera(id, name.to_string(), &props));
                Object::Camera(id)
            }
            ("NodeAttribute", "LimbNode" | "Limb" | "Root") => {
                let props = Props::from_object(object, template("NodeAttribute", "FbxSkeleton"));
                let id = BoneId::from_index(self.scene.bones.len());
                self.scene
                    .bones
                    .push(attribute::read_bone(id, name.to_string(), &props, class));
                Object::Bone(id)
            }
            ("Material", _) => {
                let id = MaterialId::from_index(self.scene.materials.len());
                self.scene
                    .materials
                    .push(material::read_material(id, name.to_string(), object));
                Object::Material(id)
            }
            ("Texture", _) | ("LayeredTexture", _) | ("ProceduralTexture", _) => {
                let template_name = match object.name.as_str() {
                    "LayeredTexture" => "FbxLayeredTexture",
                    _ => "FbxFileTexture",
                };
                let props =
                    Props::from_object(object, template(object.name.as_str(), template_name));
                let id = TextureId::from_index(self.scene.textures.len());
                self.scene.textures.push(material::read_texture(
                    id,
                    name.to_string(),
                    object,
                    &props,
                    self.base_dir,
                ));
                Object::Texture(id)
            }
            ("Deformer", "Skin") => {
                let id = SkinDeformerId::from_index(self.scene.skin_deformers.len());
                self.scene
                    .skin_deformers
                    .push(deformer::read_skin(id, name.to_string(), object));
                Object::Skin(id)
            }
            ("Deformer", "Cluster") => {
                let id = SkinClusterId::from_index(self.scene.skin_clusters.len());
                self.scene
                    .skin_clusters
                    .push(deformer::read_cluster(id, name.to_string(), object));
                Object::Cluster(id)
            }
            ("Video", _) => {
                let props = Props::from_object(object, template("Video", "FbxVideo"));
                self.videos.push(Media::read(object, &props));
                Object::Video(self.videos.len() - 1)
            }
            (other, class) => {
                trace!("ignoring {} object {:?} of class {:?}", other, name, class);
                return Ok(());
            }
        };
        self.objects.insert(uid, entity);
        Ok(())
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        let slot = &mut self.parents[child.index()];
        match *slot {
            Some(existing) if existing != parent => warn!(
                "node {:?} already has parent {:?}, ignoring {:?}",
                self.scene.nodes[child.index()].name,
                self.scene.nodes[existing.index()].name,
                self.scene.nodes[parent.index()].name
            ),
            _ => *slot = Some(parent),
        }
    }

    fn connect(&mut self, connection: &DocNode) {
        let kind = connection.property(0).and_then(Property::as_str).unwrap_or("");
        let (child_uid, parent_uid) = match (
            connection.property(1).and_then(Property::as_i64),
            connection.property(2).and_then(Property::as_i64),
        ) {
            (Some(child), Some(parent)) => (child, parent),
            _ => {
                debug!("malformed connection {:?}", connection.properties);
                return;
            }
        };
        let property = match kind {
            "OP" => connection.property(3).and_then(Property::as_str).unwrap_or(""),
            _ => "",
        };

        let child = match self.objects.get(&child_uid) {
            Some(&child) => child,
            None => {
                trace!("connection from unsupported object {}", child_uid);
                return;
            }
        };
        let parent = if parent_uid == 0 {
            Object::Node(NodeId(0))
        } else {
            match self.objects.get(&parent_uid) {
                Some(&parent) => parent,
                None => {
                    warn!("{:?} connected to unknown object {}", child, parent_uid);
                    return;
                }
            }
        };

        let scene = &mut self.scene;
        match (child, parent) {
            (Object::Node(c), Object::Node(p)) => {
                if c != p {
                    self.set_parent(c, p);
                }
            }
            (Object::Mesh(m), Object::Node(n)) => {
                scene.meshes[m.index()].instances.push(n);
                attach(&mut scene.nodes[n.index()].mesh, m, "mesh");
            }
            (Object::Light(l), Object::Node(n)) => {
                scene.lights[l.index()].instances.push(n);
                attach(&mut scene.nodes[n.index()].light, l, "light");
            }
            (Object::Camera(c), Object::Node(n)) => {
                scene.cameras[c.index()].instances.push(n);
                attach(&mut scene.nodes[n.index()].camera, c, "camera");
            }
            (Object::Bone(b), Object::Node(n)) => {
                scene.bones[b.index()].instances.push(n);
                attach(&mut scene.nodes[n.index()].bone, b, "bone");
            }
            (Object::Material(m), Object::Node(n)) => scene.nodes[n.index()].materials.push(m),
            (Object::Texture(t), Object::Material(m)) => {
                scene.materials[m.index()].textures.push(MaterialTexture {
                    property: property.to_string(),
                    texture: t,
                })
            }
            (Object::Video(v), Object::Texture(t)) => {
                let texture = &mut scene.textures[t.index()];
                material::attach_video(texture, &self.videos[v], self.base_dir)
            }
            (Object::Skin(d), Object::Mesh(m)) => {
                scene.meshes[m.index()].skin_deformers.push(d);
                scene.skin_deformers[d.index()].meshes.push(m);
            }
            (Object::Cluster(c), Object::Skin(d)) => {
                scene.skin_deformers[d.index()].clusters.push(c)
            }
            (Object::Node(n), Object::Cluster(c)) => {
                let cluster = &mut scene.skin_clusters[c.index()];
                match cluster.bone_node {
                    Some(existing) => warn!(
                        "cluster {:?} already follows node {:?}, ignoring {:?}",
                        cluster.name,
                        scene.nodes[existing.index()].name,
                        scene.nodes[n.index()].name
                    ),
                    None => cluster.bone_node = Some(n),
                }
            }
            (child, parent) => trace!("ignoring connection {:?} -> {:?}", child, parent),
        }
    }

    /// Cut every parent loop so that all nodes lead up to the root.
    fn break_cycles(&mut self) {
        const UNVISITED: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNVISITED; self.parents.len()];
        state[0] = DONE;
        let mut path = Vec::new();
        for start in 1..self.parents.len() {
            let mut current = start;
            while state[current] == UNVISITED {
                state[current] = ON_PATH;
                path.push(current);
                current = self.parents[current].map_or(0, NodeId::index);
            }
            if state[current] == ON_PATH {
                warn!(
                    "node {:?} is part of a parent cycle, attaching it to the root",
                    self.scene.nodes[current].name
                );
                self.parents[current] = Some(NodeId(0));
            }
            for i in path.drain(..) {
                state[i] = DONE;
            }
        }
    }

    fn link_hierarchy(&mut self) {
        let nodes = &mut self.scene.nodes;
        for index in 1..nodes.len() {
            let parent = self.parents[index].unwrap_or(NodeId(0));
            nodes[index].parent = Some(parent);
            nodes[parent.index()].children.push(NodeId::from_index(index));
        }

        let mut queue = VecDeque::new();
        queue.push_back(NodeId(0));
        while let Some(id) = queue.pop_front() {
            let parent_to_world = nodes[id.index()].node_to_world;
            for k in 0..nodes[id.index()].children.len() {
                let child = nodes[id.index()].children[k];
                let node = &mut nodes[child.index()];
                node.node_to_world = parent_to_world * node.node_to_parent;
                queue.push_back(child);
            }
        }
    }

    fn finish_attributes(&mut self) {
        let scene = &mut self.scene;
        for mesh in scene.meshes.iter_mut() {
            if let Some(&first) = mesh.instances.first() {
                mesh.materials = scene.nodes[first.index()].materials.clone();
            }
        }
        if !self.options.ignore_geometry {
            for skin in scene.skin_deformers.iter() {
                let num_vertices = match skin.meshes.first() {
                    Some(&mesh) => scene.meshes[mesh.index()].num_vertices,
                    None => continue,
                };
                for &c in skin.clusters.iter() {
                    let cluster = &mut scene.skin_clusters[c.index()];
                    let before = cluster.vertices.len();
                    let (vertices, weights): (Vec<u32>, Vec<f64>) = cluster
                        .vertices
                        .iter()
                        .zip(cluster.weights.iter())
                        .filter(|&(&v, _)| (v as usize) < num_vertices)
                        .unzip();
                    if vertices.len() != before {
                        warn!(
                            "cluster {:?}: dropped {} weights past the {} mesh vertices",
                            cluster.name,
                            before - vertices.len(),
                            num_vertices
                        );
                    }
                    cluster.vertices = vertices;
                    cluster.weights = weights;
                }
            }
        }
        for node in scene.nodes.iter() {
            if let (Some(bone), Some(parent)) = (node.bone, node.parent) {
                if scene.nodes[parent.index()].bone.is_none() {
                    scene.bones[bone.index()].is_root = true;
                }
            }
        }
    }

    fn read_settings(&mut self, document: &Document) {
        if let Some(global) = document.node("GlobalSettings") {
            let props = Props::from_object(global, None);
            let axis = |name: &str| {
                if props.contains(name) {
                    let sign = props.int(&format!("{}Sign", name), 1);
                    CoordinateAxis::from_fbx(props.int(name, -1), sign)
                } else {
                    CoordinateAxis::Unknown
                }
            };
            self.scene.settings = SceneSettings {
                axes: CoordinateAxes {
                    right: axis("CoordAxis"),
                    up: axis("UpAxis"),
                    front: axis("FrontAxis"),
                },
                unit_meters: props.real("UnitScaleFactor", 1.0) / 100.0,
            };
        }

        let creator = document
            .node("Creator")
            .or_else(|| document.node("FBXHeaderExtension").and_then(|h| h.child("Creator")))
            .and_then(|c| c.property(0))
            .and_then(Property::as_str);
        if let Some(creator) = creator {
            self.scene.metadata.creator = creator.to_string();
        }
    }
}

fn attach<I: Copy + std::fmt::Debug>(slot: &mut Option<I>, id: I, what: &str) {
    match *slot {
        Some(existing) => warn!("node already has {} {:?}, ignoring {:?}", what, existing, id),
        None => *slot = Some(id),
    }
}

pub(crate) fn build(
    document: &Document,
    options: &LoadOptions,
    base_dir: Option<&Path>,
) -> Result<Scene> {
    let templates = Templates::from_document(document);
    let mut builder = Builder::new(document, options, base_dir);

    if let Some(objects) = document.node("Objects") {
        for object in objects.children.iter() {
            builder.read_object(object, &templates)?;
        }
    }
    if let Some(connections) = document.node("Connections") {
        for connection in connections.children_named("C") {
            builder.connect(connection);
        }
    }

    builder.break_cycles();
    builder.link_hierarchy();
    builder.finish_attributes();
    builder.read_settings(document);
    Ok(builder.scene)
}
