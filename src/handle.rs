//! Null-tolerant views over a [`Scene`].
//!
//! A [`Handle`] either borrows one entity of a scene or is absent. Every accessor of an absent
//! handle returns the `Default` of its result type: `0`, `false`, `""`, an empty slice, the
//! `Unknown` (or lowest) enum variant, or another absent handle. Lookups can thus be chained
//! without checks:
//!
//! ```no_run
//! # let scene = fbxscene::load_file("cube.fbx").unwrap();
//! let name = scene.handle().find_node("Cube").mesh().material(3).name();
//! ```
//!
//! Use [`Handle::is_present`] or [`Handle::get`] to tell an absent object apart from one whose
//! fields are empty.

use std::fmt;
use std::ptr;

use glam::{DVec2, DVec3, Vec2, Vec3, Vec4};

use crate::scene::mesh::Face;
use crate::scene::{
    ApertureMode, AspectMode, Bone, Camera, CoordinateAxes, CoordinateAxis, Light,
    LightAreaShape, LightDecay, LightType, Lookup, Material, Mesh, Node, ProjectionMode,
    RotationOrder, Scene, SkinCluster, SkinDeformer, SkinningMethod, Texture, TextureType,
    Transform, WrapMode,
};
use crate::scene::node::column_major;
use crate::types::Format;

/// Borrow of one entity of type `T` in a scene, or nothing.
pub struct Handle<'s, T> {
    inner: Option<(&'s Scene, &'s T)>,
}

pub type SceneHandle<'s> = Handle<'s, Scene>;
pub type NodeHandle<'s> = Handle<'s, Node>;
pub type MeshHandle<'s> = Handle<'s, Mesh>;
pub type MaterialHandle<'s> = Handle<'s, Material>;
pub type LightHandle<'s> = Handle<'s, Light>;
pub type CameraHandle<'s> = Handle<'s, Camera>;
pub type BoneHandle<'s> = Handle<'s, Bone>;
pub type TextureHandle<'s> = Handle<'s, Texture>;
pub type SkinDeformerHandle<'s> = Handle<'s, SkinDeformer>;
pub type SkinClusterHandle<'s> = Handle<'s, SkinCluster>;

impl<'s, T> Clone for Handle<'s, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'s, T> Copy for Handle<'s, T> {}

impl<'s, T> Default for Handle<'s, T> {
    fn default() -> Self {
        Handle::absent()
    }
}

/// Two handles are equal when they point at the same entity of the same scene.
impl<'s, T> PartialEq for Handle<'s, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.inner, other.inner) {
            (Some((sa, a)), Some((sb, b))) => ptr::eq(sa, sb) && ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<'s, T> Eq for Handle<'s, T> {}

impl<'s, T: fmt::Debug> fmt::Debug for Handle<'s, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            Some((_, value)) => f.debug_tuple("Handle").field(value).finish(),
            None => f.write_str("Handle(absent)"),
        }
    }
}

impl<'s> From<&'s Scene> for SceneHandle<'s> {
    fn from(scene: &'s Scene) -> Self {
        Handle {
            inner: Some((scene, scene)),
        }
    }
}

impl<'s> From<Option<&'s Scene>> for SceneHandle<'s> {
    fn from(scene: Option<&'s Scene>) -> Self {
        scene.map_or_else(Handle::absent, SceneHandle::from)
    }
}

impl<'s, T> Handle<'s, T> {
    pub fn absent() -> Self {
        Handle { inner: None }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// The entity itself, for callers that want the strict API back.
    #[inline]
    pub fn get(&self) -> Option<&'s T> {
        self.inner.map(|(_, value)| value)
    }

    /// The scene the entity belongs to.
    #[inline]
    pub fn scene(&self) -> Option<&'s Scene> {
        self.inner.map(|(scene, _)| scene)
    }

    /// Apply `f` to the entity, or return the default of `R` when absent.
    #[inline]
    fn project<R: Default>(&self, f: impl FnOnce(&'s Scene, &'s T) -> R) -> R {
        match self.inner {
            Some((scene, value)) => f(scene, value),
            None => R::default(),
        }
    }

    #[inline]
    fn follow<U>(&self, f: impl FnOnce(&'s Scene, &'s T) -> Option<&'s U>) -> Handle<'s, U> {
        Handle {
            inner: self
                .inner
                .and_then(|(scene, value)| f(scene, value).map(|target| (scene, target))),
        }
    }

    /// Copy `value` into `out` if the handle is present. Returns whether anything was written.
    #[inline]
    fn write<V>(&self, out: &mut V, f: impl FnOnce(&'s T) -> V) -> bool {
        match self.get() {
            Some(value) => {
                *out = f(value);
                true
            }
            None => false,
        }
    }
}

impl<'s> SceneHandle<'s> {
    pub fn num_nodes(&self) -> usize {
        self.project(|s, _| s.nodes.len())
    }

    pub fn node(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, _| s.nodes.get(index))
    }

    pub fn root_node(&self) -> NodeHandle<'s> {
        self.node(0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeHandle<'s>> + 's {
        let scene = *self;
        (0..self.num_nodes()).map(move |i| scene.node(i))
    }

    pub fn num_meshes(&self) -> usize {
        self.project(|s, _| s.meshes.len())
    }

    pub fn mesh(&self, index: usize) -> MeshHandle<'s> {
        self.follow(|s, _| s.meshes.get(index))
    }

    pub fn num_materials(&self) -> usize {
        self.project(|s, _| s.materials.len())
    }

    pub fn material(&self, index: usize) -> MaterialHandle<'s> {
        self.follow(|s, _| s.materials.get(index))
    }

    pub fn num_lights(&self) -> usize {
        self.project(|s, _| s.lights.len())
    }

    pub fn light(&self, index: usize) -> LightHandle<'s> {
        self.follow(|s, _| s.lights.get(index))
    }

    pub fn num_cameras(&self) -> usize {
        self.project(|s, _| s.cameras.len())
    }

    pub fn camera(&self, index: usize) -> CameraHandle<'s> {
        self.follow(|s, _| s.cameras.get(index))
    }

    pub fn num_bones(&self) -> usize {
        self.project(|s, _| s.bones.len())
    }

    pub fn bone(&self, index: usize) -> BoneHandle<'s> {
        self.follow(|s, _| s.bones.get(index))
    }

    pub fn num_textures(&self) -> usize {
        self.project(|s, _| s.textures.len())
    }

    pub fn texture(&self, index: usize) -> TextureHandle<'s> {
        self.follow(|s, _| s.textures.get(index))
    }

    pub fn num_skin_deformers(&self) -> usize {
        self.project(|s, _| s.skin_deformers.len())
    }

    pub fn skin_deformer(&self, index: usize) -> SkinDeformerHandle<'s> {
        self.follow(|s, _| s.skin_deformers.get(index))
    }

    pub fn num_skin_clusters(&self) -> usize {
        self.project(|s, _| s.skin_clusters.len())
    }

    pub fn skin_cluster(&self, index: usize) -> SkinClusterHandle<'s> {
        self.follow(|s, _| s.skin_clusters.get(index))
    }

    pub fn find_node(&self, name: &str) -> NodeHandle<'s> {
        self.follow(|s, _| s.find_node(name))
    }

    pub fn find_material(&self, name: &str) -> MaterialHandle<'s> {
        self.follow(|s, _| s.find_material(name))
    }

    pub fn find_texture(&self, name: &str) -> TextureHandle<'s> {
        self.follow(|s, _| s.find_texture(name))
    }

    pub fn axes(&self) -> CoordinateAxes {
        self.project(|s, _| s.settings.axes)
    }

    pub fn axis_right(&self) -> CoordinateAxis {
        self.axes().right
    }

    pub fn axis_up(&self) -> CoordinateAxis {
        self.axes().up
    }

    pub fn axis_front(&self) -> CoordinateAxis {
        self.axes().front
    }

    pub fn unit_meters(&self) -> f64 {
        self.project(|s, _| s.settings.unit_meters)
    }

    pub fn version(&self) -> u32 {
        self.project(|s, _| s.metadata.version)
    }

    pub fn is_ascii(&self) -> bool {
        self.project(|s, _| s.metadata.format == Format::Ascii)
    }

    pub fn creator(&self) -> &'s str {
        self.project(|s, _| s.metadata.creator.as_str())
    }
}

impl<'s> NodeHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, n| n.name.as_str())
    }

    /// False for absent handles as well as for every node but the scene root.
    pub fn is_root(&self) -> bool {
        self.project(|_, n| n.is_root())
    }

    pub fn parent(&self) -> NodeHandle<'s> {
        self.follow(|s, n| n.parent.and_then(|id| s.lookup(id)))
    }

    pub fn num_children(&self) -> usize {
        self.project(|_, n| n.children.len())
    }

    pub fn child(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, n| n.children.get(index).and_then(|&id| s.lookup(id)))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeHandle<'s>> + 's {
        let node = *self;
        (0..self.num_children()).map(move |i| node.child(i))
    }

    pub fn mesh(&self) -> MeshHandle<'s> {
        self.follow(|s, n| n.mesh.and_then(|id| s.lookup(id)))
    }

    pub fn light(&self) -> LightHandle<'s> {
        self.follow(|s, n| n.light.and_then(|id| s.lookup(id)))
    }

    pub fn camera(&self) -> CameraHandle<'s> {
        self.follow(|s, n| n.camera.and_then(|id| s.lookup(id)))
    }

    pub fn bone(&self) -> BoneHandle<'s> {
        self.follow(|s, n| n.bone.and_then(|id| s.lookup(id)))
    }

    pub fn num_materials(&self) -> usize {
        self.project(|_, n| n.materials.len())
    }

    pub fn material(&self, index: usize) -> MaterialHandle<'s> {
        self.follow(|s, n| n.materials.get(index).and_then(|&id| s.lookup(id)))
    }

    pub fn visible(&self) -> bool {
        self.project(|_, n| n.visible)
    }

    pub fn rotation_order(&self) -> RotationOrder {
        self.project(|_, n| n.rotation_order)
    }

    /// Decomposed node-to-parent transform; all zeros when absent.
    pub fn local_transform(&self) -> Transform {
        self.inner.map_or(
            Transform {
                scale: DVec3::ZERO,
                ..Transform::IDENTITY
            },
            |(_, n)| n.local_transform,
        )
    }

    pub fn local_translation(&self) -> DVec3 {
        self.project(|_, n| n.local_transform.translation)
    }

    pub fn local_scale(&self) -> DVec3 {
        self.project(|_, n| n.local_transform.scale)
    }

    /// Column-major node-to-parent matrix.
    pub fn local_matrix(&self) -> [f64; 16] {
        self.project(|_, n| n.local_matrix())
    }

    /// Column-major node-to-world matrix.
    pub fn world_transform(&self) -> [f64; 16] {
        self.project(|_, n| n.world_transform())
    }

    pub fn geometry_transform(&self) -> [f64; 16] {
        self.project(|_, n| column_major(&n.geometry_transform))
    }

    /// Leaves `out` untouched and returns false for an absent handle.
    pub fn world_transform_into(&self, out: &mut [f64; 16]) -> bool {
        self.write(out, Node::world_transform)
    }

    pub fn local_matrix_into(&self, out: &mut [f64; 16]) -> bool {
        self.write(out, Node::local_matrix)
    }

    pub fn world_position(&self) -> DVec3 {
        self.project(|_, n| n.node_to_world.translation)
    }
}

impl<'s> MeshHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, m| m.name.as_str())
    }

    pub fn num_vertices(&self) -> usize {
        self.project(|_, m| m.num_vertices)
    }

    pub fn num_indices(&self) -> usize {
        self.project(|_, m| m.num_indices)
    }

    pub fn num_faces(&self) -> usize {
        self.project(|_, m| m.num_faces)
    }

    pub fn num_triangles(&self) -> usize {
        self.project(|_, m| m.num_triangles)
    }

    pub fn faces(&self) -> &'s [Face] {
        self.project(|_, m| m.faces.as_slice())
    }

    pub fn face(&self, index: usize) -> Face {
        self.project(|_, m| m.faces.get(index).copied().unwrap_or_default())
    }

    pub fn positions(&self) -> &'s [Vec3] {
        self.project(|_, m| m.vertex_position.values.as_slice())
    }

    pub fn position_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_position.indices.as_slice())
    }

    pub fn has_normals(&self) -> bool {
        self.project(|_, m| m.vertex_normal.exists())
    }

    pub fn normals(&self) -> &'s [Vec3] {
        self.project(|_, m| m.vertex_normal.values.as_slice())
    }

    pub fn normal_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_normal.indices.as_slice())
    }

    pub fn has_uvs(&self) -> bool {
        self.project(|_, m| m.vertex_uv.exists())
    }

    pub fn uvs(&self) -> &'s [Vec2] {
        self.project(|_, m| m.vertex_uv.values.as_slice())
    }

    pub fn uv_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_uv.indices.as_slice())
    }

    pub fn has_tangents(&self) -> bool {
        self.project(|_, m| m.vertex_tangent.exists())
    }

    pub fn tangents(&self) -> &'s [Vec3] {
        self.project(|_, m| m.vertex_tangent.values.as_slice())
    }

    pub fn tangent_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_tangent.indices.as_slice())
    }

    pub fn has_bitangents(&self) -> bool {
        self.project(|_, m| m.vertex_bitangent.exists())
    }

    pub fn bitangents(&self) -> &'s [Vec3] {
        self.project(|_, m| m.vertex_bitangent.values.as_slice())
    }

    pub fn bitangent_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_bitangent.indices.as_slice())
    }

    pub fn has_colors(&self) -> bool {
        self.project(|_, m| m.vertex_color.exists())
    }

    pub fn colors(&self) -> &'s [Vec4] {
        self.project(|_, m| m.vertex_color.values.as_slice())
    }

    pub fn color_indices(&self) -> &'s [u32] {
        self.project(|_, m| m.vertex_color.indices.as_slice())
    }

    /// Positions as `x, y, z` triples.
    pub fn positions_flat(&self) -> &'s [f32] {
        bytemuck::cast_slice(self.positions())
    }

    pub fn normals_flat(&self) -> &'s [f32] {
        bytemuck::cast_slice(self.normals())
    }

    pub fn uvs_flat(&self) -> &'s [f32] {
        bytemuck::cast_slice(self.uvs())
    }

    pub fn colors_flat(&self) -> &'s [f32] {
        bytemuck::cast_slice(self.colors())
    }

    /// Material slot of every face, empty without a material layer.
    pub fn face_materials(&self) -> &'s [u32] {
        self.project(|_, m| m.face_material.as_slice())
    }

    pub fn num_materials(&self) -> usize {
        self.project(|_, m| m.materials.len())
    }

    pub fn material(&self, index: usize) -> MaterialHandle<'s> {
        self.follow(|s, m| m.materials.get(index).and_then(|&id| s.lookup(id)))
    }

    pub fn num_skin_deformers(&self) -> usize {
        self.project(|_, m| m.skin_deformers.len())
    }

    pub fn skin_deformer(&self, index: usize) -> SkinDeformerHandle<'s> {
        self.follow(|s, m| m.skin_deformers.get(index).and_then(|&id| s.lookup(id)))
    }

    pub fn num_instances(&self) -> usize {
        self.project(|_, m| m.instances.len())
    }

    pub fn instance(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, m| m.instances.get(index).and_then(|&id| s.lookup(id)))
    }
}

impl<'s> MaterialHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, m| m.name.as_str())
    }

    pub fn shading_model(&self) -> &'s str {
        self.project(|_, m| m.shading_model.as_str())
    }

    pub fn num_textures(&self) -> usize {
        self.project(|_, m| m.textures.len())
    }

    pub fn texture(&self, index: usize) -> TextureHandle<'s> {
        self.follow(|s, m| m.textures.get(index).and_then(|t| s.lookup(t.texture)))
    }

    /// Material property the `index`th texture is bound to.
    pub fn texture_property(&self, index: usize) -> &'s str {
        self.project(|_, m| m.textures.get(index).map_or("", |t| t.property.as_str()))
    }

    pub fn find_texture(&self, property: &str) -> TextureHandle<'s> {
        self.follow(|s, m| m.texture_for(property).and_then(|id| s.lookup(id)))
    }
}

impl<'s> LightHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, l| l.name.as_str())
    }

    pub fn color(&self) -> Vec3 {
        self.project(|_, l| l.color)
    }

    pub fn color_into(&self, out: &mut [f32; 3]) -> bool {
        self.write(out, |l| l.color.to_array())
    }

    pub fn intensity(&self) -> f64 {
        self.project(|_, l| l.intensity)
    }

    pub fn local_direction(&self) -> Vec3 {
        self.project(|_, l| l.local_direction)
    }

    pub fn local_direction_into(&self, out: &mut [f32; 3]) -> bool {
        self.write(out, |l| l.local_direction.to_array())
    }

    pub fn light_type(&self) -> LightType {
        self.project(|_, l| l.light_type)
    }

    pub fn decay(&self) -> LightDecay {
        self.project(|_, l| l.decay)
    }

    pub fn area_shape(&self) -> LightAreaShape {
        self.project(|_, l| l.area_shape)
    }

    pub fn inner_angle(&self) -> f64 {
        self.project(|_, l| l.inner_angle)
    }

    pub fn outer_angle(&self) -> f64 {
        self.project(|_, l| l.outer_angle)
    }

    pub fn cast_light(&self) -> bool {
        self.project(|_, l| l.cast_light)
    }

    pub fn cast_shadows(&self) -> bool {
        self.project(|_, l| l.cast_shadows)
    }

    pub fn num_instances(&self) -> usize {
        self.project(|_, l| l.instances.len())
    }

    pub fn instance(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, l| l.instances.get(index).and_then(|&id| s.lookup(id)))
    }
}

impl<'s> CameraHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, c| c.name.as_str())
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.project(|_, c| c.projection_mode)
    }

    pub fn aspect_mode(&self) -> AspectMode {
        self.project(|_, c| c.aspect_mode)
    }

    pub fn aperture_mode(&self) -> ApertureMode {
        self.project(|_, c| c.aperture_mode)
    }

    pub fn resolution(&self) -> DVec2 {
        self.project(|_, c| c.resolution)
    }

    pub fn resolution_is_pixels(&self) -> bool {
        self.project(|_, c| c.resolution_is_pixels)
    }

    pub fn field_of_view_deg(&self) -> DVec2 {
        self.project(|_, c| c.field_of_view_deg)
    }

    pub fn field_of_view_tan(&self) -> DVec2 {
        self.project(|_, c| c.field_of_view_tan)
    }

    pub fn orthographic_extent(&self) -> f64 {
        self.project(|_, c| c.orthographic_extent)
    }

    pub fn orthographic_size(&self) -> DVec2 {
        self.project(|_, c| c.orthographic_size)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.project(|_, c| c.aspect_ratio)
    }

    pub fn near_plane(&self) -> f64 {
        self.project(|_, c| c.near_plane)
    }

    pub fn far_plane(&self) -> f64 {
        self.project(|_, c| c.far_plane)
    }

    pub fn num_instances(&self) -> usize {
        self.project(|_, c| c.instances.len())
    }

    pub fn instance(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, c| c.instances.get(index).and_then(|&id| s.lookup(id)))
    }
}

impl<'s> BoneHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, b| b.name.as_str())
    }

    pub fn radius(&self) -> f64 {
        self.project(|_, b| b.radius)
    }

    pub fn relative_length(&self) -> f64 {
        self.project(|_, b| b.relative_length)
    }

    /// Whether the bone starts a chain, see [`Bone::is_root`].
    pub fn is_root(&self) -> bool {
        self.project(|_, b| b.is_root)
    }

    pub fn num_instances(&self) -> usize {
        self.project(|_, b| b.instances.len())
    }

    pub fn instance(&self, index: usize) -> NodeHandle<'s> {
        self.follow(|s, b| b.instances.get(index).and_then(|&id| s.lookup(id)))
    }
}

impl<'s> TextureHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, t| t.name.as_str())
    }

    pub fn filename(&self) -> &'s str {
        self.project(|_, t| t.filename.as_str())
    }

    pub fn absolute_filename(&self) -> &'s str {
        self.project(|_, t| t.absolute_filename.as_str())
    }

    pub fn relative_filename(&self) -> &'s str {
        self.project(|_, t| t.relative_filename.as_str())
    }

    pub fn texture_type(&self) -> TextureType {
        self.project(|_, t| t.texture_type)
    }

    pub fn content(&self) -> &'s [u8] {
        self.project(|_, t| t.content.as_slice())
    }

    pub fn has_file(&self) -> bool {
        self.project(|_, t| t.has_file())
    }

    pub fn uv_set(&self) -> &'s str {
        self.project(|_, t| t.uv_set.as_str())
    }

    pub fn wrap_u(&self) -> WrapMode {
        self.project(|_, t| t.wrap_u)
    }

    pub fn wrap_v(&self) -> WrapMode {
        self.project(|_, t| t.wrap_v)
    }
}

impl<'s> SkinDeformerHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, d| d.name.as_str())
    }

    pub fn skinning_method(&self) -> SkinningMethod {
        self.project(|_, d| d.skinning_method)
    }

    pub fn num_clusters(&self) -> usize {
        self.project(|_, d| d.clusters.len())
    }

    pub fn cluster(&self, index: usize) -> SkinClusterHandle<'s> {
        self.follow(|s, d| d.clusters.get(index).and_then(|&id| s.lookup(id)))
    }

    pub fn clusters(&self) -> impl Iterator<Item = SkinClusterHandle<'s>> + 's {
        let deformer = *self;
        (0..self.num_clusters()).map(move |i| deformer.cluster(i))
    }

    pub fn num_meshes(&self) -> usize {
        self.project(|_, d| d.meshes.len())
    }

    pub fn mesh(&self, index: usize) -> MeshHandle<'s> {
        self.follow(|s, d| d.meshes.get(index).and_then(|&id| s.lookup(id)))
    }
}

impl<'s> SkinClusterHandle<'s> {
    pub fn name(&self) -> &'s str {
        self.project(|_, c| c.name.as_str())
    }

    pub fn bone_node(&self) -> NodeHandle<'s> {
        self.follow(|s, c| c.bone_node.and_then(|id| s.lookup(id)))
    }

    pub fn num_weights(&self) -> usize {
        self.project(|_, c| c.weights.len())
    }

    /// Control point indices, parallel to [`weights`](Self::weights).
    pub fn vertices(&self) -> &'s [u32] {
        self.project(|_, c| c.vertices.as_slice())
    }

    pub fn weights(&self) -> &'s [f64] {
        self.project(|_, c| c.weights.as_slice())
    }

    /// Column-major mesh-to-bone matrix in the bind pose.
    pub fn geometry_to_bone(&self) -> [f64; 16] {
        self.project(|_, c| column_major(&c.geometry_to_bone))
    }

    pub fn bind_to_world(&self) -> [f64; 16] {
        self.project(|_, c| column_major(&c.bind_to_world))
    }

    pub fn geometry_to_bone_into(&self, out: &mut [f64; 16]) -> bool {
        self.write(out, |c| column_major(&c.geometry_to_bone))
    }
}
