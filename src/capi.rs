//! Flat `extern "C"` surface over the scene graph.
//!
//! A scene is created with [`fbx_scene_load`] and released with [`fbx_scene_free`]. Entities
//! are passed around as small `{ scene, index }` structs; a null `scene` stands for "no object".
//! Every accessor goes through [`crate::handle`] and therefore bounds-checks `index`, so an
//! absent or out-of-range handle reads as zero, `false`, an empty string or a null array.
//!
//! Strings are returned as [`FbxString`] views (not NUL-terminated). They, the array views, and
//! every handle stay valid until the scene is freed. Using them afterwards, or freeing a scene
//! twice, is undefined behavior.
//!
//! # Safety
//!
//! All functions taking raw pointers expect them to be null or valid: scene pointers must come
//! from [`fbx_scene_load`], output pointers must have room for the documented number of
//! elements.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use glam::{Vec2, Vec3, Vec4};

use crate::handle::{
    BoneHandle, CameraHandle, LightHandle, MaterialHandle, MeshHandle, NodeHandle,
    SceneHandle, SkinClusterHandle, SkinDeformerHandle, TextureHandle,
};
use crate::scene::{
    ApertureMode, AspectMode, CoordinateAxis, LightAreaShape, LightDecay, LightType,
    ProjectionMode, Scene, SkinningMethod, TextureType, WrapMode,
};

/// Borrowed UTF-8 string, `length` bytes at `data`. Never null, even when empty.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FbxString {
    pub data: *const u8,
    pub length: usize,
}

impl From<&str> for FbxString {
    fn from(s: &str) -> FbxString {
        FbxString {
            data: s.as_ptr(),
            length: s.len(),
        }
    }
}

macro_rules! c_handle {
    ($(#[$meta:meta])* $name:ident, $handle:ident, $lookup:ident) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            pub scene: *const Scene,
            pub index: usize,
        }

        impl $name {
            pub const NONE: $name = $name {
                scene: ptr::null(),
                index: 0,
            };

            fn new(handle: $handle<'_>) -> $name {
                match (handle.scene(), handle.get()) {
                    (Some(scene), Some(entity)) => $name {
                        scene,
                        index: entity.id.index(),
                    },
                    _ => $name::NONE,
                }
            }

            /// # Safety
            ///
            /// `scene` must be null or point to a live scene.
            unsafe fn resolve<'s>(self) -> $handle<'s> {
                SceneHandle::from(self.scene.as_ref()).$lookup(self.index)
            }
        }

        impl<'s> From<$handle<'s>> for $name {
            fn from(handle: $handle<'s>) -> $name {
                $name::new(handle)
            }
        }
    };
}

c_handle!(FbxNode, NodeHandle, node);
c_handle!(FbxMesh, MeshHandle, mesh);
c_handle!(FbxMaterial, MaterialHandle, material);
c_handle!(FbxLight, LightHandle, light);
c_handle!(FbxCamera, CameraHandle, camera);
c_handle!(FbxBone, BoneHandle, bone);
c_handle!(FbxTexture, TextureHandle, texture);
c_handle!(FbxSkinDeformer, SkinDeformerHandle, skin_deformer);
c_handle!(FbxSkinCluster, SkinClusterHandle, skin_cluster);

/// Plain projections `fn(handle[, index]) -> value`.
macro_rules! accessors {
    (
        $handle:ident {
            $($c_name:ident => $method:ident($($arg:ident: $arg_ty:ty),*) -> $ret:ty;)*
        }
    ) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $c_name(handle: $handle $(, $arg: $arg_ty)*) -> $ret {
                handle.resolve().$method($($arg),*).into()
            }
        )*
    };
}

unsafe fn scene_handle<'s>(scene: *const Scene) -> SceneHandle<'s> {
    SceneHandle::from(scene.as_ref())
}

unsafe fn set_error(out: *mut *mut c_char, message: &str) {
    if out.is_null() {
        return;
    }
    let message = CString::new(message.replace('\0', "")).unwrap_or_default();
    *out = message.into_raw();
}

/// Publish `slice` as a pointer and element count. Empty slices read as null.
unsafe fn view<T, U>(slice: &[T], count: *mut usize) -> *const U {
    if !count.is_null() {
        *count = slice.len();
    }
    if slice.is_empty() {
        ptr::null()
    } else {
        slice.as_ptr() as *const U
    }
}

unsafe fn write_array<T: Copy, const N: usize>(out: *mut T, values: Option<[T; N]>) {
    if let Some(values) = values {
        if !out.is_null() {
            ptr::copy_nonoverlapping(values.as_ptr(), out, N);
        }
    }
}

unsafe fn c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        None
    } else {
        CStr::from_ptr(s).to_str().ok()
    }
}

/// Load the FBX file at `path`.
///
/// Returns null on failure and, if `error` is not null, stores an error description there
/// that must be released with [`fbx_string_free`].
///
/// # Safety
///
/// `path` must be null or a NUL-terminated string, `error` null or writable.
#[no_mangle]
pub unsafe extern "C" fn fbx_scene_load(
    path: *const c_char,
    error: *mut *mut c_char,
) -> *mut Scene {
    if !error.is_null() {
        *error = ptr::null_mut();
    }
    let path = match c_str(path) {
        Some(path) => path,
        None => {
            set_error(error, "Invalid path: null or not UTF-8");
            return ptr::null_mut();
        }
    };
    match Scene::load(path) {
        Ok(scene) => Box::into_raw(Box::new(scene)),
        Err(e) => {
            set_error(error, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Release a scene and everything borrowed from it. Null is ignored.
///
/// # Safety
///
/// `scene` must be null or a pointer returned by [`fbx_scene_load`] that was not freed yet.
#[no_mangle]
pub unsafe extern "C" fn fbx_scene_free(scene: *mut Scene) {
    if !scene.is_null() {
        drop(Box::from_raw(scene));
    }
}

/// Release an error string produced by [`fbx_scene_load`]. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a string returned through the `error` argument of [`fbx_scene_load`].
#[no_mangle]
pub unsafe extern "C" fn fbx_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// Scene

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_nodes(scene: *const Scene) -> usize {
    scene_handle(scene).num_nodes()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_node(scene: *const Scene, index: usize) -> FbxNode {
    scene_handle(scene).node(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_root_node(scene: *const Scene) -> FbxNode {
    scene_handle(scene).root_node().into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_meshes(scene: *const Scene) -> usize {
    scene_handle(scene).num_meshes()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_mesh(scene: *const Scene, index: usize) -> FbxMesh {
    scene_handle(scene).mesh(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_materials(scene: *const Scene) -> usize {
    scene_handle(scene).num_materials()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_material(scene: *const Scene, index: usize) -> FbxMaterial {
    scene_handle(scene).material(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_lights(scene: *const Scene) -> usize {
    scene_handle(scene).num_lights()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_light(scene: *const Scene, index: usize) -> FbxLight {
    scene_handle(scene).light(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_cameras(scene: *const Scene) -> usize {
    scene_handle(scene).num_cameras()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_camera(scene: *const Scene, index: usize) -> FbxCamera {
    scene_handle(scene).camera(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_bones(scene: *const Scene) -> usize {
    scene_handle(scene).num_bones()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_bone(scene: *const Scene, index: usize) -> FbxBone {
    scene_handle(scene).bone(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_textures(scene: *const Scene) -> usize {
    scene_handle(scene).num_textures()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_texture(scene: *const Scene, index: usize) -> FbxTexture {
    scene_handle(scene).texture(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_skin_deformers(scene: *const Scene) -> usize {
    scene_handle(scene).num_skin_deformers()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_skin_deformer(
    scene: *const Scene,
    index: usize,
) -> FbxSkinDeformer {
    scene_handle(scene).skin_deformer(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_num_skin_clusters(scene: *const Scene) -> usize {
    scene_handle(scene).num_skin_clusters()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_skin_cluster(
    scene: *const Scene,
    index: usize,
) -> FbxSkinCluster {
    scene_handle(scene).skin_cluster(index).into()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_find_node(scene: *const Scene, name: *const c_char) -> FbxNode {
    match c_str(name) {
        Some(name) => scene_handle(scene).find_node(name).into(),
        None => FbxNode::NONE,
    }
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_find_material(
    scene: *const Scene,
    name: *const c_char,
) -> FbxMaterial {
    match c_str(name) {
        Some(name) => scene_handle(scene).find_material(name).into(),
        None => FbxMaterial::NONE,
    }
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_find_texture(
    scene: *const Scene,
    name: *const c_char,
) -> FbxTexture {
    match c_str(name) {
        Some(name) => scene_handle(scene).find_texture(name).into(),
        None => FbxTexture::NONE,
    }
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_axis_right(scene: *const Scene) -> CoordinateAxis {
    scene_handle(scene).axis_right()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_axis_up(scene: *const Scene) -> CoordinateAxis {
    scene_handle(scene).axis_up()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_axis_front(scene: *const Scene) -> CoordinateAxis {
    scene_handle(scene).axis_front()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_unit_meters(scene: *const Scene) -> f64 {
    scene_handle(scene).unit_meters()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_version(scene: *const Scene) -> u32 {
    scene_handle(scene).version()
}

#[no_mangle]
pub unsafe extern "C" fn fbx_scene_creator(scene: *const Scene) -> FbxString {
    scene_handle(scene).creator().into()
}

// Node

accessors!(FbxNode {
    fbx_node_name => name() -> FbxString;
    fbx_node_is_root => is_root() -> bool;
    fbx_node_parent => parent() -> FbxNode;
    fbx_node_num_children => num_children() -> usize;
    fbx_node_child => child(index: usize) -> FbxNode;
    fbx_node_mesh => mesh() -> FbxMesh;
    fbx_node_light => light() -> FbxLight;
    fbx_node_camera => camera() -> FbxCamera;
    fbx_node_bone => bone() -> FbxBone;
    fbx_node_num_materials => num_materials() -> usize;
    fbx_node_material => material(index: usize) -> FbxMaterial;
    fbx_node_visible => visible() -> bool;
});

/// Write the column-major node-to-world matrix into `out[0..16]`.
#[no_mangle]
pub unsafe extern "C" fn fbx_node_world_transform(node: FbxNode, out: *mut f64) {
    write_array(out, node.resolve().get().map(|n| n.world_transform()));
}

/// Write the column-major node-to-parent matrix into `out[0..16]`.
#[no_mangle]
pub unsafe extern "C" fn fbx_node_local_transform(node: FbxNode, out: *mut f64) {
    write_array(out, node.resolve().get().map(|n| n.local_matrix()));
}

#[no_mangle]
pub unsafe extern "C" fn fbx_node_geometry_transform(node: FbxNode, out: *mut f64) {
    let node = node.resolve();
    write_array(out, node.get().map(|_| node.geometry_transform()));
}

// Mesh

accessors!(FbxMesh {
    fbx_mesh_name => name() -> FbxString;
    fbx_mesh_num_vertices => num_vertices() -> usize;
    fbx_mesh_num_indices => num_indices() -> usize;
    fbx_mesh_num_faces => num_faces() -> usize;
    fbx_mesh_num_triangles => num_triangles() -> usize;
    fbx_mesh_num_materials => num_materials() -> usize;
    fbx_mesh_material => material(index: usize) -> FbxMaterial;
    fbx_mesh_num_skin_deformers => num_skin_deformers() -> usize;
    fbx_mesh_skin_deformer => skin_deformer(index: usize) -> FbxSkinDeformer;
    fbx_mesh_num_instances => num_instances() -> usize;
    fbx_mesh_instance => instance(index: usize) -> FbxNode;
});

macro_rules! mesh_views {
    ($($c_name:ident => $method:ident: $elem:ty as $out:ty;)*) => {
        $(
            /// Pointer to the stream and its element count in `*count`; null when missing.
            #[no_mangle]
            pub unsafe extern "C" fn $c_name(mesh: FbxMesh, count: *mut usize) -> *const $out {
                let values: &[$elem] = mesh.resolve().$method();
                view(values, count)
            }
        )*
    };
}

mesh_views! {
    fbx_mesh_positions => positions: Vec3 as f32;
    fbx_mesh_position_indices => position_indices: u32 as u32;
    fbx_mesh_normals => normals: Vec3 as f32;
    fbx_mesh_normal_indices => normal_indices: u32 as u32;
    fbx_mesh_uvs => uvs: Vec2 as f32;
    fbx_mesh_uv_indices => uv_indices: u32 as u32;
    fbx_mesh_tangents => tangents: Vec3 as f32;
    fbx_mesh_tangent_indices => tangent_indices: u32 as u32;
    fbx_mesh_bitangents => bitangents: Vec3 as f32;
    fbx_mesh_bitangent_indices => bitangent_indices: u32 as u32;
    fbx_mesh_colors => colors: Vec4 as f32;
    fbx_mesh_color_indices => color_indices: u32 as u32;
    fbx_mesh_face_materials => face_materials: u32 as u32;
}

/// Writes `index_begin` and `num_indices` of face `index`.
#[no_mangle]
pub unsafe extern "C" fn fbx_mesh_face(mesh: FbxMesh, index: usize, out: *mut u32) {
    let mesh = mesh.resolve();
    let face = mesh.faces().get(index);
    write_array(out, face.map(|f| [f.index_begin, f.num_indices]));
}

// Material

accessors!(FbxMaterial {
    fbx_material_name => name() -> FbxString;
    fbx_material_shading_model => shading_model() -> FbxString;
    fbx_material_num_textures => num_textures() -> usize;
    fbx_material_texture => texture(index: usize) -> FbxTexture;
    fbx_material_texture_property => texture_property(index: usize) -> FbxString;
});

// Light

accessors!(FbxLight {
    fbx_light_name => name() -> FbxString;
    fbx_light_intensity => intensity() -> f64;
    fbx_light_type => light_type() -> LightType;
    fbx_light_decay => decay() -> LightDecay;
    fbx_light_area_shape => area_shape() -> LightAreaShape;
    fbx_light_inner_angle => inner_angle() -> f64;
    fbx_light_outer_angle => outer_angle() -> f64;
    fbx_light_cast_light => cast_light() -> bool;
    fbx_light_cast_shadows => cast_shadows() -> bool;
    fbx_light_num_instances => num_instances() -> usize;
    fbx_light_instance => instance(index: usize) -> FbxNode;
});

/// Write the RGB color into `out[0..3]`.
#[no_mangle]
pub unsafe extern "C" fn fbx_light_color(light: FbxLight, out: *mut f32) {
    let light = light.resolve();
    write_array(out, light.get().map(|l| l.color.to_array()));
}

#[no_mangle]
pub unsafe extern "C" fn fbx_light_local_direction(light: FbxLight, out: *mut f32) {
    let light = light.resolve();
    write_array(out, light.get().map(|l| l.local_direction.to_array()));
}

// Camera

accessors!(FbxCamera {
    fbx_camera_name => name() -> FbxString;
    fbx_camera_projection_mode => projection_mode() -> ProjectionMode;
    fbx_camera_aspect_mode => aspect_mode() -> AspectMode;
    fbx_camera_aperture_mode => aperture_mode() -> ApertureMode;
    fbx_camera_resolution_is_pixels => resolution_is_pixels() -> bool;
    fbx_camera_orthographic_extent => orthographic_extent() -> f64;
    fbx_camera_aspect_ratio => aspect_ratio() -> f64;
    fbx_camera_near_plane => near_plane() -> f64;
    fbx_camera_far_plane => far_plane() -> f64;
    fbx_camera_num_instances => num_instances() -> usize;
    fbx_camera_instance => instance(index: usize) -> FbxNode;
});

macro_rules! camera_pairs {
    ($($c_name:ident => $field:ident;)*) => {
        $(
            /// Write the `x, y` pair into `out[0..2]`.
            #[no_mangle]
            pub unsafe extern "C" fn $c_name(camera: FbxCamera, out: *mut f64) {
                let camera = camera.resolve();
                write_array(out, camera.get().map(|c| c.$field.to_array()));
            }
        )*
    };
}

camera_pairs! {
    fbx_camera_resolution => resolution;
    fbx_camera_field_of_view_deg => field_of_view_deg;
    fbx_camera_field_of_view_tan => field_of_view_tan;
    fbx_camera_orthographic_size => orthographic_size;
}

// Bone

accessors!(FbxBone {
    fbx_bone_name => name() -> FbxString;
    fbx_bone_radius => radius() -> f64;
    fbx_bone_relative_length => relative_length() -> f64;
    fbx_bone_is_root => is_root() -> bool;
    fbx_bone_num_instances => num_instances() -> usize;
    fbx_bone_instance => instance(index: usize) -> FbxNode;
});

// Texture

accessors!(FbxTexture {
    fbx_texture_name => name() -> FbxString;
    fbx_texture_filename => filename() -> FbxString;
    fbx_texture_absolute_filename => absolute_filename() -> FbxString;
    fbx_texture_relative_filename => relative_filename() -> FbxString;
    fbx_texture_type => texture_type() -> TextureType;
    fbx_texture_has_file => has_file() -> bool;
    fbx_texture_uv_set => uv_set() -> FbxString;
    fbx_texture_wrap_u => wrap_u() -> WrapMode;
    fbx_texture_wrap_v => wrap_v() -> WrapMode;
});

#[no_mangle]
pub unsafe extern "C" fn fbx_texture_content(texture: FbxTexture, count: *mut usize) -> *const u8 {
    view(texture.resolve().content(), count)
}

// Skinning

accessors!(FbxSkinDeformer {
    fbx_skin_deformer_name => name() -> FbxString;
    fbx_skin_deformer_skinning_method => skinning_method() -> SkinningMethod;
    fbx_skin_deformer_num_clusters => num_clusters() -> usize;
    fbx_skin_deformer_cluster => cluster(index: usize) -> FbxSkinCluster;
    fbx_skin_deformer_num_meshes => num_meshes() -> usize;
    fbx_skin_deformer_mesh => mesh(index: usize) -> FbxMesh;
});

accessors!(FbxSkinCluster {
    fbx_skin_cluster_name => name() -> FbxString;
    fbx_skin_cluster_bone_node => bone_node() -> FbxNode;
    fbx_skin_cluster_num_weights => num_weights() -> usize;
});

#[no_mangle]
pub unsafe extern "C" fn fbx_skin_cluster_vertices(
    cluster: FbxSkinCluster,
    count: *mut usize,
) -> *const u32 {
    view(cluster.resolve().vertices(), count)
}

#[no_mangle]
pub unsafe extern "C" fn fbx_skin_cluster_weights(
    cluster: FbxSkinCluster,
    count: *mut usize,
) -> *const f64 {
    view(cluster.resolve().weights(), count)
}

/// Write the column-major mesh-to-bone matrix into `out[0..16]`.
#[no_mangle]
pub unsafe extern "C" fn fbx_skin_cluster_geometry_to_bone(cluster: FbxSkinCluster, out: *mut f64) {
    let cluster = cluster.resolve();
    write_array(out, cluster.get().map(|_| cluster.geometry_to_bone()));
}

#[no_mangle]
pub unsafe extern "C" fn fbx_skin_cluster_bind_to_world(cluster: FbxSkinCluster, out: *mut f64) {
    let cluster = cluster.resolve();
    write_array(out, cluster.get().map(|_| cluster.bind_to_world()));
}
