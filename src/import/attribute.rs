//! `NodeAttribute` objects: lights, cameras and skeleton limbs.

use glam::{DVec2, DVec3, Vec3};

use crate::import::props::Props;
use crate::scene::camera::{ApertureMode, AspectMode, Camera, ProjectionMode};
use crate::scene::light::{Light, LightAreaShape, LightDecay, LightType};
use crate::scene::{Bone, BoneId, CameraId, LightId};

const INCH_TO_MM: f64 = 25.4;
const ORTHO_EXTENT_SCALE: f64 = 30.0;

pub(crate) fn read_light(id: LightId, name: String, props: &Props) -> Light {
    let color = props.vec3("Color", DVec3::ONE);
    Light {
        id,
        name,
        color: color.as_vec3(),
        // Stored as a percentage.
        intensity: props.real("Intensity", 100.0) / 100.0,
        local_direction: Vec3::NEG_Y,
        light_type: LightType::from_fbx(props.int("LightType", 0)),
        decay: LightDecay::from_fbx(props.int("DecayType", 2)),
        area_shape: LightAreaShape::from_fbx(props.int("AreaLightShape", 0)),
        inner_angle: props.real("InnerAngle", 0.0),
        outer_angle: props.real("OuterAngle", 45.0),
        cast_light: props.bool("CastLight", true),
        cast_shadows: props.bool("CastShadows", false),
        instances: Vec::new(),
    }
}

fn half_tan(degrees: f64) -> f64 {
    (degrees.to_radians() * 0.5).tan()
}

fn full_angle(half_tan: f64) -> f64 {
    (half_tan.atan() * 2.0).to_degrees()
}

pub(crate) fn read_camera(id: CameraId, name: String, props: &Props) -> Camera {
    let projection = if props.contains("CameraProjectionType") {
        props.int("CameraProjectionType", 0)
    } else {
        props.int("ProjectionType", 0)
    };
    let projection_mode = ProjectionMode::from_fbx(projection);
    let aspect_mode = AspectMode::from_fbx(props.int("AspectRatioMode", 0));
    let aperture_mode = ApertureMode::from_fbx(props.int("ApertureMode", 2));

    let resolution = DVec2::new(
        props.real("AspectWidth", 640.0),
        props.real("AspectHeight", 480.0),
    );
    let aspect_ratio = if resolution.x > 0.0 && resolution.y > 0.0 {
        resolution.x / resolution.y
    } else {
        1.0
    };

    let fov = props.real("FieldOfView", 25.115);
    let field_of_view_deg = match aperture_mode {
        ApertureMode::HorizontalAndVertical => DVec2::new(
            props.real("FieldOfViewX", fov),
            props.real("FieldOfViewY", fov),
        ),
        ApertureMode::Horizontal => DVec2::new(fov, full_angle(half_tan(fov) / aspect_ratio)),
        ApertureMode::Vertical => DVec2::new(full_angle(half_tan(fov) * aspect_ratio), fov),
        ApertureMode::FocalLength => {
            let focal_length = props.real("FocalLength", 34.89);
            let film = DVec2::new(
                props.real("FilmWidth", 0.816),
                props.real("FilmHeight", 0.612),
            ) * INCH_TO_MM;
            if focal_length > 0.0 {
                DVec2::new(
                    full_angle(film.x * 0.5 / focal_length),
                    full_angle(film.y * 0.5 / focal_length),
                )
            } else {
                DVec2::splat(fov)
            }
        }
    };
    let field_of_view_tan =
        DVec2::new(half_tan(field_of_view_deg.x), half_tan(field_of_view_deg.y));

    let orthographic_extent = ORTHO_EXTENT_SCALE * props.real("OrthoZoom", 1.0);
    let orthographic_size = match aperture_mode {
        ApertureMode::Horizontal => {
            DVec2::new(orthographic_extent, orthographic_extent / aspect_ratio)
        }
        _ => DVec2::new(orthographic_extent * aspect_ratio, orthographic_extent),
    };

    Camera {
        id,
        name,
        projection_mode,
        aspect_mode,
        aperture_mode,
        resolution,
        resolution_is_pixels: aspect_mode.is_pixels(),
        field_of_view_deg,
        field_of_view_tan,
        orthographic_extent,
        orthographic_size,
        aspect_ratio,
        near_plane: props.real("NearPlane", 10.0),
        far_plane: props.real("FarPlane", 4000.0),
        instances: Vec::new(),
    }
}

/// `is_root` starts from the `Root` attribute class and is completed once the hierarchy is
/// known.
pub(crate) fn read_bone(id: BoneId, name: String, props: &Props, class: &str) -> Bone {
    Bone {
        id,
        name,
        radius: props.real("Size", 1.0),
        relative_length: props.real("LimbLength", 1.0),
        is_root: class == "Root",
        instances: Vec::new(),
    }
}
