use glam::DVec2;

use super::{CameraId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ProjectionMode {
    Perspective = 0,
    Orthographic = 1,
    #[default]
    Unknown = -1,
}

impl ProjectionMode {
    pub fn from_fbx(value: i64) -> ProjectionMode {
        match value {
            0 => ProjectionMode::Perspective,
            1 => ProjectionMode::Orthographic,
            _ => ProjectionMode::Unknown,
        }
    }
}

/// `AspectRatioMode`: how `AspectWidth`/`AspectHeight` are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum AspectMode {
    #[default]
    WindowSize = 0,
    FixedRatio = 1,
    FixedResolution = 2,
    FixedWidth = 3,
    FixedHeight = 4,
}

impl AspectMode {
    pub fn from_fbx(value: i64) -> AspectMode {
        match value {
            1 => AspectMode::FixedRatio,
            2 => AspectMode::FixedResolution,
            3 => AspectMode::FixedWidth,
            4 => AspectMode::FixedHeight,
            _ => AspectMode::WindowSize,
        }
    }

    /// Whether the aspect values are a resolution in pixels rather than a ratio.
    pub fn is_pixels(self) -> bool {
        matches!(
            self,
            AspectMode::FixedResolution | AspectMode::FixedWidth | AspectMode::FixedHeight
        )
    }
}

/// `ApertureMode`: which properties define the field of view. Documents default to
/// `Vertical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ApertureMode {
    #[default]
    HorizontalAndVertical = 0,
    Horizontal = 1,
    Vertical = 2,
    FocalLength = 3,
}

impl ApertureMode {
    pub fn from_fbx(value: i64) -> ApertureMode {
        match value {
            0 => ApertureMode::HorizontalAndVertical,
            1 => ApertureMode::Horizontal,
            3 => ApertureMode::FocalLength,
            _ => ApertureMode::Vertical,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub id: CameraId,
    pub name: String,
    pub projection_mode: ProjectionMode,
    pub aspect_mode: AspectMode,
    pub aperture_mode: ApertureMode,

    pub resolution: DVec2,
    pub resolution_is_pixels: bool,
    /// Full field of view per axis, in degrees.
    pub field_of_view_deg: DVec2,
    /// `tan(field_of_view_deg / 2)` per axis.
    pub field_of_view_tan: DVec2,
    pub orthographic_extent: f64,
    pub orthographic_size: DVec2,
    /// `resolution.x / resolution.y`.
    pub aspect_ratio: f64,
    pub near_plane: f64,
    pub far_plane: f64,
    pub instances: Vec<NodeId>,
}
