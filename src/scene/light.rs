use glam::Vec3;

use super::{LightId, NodeId};

/// `LightType` property. `Unknown` is only ever produced for absent handles or values outside
/// the documented range, never for a real point light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum LightType {
    Point = 0,
    Directional = 1,
    Spot = 2,
    Area = 3,
    Volume = 4,
    #[default]
    Unknown = -1,
}

impl LightType {
    pub fn from_fbx(value: i64) -> LightType {
        match value {
            0 => LightType::Point,
            1 => LightType::Directional,
            2 => LightType::Spot,
            3 => LightType::Area,
            4 => LightType::Volume,
            _ => LightType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum LightDecay {
    None = 0,
    Linear = 1,
    Quadratic = 2,
    Cubic = 3,
    #[default]
    Unknown = -1,
}

impl LightDecay {
    pub fn from_fbx(value: i64) -> LightDecay {
        match value {
            0 => LightDecay::None,
            1 => LightDecay::Linear,
            2 => LightDecay::Quadratic,
            3 => LightDecay::Cubic,
            _ => LightDecay::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum LightAreaShape {
    Rectangle = 0,
    Sphere = 1,
    #[default]
    Unknown = -1,
}

impl LightAreaShape {
    pub fn from_fbx(value: i64) -> LightAreaShape {
        match value {
            0 => LightAreaShape::Rectangle,
            1 => LightAreaShape::Sphere,
            _ => LightAreaShape::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Light {
    pub id: LightId,
    pub name: String,
    pub color: Vec3,
    /// Scale factor, 1.0 for the FBX default of 100%. May exceed 1.
    pub intensity: f64,
    /// Direction the light points to in the space of the owning node.
    pub local_direction: Vec3,
    pub light_type: LightType,
    pub decay: LightDecay,
    pub area_shape: LightAreaShape,
    /// Spot cone angles in degrees.
    pub inner_angle: f64,
    pub outer_angle: f64,
    pub cast_light: bool,
    pub cast_shadows: bool,
    pub instances: Vec<NodeId>,
}
