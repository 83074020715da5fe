use super::{MaterialId, TextureId};

/// A texture bound to one material property, e.g. `DiffuseColor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTexture {
    pub property: String,
    pub texture: TextureId,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    /// `ShadingModel` as written by the exporter, e.g. `"phong"`.
    pub shading_model: String,
    pub textures: Vec<MaterialTexture>,
}

impl Material {
    pub fn texture_for(&self, property: &str) -> Option<TextureId> {
        self.textures
            .iter()
            .find(|t| t.property == property)
            .map(|t| t.texture)
    }
}
