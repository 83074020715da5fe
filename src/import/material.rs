use std::path::Path;

use crate::import::props::Props;
use crate::scene::texture::{Texture, TextureType, WrapMode};
use crate::scene::{Material, MaterialId, TextureId};
use crate::types::{DocNode, Property};

pub(crate) fn read_material(id: MaterialId, name: String, object: &DocNode) -> Material {
    Material {
        id,
        name,
        shading_model: object.child_str("ShadingModel").unwrap_or("").to_string(),
        textures: Vec::new(),
    }
}

/// File references shared by `Texture` and `Video` objects.
#[derive(Debug, Default)]
pub(crate) struct Media {
    pub filename: String,
    pub relative_filename: String,
    pub content: Vec<u8>,
}

impl Media {
    pub fn read(object: &DocNode, props: &Props) -> Media {
        let filename = object
            .child_str("FileName")
            .or_else(|| object.child_str("Filename"))
            .or_else(|| props.string("Path"))
            .unwrap_or("");
        let relative_filename = object
            .child_str("RelativeFilename")
            .or_else(|| props.string("RelPath"))
            .unwrap_or("");
        // ASCII files carry base64 text here, which is not decoded.
        let content = match object.child_property("Content") {
            Some(Property::RawArray(bytes)) => bytes.clone(),
            _ => Vec::new(),
        };
        Media {
            filename: filename.to_string(),
            relative_filename: relative_filename.to_string(),
            content,
        }
    }
}

/// `relative` joined onto the directory of the loaded file, `filename` when that is not known.
pub(crate) fn absolute_filename(filename: &str, relative: &str, base_dir: Option<&Path>) -> String {
    match base_dir {
        Some(dir) if !relative.is_empty() => dir
            .join(relative.replace('\\', "/"))
            .to_string_lossy()
            .into_owned(),
        _ => filename.to_string(),
    }
}

pub(crate) fn texture_type(object_name: &str) -> TextureType {
    match object_name {
        "Texture" => TextureType::File,
        "LayeredTexture" => TextureType::Layered,
        "ProceduralTexture" => TextureType::Procedural,
        _ => TextureType::Shader,
    }
}

pub(crate) fn read_texture(
    id: TextureId,
    name: String,
    object: &DocNode,
    props: &Props,
    base_dir: Option<&Path>,
) -> Texture {
    let media = Media::read(object, props);
    Texture {
        id,
        name,
        texture_type: texture_type(&object.name),
        absolute_filename: absolute_filename(&media.filename, &media.relative_filename, base_dir),
        filename: media.filename,
        relative_filename: media.relative_filename,
        content: media.content,
        uv_set: props.string("UVSet").unwrap_or("").to_string(),
        wrap_u: WrapMode::from_fbx(props.int("WrapModeU", 0)),
        wrap_v: WrapMode::from_fbx(props.int("WrapModeV", 0)),
    }
}

/// Fill in what a texture left blank from the `Video` it is connected to.
pub(crate) fn attach_video(texture: &mut Texture, video: &Media, base_dir: Option<&Path>) {
    if texture.content.is_empty() {
        texture.content = video.content.clone();
    }
    if !texture.has_file() {
        texture.filename = video.filename.clone();
        texture.relative_filename = video.relative_filename.clone();
        texture.absolute_filename =
            absolute_filename(&video.filename, &video.relative_filename, base_dir);
    }
}
