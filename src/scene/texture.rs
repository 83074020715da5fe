use super::TextureId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum TextureType {
    File = 0,
    Layered = 1,
    Procedural = 2,
    Shader = 3,
    #[default]
    Unknown = -1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum WrapMode {
    #[default]
    Repeat = 0,
    Clamp = 1,
}

impl WrapMode {
    pub fn from_fbx(value: i64) -> WrapMode {
        match value {
            1 => WrapMode::Clamp,
            _ => WrapMode::Repeat,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub id: TextureId,
    pub name: String,
    pub texture_type: TextureType,
    /// `FileName` exactly as stored in the document.
    pub filename: String,
    /// `RelativeFilename` resolved against the directory of the loaded file.
    pub absolute_filename: String,
    pub relative_filename: String,
    /// Embedded file contents, empty unless the exporter embedded the media.
    pub content: Vec<u8>,
    pub uv_set: String,
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
}

impl Texture {
    pub fn has_file(&self) -> bool {
        !self.filename.is_empty() || !self.relative_filename.is_empty()
    }
}
