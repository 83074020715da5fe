/// What to do with a face-corner index that points outside its value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexErrorHandling {
    /// Clamp to the last valid value.
    #[default]
    Clamp,
    /// Drop the whole attribute stream, as if the document never had it.
    NoIndex,
    /// Fail the load with [`crate::Error::BadIndex`].
    Abort,
}

/// Knobs for [`crate::Scene::load_with`] and friends.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Create meshes with their names, materials and instances, but skip faces and vertex
    /// attributes.
    pub ignore_geometry: bool,
    pub index_error_handling: IndexErrorHandling,
    /// Reject inputs larger than this many bytes before reading them.
    pub max_file_size: Option<u64>,
}
