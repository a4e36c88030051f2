//! Import configuration

/// Limits and naming applied by [`CollectionImporter`](super::CollectionImporter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Maximum input size in bytes (default: 10 MiB)
    pub max_file_size: usize,
    /// Maximum number of produced folders plus requests (default: 10 000)
    pub max_items: usize,
    /// Joins ancestor names of flattened Postman folders (default: `" / "`)
    pub flatten_separator: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            max_items: 10_000,
            flatten_separator: " / ".to_string(),
        }
    }
}
