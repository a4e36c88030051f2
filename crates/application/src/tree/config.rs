//! Tree repository configuration

/// Defaults applied by the tree repository when it creates nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Name given to collections created with `create_collection`.
    pub default_collection_name: String,
    /// Name given to folders created without an explicit name.
    pub default_folder_name: String,
    /// Name given to requests created with `add_request`.
    pub default_request_name: String,
    /// Suffix appended to a duplicated request's name.
    pub copy_suffix: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_collection_name: "New Collection".to_string(),
            default_folder_name: "New Folder".to_string(),
            default_request_name: "New Request".to_string(),
            copy_suffix: " (Copy)".to_string(),
        }
    }
}
