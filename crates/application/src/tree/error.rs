//! Tree mutation errors

use arbor_domain::{Id, ItemType};
use thiserror::Error;

/// Reasons a tree mutation was rejected. A rejected mutation never changes
/// the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No top-level collection has this ID.
    #[error("Collection not found: {0}")]
    CollectionNotFound(Id),

    /// The `[collection, folder]` path does not resolve to a folder.
    #[error("Folder not found at {0:?}")]
    FolderNotFound(Vec<Id>),

    /// No request with this ID exists anywhere in the forest.
    #[error("Request not found: {0}")]
    RequestNotFound(Id),

    /// The item is not present at the given path.
    #[error("{item_type} {id} not found at {path:?}")]
    ItemNotFound {
        /// Item ID.
        id: Id,
        /// Item type.
        item_type: ItemType,
        /// Path that was searched.
        path: Vec<Id>,
    },

    /// The path is empty or deeper than the tree allows.
    #[error("Invalid path: {0:?}")]
    InvalidPath(Vec<Id>),

    /// The item type cannot be moved to the requested location.
    #[error("Cannot move {item_type} to {target:?}")]
    UnsupportedMove {
        /// Item type.
        item_type: ItemType,
        /// Requested target path.
        target: Vec<Id>,
    },
}

/// Result type alias for tree mutations.
pub type TreeResult<T> = Result<T, TreeError>;
