//! Collection tree model and path resolution.

mod item;
pub mod resolver;

pub use item::{Collection, CollectionItem, Folder, ItemType, PathViolation};
pub use resolver::{
    RequestContainer, find_first_request, find_request_by_id, is_request_in_collection,
    update_request_in_collections,
};
