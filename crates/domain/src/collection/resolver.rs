//! Stateless lookups over a forest of collections.
//!
//! A path is the ancestor-ID chain of the node it addresses:
//! `[collection]` addresses a collection root, `[collection, folder]` a
//! folder inside it. Longer or empty paths resolve to nothing.

use super::item::{Collection, CollectionItem, Folder};
use crate::request::Request;

/// Finds a request anywhere in the forest, depth-first in item order.
#[must_use]
pub fn find_request_by_id<'a>(collections: &'a [Collection], id: &str) -> Option<&'a Request> {
    collections
        .iter()
        .flat_map(Collection::requests)
        .find(|r| r.id == id)
}

/// Mutable variant of [`find_request_by_id`].
pub fn find_request_by_id_mut<'a>(
    collections: &'a mut [Collection],
    id: &str,
) -> Option<&'a mut Request> {
    collections
        .iter_mut()
        .flat_map(Collection::requests_mut)
        .find(|r| r.id == id)
}

/// Returns the first request in traversal order, used to pick a default
/// active request.
#[must_use]
pub fn find_first_request(collections: &[Collection]) -> Option<&Request> {
    collections.iter().flat_map(Collection::requests).next()
}

/// Returns true if the request's path places it inside `collection_id`.
#[must_use]
pub fn is_request_in_collection(request: &Request, collection_id: &str) -> bool {
    request
        .folder_path
        .first()
        .is_some_and(|id| id == collection_id)
}

/// Returns a new forest with the request whose ID matches `request.id`
/// replaced in place. The input forest is left untouched; if no request
/// matches, the copy is identical to the input.
#[must_use]
pub fn update_request_in_collections(
    collections: &[Collection],
    request: &Request,
) -> Vec<Collection> {
    let mut updated = collections.to_vec();
    if let Some(slot) = find_request_by_id_mut(&mut updated, &request.id) {
        let folder_path = std::mem::take(&mut slot.folder_path);
        *slot = request.clone();
        slot.folder_path = folder_path;
    }
    updated
}

/// Finds a top-level collection by ID.
#[must_use]
pub fn find_collection<'a>(collections: &'a [Collection], id: &str) -> Option<&'a Collection> {
    collections.iter().find(|c| c.id == id)
}

/// Mutable variant of [`find_collection`].
pub fn find_collection_mut<'a>(
    collections: &'a mut [Collection],
    id: &str,
) -> Option<&'a mut Collection> {
    collections.iter_mut().find(|c| c.id == id)
}

/// Finds the folder addressed by a `[collection, folder]` path.
#[must_use]
pub fn find_folder<'a>(collections: &'a [Collection], path: &[String]) -> Option<&'a Folder> {
    match path {
        [collection_id, folder_id] => find_collection(collections, collection_id)?.folder(folder_id),
        _ => None,
    }
}

/// Finds a request by ID inside the container addressed by `path` only.
#[must_use]
pub fn find_request_at<'a>(
    collections: &'a [Collection],
    id: &str,
    path: &[String],
) -> Option<&'a Request> {
    match path {
        [collection_id] => find_collection(collections, collection_id)?
            .items
            .iter()
            .find_map(|item| match item {
                CollectionItem::Request(r) if r.id == id => Some(r),
                _ => None,
            }),
        [_, _] => find_folder(collections, path)?
            .items
            .iter()
            .find(|r| r.id == id),
        _ => None,
    }
}

/// Resolves `path` to the list that holds requests at that location.
pub fn request_container_mut<'a>(
    collections: &'a mut [Collection],
    path: &[String],
) -> Option<RequestContainer<'a>> {
    match path {
        [collection_id] => find_collection_mut(collections, collection_id)
            .map(|c| RequestContainer::Root(&mut c.items)),
        [collection_id, folder_id] => find_collection_mut(collections, collection_id)?
            .folder_mut(folder_id)
            .map(|f| RequestContainer::Folder(&mut f.items)),
        _ => None,
    }
}

/// A resolved location that can hold requests: a collection root or a
/// folder.
#[derive(Debug)]
pub enum RequestContainer<'a> {
    /// The root item list of a collection
    Root(&'a mut Vec<CollectionItem>),
    /// The request list of a folder
    Folder(&'a mut Vec<Request>),
}

impl RequestContainer<'_> {
    /// Returns the index of the request with the given ID.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        match self {
            Self::Root(items) => items
                .iter()
                .position(|item| matches!(item, CollectionItem::Request(r) if r.id == id)),
            Self::Folder(items) => items.iter().position(|r| r.id == id),
        }
    }

    /// Returns the request with the given ID, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Request> {
        match self {
            Self::Root(items) => items.iter_mut().find_map(|item| match item {
                CollectionItem::Request(r) if r.id == id => Some(r),
                _ => None,
            }),
            Self::Folder(items) => items.iter_mut().find(|r| r.id == id),
        }
    }

    /// Removes and returns the request with the given ID.
    pub fn remove(&mut self, id: &str) -> Option<Request> {
        let index = self.position(id)?;
        match self {
            Self::Root(items) => match items.remove(index) {
                CollectionItem::Request(r) => Some(r),
                CollectionItem::Folder(_) => None,
            },
            Self::Folder(items) => Some(items.remove(index)),
        }
    }

    /// Inserts a request at `index`, clamped to the list length.
    pub fn insert(&mut self, index: usize, request: Request) {
        match self {
            Self::Root(items) => {
                let index = index.min(items.len());
                items.insert(index, CollectionItem::Request(request));
            }
            Self::Folder(items) => {
                let index = index.min(items.len());
                items.insert(index, request);
            }
        }
    }

    /// Appends a request.
    pub fn push(&mut self, request: Request) {
        match self {
            Self::Root(items) => items.push(CollectionItem::Request(request)),
            Self::Folder(items) => items.push(request),
        }
    }
}
