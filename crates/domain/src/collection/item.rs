//! Collection tree types
//!
//! The tree is exactly Collection → (Folder)? → Request. A [`Folder`] can
//! only hold requests, so deeper nesting is unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::id::{Id, generate_id};
use crate::request::Request;

/// One level of grouping inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier
    pub id: Id,
    /// Folder name
    pub name: String,
    /// Ancestor-ID chain, always `[collection_id]`
    #[serde(default)]
    pub parent_path: Vec<Id>,
    /// Requests in this folder, in order
    #[serde(default)]
    pub items: Vec<Request>,
}

impl Folder {
    /// Creates a new empty folder with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            parent_path: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Returns the path its requests must carry: `parent_path + [id]`.
    #[must_use]
    pub fn child_path(&self) -> Vec<Id> {
        let mut path = self.parent_path.clone();
        path.push(self.id.clone());
        path
    }
}

/// An item at the root of a collection (either a folder or a request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionItem {
    /// A folder of requests
    Folder(Folder),
    /// A request definition
    Request(Request),
}

impl CollectionItem {
    /// Returns the ID of this item.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(f) => &f.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the name of this item.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Returns the item type tag.
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Folder(_) => ItemType::Folder,
            Self::Request(_) => ItemType::Request,
        }
    }
}

/// A top-level named tree root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier
    pub id: Id,
    /// Collection name
    pub name: String,
    /// Root items, in order
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

impl Collection {
    /// Creates a new empty collection with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Returns the path carried by root-level items: `[id]`.
    #[must_use]
    pub fn child_path(&self) -> Vec<Id> {
        vec![self.id.clone()]
    }

    /// Appends an item to the collection root, stamping its path.
    pub fn add_item(&mut self, mut item: CollectionItem) {
        stamp_item(&self.id, &mut item);
        self.items.push(item);
    }

    /// Returns the folder with the given ID.
    #[must_use]
    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.items.iter().find_map(|item| match item {
            CollectionItem::Folder(f) if f.id == folder_id => Some(f),
            _ => None,
        })
    }

    /// Returns the folder with the given ID, mutably.
    pub fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.items.iter_mut().find_map(|item| match item {
            CollectionItem::Folder(f) if f.id == folder_id => Some(f),
            _ => None,
        })
    }

    /// Iterates over every request, depth-first in item order.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.items.iter().flat_map(|item| match item {
            CollectionItem::Request(r) => std::slice::from_ref(r).iter(),
            CollectionItem::Folder(f) => f.items.iter(),
        })
    }

    /// Iterates mutably over every request, depth-first in item order.
    pub fn requests_mut(&mut self) -> impl Iterator<Item = &mut Request> {
        self.items.iter_mut().flat_map(|item| match item {
            CollectionItem::Request(r) => std::slice::from_mut(r).iter_mut(),
            CollectionItem::Folder(f) => f.items.iter_mut(),
        })
    }

    /// Returns the total number of requests in the collection.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests().count()
    }

    /// Returns the number of folders in the collection.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, CollectionItem::Folder(_)))
            .count()
    }

    /// Rewrites every stored path from the actual tree structure.
    pub fn restamp_paths(&mut self) {
        for item in &mut self.items {
            stamp_item(&self.id, item);
        }
    }

    /// Recomputes every node's ancestor chain by walking from the root and
    /// reports each node whose stored path differs.
    #[must_use]
    pub fn path_violations(&self) -> Vec<PathViolation> {
        let root = self.child_path();
        let mut violations = Vec::new();
        for item in &self.items {
            match item {
                CollectionItem::Request(r) => {
                    check_path(&mut violations, &r.id, &r.folder_path, &root);
                }
                CollectionItem::Folder(f) => {
                    check_path(&mut violations, &f.id, &f.parent_path, &root);
                    let mut folder_chain = root.clone();
                    folder_chain.push(f.id.clone());
                    for r in &f.items {
                        check_path(&mut violations, &r.id, &r.folder_path, &folder_chain);
                    }
                }
            }
        }
        violations
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new("New Collection")
    }
}

fn stamp_item(collection_id: &str, item: &mut CollectionItem) {
    match item {
        CollectionItem::Request(r) => r.folder_path = vec![collection_id.to_string()],
        CollectionItem::Folder(f) => {
            f.parent_path = vec![collection_id.to_string()];
            let child_path = f.child_path();
            for r in &mut f.items {
                r.folder_path.clone_from(&child_path);
            }
        }
    }
}

fn check_path(violations: &mut Vec<PathViolation>, id: &str, stored: &[Id], expected: &[Id]) {
    if stored != expected {
        violations.push(PathViolation {
            node_id: id.to_string(),
            stored: stored.to_vec(),
            expected: expected.to_vec(),
        });
    }
}

/// A node whose stored path does not match its real position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathViolation {
    /// The offending node
    pub node_id: Id,
    /// The path stored on the node
    pub stored: Vec<Id>,
    /// The ancestor chain computed from the root
    pub expected: Vec<Id>,
}

/// Kind of node addressed by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A top-level collection
    Collection,
    /// A folder inside a collection
    Folder,
    /// A request
    Request,
}

impl ItemType {
    /// Returns the tag as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Folder => "folder",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "collection" => Ok(Self::Collection),
            "folder" => Ok(Self::Folder),
            "request" => Ok(Self::Request),
            other => Err(DomainError::UnknownItemType(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Collection {
        let mut collection = Collection::new("Test");
        collection.add_item(CollectionItem::Request(Request::new("Request 1")));

        let mut folder = Folder::new("Users");
        folder.items.push(Request::new("Get Users"));
        folder.items.push(Request::new("Create User"));
        collection.add_item(CollectionItem::Folder(folder));
        collection
    }

    #[test]
    fn test_collection_creation() {
        let collection = Collection::new("My API");
        assert_eq!(collection.name, "My API");
        assert!(collection.items.is_empty());
    }

    #[test]
    fn test_request_count() {
        let collection = sample();
        assert_eq!(collection.request_count(), 3);
        assert_eq!(collection.folder_count(), 1);
    }

    #[test]
    fn test_add_item_stamps_paths() {
        let collection = sample();
        assert!(collection.path_violations().is_empty());

        let folder = match &collection.items[1] {
            CollectionItem::Folder(f) => f,
            CollectionItem::Request(_) => unreachable!(),
        };
        assert_eq!(folder.parent_path, vec![collection.id.clone()]);
        assert_eq!(
            folder.items[0].folder_path,
            vec![collection.id.clone(), folder.id.clone()]
        );
    }

    #[test]
    fn test_path_violations_detects_drift_and_restamp_fixes_it() {
        let mut collection = sample();
        if let CollectionItem::Folder(f) = &mut collection.items[1] {
            f.items[1].folder_path = vec!["stale".to_string()];
        }

        let violations = collection.path_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].stored, vec!["stale".to_string()]);

        collection.restamp_paths();
        assert!(collection.path_violations().is_empty());
    }

    #[test]
    fn test_requests_iterates_depth_first() {
        let collection = sample();
        let names: Vec<&str> = collection.requests().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Request 1", "Get Users", "Create User"]);
    }

    #[test]
    fn test_items_are_tagged_on_the_wire() {
        let collection = sample();
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["items"][0]["type"], "request");
        assert_eq!(value["items"][1]["type"], "folder");

        let back: Collection = serde_json::from_value(value).unwrap();
        assert_eq!(back, collection);
    }

    #[test]
    fn test_item_type_from_str() {
        assert_eq!("folder".parse::<ItemType>().unwrap(), ItemType::Folder);
        assert!("workspace".parse::<ItemType>().is_err());
    }
}
