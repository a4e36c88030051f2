//! In-memory owner of the collection forest.
//!
//! The repository is the single writer: every mutation takes `&mut self`,
//! runs to completion, and either commits (bumping the revision and
//! publishing an immutable snapshot) or is rejected with a [`TreeError`]
//! and leaves the forest untouched.

use std::sync::Arc;

use arbor_domain::collection::resolver;
use arbor_domain::{Collection, CollectionItem, Folder, Id, ItemType, Request, generate_id};
use tokio::sync::watch;

use super::config::TreeConfig;
use super::error::{TreeError, TreeResult};
use super::writer::SnapshotWriter;
use crate::ports::{CollectionStore, StorageError};

/// Immutable copy of the whole forest, as handed to observers and storage.
pub type Snapshot = Arc<Vec<Collection>>;

/// Owns the authoritative forest of collections and exposes the mutation API.
#[derive(Debug)]
pub struct TreeRepository {
    collections: Vec<Collection>,
    revision: u64,
    config: TreeConfig,
    snapshots: watch::Sender<Snapshot>,
}

impl TreeRepository {
    /// Creates an empty repository with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates an empty repository with the given configuration.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        Self::from_parts(Vec::new(), config)
    }

    /// Creates a repository over an existing forest. Stored paths are
    /// re-derived from structure.
    #[must_use]
    pub fn from_collections(collections: Vec<Collection>) -> Self {
        Self::from_parts(collections, TreeConfig::default())
    }

    /// Loads the forest from `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the snapshot cannot be loaded.
    pub async fn load<S: CollectionStore>(
        store: &S,
        config: TreeConfig,
    ) -> Result<Self, StorageError> {
        let collections = store.load().await?;
        tracing::info!(collections = collections.len(), "loaded collection snapshot");
        Ok(Self::from_parts(collections, config))
    }

    fn from_parts(mut collections: Vec<Collection>, config: TreeConfig) -> Self {
        for collection in &mut collections {
            collection.restamp_paths();
        }
        let (snapshots, _) = watch::channel(Arc::new(collections.clone()));
        Self {
            collections,
            revision: 0,
            config,
            snapshots,
        }
    }

    /// Returns the forest.
    #[must_use]
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Returns the number of committed mutations since construction.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the snapshot published by the latest commit.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Subscribes to snapshots published after each commit.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// Creates a writer that persists every future snapshot to `store`.
    #[must_use]
    pub fn writer<S: CollectionStore + 'static>(&self, store: Arc<S>) -> SnapshotWriter<S> {
        SnapshotWriter::new(store, self.subscribe())
    }

    /// Creates a new empty top-level collection with the default name.
    #[doc(alias = "add_folder")]
    pub fn create_collection(&mut self) -> Id {
        let collection = Collection::new(self.config.default_collection_name.clone());
        let id = collection.id.clone();
        self.collections.push(collection);
        self.commit("create_collection");
        id
    }

    /// Attaches an already-built collection (typically an import result).
    ///
    /// A collection whose ID is already taken gets a fresh one.
    pub fn add_collection(&mut self, mut collection: Collection) -> Id {
        if self.contains_id(&collection.id) {
            collection.id = generate_id();
        }
        collection.restamp_paths();
        let id = collection.id.clone();
        self.collections.push(collection);
        self.commit("add_collection");
        id
    }

    /// Creates an empty folder at the root of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CollectionNotFound`] if the collection does not exist.
    pub fn add_subfolder(
        &mut self,
        collection_id: &str,
        name: Option<String>,
    ) -> TreeResult<Id> {
        let name = name.unwrap_or_else(|| self.config.default_folder_name.clone());
        let result = match resolver::find_collection_mut(&mut self.collections, collection_id) {
            Some(collection) => {
                let folder = Folder::new(name);
                let id = folder.id.clone();
                collection.add_item(CollectionItem::Folder(folder));
                Ok(id)
            }
            None => Err(TreeError::CollectionNotFound(collection_id.to_string())),
        };
        self.finish("add_subfolder", result)
    }

    /// Creates a default request (`GET`, no body, no auth) at `folder_path`:
    /// the collection root for `[collection]`, a folder for
    /// `[collection, folder]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve.
    pub fn add_request(&mut self, folder_path: &[Id]) -> TreeResult<Id> {
        let request = Request::new(self.config.default_request_name.clone());
        let result = self.insert_request(request, folder_path);
        self.finish("add_request", result)
    }

    /// Attaches an existing request (e.g. from the cURL importer) at
    /// `folder_path`. A request whose ID is already taken gets a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve.
    pub fn attach_request(&mut self, mut request: Request, folder_path: &[Id]) -> TreeResult<Id> {
        if self.contains_id(&request.id) {
            request.id = generate_id();
        }
        let result = self.insert_request(request, folder_path);
        self.finish("attach_request", result)
    }

    /// Renames an item. Collections are looked up by ID alone; folders and
    /// requests are looked up inside the container addressed by `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found at `path`.
    pub fn rename_item(
        &mut self,
        id: &str,
        new_name: impl Into<String>,
        item_type: ItemType,
        path: &[Id],
    ) -> TreeResult<()> {
        let new_name = new_name.into();
        let renamed = match item_type {
            ItemType::Collection => resolver::find_collection_mut(&mut self.collections, id)
                .map(|collection| collection.name = new_name),
            ItemType::Folder => folder_owner(&mut self.collections, id, path)
                .and_then(|collection| collection.folder_mut(id))
                .map(|folder| folder.name = new_name),
            ItemType::Request => {
                resolver::request_container_mut(&mut self.collections, path).and_then(
                    |mut container| container.get_mut(id).map(|request| request.name = new_name),
                )
            }
        };
        let result = renamed.ok_or_else(|| not_found(id, item_type, path));
        self.finish("rename_item", result)
    }

    /// Deletes an item. Deleting a collection discards its whole subtree;
    /// deleting a folder discards the requests it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found at `path`.
    pub fn delete_item(&mut self, id: &str, item_type: ItemType, path: &[Id]) -> TreeResult<()> {
        let deleted = match item_type {
            ItemType::Collection => self
                .collections
                .iter()
                .position(|c| c.id == id)
                .map(|index| {
                    self.collections.remove(index);
                }),
            ItemType::Folder => folder_owner(&mut self.collections, id, path).and_then(|owner| {
                folder_index(owner, id).map(|index| {
                    owner.items.remove(index);
                })
            }),
            ItemType::Request => resolver::request_container_mut(&mut self.collections, path)
                .and_then(|mut container| container.remove(id))
                .map(drop),
        };
        let result = deleted.ok_or_else(|| not_found(id, item_type, path));
        self.finish("delete_item", result)
    }

    /// Moves an item from `source_path` to `target_path` and rewrites its
    /// stored path. Requests may move between any collection roots and
    /// folders; folders may only move between collection roots.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is empty or unresolvable, if the item
    /// is not at `source_path`, or if the move would nest a folder.
    pub fn move_item(
        &mut self,
        id: &str,
        item_type: ItemType,
        source_path: &[Id],
        target_path: &[Id],
    ) -> TreeResult<()> {
        let result = if source_path.is_empty() {
            Err(TreeError::InvalidPath(Vec::new()))
        } else if target_path.is_empty() {
            Err(TreeError::InvalidPath(Vec::new()))
        } else {
            match item_type {
                ItemType::Request => self.move_request(id, source_path, target_path),
                ItemType::Folder => self.move_folder(id, source_path, target_path),
                ItemType::Collection => Err(TreeError::UnsupportedMove {
                    item_type,
                    target: target_path.to_vec(),
                }),
            }
        };
        self.finish("move_item", result)
    }

    /// Deep-copies the request with `id` (found anywhere in the forest),
    /// gives the copy a fresh ID and a `" (Copy)"` suffix, and inserts it at
    /// `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RequestNotFound`] if no such request exists, or a
    /// path error if `path` does not resolve.
    pub fn duplicate_request(&mut self, id: &str, path: &[Id]) -> TreeResult<Id> {
        let result = match resolver::find_request_by_id(&self.collections, id) {
            Some(source) => {
                let copy = source.duplicate(&self.config.copy_suffix);
                self.insert_request(copy, path)
            }
            None => Err(TreeError::RequestNotFound(id.to_string())),
        };
        self.finish("duplicate_request", result)
    }

    /// Replaces the stored request with the same ID, keeping its position.
    /// The stored path is kept from the tree, not taken from `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RequestNotFound`] if no request has that ID.
    pub fn update_request(&mut self, request: Request) -> TreeResult<()> {
        let result = match resolver::find_request_by_id_mut(&mut self.collections, &request.id) {
            Some(slot) => {
                let folder_path = std::mem::take(&mut slot.folder_path);
                *slot = request;
                slot.folder_path = folder_path;
                Ok(())
            }
            None => Err(TreeError::RequestNotFound(request.id)),
        };
        self.finish("update_request", result)
    }

    fn move_request(&mut self, id: &str, source_path: &[Id], target_path: &[Id]) -> TreeResult<()> {
        if !self.resolves(target_path) {
            return Err(unresolved(target_path));
        }
        let mut source = resolver::request_container_mut(&mut self.collections, source_path)
            .ok_or_else(|| unresolved(source_path))?;
        let index = source
            .position(id)
            .ok_or_else(|| not_found(id, ItemType::Request, source_path))?;
        let mut request = source
            .remove(id)
            .ok_or_else(|| not_found(id, ItemType::Request, source_path))?;

        request.folder_path = target_path.to_vec();
        match resolver::request_container_mut(&mut self.collections, target_path) {
            Some(mut target) => {
                target.push(request);
                Ok(())
            }
            None => {
                restore(&mut self.collections, source_path, index, request);
                Err(unresolved(target_path))
            }
        }
    }

    fn move_folder(&mut self, id: &str, source_path: &[Id], target_path: &[Id]) -> TreeResult<()> {
        let [target_collection] = target_path else {
            return Err(TreeError::UnsupportedMove {
                item_type: ItemType::Folder,
                target: target_path.to_vec(),
            });
        };
        if resolver::find_collection(&self.collections, target_collection).is_none() {
            return Err(TreeError::CollectionNotFound(target_collection.clone()));
        }
        let owner = folder_owner(&mut self.collections, id, source_path)
            .ok_or_else(|| not_found(id, ItemType::Folder, source_path))?;
        let index =
            folder_index(owner, id).ok_or_else(|| not_found(id, ItemType::Folder, source_path))?;
        let folder = owner.items.remove(index);

        match resolver::find_collection_mut(&mut self.collections, target_collection) {
            Some(target) => {
                target.add_item(folder);
                Ok(())
            }
            None => {
                if let Some(owner) = folder_owner_by_path(&mut self.collections, source_path) {
                    owner.items.insert(index.min(owner.items.len()), folder);
                }
                Err(TreeError::CollectionNotFound(target_collection.clone()))
            }
        }
    }

    fn insert_request(&mut self, mut request: Request, folder_path: &[Id]) -> TreeResult<Id> {
        let mut container = resolver::request_container_mut(&mut self.collections, folder_path)
            .ok_or_else(|| unresolved(folder_path))?;
        request.folder_path = folder_path.to_vec();
        let id = request.id.clone();
        container.push(request);
        Ok(id)
    }

    fn resolves(&self, path: &[Id]) -> bool {
        match path {
            [collection_id] => {
                resolver::find_collection(&self.collections, collection_id).is_some()
            }
            [_, _] => resolver::find_folder(&self.collections, path).is_some(),
            _ => false,
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.collections.iter().any(|collection| {
            collection.id == id || collection.items.iter().any(|item| match item {
                CollectionItem::Request(r) => r.id == id,
                CollectionItem::Folder(f) => f.id == id || f.items.iter().any(|r| r.id == id),
            })
        })
    }

    fn finish<T>(&mut self, operation: &'static str, result: TreeResult<T>) -> TreeResult<T> {
        match result {
            Ok(value) => {
                self.commit(operation);
                Ok(value)
            }
            Err(error) => {
                tracing::warn!(operation, %error, "tree mutation rejected");
                Err(error)
            }
        }
    }

    fn commit(&mut self, operation: &'static str) {
        self.revision += 1;
        self.snapshots.send_replace(Arc::new(self.collections.clone()));
        tracing::debug!(operation, revision = self.revision, "tree updated");
    }
}

impl Default for TreeRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the collection that holds folder `folder_id`, where `path` is the
/// folder's parent path (`[collection]`) or its own path
/// (`[collection, folder]`).
fn folder_owner<'a>(
    collections: &'a mut [Collection],
    folder_id: &str,
    path: &[Id],
) -> Option<&'a mut Collection> {
    let collection_id = match path {
        [collection_id] => collection_id,
        [collection_id, own_id] if own_id == folder_id => collection_id,
        _ => return None,
    };
    resolver::find_collection_mut(collections, collection_id)
        .filter(|collection| collection.folder(folder_id).is_some())
}

fn folder_owner_by_path<'a>(
    collections: &'a mut [Collection],
    path: &[Id],
) -> Option<&'a mut Collection> {
    path.first()
        .and_then(|collection_id| resolver::find_collection_mut(collections, collection_id))
}

fn folder_index(collection: &Collection, folder_id: &str) -> Option<usize> {
    collection
        .items
        .iter()
        .position(|item| matches!(item, CollectionItem::Folder(f) if f.id == folder_id))
}

fn restore(collections: &mut [Collection], path: &[Id], index: usize, mut request: Request) {
    request.folder_path = path.to_vec();
    if let Some(mut container) = resolver::request_container_mut(collections, path) {
        container.insert(index, request);
    }
}

fn not_found(id: &str, item_type: ItemType, path: &[Id]) -> TreeError {
    match item_type {
        ItemType::Collection => TreeError::CollectionNotFound(id.to_string()),
        ItemType::Folder | ItemType::Request => TreeError::ItemNotFound {
            id: id.to_string(),
            item_type,
            path: path.to_vec(),
        },
    }
}

fn unresolved(path: &[Id]) -> TreeError {
    match path {
        [collection_id] => TreeError::CollectionNotFound(collection_id.clone()),
        [_, _] => TreeError::FolderNotFound(path.to_vec()),
        _ => TreeError::InvalidPath(path.to_vec()),
    }
}
