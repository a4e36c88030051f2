//! Arbor Domain - Canonical collection tree
//!
//! This crate defines the unified Collection → Folder → Request model that
//! every importer converges on, plus stateless path resolution over it.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod error;
pub mod id;
pub mod request;

pub use collection::{Collection, CollectionItem, Folder, ItemType, PathViolation};
pub use error::{DomainError, DomainResult};
pub use id::{Id, generate_id};
pub use request::{AuthConfig, BodyType, Header, HttpMethod, QueryParam, Request};
