//! Deterministic JSON for snapshot files.
//!
//! Snapshots are written with 2-space indentation and a trailing newline so
//! that the same forest always produces the same bytes. Field order follows
//! the domain structs; imported JSON keeps its source order.

mod json;

pub use json::{SerializationError, from_json, to_json_stable, to_json_stable_bytes};
