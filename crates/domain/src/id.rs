//! ID generation utilities.

use uuid::Uuid;

/// A UUID string used for every tree node (collections, folders, requests).
pub type Id = String;

/// Generates a new, globally unique node ID.
///
/// UUID v7 is used so IDs are time-ordered; two calls never return the
/// same value, which keeps IDs unique across the whole forest.
#[must_use]
pub fn generate_id() -> Id {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let ids: std::collections::HashSet<Id> = (0..256).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 256);
    }
}
