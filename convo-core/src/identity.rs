//! Identity types for convo entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Timestamp type using UTC timezone.
///
/// Wire timestamps stay opaque strings; this is only the parsed view.
pub type Timestamp = DateTime<Utc>;

/// Generate a new message identifier for locally constructed messages.
///
/// Uses UUIDv7 so identifiers minted by one client sort by creation time.
pub fn new_message_id() -> String {
    new_entity_id()
}

/// Generate a new UUIDv7 identifier for any locally created entity.
pub fn new_entity_id() -> String {
    Uuid::now_v7().to_string()
}

/// Format a timestamp the way the service emits them.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}

/// An entity keyed by an opaque identifier.
///
/// Identity is independent of structural equality: two values with the
/// same key refer to the same logical entity even if other fields differ.
pub trait Identified {
    /// The entity's unique key.
    fn key(&self) -> &str;

    /// Whether `other` refers to the same logical entity.
    fn same_entity<O: Identified + ?Sized>(&self, other: &O) -> bool {
        self.key() == other.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_id_is_v7() {
        let id = new_message_id();
        let parsed = Uuid::parse_str(&id).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_entity_ids_are_distinct() {
        assert_ne!(new_entity_id(), new_entity_id());
    }

    #[test]
    fn test_format_timestamp_uses_z_suffix() {
        let ts = DateTime::from_timestamp(1_704_067_200, 0).expect("valid timestamp");
        assert_eq!(format_timestamp(&ts), "2024-01-01T00:00:00Z");
    }
}
