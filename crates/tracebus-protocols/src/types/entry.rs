//! Key/value entries.

use serde::{Deserialize, Serialize};

/// A single key/value pair reported by a handler's `config` or `trace`.
///
/// Entries carry no uniqueness constraint; order is whatever the handler
/// emits and is preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapKeyValueEntry {
    pub key: String,
    pub value: String,
}

impl MapKeyValueEntry {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

impl<K: Into<String>, V: ToString> From<(K, V)> for MapKeyValueEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_stringifies_value() {
        let entry = MapKeyValueEntry::new("max_idle", 10);
        assert_eq!(entry.key, "max_idle");
        assert_eq!(entry.value, "10");
    }

    #[test]
    fn test_entry_from_tuple() {
        let entries: Vec<MapKeyValueEntry> =
            vec![("min_idle", 0).into(), ("ipam", "vpc").into()];
        assert_eq!(entries[0], MapKeyValueEntry::new("min_idle", "0"));
        assert_eq!(entries[1].value, "vpc");
    }

    #[test]
    fn test_entry_serialization() {
        let entry = MapKeyValueEntry::new("mac", "00:16:3e:00:00:01");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["key"], "mac");
        assert_eq!(json["value"], "00:16:3e:00:00:01");
    }
}
