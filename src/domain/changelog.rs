use super::todo::TodoId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle event recorded in the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Completed,
    Deleted,
}

impl ChangeKind {
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
        }
    }
}

/// What a successful store mutation did, before it is timestamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub id: TodoId,
    /// Text of the todo at the moment of the change
    pub text: String,
}

impl Change {
    pub fn new(kind: ChangeKind, id: TodoId, text: &str) -> Self {
        Self {
            kind,
            id,
            text: text.to_string(),
        }
    }
}

/// Immutable changelog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, unbounded list of changelog entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogStore {
    entries: Vec<ChangelogEntry>,
}

impl ChangelogStore {
    pub fn from_entries(entries: Vec<ChangelogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    pub fn append(&mut self, kind: ChangeKind, text: &str, timestamp: DateTime<Utc>) -> &ChangelogEntry {
        self.entries.push(ChangelogEntry {
            kind,
            text: text.to_string(),
            timestamp,
        });
        &self.entries[self.entries.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, minute, 0).unwrap()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ChangelogStore::default();
        log.append(ChangeKind::Created, "A", at(0));
        log.append(ChangeKind::Completed, "A", at(1));
        log.append(ChangeKind::Deleted, "A", at(2));

        let kinds: Vec<ChangeKind> = log.entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::Created, ChangeKind::Completed, ChangeKind::Deleted]
        );
        assert_eq!(log.entries()[2].timestamp, at(2));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut log = ChangelogStore::default();
        log.append(ChangeKind::Completed, "Same", at(0));
        log.append(ChangeKind::Completed, "Same", at(0));
        assert_eq!(log.entries().len(), 2);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = ChangelogEntry {
            kind: ChangeKind::Deleted,
            text: "Walk dog".to_string(),
            timestamp: at(5),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "deleted",
                "text": "Walk dog",
                "timestamp": "2024-01-15T10:05:00Z"
            })
        );
    }

    #[test]
    fn test_tag_matches_serialized_name() {
        for kind in [ChangeKind::Created, ChangeKind::Completed, ChangeKind::Deleted] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.to_tag());
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let raw = r#"{"type":"uncompleted","text":"x","timestamp":"2024-01-15T10:05:00.000Z"}"#;
        assert!(serde_json::from_str::<ChangelogEntry>(raw).is_err());
    }
}
