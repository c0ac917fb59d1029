use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A minted identifier and its lifecycle state.
///
/// Records are append-only: `id`, `owner`, `table_name`, `user_id` and
/// `created_at` never change after creation, and the two lifecycle bits
/// only move from `false` to `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    /// The opaque identifier itself. Primary key, unique per registry.
    pub id: String,
    /// The client application the identifier was minted for.
    pub owner: String,
    /// Logical entity the owner associates the id with, if any.
    pub table_name: Option<String>,
    /// Reserved for future cross-referencing; never interpreted here.
    pub user_id: Option<String>,
    /// Set once by the confirmation operation.
    pub confirmed: bool,
    /// Set by soft-delete; the row itself is never removed.
    pub deleted: bool,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
}

impl IdentifierRecord {
    /// A freshly minted, unconfirmed record.
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        table_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            table_name,
            user_id: None,
            confirmed: false,
            deleted: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_unconfirmed() {
        let record = IdentifierRecord::new("Xk29fQ7mWp3Z", "person_app", None, Utc::now());
        assert!(!record.confirmed);
        assert!(!record.deleted);
        assert!(record.user_id.is_none());
    }

    #[test]
    fn serializes_optional_fields() {
        let record = IdentifierRecord::new(
            "Xk29fQ7mWp3Z",
            "person_app",
            Some("contacts".into()),
            Utc::now(),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: IdentifierRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.table_name.as_deref(), Some("contacts"));
    }
}
