use idreg_types::{IdentifierRecord, Settings};

use crate::error::StoreResult;

/// Durable table of identifier records plus the settings key/value table.
///
/// All implementations must satisfy these invariants:
/// - `insert_unique` is atomic with respect to concurrent callers: the
///   uniqueness check happens inside the storage engine, never as a
///   separate check-then-insert.
/// - A collision is reported as [`StoreError::Collision`] and nothing
///   else; a fabricated duplicate record is never returned.
/// - Lifecycle bits are monotonic: `confirm` and `soft_delete` only move
///   `false` to `true`, and repeating either is a no-op, not an error.
/// - Rows are never physically removed.
/// - Every mutation is committed before the call returns `Ok`.
///
/// [`StoreError::Collision`]: crate::error::StoreError::Collision
pub trait RegistryStore: Send + Sync {
    /// Insert a new record for `candidate` if and only if it is absent.
    ///
    /// Returns the inserted record, or [`StoreError::Collision`] if the
    /// identifier is already taken.
    ///
    /// [`StoreError::Collision`]: crate::error::StoreError::Collision
    fn insert_unique(
        &self,
        candidate: &str,
        owner: &str,
        table_name: Option<&str>,
    ) -> StoreResult<IdentifierRecord>;

    /// Fetch a record by identifier.
    ///
    /// Returns `Ok(None)` if no such identifier was ever minted.
    /// Soft-deleted records are returned like any other.
    fn get(&self, id: &str) -> StoreResult<Option<IdentifierRecord>>;

    /// Mark a record confirmed. Returns `true` if the row exists.
    ///
    /// Confirming an already-confirmed (or soft-deleted) record succeeds
    /// and changes nothing.
    fn confirm(&self, id: &str) -> StoreResult<bool>;

    /// Mark a record deleted without removing it. Returns `true` if the
    /// row exists.
    fn soft_delete(&self, id: &str) -> StoreResult<bool>;

    /// Read the current settings rows.
    fn read_settings(&self) -> StoreResult<Settings>;

    /// Replace the settings rows.
    fn write_settings(&self, settings: &Settings) -> StoreResult<()>;

    /// Force a durability checkpoint so that a file-level copy taken
    /// immediately afterwards is self-consistent.
    fn checkpoint(&self) -> StoreResult<()>;
}
