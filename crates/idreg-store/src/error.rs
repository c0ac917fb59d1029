use thiserror::Error;

/// Errors from registry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The candidate identifier already exists. This is the one and only
    /// collision signal; the generation loop retries on it and on nothing
    /// else.
    #[error("identifier already exists: {0}")]
    Collision(String),

    /// A required settings row is missing from the settings table.
    #[error("missing settings row: {0}")]
    MissingSetting(&'static str),

    /// A settings row holds a value that cannot be parsed.
    #[error("corrupt settings value for {key:?}: {reason}")]
    CorruptSetting { key: String, reason: String },

    /// A stored record cannot be decoded.
    #[error("corrupt record {id:?}: {reason}")]
    CorruptRecord { id: String, reason: String },

    /// Error from the SQLite engine that is not a recognized collision.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
