use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use idreg_types::{IdentifierRecord, Settings};

use crate::error::{StoreError, StoreResult};
use crate::traits::RegistryStore;

/// SQLite-backed registry store.
///
/// A single connection behind a mutex. The `ids` primary key is what makes
/// `insert_unique` atomic: a constraint violation from the engine is the
/// collision signal, so concurrent generate calls can never both claim the
/// same identifier.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the registry database at `path`.
    ///
    /// Creates the schema if absent and seeds the default settings rows
    /// without clobbering existing values.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database (tests and embedding).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        // Acknowledged writes must be on disk: the suspend/backup protocol
        // treats a completed response as a durably present row.
        conn.pragma_update(None, "synchronous", "FULL")?;
        Self::init_schema(&conn)?;
        Self::seed_default_settings(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS ids (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                table_name TEXT,
                user_id TEXT,
                confirmed INTEGER NOT NULL DEFAULT 0,
                deleted INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute("CREATE INDEX IF NOT EXISTS idx_ids_owner ON ids(owner)", [])?;

        Ok(())
    }

    /// Seed the default settings rows. `INSERT OR IGNORE` keeps values a
    /// deployment has already changed.
    fn seed_default_settings(conn: &Connection) -> rusqlite::Result<()> {
        let defaults = Settings::default();
        let rows: [(&str, String); 3] = [
            ("id_length", defaults.id_length.to_string()),
            ("charset", defaults.charset),
            ("admin_secret", defaults.admin_secret),
        ];
        for (key, value) in rows {
            conn.execute(
                "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(())
    }

    fn read_setting(conn: &Connection, key: &'static str) -> StoreResult<String> {
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(StoreError::MissingSetting(key))
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<IdentifierRecord> {
        Ok(IdentifierRecord {
            id: row.get(0)?,
            owner: row.get(1)?,
            table_name: row.get(2)?,
            user_id: row.get(3)?,
            confirmed: row.get(4)?,
            deleted: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl RegistryStore for SqliteStore {
    fn insert_unique(
        &self,
        candidate: &str,
        owner: &str,
        table_name: Option<&str>,
    ) -> StoreResult<IdentifierRecord> {
        let created_at: DateTime<Utc> = Utc::now();
        let conn = self.conn.lock().expect("lock poisoned");
        let result = conn.execute(
            "INSERT INTO ids (id, owner, table_name, confirmed, deleted, created_at)
             VALUES (?1, ?2, ?3, 0, 0, ?4)",
            params![candidate, owner, table_name, created_at],
        );
        match result {
            Ok(_) => Ok(IdentifierRecord::new(
                candidate,
                owner,
                table_name.map(str::to_string),
                created_at,
            )),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Collision(candidate.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, id: &str) -> StoreResult<Option<IdentifierRecord>> {
        let conn = self.conn.lock().expect("lock poisoned");
        let record = conn
            .query_row(
                "SELECT id, owner, table_name, user_id, confirmed, deleted, created_at
                 FROM ids WHERE id = ?1",
                params![id],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn confirm(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().expect("lock poisoned");
        // No `confirmed = 0` filter: re-confirming must stay a no-op
        // success, and a soft-deleted row can still be confirmed.
        let rows = conn.execute("UPDATE ids SET confirmed = 1 WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn soft_delete(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().expect("lock poisoned");
        let rows = conn.execute("UPDATE ids SET deleted = 1 WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn read_settings(&self) -> StoreResult<Settings> {
        let conn = self.conn.lock().expect("lock poisoned");
        let id_length_raw = Self::read_setting(&conn, "id_length")?;
        let id_length = id_length_raw
            .parse::<u32>()
            .map_err(|e| StoreError::CorruptSetting {
                key: "id_length".into(),
                reason: e.to_string(),
            })?;
        let charset = Self::read_setting(&conn, "charset")?;
        let admin_secret = Self::read_setting(&conn, "admin_secret")?;
        Ok(Settings {
            id_length,
            charset,
            admin_secret,
        })
    }

    fn write_settings(&self, settings: &Settings) -> StoreResult<()> {
        let mut conn = self.conn.lock().expect("lock poisoned");
        let tx = conn.transaction()?;
        let rows: [(&str, String); 3] = [
            ("id_length", settings.id_length.to_string()),
            ("charset", settings.charset.clone()),
            ("admin_secret", settings.admin_secret.clone()),
        ];
        for (key, value) in rows {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        tracing::info!("settings updated");
        Ok(())
    }

    fn checkpoint(&self) -> StoreResult<()> {
        let conn = self.conn.lock().expect("lock poisoned");
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        tracing::debug!("wal checkpoint forced");
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}
