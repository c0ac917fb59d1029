use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use idreg_types::{IdentifierRecord, Settings};

use crate::error::{StoreError, StoreResult};
use crate::traits::RegistryStore;

struct Inner {
    ids: HashMap<String, IdentifierRecord>,
    settings: Settings,
}

/// In-memory registry store.
///
/// Intended for tests and embedding. State lives behind a single `RwLock`,
/// which gives `insert_unique` the same atomicity the SQLite primary key
/// provides: the presence check and the insert happen under one write lock.
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Create an empty store seeded with default settings.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                ids: HashMap::new(),
                settings: Settings::default(),
            }),
        }
    }

    /// Create an empty store with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(Inner {
                ids: HashMap::new(),
                settings,
            }),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").ids.len()
    }

    /// Returns `true` if no identifiers have been minted.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").ids.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStore for InMemoryStore {
    fn insert_unique(
        &self,
        candidate: &str,
        owner: &str,
        table_name: Option<&str>,
    ) -> StoreResult<IdentifierRecord> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.ids.contains_key(candidate) {
            return Err(StoreError::Collision(candidate.to_string()));
        }
        let record = IdentifierRecord::new(
            candidate,
            owner,
            table_name.map(str::to_string),
            Utc::now(),
        );
        inner.ids.insert(candidate.to_string(), record.clone());
        Ok(record)
    }

    fn get(&self, id: &str) -> StoreResult<Option<IdentifierRecord>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.ids.get(id).cloned())
    }

    fn confirm(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().expect("lock poisoned");
        match inner.ids.get_mut(id) {
            Some(record) => {
                record.confirmed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn soft_delete(&self, id: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().expect("lock poisoned");
        match inner.ids.get_mut(id) {
            Some(record) => {
                record.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn read_settings(&self) -> StoreResult<Settings> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.settings.clone())
    }

    fn write_settings(&self, settings: &Settings) -> StoreResult<()> {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.settings = settings.clone();
        Ok(())
    }

    fn checkpoint(&self) -> StoreResult<()> {
        // Nothing buffered; memory is as durable as it gets.
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("record_count", &self.len())
            .finish()
    }
}
