use std::sync::Arc;

use idreg_gate::{GateStatus, SuspendGate};
use idreg_store::{RegistryStore, StoreError};
use idreg_types::{owner::validate_owner, IdentifierRecord, Settings};

use crate::error::{RegistryError, RegistryResult};
use crate::generator::generate_candidate;

/// Attempts before `generate` gives up. Collisions at length >= 8 over a
/// 62-character alphabet are astronomically rare; the bound exists to
/// fail fast when the configured charset is pathologically small.
pub const MAX_GENERATE_ATTEMPTS: u32 = 16;

/// The registry service: composes the generator, the store, and the
/// suspend gate into the operations the transport layer calls through.
///
/// Every mutating entry point consults the gate first, then validates
/// inputs, then delegates. `lookup`, `health`, and `preview` bypass the
/// gate. Settings are re-read from the store per request: the setup GUI
/// writes the same table out-of-band, so nothing here caches them.
pub struct RegistryService {
    store: Arc<dyn RegistryStore>,
    gate: SuspendGate,
}

impl RegistryService {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self {
            store,
            gate: SuspendGate::new(),
        }
    }

    /// The suspend gate (observation only).
    pub fn gate(&self) -> &SuspendGate {
        &self.gate
    }

    /// Mint a new identifier for `owner`.
    ///
    /// Loops candidate generation against the store's atomic insert,
    /// retrying only on the collision signal. Any other storage failure
    /// propagates immediately.
    pub fn generate(
        &self,
        owner: &str,
        table_name: Option<&str>,
    ) -> RegistryResult<IdentifierRecord> {
        self.gate.ensure_active()?;

        let owner = owner.trim();
        validate_owner(owner).map_err(RegistryError::InvalidOwner)?;

        let settings = self.store.read_settings()?;

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let candidate = generate_candidate(&settings)?;
            match self.store.insert_unique(&candidate, owner, table_name) {
                Ok(record) => {
                    tracing::info!(id = %record.id, owner = %record.owner, "identifier minted");
                    return Ok(record);
                }
                Err(StoreError::Collision(_)) => {
                    tracing::debug!(attempt, "candidate collided, redrawing");
                }
                Err(other) => return Err(other.into()),
            }
        }

        tracing::warn!(
            attempts = MAX_GENERATE_ATTEMPTS,
            id_length = settings.id_length,
            charset_len = settings.charset.len(),
            "generation exhausted"
        );
        Err(RegistryError::Exhausted {
            attempts: MAX_GENERATE_ATTEMPTS,
        })
    }

    /// Mark an identifier confirmed. Repeating the call is a no-op success.
    pub fn confirm(&self, id: &str) -> RegistryResult<()> {
        self.gate.ensure_active()?;
        if self.store.confirm(id)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound(id.to_string()))
        }
    }

    /// Fetch a record. Soft-deleted records are returned with their
    /// `deleted` flag set. Available while suspended.
    pub fn lookup(&self, id: &str) -> RegistryResult<IdentifierRecord> {
        self.store
            .get(id)?
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Soft-delete an identifier. The record stays in the store.
    pub fn delete(&self, id: &str) -> RegistryResult<()> {
        self.gate.ensure_active()?;
        if self.store.soft_delete(id)? {
            Ok(())
        } else {
            Err(RegistryError::NotFound(id.to_string()))
        }
    }

    /// Pause writes for a consistent file-level backup.
    ///
    /// The flag flips before the checkpoint runs: from that point no new
    /// write can start, and the checkpoint then flushes everything that
    /// completed, so a copy taken after this returns is self-consistent.
    pub fn suspend(&self, secret: &str) -> RegistryResult<()> {
        self.authorize(secret)?;
        self.gate.suspend();
        self.store.checkpoint()?;
        Ok(())
    }

    /// Re-open the gate. No checkpoint is needed on this side.
    pub fn resume(&self, secret: &str) -> RegistryResult<()> {
        self.authorize(secret)?;
        self.gate.resume();
        Ok(())
    }

    /// Current gate status. Available while suspended.
    pub fn health(&self) -> GateStatus {
        self.gate.status()
    }

    /// Dry-run the generator under current settings without inserting
    /// anything. Read-only, so available while suspended.
    pub fn preview(&self) -> RegistryResult<String> {
        let settings = self.store.read_settings()?;
        Ok(generate_candidate(&settings)?)
    }

    /// Current settings, straight from the store.
    pub fn settings(&self) -> RegistryResult<Settings> {
        Ok(self.store.read_settings()?)
    }

    /// Replace the stored settings. Gated like every other write.
    pub fn update_settings(&self, settings: &Settings) -> RegistryResult<()> {
        self.gate.ensure_active()?;
        settings.validate()?;
        self.store.write_settings(settings)?;
        Ok(())
    }

    /// The secret check must not reveal gate state: the comparison and the
    /// error are identical whether or not the requested state already
    /// holds.
    fn authorize(&self, secret: &str) -> RegistryResult<()> {
        let settings = self.store.read_settings()?;
        if secret != settings.admin_secret {
            tracing::warn!("suspend/resume rejected: secret mismatch");
            return Err(RegistryError::Unauthorized);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RegistryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryService")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    use idreg_store::InMemoryStore;
    use idreg_types::DEFAULT_ADMIN_SECRET;

    fn service() -> RegistryService {
        RegistryService::new(Arc::new(InMemoryStore::new()))
    }

    fn service_with(settings: Settings) -> RegistryService {
        RegistryService::new(Arc::new(InMemoryStore::with_settings(settings)))
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    #[test]
    fn generate_full_lifecycle() {
        let svc = service();

        let record = svc.generate("person_app", Some("contacts")).unwrap();
        assert_eq!(record.owner, "person_app");
        assert_eq!(record.table_name.as_deref(), Some("contacts"));
        assert!(!record.confirmed);
        assert!(!record.deleted);

        svc.confirm(&record.id).unwrap();
        let fetched = svc.lookup(&record.id).unwrap();
        assert!(fetched.confirmed);
        assert!(!fetched.deleted);
    }

    #[test]
    fn generate_trims_owner() {
        let svc = service();
        let record = svc.generate("  svc1  ", None).unwrap();
        assert_eq!(record.owner, "svc1");
    }

    #[test]
    fn generate_rejects_invalid_owners() {
        let svc = service();
        for owner in ["", "   ", "bad owner", "semi;colon"] {
            assert!(
                matches!(
                    svc.generate(owner, None),
                    Err(RegistryError::InvalidOwner(_))
                ),
                "accepted owner {owner:?}"
            );
        }
    }

    #[test]
    fn generated_ids_follow_configured_policy() {
        let svc = service_with(Settings {
            id_length: 8,
            charset: "AB01".into(),
            ..Default::default()
        });

        let mut seen = HashSet::new();
        for _ in 0..50 {
            let record = svc.generate("svc1", None).unwrap();
            assert_eq!(record.id.len(), 8);
            assert!(record.id.chars().all(|c| "AB01".contains(c)));
            assert!(record.id.contains('A') || record.id.contains('B'));
            assert!(seen.insert(record.id), "duplicate id returned");
        }
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn generate_exhausts_under_pathological_charset() {
        // Charset of size one admits exactly one candidate.
        let svc = service_with(Settings {
            id_length: 8,
            charset: "A".into(),
            ..Default::default()
        });

        let record = svc.generate("svc1", None).unwrap();
        assert_eq!(record.id, "AAAAAAAA");

        match svc.generate("svc1", None) {
            Err(RegistryError::Exhausted { attempts }) => {
                assert_eq!(attempts, MAX_GENERATE_ATTEMPTS);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn generate_surfaces_configuration_errors() {
        let svc = service_with(Settings {
            id_length: 2,
            ..Default::default()
        });
        assert!(matches!(
            svc.generate("svc1", None),
            Err(RegistryError::Config(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    #[test]
    fn confirm_twice_succeeds_both_times() {
        let svc = service();
        let record = svc.generate("svc1", None).unwrap();
        svc.confirm(&record.id).unwrap();
        svc.confirm(&record.id).unwrap();
        assert!(svc.lookup(&record.id).unwrap().confirmed);
    }

    #[test]
    fn confirm_unknown_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.confirm("Missing1"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn delete_is_soft() {
        let svc = service();
        let record = svc.generate("svc1", None).unwrap();
        svc.delete(&record.id).unwrap();

        let fetched = svc.lookup(&record.id).unwrap();
        assert!(fetched.deleted);
        assert_eq!(fetched.owner, "svc1");
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete("Missing1"),
            Err(RegistryError::NotFound(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Suspend / resume
    // -----------------------------------------------------------------------

    #[test]
    fn suspend_blocks_writes_but_not_reads() {
        let svc = service();
        let record = svc.generate("svc1", None).unwrap();

        svc.suspend(DEFAULT_ADMIN_SECRET).unwrap();
        assert_eq!(svc.health(), GateStatus::Suspended);

        assert!(matches!(
            svc.generate("svc1", None),
            Err(RegistryError::Suspended)
        ));
        assert!(matches!(
            svc.confirm(&record.id),
            Err(RegistryError::Suspended)
        ));
        assert!(matches!(
            svc.delete(&record.id),
            Err(RegistryError::Suspended)
        ));
        assert!(matches!(
            svc.update_settings(&Settings::default()),
            Err(RegistryError::Suspended)
        ));

        // Reads keep working.
        svc.lookup(&record.id).unwrap();
        svc.preview().unwrap();
        svc.settings().unwrap();

        svc.resume(DEFAULT_ADMIN_SECRET).unwrap();
        assert_eq!(svc.health(), GateStatus::Active);
        svc.generate("svc1", None).unwrap();
    }

    #[test]
    fn wrong_secret_is_unauthorized_and_changes_nothing() {
        let svc = service();

        assert!(matches!(
            svc.suspend("wrong"),
            Err(RegistryError::Unauthorized)
        ));
        assert_eq!(svc.health(), GateStatus::Active);

        svc.suspend(DEFAULT_ADMIN_SECRET).unwrap();
        assert!(matches!(
            svc.resume("wrong"),
            Err(RegistryError::Unauthorized)
        ));
        assert_eq!(svc.health(), GateStatus::Suspended);
    }

    #[test]
    fn suspend_with_correct_secret_is_idempotent() {
        let svc = service();
        svc.suspend(DEFAULT_ADMIN_SECRET).unwrap();
        svc.suspend(DEFAULT_ADMIN_SECRET).unwrap();
        assert_eq!(svc.health(), GateStatus::Suspended);
        svc.resume(DEFAULT_ADMIN_SECRET).unwrap();
        svc.resume(DEFAULT_ADMIN_SECRET).unwrap();
        assert_eq!(svc.health(), GateStatus::Active);
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    #[test]
    fn update_settings_validates_first() {
        let svc = service();
        let bad = Settings {
            charset: "0123".into(),
            ..Default::default()
        };
        assert!(matches!(
            svc.update_settings(&bad),
            Err(RegistryError::Config(_))
        ));
        // Store still holds the defaults.
        assert_eq!(svc.settings().unwrap(), Settings::default());
    }

    #[test]
    fn updated_settings_apply_to_the_next_generate() {
        let svc = service();
        svc.update_settings(&Settings {
            id_length: 8,
            charset: "AB01".into(),
            ..Default::default()
        })
        .unwrap();

        let record = svc.generate("svc1", None).unwrap();
        assert_eq!(record.id.len(), 8);
        assert!(record.id.chars().all(|c| "AB01".contains(c)));
    }

    // -----------------------------------------------------------------------
    // Preview
    // -----------------------------------------------------------------------

    #[test]
    fn preview_does_not_insert() {
        let store = Arc::new(InMemoryStore::new());
        let svc = RegistryService::new(Arc::clone(&store) as Arc<dyn RegistryStore>);

        let candidate = svc.preview().unwrap();
        assert_eq!(candidate.len(), 12);
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_generates_return_pairwise_distinct_ids() {
        let svc = Arc::new(service_with(Settings {
            id_length: 8,
            charset: "AB01".into(),
            ..Default::default()
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = Arc::clone(&svc);
                thread::spawn(move || {
                    (0..10)
                        .map(|_| svc.generate("svc1", None).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("thread should not panic") {
                assert!(seen.insert(id), "two generate calls returned the same id");
            }
        }
        assert_eq!(seen.len(), 80);
    }
}
