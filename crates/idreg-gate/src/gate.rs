use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Whether the registry is accepting writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    /// Writes are accepted.
    Active,
    /// Writes are rejected; reads continue.
    Suspended,
}

struct GateState {
    suspended: bool,
    /// When the gate last changed state. `None` until the first transition.
    since: Option<DateTime<Utc>>,
}

/// Process-wide suspend flag.
///
/// One instance is shared by every request handler; the flag and its
/// transition timestamp live behind a single `RwLock`, so a write that
/// passed [`ensure_active`] and a suspend acknowledgement can never
/// interleave on stale state. The gate owns only the flag: secret
/// verification and the durability checkpoint are the service's job.
///
/// [`ensure_active`]: SuspendGate::ensure_active
pub struct SuspendGate {
    state: RwLock<GateState>,
}

impl SuspendGate {
    /// A new gate in the `Active` state.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GateState {
                suspended: false,
                since: None,
            }),
        }
    }

    /// Current status.
    pub fn status(&self) -> GateStatus {
        if self.is_suspended() {
            GateStatus::Suspended
        } else {
            GateStatus::Active
        }
    }

    /// Returns `true` while suspended.
    pub fn is_suspended(&self) -> bool {
        self.state.read().expect("lock poisoned").suspended
    }

    /// When the gate last changed state, if it ever has.
    pub fn last_transition(&self) -> Option<DateTime<Utc>> {
        self.state.read().expect("lock poisoned").since
    }

    /// Fail fast if the gate is closed. Mutating operations call this
    /// before touching the store.
    pub fn ensure_active(&self) -> GateResult<()> {
        if self.is_suspended() {
            Err(GateError::Suspended)
        } else {
            Ok(())
        }
    }

    /// Enter the `Suspended` state. Returns `true` if this call performed
    /// the transition, `false` if the gate was already suspended.
    pub fn suspend(&self) -> bool {
        let mut state = self.state.write().expect("lock poisoned");
        if state.suspended {
            return false;
        }
        state.suspended = true;
        state.since = Some(Utc::now());
        tracing::warn!("registry suspended: rejecting writes");
        true
    }

    /// Return to the `Active` state. Returns `true` if this call performed
    /// the transition.
    pub fn resume(&self) -> bool {
        let mut state = self.state.write().expect("lock poisoned");
        if !state.suspended {
            return false;
        }
        state.suspended = false;
        state.since = Some(Utc::now());
        tracing::info!("registry resumed");
        true
    }
}

impl Default for SuspendGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SuspendGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuspendGate")
            .field("status", &self.status())
            .finish()
    }
}
