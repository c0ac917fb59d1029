use thiserror::Error;

use idreg_gate::GateError;
use idreg_store::StoreError;
use idreg_types::TypeError;

/// The error taxonomy surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The owner string failed validation.
    #[error("invalid owner: {0}")]
    InvalidOwner(#[source] TypeError),

    /// The stored settings describe an unusable generation policy.
    /// Fatal for the request that hit it, not for the process.
    #[error("configuration error: {0}")]
    Config(#[from] TypeError),

    /// The bounded generation loop ran out of attempts. Only plausible
    /// under pathological settings (tiny charset, short length).
    #[error("no free identifier found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// No record with this identifier was ever minted.
    #[error("identifier not found: {0}")]
    NotFound(String),

    /// The presented admin secret does not match the stored one.
    #[error("unauthorized: admin secret mismatch")]
    Unauthorized,

    /// A write was attempted while the registry is suspended.
    #[error("service is suspended")]
    Suspended,

    /// Storage failure that is not a recognized collision.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<GateError> for RegistryError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Suspended => Self::Suspended,
        }
    }
}

impl RegistryError {
    /// Stable machine-readable code for the wire error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOwner(_) => "invalid_owner",
            Self::Config(_) => "configuration",
            Self::Exhausted { .. } => "exhausted",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Suspended => "suspended",
            Self::Storage(_) => "storage",
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
