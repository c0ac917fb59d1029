use thiserror::Error;

/// Errors from the suspend gate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GateError {
    /// A mutating operation was attempted while the service is suspended.
    #[error("service is suspended")]
    Suspended,
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;
