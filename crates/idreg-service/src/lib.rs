//! Registry orchestration.
//!
//! [`RegistryService`] composes the candidate generator, the registry
//! store, and the suspend gate into the logical operations the transport
//! layer exposes: generate, confirm, lookup, delete, suspend, resume,
//! health, and preview.

pub mod error;
pub mod generator;
pub mod service;

pub use error::{RegistryError, RegistryResult};
pub use generator::generate_candidate;
pub use service::{RegistryService, MAX_GENERATE_ATTEMPTS};
