//! HTTP layer for the ID Registry.
//!
//! A thin axum surface over [`idreg_service::RegistryService`]: request
//! and response shapes, the JSON error envelope, and the listener. All
//! registry semantics live below this crate.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ErrorBody, ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::RegistryServer;
