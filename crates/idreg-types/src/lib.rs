//! Foundation types for the ID Registry.
//!
//! This crate provides the record, settings, and validation types used
//! throughout the registry. Every other `idreg` crate depends on it.
//!
//! # Key Types
//!
//! - [`IdentifierRecord`] — a minted identifier and its lifecycle state
//! - [`Settings`] — generation policy and admin secret, persisted in the store
//! - [`owner::validate_owner`] — owner name validation
//! - [`TypeError`] — validation failures

pub mod error;
pub mod owner;
pub mod record;
pub mod settings;

pub use error::{TypeError, TypeResult};
pub use record::IdentifierRecord;
pub use settings::{
    Settings, DEFAULT_ADMIN_SECRET, DEFAULT_CHARSET, DEFAULT_ID_LENGTH, MAX_ID_LENGTH,
    MIN_ID_LENGTH,
};
