//! Owner name validation.
//!
//! Owners identify the client application an identifier was minted for.
//! They are free-form in principle but restricted to a safe character
//! class so they can appear in logs, file names, and query strings
//! without quoting.

use crate::error::{TypeError, TypeResult};

/// Validate an owner name, returning `Ok(())` if valid.
///
/// Valid owners are non-empty and consist only of ASCII alphanumerics,
/// `_`, and `-`. Callers are expected to trim surrounding whitespace
/// before validating.
///
/// # Examples
///
/// ```
/// use idreg_types::owner::validate_owner;
///
/// assert!(validate_owner("person_app").is_ok());
/// assert!(validate_owner("svc-1").is_ok());
/// assert!(validate_owner("").is_err());
/// assert!(validate_owner("bad owner").is_err());
/// ```
pub fn validate_owner(owner: &str) -> TypeResult<()> {
    if owner.is_empty() {
        return Err(TypeError::InvalidOwner {
            owner: owner.to_string(),
            reason: "owner must not be empty".into(),
        });
    }

    for ch in owner.chars() {
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-') {
            return Err(TypeError::InvalidOwner {
                owner: owner.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    Ok(())
}
