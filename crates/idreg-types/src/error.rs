use thiserror::Error;

/// Validation errors for the foundation types.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The owner string failed validation.
    #[error("invalid owner {owner:?}: {reason}")]
    InvalidOwner { owner: String, reason: String },

    /// Configured identifier length is outside the allowed bounds.
    #[error("id_length {length} is out of range [{min}, {max}]")]
    IdLengthOutOfRange { length: u32, min: u32, max: u32 },

    /// Configured charset has no characters to draw from.
    #[error("charset is empty")]
    EmptyCharset,

    /// Configured charset can only produce purely numeric identifiers,
    /// which the generation policy forbids.
    #[error("charset {charset:?} contains no non-digit characters")]
    NumericOnlyCharset { charset: String },
}

/// Result alias for type-level validation.
pub type TypeResult<T> = Result<T, TypeError>;
