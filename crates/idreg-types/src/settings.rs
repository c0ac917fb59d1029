use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Minimum configurable identifier length.
pub const MIN_ID_LENGTH: u32 = 8;

/// Maximum configurable identifier length.
pub const MAX_ID_LENGTH: u32 = 32;

/// Default identifier length.
pub const DEFAULT_ID_LENGTH: u32 = 12;

/// Default charset: the 62 ASCII alphanumerics.
pub const DEFAULT_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Placeholder admin secret seeded into new registries. Deployments must
/// change it before exposing suspend/resume.
pub const DEFAULT_ADMIN_SECRET: &str = "change-me";

/// Registry settings, persisted as rows of the `settings` table.
///
/// The store is the authoritative source for these values; code paths that
/// need them read them back rather than hard-coding their own defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Length of generated identifiers, in characters.
    pub id_length: u32,
    /// Candidate characters identifiers are drawn from.
    pub charset: String,
    /// Secret required by the suspend/resume operations.
    pub admin_secret: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_length: DEFAULT_ID_LENGTH,
            charset: DEFAULT_CHARSET.to_string(),
            admin_secret: DEFAULT_ADMIN_SECRET.to_string(),
        }
    }
}

impl Settings {
    /// Validate the generation policy carried by these settings.
    ///
    /// A charset made up entirely of digits is rejected outright: the
    /// generator must never emit purely numeric identifiers, so such a
    /// configuration could not produce anything at all.
    pub fn validate(&self) -> TypeResult<()> {
        if self.charset.is_empty() {
            return Err(TypeError::EmptyCharset);
        }
        if self.id_length < MIN_ID_LENGTH || self.id_length > MAX_ID_LENGTH {
            return Err(TypeError::IdLengthOutOfRange {
                length: self.id_length,
                min: MIN_ID_LENGTH,
                max: MAX_ID_LENGTH,
            });
        }
        if self.charset.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::NumericOnlyCharset {
                charset: self.charset.clone(),
            });
        }
        Ok(())
    }
}
