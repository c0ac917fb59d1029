//! Candidate identifier generation.
//!
//! Candidates are drawn uniformly from the configured charset. The source
//! is statistically uniform but not cryptographic: these are opaque
//! labels, not security tokens. Uniqueness is not checked here; that is
//! the store's job.

use rand::Rng;

use idreg_types::{Settings, TypeResult};

/// Generate one candidate identifier under the given settings.
///
/// Draws `id_length` characters independently and uniformly from
/// `charset`, redrawing any candidate made up entirely of ASCII digits:
/// identifiers must stay visually distinguishable from the numeric keys
/// client systems use elsewhere. Policy validation guarantees the charset
/// contains at least one non-digit, so the redraw loop terminates.
pub fn generate_candidate(settings: &Settings) -> TypeResult<String> {
    settings.validate()?;

    let chars: Vec<char> = settings.charset.chars().collect();
    let mut rng = rand::thread_rng();

    loop {
        let candidate: String = (0..settings.id_length)
            .map(|_| chars[rng.gen_range(0..chars.len())])
            .collect();

        if candidate.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        return Ok(candidate);
    }
}
