//! URL modeling: canonical form and acceptance rules.
//!
//! Submitted URLs are reduced to `scheme://host[:port]` before anything is
//! stored, so that every page of a site maps to the same record. The
//! normalized form is then validated; only validated values reach the store
//! or the fetcher.

mod error;
mod normalize;
mod validate;

pub use error::{ValidationError, ValidationErrorKind};
pub use normalize::normalize;
pub use validate::{validate, MAX_URL_LEN};

/// Normalizes `raw` and validates the result.
///
/// Returns the normalized URL ready to be used as a dedup key.
///
/// # Examples
///
/// - `prepare("https://example.com/page?x=1")` → `Ok("https://example.com")`
/// - `prepare("not-a-url")` → `Err(ValidationErrorKind::Malformed)`
pub fn prepare(raw: &str) -> Result<String, ValidationError> {
    let normalized = normalize(raw);
    validate(&normalized)?;
    tracing::debug!(raw = %raw, normalized = %normalized, "accepted URL");
    Ok(normalized)
}
