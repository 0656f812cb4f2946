//! Acceptance rules for normalized URLs.

use url::{Host, Url};

use super::error::{ValidationError, ValidationErrorKind};

/// Longest normalized URL accepted, in characters.
pub const MAX_URL_LEN: usize = 255;

const MAX_LABEL_LEN: usize = 63;

/// Validates a normalized URL.
///
/// Checks, in order: empty input, length over `MAX_URL_LEN`, then URL
/// well-formedness (http/https scheme and a valid host). No network access.
pub fn validate(normalized: &str) -> Result<(), ValidationError> {
    let candidate = normalized.trim();
    if candidate.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::Empty));
    }
    if candidate.chars().count() > MAX_URL_LEN {
        return Err(ValidationError::new(ValidationErrorKind::TooLong));
    }

    let malformed = || ValidationError::new(ValidationErrorKind::Malformed);
    let parsed = Url::parse(candidate).map_err(|_| malformed())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(malformed());
    }
    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        Some(Host::Domain(domain)) if is_valid_domain(domain) => Ok(()),
        _ => Err(malformed()),
    }
}

/// `localhost`, or at least two dot-separated LDH labels with a
/// non-numeric TLD. Internationalized names arrive here already punycoded.
fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| is_valid_label(l)) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
