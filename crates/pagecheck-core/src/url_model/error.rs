//! Error types for URL validation.

use std::fmt;

use super::validate::MAX_URL_LEN;

/// Why a submitted URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Nothing was submitted.
    Empty,
    /// Not an http(s) URL with a usable host.
    Malformed,
    /// Normalized form is longer than `MAX_URL_LEN` characters.
    TooLong,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    /// Short message shown to the person who submitted the URL.
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            ValidationErrorKind::Empty => "URL is required",
            ValidationErrorKind::Malformed | ValidationErrorKind::TooLong => "Invalid URL",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationErrorKind::Empty => write!(f, "URL is empty"),
            ValidationErrorKind::Malformed => {
                write!(f, "malformed URL (expected http(s)://host)")
            }
            ValidationErrorKind::TooLong => {
                write!(f, "URL longer than {} characters", MAX_URL_LEN)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
