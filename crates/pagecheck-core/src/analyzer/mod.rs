//! Submit and check flows on top of the core components.
//!
//! A submission runs normalize → validate → lookup-or-insert. A check runs
//! fetch → extract → insert for an already stored URL. Failures map to a
//! small set of user-facing messages; fetch and extraction failures share
//! one message on purpose.

mod check;
mod submit;

pub use check::{fetch_and_extract, run_check, url_detail, CheckError, CheckFailure, UrlDetail};
pub use submit::{submit_url, SubmitError, SubmitOutcome, Submission};

pub const MSG_ADDED: &str = "Page successfully added";
pub const MSG_EXISTS: &str = "Page already exists";
pub const MSG_CHECKED: &str = "Page successfully checked";
pub const MSG_CHECK_FAILED: &str = "An error occurred during the check";
pub const MSG_NOT_FOUND: &str = "Page not found";
pub const MSG_INTERNAL: &str = "Internal error, please try again later";
