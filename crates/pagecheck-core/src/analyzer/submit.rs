//! URL submission: normalize, validate, then lookup-or-insert.

use super::{MSG_ADDED, MSG_EXISTS, MSG_INTERNAL};
use crate::store::{PageStore, StoreError, UrlId, UrlRecord};
use crate::url_model::{self, ValidationError};

/// Whether the submission created a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added,
    AlreadyExists,
}

impl SubmitOutcome {
    pub fn user_message(self) -> &'static str {
        match self {
            SubmitOutcome::Added => MSG_ADDED,
            SubmitOutcome::AlreadyExists => MSG_EXISTS,
        }
    }
}

/// The stored URL a submission resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: UrlId,
    pub name: String,
    pub outcome: SubmitOutcome,
}

impl Submission {
    fn existing(url: UrlRecord) -> Self {
        Submission {
            id: url.id,
            name: url.name,
            outcome: SubmitOutcome::AlreadyExists,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Rejected before touching the store.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Invalid(e) => e.user_message(),
            SubmitError::Store(_) => MSG_INTERNAL,
        }
    }
}

/// Stores `raw` under its normalized name, or returns the record already stored.
///
/// A concurrent insert of the same name surfaces as a unique violation; the
/// record is then re-read and reported as already existing.
pub async fn submit_url(store: &PageStore, raw: &str) -> Result<Submission, SubmitError> {
    let name = url_model::prepare(raw).inspect_err(|e| {
        tracing::info!(raw = %raw, error = %e, "rejected URL submission");
    })?;

    if let Some(existing) = store.find_url_by_name(&name).await? {
        tracing::debug!(id = existing.id, name = %existing.name, "URL already stored");
        return Ok(Submission::existing(existing));
    }

    match store.insert_url(&name).await {
        Ok(id) => {
            tracing::info!(id, name = %name, "URL added");
            Ok(Submission {
                id,
                name,
                outcome: SubmitOutcome::Added,
            })
        }
        Err(StoreError::UniqueViolation { name }) => {
            tracing::debug!(name = %name, "lost insert race, re-reading");
            match store.find_url_by_name(&name).await? {
                Some(existing) => Ok(Submission::existing(existing)),
                None => Err(StoreError::UniqueViolation { name }.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}
