//! Page checks: fetch a stored URL, extract SEO fields, record the result.

use super::{MSG_CHECK_FAILED, MSG_INTERNAL, MSG_NOT_FOUND};
use crate::config::FetchConfig;
use crate::fetch_page::{self, FetchError};
use crate::seo::{self, ExtractError, PageCheck};
use crate::store::{CheckRecord, PageStore, StoreError, UrlId, UrlRecord};

/// Why a fetch-and-extract attempt produced no result.
#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl CheckFailure {
    /// HTTP status, when the server answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CheckFailure::Fetch(e) => e.status_code(),
            CheckFailure::Extract(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("URL {0} not found")]
    NotFound(UrlId),
    /// Fetch or extraction failed; nothing was recorded.
    #[error("check of {url} failed: {failure}")]
    Failed {
        url: String,
        #[source]
        failure: CheckFailure,
    },
    #[error("fetch task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CheckError {
    /// Message for the person who asked for the check. Fetch and extraction
    /// failures are deliberately indistinguishable here.
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckError::NotFound(_) => MSG_NOT_FOUND,
            CheckError::Failed { .. } | CheckError::Join(_) => MSG_CHECK_FAILED,
            CheckError::Store(_) => MSG_INTERNAL,
        }
    }
}

/// A stored URL with its check history, newest first.
#[derive(Debug, Clone)]
pub struct UrlDetail {
    pub url: UrlRecord,
    pub checks: Vec<CheckRecord>,
}

/// Fetches `url` and extracts its SEO fields. Blocking.
pub fn fetch_and_extract(url: &str, cfg: &FetchConfig) -> Result<PageCheck, CheckFailure> {
    let page = fetch_page::fetch(url, cfg)?;
    let seo = seo::extract(&page.body).inspect_err(|e| {
        tracing::error!(
            url,
            status_code = page.status_code,
            bytes = page.body.len(),
            error = %e,
            "SEO extraction failed"
        );
    })?;
    Ok(PageCheck {
        status_code: Some(page.status_code),
        seo,
    })
}

/// Runs one check of a stored URL and records it.
///
/// The fetch runs on the blocking pool. On any fetch or extraction failure no
/// check row is written and earlier history is untouched.
pub async fn run_check(
    store: &PageStore,
    cfg: &FetchConfig,
    url_id: UrlId,
) -> Result<CheckRecord, CheckError> {
    let url = store
        .get_url(url_id)
        .await?
        .ok_or(CheckError::NotFound(url_id))?;

    let outcome = tokio::task::spawn_blocking({
        let name = url.name.clone();
        let cfg = cfg.clone();
        move || fetch_and_extract(&name, &cfg)
    })
    .await?;

    let page = match outcome {
        Ok(page) => page,
        Err(failure) => {
            tracing::warn!(
                url_id,
                url = %url.name,
                status_code = failure.status_code(),
                error = %failure,
                "check failed"
            );
            return Err(CheckError::Failed {
                url: url.name,
                failure,
            });
        }
    };

    let record = store.insert_check(url.id, &page).await?;
    tracing::info!(
        url_id,
        check_id = record.id,
        status_code = page.status_code,
        "check recorded"
    );
    Ok(record)
}

/// Loads a URL and its check history.
pub async fn url_detail(store: &PageStore, url_id: UrlId) -> Result<Option<UrlDetail>, StoreError> {
    let Some(url) = store.get_url(url_id).await? else {
        return Ok(None);
    };
    let checks = store.list_checks_for_url(url.id).await?;
    Ok(Some(UrlDetail { url, checks }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::db::open_memory;

    #[tokio::test]
    async fn check_of_unknown_url_is_not_found() {
        let store = open_memory().await.unwrap();
        let err = run_check(&store, &FetchConfig::default(), 7).await.unwrap_err();
        assert!(matches!(err, CheckError::NotFound(7)));
        assert_eq!(err.user_message(), MSG_NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_of_unknown_url_is_none() {
        let store = open_memory().await.unwrap();
        assert!(url_detail(&store, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_host_fails_without_recording() {
        let store = open_memory().await.unwrap();
        // Reserve a port, then free it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let id = store
            .insert_url(&format!("http://127.0.0.1:{port}"))
            .await
            .unwrap();

        let cfg = FetchConfig {
            connect_timeout_secs: 2,
            timeout_secs: 5,
            ..FetchConfig::default()
        };
        let err = run_check(&store, &cfg, id).await.unwrap_err();
        assert!(matches!(err, CheckError::Failed { .. }), "got {err:?}");
        assert_eq!(err.user_message(), MSG_CHECK_FAILED);
        assert!(store.list_checks_for_url(id).await.unwrap().is_empty());
    }

    #[test]
    fn extraction_and_fetch_failures_share_message() {
        let fetch = CheckError::Failed {
            url: "https://example.com".to_string(),
            failure: CheckFailure::Fetch(FetchError::Status {
                url: "https://example.com".to_string(),
                status: 500,
            }),
        };
        let extract = CheckError::Failed {
            url: "https://example.com".to_string(),
            failure: CheckFailure::Extract(ExtractError::Parser("boom".to_string())),
        };
        assert_eq!(fetch.user_message(), extract.user_message());
    }
}
