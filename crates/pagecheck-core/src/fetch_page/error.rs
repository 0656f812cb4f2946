//! Fetch failure type and curl error classification.

/// Coarse cause of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// DNS, refused connection, reset, or empty reply.
    Connection,
    /// Connect or total timeout elapsed.
    Timeout,
    /// Server answered with a status outside 2xx/3xx.
    Status(u16),
    /// Anything else curl reports (TLS, redirect loop, bad URL, ...).
    Other,
}

/// A fetch that could not be completed. Recoverable: the check fails, the
/// process carries on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        kind: FetchErrorKind,
        #[source]
        source: curl::Error,
    },
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: curl::Error) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            kind: classify_curl_error(&source),
            source,
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport { kind, .. } => *kind,
            FetchError::Status { status, .. } => FetchErrorKind::Status(*status),
        }
    }

    /// HTTP status if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { .. } => None,
        }
    }
}

/// Classify a curl error into a fetch error kind.
pub fn classify_curl_error(e: &curl::Error) -> FetchErrorKind {
    if e.is_operation_timedout() {
        return FetchErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FetchErrorKind::Connection;
    }
    FetchErrorKind::Other
}
