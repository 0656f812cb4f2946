//! Single-request page fetch for a check.
//!
//! Uses the curl crate (libcurl): one GET, redirects followed up to the
//! configured limit, connect and total timeouts applied, body capped at
//! `max_body_bytes`. Runs in the current
//! thread; call from `spawn_blocking` if used from async code.

mod error;

pub use error::{classify_curl_error, FetchError, FetchErrorKind};

use crate::config::FetchConfig;

/// Final response of a fetch, after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status of the last response in the redirect chain.
    pub status_code: u16,
    /// URL that produced the final response, if curl reported one.
    pub effective_url: Option<String>,
    /// Response body decoded as UTF-8 (invalid sequences replaced).
    pub body: String,
    /// The body hit `max_body_bytes` and the rest was not downloaded.
    pub truncated: bool,
}

/// Performs a GET and returns the final status and body.
///
/// Any status outside 200..=399 is returned as `FetchError::Status` with the
/// code captured. A body longer than `cfg.max_body_bytes` is cut at the limit
/// and the transfer stopped; the page is still returned, marked `truncated`.
/// The curl handle lives only for the duration of the call.
pub fn fetch(url: &str, cfg: &FetchConfig) -> Result<FetchedPage, FetchError> {
    let transport = |e: curl::Error| FetchError::transport(url, e);
    let limit = cfg.body_limit();
    let mut body: Vec<u8> = Vec::new();
    let mut truncated = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport)?;
    easy.get(true).map_err(transport)?;
    easy.follow_location(true).map_err(transport)?;
    easy.max_redirections(cfg.max_redirections).map_err(transport)?;
    easy.connect_timeout(cfg.connect_timeout()).map_err(transport)?;
    easy.timeout(cfg.timeout()).map_err(transport)?;
    easy.useragent(&cfg.user_agent).map_err(transport)?;
    // Empty string lets libcurl advertise and decode every encoding it was built with.
    easy.accept_encoding("").map_err(transport)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                let room = limit.saturating_sub(body.len());
                if data.len() > room {
                    body.extend_from_slice(&data[..room]);
                    truncated = true;
                    // Short count makes libcurl abort with CURLE_WRITE_ERROR.
                    return Ok(room);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform()
    };
    match performed {
        Err(e) if truncated && e.is_write_error() => {
            tracing::warn!(url, limit, "page body exceeds limit, truncated");
        }
        other => other.map_err(transport)?,
    }

    let code = easy.response_code().map_err(transport)?;
    let status_code = u16::try_from(code).unwrap_or(0);
    let effective_url = easy
        .effective_url()
        .map_err(transport)?
        .map(str::to_string);

    if !(200..400).contains(&status_code) {
        tracing::debug!(url, status_code, "fetch returned error status");
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status_code,
        });
    }

    tracing::debug!(
        url,
        status_code,
        bytes = body.len(),
        effective_url = effective_url.as_deref().unwrap_or(url),
        "fetched page"
    );

    Ok(FetchedPage {
        status_code,
        effective_url,
        body: String::from_utf8_lossy(&body).into_owned(),
        truncated,
    })
}
