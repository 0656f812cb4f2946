//! SEO field extraction from page markup.
//!
//! Parsing goes through html5ever (via `scraper`), which recovers from
//! malformed markup the way browsers do, so broken pages degrade to absent
//! fields instead of failed checks.

use scraper::{ElementRef, Html, Selector};
use std::panic;
use std::sync::OnceLock;

const H1_SELECTOR: &str = "h1";
const TITLE_SELECTOR: &str = "title";
const DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;

/// Fields pulled out of a page. `None` means the tag (or its content) was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoFields {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Outcome of one check before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCheck {
    /// Final HTTP status of the fetch.
    pub status_code: Option<u16>,
    pub seo: SeoFields,
}

/// Extraction could not run at all. Distinct from a page that simply lacks fields.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
    #[error("HTML parser fault: {0}")]
    Parser(String),
}

struct Selectors {
    h1: Selector,
    title: Selector,
    description: Selector,
}

static SELECTORS: OnceLock<Selectors> = OnceLock::new();

fn selectors() -> Result<&'static Selectors, ExtractError> {
    if let Some(s) = SELECTORS.get() {
        return Ok(s);
    }
    let built = Selectors {
        h1: parse_selector(H1_SELECTOR)?,
        title: parse_selector(TITLE_SELECTOR)?,
        description: parse_selector(DESCRIPTION_SELECTOR)?,
    };
    Ok(SELECTORS.get_or_init(|| built))
}

fn parse_selector(selector: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector,
        reason: format!("{e:?}"),
    })
}

/// Extracts h1, title and meta description from an HTML document.
///
/// - `h1`: trimmed text of the first `<h1>` in document order.
/// - `title`: trimmed text of the first `<title>`.
/// - `description`: trimmed `content` of the first `<meta name="description">`.
///
/// A present but blank `<h1>` or `<title>` yields `Some("")`; only a missing
/// element is `None`. A description that is blank after trimming is `None`.
pub fn extract(html: &str) -> Result<SeoFields, ExtractError> {
    let selectors = selectors().inspect_err(|e| {
        tracing::error!(error = %e, "SEO selectors unavailable");
    })?;

    // html5ever is error-recovering; a panic here is a parser bug, not bad input.
    let document = panic::catch_unwind(|| Html::parse_document(html)).map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!(bytes = html.len(), reason = %reason, "HTML parsing failed");
        ExtractError::Parser(reason)
    })?;

    if !document.errors.is_empty() {
        tracing::debug!(
            parse_errors = document.errors.len(),
            "recovered from malformed markup"
        );
    }

    let description = document
        .select(&selectors.description)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(non_empty);

    Ok(SeoFields {
        h1: first_text(&document, &selectors.h1),
        title: first_text(&document, &selectors.title),
        description,
    })
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| element_text(el).trim().to_string())
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
