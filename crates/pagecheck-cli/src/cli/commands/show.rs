//! `pagecheck show <id>` – a site and its check history.

use anyhow::Result;
use pagecheck_core::analyzer::{self, MSG_NOT_FOUND};
use pagecheck_core::store::PageStore;

use super::{format_timestamp, or_dash};

pub async fn run_show(store: &PageStore, id: i64) -> Result<()> {
    let Some(detail) = analyzer::url_detail(store, id).await? else {
        anyhow::bail!("{MSG_NOT_FOUND}");
    };

    println!("Site {}: {}", detail.url.id, detail.url.name);
    println!("Added: {}", format_timestamp(detail.url.created_at));
    println!();

    if detail.checks.is_empty() {
        println!("No checks yet. Run `pagecheck check {}`.", detail.url.id);
        return Ok(());
    }

    println!(
        "{:<6} {:<7} {:<20} {:<30} {:<30} {}",
        "ID", "STATUS", "CHECKED", "H1", "TITLE", "DESCRIPTION"
    );
    for c in detail.checks {
        let status = c
            .status_code
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<7} {:<20} {:<30} {:<30} {}",
            c.id,
            status,
            format_timestamp(c.created_at),
            or_dash(c.h1.as_deref()),
            or_dash(c.title.as_deref()),
            or_dash(c.description.as_deref()),
        );
    }
    Ok(())
}
