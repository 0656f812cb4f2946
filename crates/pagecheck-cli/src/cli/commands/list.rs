//! `pagecheck list` – all sites with their latest check.

use anyhow::Result;
use pagecheck_core::store::PageStore;

use super::format_timestamp;

pub async fn run_list(store: &PageStore) -> Result<()> {
    let urls = store.list_urls_with_latest_check().await?;
    if urls.is_empty() {
        println!("No sites stored.");
        return Ok(());
    }

    println!("{:<6} {:<20} {:<7} {}", "ID", "LAST CHECK", "STATUS", "URL");
    for u in urls {
        let last_check = u
            .last_check_at
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        let status = u
            .last_status_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<20} {:<7} {}", u.id, last_check, status, u.name);
    }
    Ok(())
}
