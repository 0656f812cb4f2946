//! `pagecheck add <url>` – store a site (deduplicated by scheme and host).

use anyhow::Result;
use pagecheck_core::analyzer::{self, SubmitError};
use pagecheck_core::store::PageStore;

pub async fn run_add(store: &PageStore, url: &str) -> Result<()> {
    match analyzer::submit_url(store, url).await {
        Ok(sub) => {
            println!("{} (id {}): {}", sub.outcome.user_message(), sub.id, sub.name);
            Ok(())
        }
        Err(e @ SubmitError::Invalid(_)) => anyhow::bail!("{}: {}", e.user_message(), url),
        Err(e) => {
            tracing::error!(url, error = %e, "add failed");
            anyhow::bail!("{}", e.user_message())
        }
    }
}
