//! `pagecheck check <id>` – fetch a stored site and record the result.

use anyhow::Result;
use pagecheck_core::analyzer::{self, CheckError, MSG_CHECKED};
use pagecheck_core::config::FetchConfig;
use pagecheck_core::store::PageStore;

use super::or_dash;

pub async fn run_check(store: &PageStore, cfg: &FetchConfig, id: i64) -> Result<()> {
    match analyzer::run_check(store, cfg, id).await {
        Ok(check) => {
            println!("{MSG_CHECKED}");
            println!(
                "  status:      {}",
                check
                    .status_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("  h1:          {}", or_dash(check.h1.as_deref()));
            println!("  title:       {}", or_dash(check.title.as_deref()));
            println!("  description: {}", or_dash(check.description.as_deref()));
            Ok(())
        }
        // Already logged with full context by the analyzer.
        Err(e @ (CheckError::NotFound(_) | CheckError::Failed { .. })) => {
            anyhow::bail!("{}", e.user_message())
        }
        Err(e) => {
            tracing::error!(id, error = %e, "check failed");
            anyhow::bail!("{}", e.user_message())
        }
    }
}
