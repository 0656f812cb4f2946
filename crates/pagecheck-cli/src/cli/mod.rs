//! CLI for the pagecheck page analyzer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pagecheck_core::{config, logging};
use pagecheck_core::store::PageStore;
use std::path::PathBuf;

use commands::{run_add, run_check, run_list, run_show};

/// Top-level CLI for pagecheck.
#[derive(Debug, Parser)]
#[command(name = "pagecheck")]
#[command(about = "pagecheck: store sites and check their SEO basics", long_about = None)]
pub struct Cli {
    /// SQLite database to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Config file to read instead of ~/.config/pagecheck/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a site. Only scheme and host are kept; re-adding returns the stored one.
    Add {
        /// HTTP/HTTPS URL of any page on the site.
        url: String,
    },

    /// Fetch a stored site and record its status code, h1, title and description.
    Check {
        /// Site identifier.
        id: i64,
    },

    /// List stored sites with their latest check.
    List,

    /// Show a stored site and its check history.
    Show {
        /// Site identifier.
        id: i64,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(db) = cli.db {
            cfg.database.path = Some(db);
        }

        // Stderr if the log file is unusable.
        if logging::init_logging(&cfg.logging).is_err() {
            logging::init_logging_stderr(&cfg.logging);
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let store = PageStore::open(&cfg.database).await?;

        match cli.command {
            CliCommand::Add { url } => run_add(&store, &url).await?,
            CliCommand::Check { id } => run_check(&store, &cfg.fetch, id).await?,
            CliCommand::List => run_list(&store).await?,
            CliCommand::Show { id } => run_show(&store, id).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
