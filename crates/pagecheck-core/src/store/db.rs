//! SQLite-backed page store: connection, migrations, row decoding helpers.
//!
//! URL and check CRUD live in `urls` and `checks`.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::error::StoreError;
use crate::config::DatabaseConfig;

/// Handle to the SQLite page store.
///
/// By default the database file lives under the XDG state directory:
/// `~/.local/state/pagecheck/pagecheck.db` on Debian.
#[derive(Clone)]
pub struct PageStore {
    pub(crate) pool: Pool<Sqlite>,
}

impl PageStore {
    /// Open (or create) the database described by `cfg` and run migrations.
    pub async fn open(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let path = match &cfg.path {
            Some(p) => p.clone(),
            None => default_db_path()?,
        };
        Self::open_with(&path, cfg.max_connections).await
    }

    /// Open (or create) the database at a specific path with default pool size.
    /// Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(path.as_ref(), DatabaseConfig::default().max_connections).await
    }

    async fn open_with(path: &Path, max_connections: u32) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let store = PageStore { pool };
        store.migrate().await?;
        tracing::debug!(path = %path.display(), "page store opened");
        Ok(store)
    }

    pub(crate) async fn migrate(&self) -> Result<(), StoreError> {
        // `name` holds the normalized `scheme://host`; its uniqueness is the dedup rule.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS urls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS url_checks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url_id INTEGER NOT NULL REFERENCES urls (id) ON DELETE CASCADE,
                status_code INTEGER,
                h1 TEXT,
                title TEXT,
                description TEXT,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS url_checks_url_id_created
            ON url_checks (url_id, created_at DESC, id DESC);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Default database location under the XDG state dir.
pub fn default_db_path() -> Result<PathBuf, StoreError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagecheck")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("pagecheck")
        .join("pagecheck.db"))
}

/// Current time as Unix seconds (for DB timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Status codes are stored as INTEGER; anything outside u16 is treated as absent.
pub(crate) fn status_from_db(value: Option<i64>) -> Option<u16> {
    value.and_then(|v| u16::try_from(v).ok())
}

#[cfg(test)]
/// Open an in-memory database for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<PageStore, StoreError> {
    use std::str::FromStr;

    // Single connection so the pool never hands back a different empty DB.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    let store = PageStore { pool };
    store.migrate().await?;
    Ok(store)
}
