//! URL operations: lookup, insert, listing with latest check.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::{status_from_db, unix_timestamp, PageStore};
use super::error::StoreError;
use super::types::{UrlId, UrlRecord, UrlSummary};

fn url_from_row(row: &SqliteRow) -> Result<UrlRecord, StoreError> {
    Ok(UrlRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}

impl PageStore {
    /// Look up a URL by its normalized name.
    pub async fn find_url_by_name(&self, name: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM urls
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(url_from_row).transpose()
    }

    /// Fetch a single URL by id.
    pub async fn get_url(&self, id: UrlId) -> Result<Option<UrlRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM urls
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(url_from_row).transpose()
    }

    /// Insert a new URL. Fails with `StoreError::UniqueViolation` if the name
    /// is already stored (including when a concurrent insert won the race).
    pub async fn insert_url(&self, name: &str) -> Result<UrlId, StoreError> {
        let now = unix_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO urls (name, created_at)
            VALUES (?1, ?2)
            "#,
        )
        .bind(name)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::UniqueViolation {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List all URLs, newest first, each with its latest check's time and status.
    pub async fn list_urls_with_latest_check(&self) -> Result<Vec<UrlSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT
                u.id, u.name, u.created_at,
                c.created_at AS last_check_at,
                c.status_code AS last_status_code
            FROM urls u
            LEFT JOIN url_checks c ON c.id = (
                SELECT id FROM url_checks
                WHERE url_id = u.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            )
            ORDER BY u.created_at DESC, u.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(UrlSummary {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
                last_check_at: row.try_get("last_check_at")?,
                last_status_code: status_from_db(row.try_get("last_status_code")?),
            });
        }

        Ok(out)
    }
}
