//! Check history operations: insert and list per URL.

use sqlx::Row;

use super::db::{status_from_db, unix_timestamp, PageStore};
use super::error::StoreError;
use super::types::{CheckRecord, UrlId};
use crate::seo::PageCheck;

impl PageStore {
    /// Record a completed check for `url_id`. Returns the stored row.
    pub async fn insert_check(
        &self,
        url_id: UrlId,
        check: &PageCheck,
    ) -> Result<CheckRecord, StoreError> {
        let now = unix_timestamp();
        let id = sqlx::query(
            r#"
            INSERT INTO url_checks (
                url_id, status_code, h1, title, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(url_id)
        .bind(check.status_code.map(i64::from))
        .bind(&check.seo.h1)
        .bind(&check.seo.title)
        .bind(&check.seo.description)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(CheckRecord {
            id,
            url_id,
            status_code: check.status_code,
            h1: check.seo.h1.clone(),
            title: check.seo.title.clone(),
            description: check.seo.description.clone(),
            created_at: now,
        })
    }

    /// All checks of a URL, newest first.
    pub async fn list_checks_for_url(&self, url_id: UrlId) -> Result<Vec<CheckRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, url_id, status_code, h1, title, description, created_at
            FROM url_checks
            WHERE url_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(url_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(CheckRecord {
                id: row.try_get("id")?,
                url_id: row.try_get("url_id")?,
                status_code: status_from_db(row.try_get("status_code")?),
                h1: row.try_get("h1")?,
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(out)
    }
}
