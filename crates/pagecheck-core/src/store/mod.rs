//! Persistent URL and check history (SQLite via sqlx).
//!
//! Stores each submitted URL once, keyed by its normalized name, plus one row
//! per completed check. Records come back as typed structs, never raw rows.

mod checks;
pub(crate) mod db;
mod error;
mod types;
mod urls;

pub use db::{default_db_path, PageStore};
pub use error::StoreError;
pub use types::*;
