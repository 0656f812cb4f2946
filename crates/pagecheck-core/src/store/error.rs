//! Page store error type.

/// Failure talking to the page store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A URL with this normalized name already exists.
    #[error("URL already stored: {name}")]
    UniqueViolation { name: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("cannot locate state directory: {0}")]
    StateDir(#[from] xdg::BaseDirectoriesError),
    #[error("cannot create database directory: {0}")]
    Io(#[from] std::io::Error),
}
