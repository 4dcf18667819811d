//! ViewerLayer - Main Axum integration layer
//!
//! This module provides the main entry point for serving the viewer, either
//! as a standalone application or merged into an existing Axum router.

use crate::api::{dispatch, normalize_root, ViewerState};
use crate::database::sqlite::SqliteProvider;
use crate::database::traits::DatabaseProvider;
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main layer for serving the SQL viewer
///
/// # Example
///
/// ```rust,no_run
/// use axum_sqlite_viewer::ViewerLayer;
///
/// # async fn example() -> axum_sqlite_viewer::Result<()> {
/// let viewer = ViewerLayer::open("/", "data.sqlite3").await?;
/// let app = viewer.into_router();
/// # Ok(())
/// # }
/// ```
pub struct ViewerLayer<DB: DatabaseProvider> {
    root: String,
    database: Arc<DB>,
    database_file: Option<PathBuf>,
}

impl<DB: DatabaseProvider> ViewerLayer<DB> {
    /// Create a new SQL viewer at the given mount prefix
    ///
    /// # Arguments
    ///
    /// * `root` - The URL path where the viewer will be mounted (e.g., "/sql-viewer");
    ///   a missing leading or trailing `/` is added
    /// * `database` - The database provider implementation
    pub fn new(root: impl AsRef<str>, database: DB) -> Self {
        Self {
            root: normalize_root(root.as_ref()),
            database: Arc::new(database),
            database_file: None,
        }
    }

    /// Report name, path and size of this file from `api/info`
    pub fn with_database_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_file = Some(path.into());
        self
    }

    /// The normalized mount prefix
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Convert into an Axum Router
    ///
    /// Every request is handled by a single fallback that resolves the path
    /// against the mount prefix:
    /// - `{root}` serves the shell page
    /// - `{root}api/...` serves the seven API endpoints
    /// - `{root}static/...` serves embedded assets
    ///
    /// Because it installs a fallback, the router cannot be merged into
    /// another router that has its own fallback.
    pub fn into_router(self) -> Router {
        let state = ViewerState {
            database: self.database,
            database_file: self.database_file.map(Arc::<Path>::from),
            root: Arc::from(self.root),
        };

        Router::new().fallback(dispatch::<DB>).with_state(state)
    }
}

impl ViewerLayer<SqliteProvider> {
    /// Create a new SQL viewer for an existing SQLite pool
    ///
    /// # Arguments
    ///
    /// * `root` - The URL path where the viewer will be mounted
    /// * `pool` - The SQLite connection pool
    pub fn sqlite(root: impl AsRef<str>, pool: sqlx::SqlitePool) -> Self {
        Self::new(root, SqliteProvider::new(pool))
    }

    /// Open a database file read-only and serve it at `root`
    ///
    /// Fails when the file does not exist or is not a regular file.
    pub async fn open(root: impl AsRef<str>, path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(crate::Error::NotAFile(path.to_path_buf()));
        }

        let provider = SqliteProvider::open(path).await?;
        Ok(Self::new(root, provider).with_database_file(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_is_normalized() {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        let viewer = ViewerLayer::sqlite("sql-viewer", pool);
        assert_eq!(viewer.root(), "/sql-viewer/");
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let directory = tempfile::tempdir().unwrap();
        let result = ViewerLayer::open("/", directory.path().join("missing.sqlite3")).await;
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_open_directory_fails() {
        let directory = tempfile::tempdir().unwrap();
        let result = ViewerLayer::open("/", directory.path()).await;
        assert!(matches!(result, Err(crate::Error::NotAFile(_))));
    }
}
