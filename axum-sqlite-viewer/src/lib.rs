//! # axum-sqlite-viewer
//!
//! A web viewer for SQLite database files, served with Axum.
//!
//! ## Features
//!
//! - Database overview: table and index counts, file path and size
//! - Table list, creation SQL, indexes and row counts
//! - First page of rows of any table
//! - Ad-hoc SQL queries rendered as JSON or CSV
//! - Browser UI embedded in the binary
//!
//! ## Security Warning
//!
//! **This is a development tool only!**
//!
//! - No authentication/authorization built-in
//! - Exposes full database schema and data
//! - Database error messages are returned to the client verbatim
//! - Should never be exposed in production or public networks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum_sqlite_viewer::ViewerLayer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let viewer = ViewerLayer::open("/", "test.sqlite3")
//!         .await
//!         .unwrap();
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, viewer.into_router()).await.unwrap();
//! }
//! ```

// Public modules
pub mod api;
pub mod database;
pub mod frontend;
pub mod layer;
pub mod schema;

// Public exports
pub use layer::ViewerLayer;
pub use schema::{TabularResult, Value};

// Re-export database providers
pub use database::sqlite::SqliteProvider;
pub use database::traits::{DatabaseError, DatabaseProvider};

use std::path::PathBuf;
use thiserror::Error;

static LICENSE: &str = include_str!("../LICENSE");

/// License text of this program
pub fn license() -> &'static str {
    LICENSE
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Cannot access database file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
