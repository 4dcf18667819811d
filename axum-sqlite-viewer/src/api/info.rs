//! Database overview endpoint

use axum::{http::StatusCode, response::Response};
use std::path::Path;

use crate::api::response::{json_response, ApiError};
use crate::database::traits::DatabaseProvider;
use crate::schema::InfoResponse;

/// Facts about the database file taken from the filesystem
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileFacts {
    pub filename: String,
    pub fullname: String,
    pub size: u64,
}

impl FileFacts {
    /// Inspect the database file
    ///
    /// `fullname` is the canonical path, symlinks resolved. Never fails: an
    /// unresolvable path leaves `fullname` empty and an unreadable file leaves
    /// `size` at zero.
    pub async fn inspect(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Ok(absolute) = tokio::fs::canonicalize(path).await else {
            return Self {
                filename,
                ..Self::default()
            };
        };

        let size = tokio::fs::metadata(&absolute)
            .await
            .map(|metadata| metadata.len())
            .unwrap_or(0);

        Self {
            filename,
            fullname: absolute.to_string_lossy().into_owned(),
            size,
        }
    }
}

/// Handler for GET `api/info`
///
/// Combines the table and index counts reported by the database with the
/// name, absolute path and size of the database file.
pub async fn info_handler<DB: DatabaseProvider>(
    database: &DB,
    database_file: Option<&Path>,
) -> Result<Response, ApiError> {
    let info = database.info().await?;

    let counts = info
        .rows
        .into_iter()
        .next()
        .filter(|row| row.len() >= 2)
        .ok_or_else(|| ApiError::internal("database info returned no counts"))?;
    let mut counts = counts.into_iter();

    let facts = FileFacts::inspect(database_file).await;

    let response = InfoResponse {
        number_of_tables: counts.next().unwrap_or_default(),
        number_of_indexes: counts.next().unwrap_or_default(),
        filename: facts.filename,
        fullname: facts.fullname,
        size: facts.size,
    };

    Ok(json_response(StatusCode::OK, &response))
}
