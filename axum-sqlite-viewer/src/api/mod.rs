//! HTTP API endpoints
//!
//! All requests under the mount prefix go through [`dispatch`], which resolves
//! the path to a [`Route`] and calls the matching handler.

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use std::path::Path;
use std::sync::Arc;

use crate::database::traits::DatabaseProvider;
use crate::frontend;

pub mod info;
pub mod params;
pub mod query;
pub mod render;
pub mod response;
pub mod router;
pub mod tables;

// Re-export handlers for convenience
pub use info::info_handler;
pub use query::execute_query_handler;
pub use response::ApiError;
pub use router::{normalize_root, Route};
pub use tables::{
    get_table_handler, get_table_indexes_handler, get_table_info_handler, get_table_sql_handler,
    list_tables_handler,
};

/// State shared by every request
pub struct ViewerState<DB: DatabaseProvider> {
    pub database: Arc<DB>,

    /// Database file reported by `api/info`, if the viewer knows it
    pub database_file: Option<Arc<Path>>,

    /// Normalized mount prefix, starts and ends with `/`
    pub root: Arc<str>,
}

impl<DB: DatabaseProvider> Clone for ViewerState<DB> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            database_file: self.database_file.clone(),
            root: self.root.clone(),
        }
    }
}

/// Route a request to its endpoint and write exactly one response
pub async fn dispatch<DB: DatabaseProvider>(
    State(state): State<ViewerState<DB>>,
    request: Request,
) -> Response {
    let route = Route::resolve(&state.root, request.uri().path());
    tracing::debug!(method = %request.method(), path = %request.uri().path(), ?route, "dispatching request");

    let database = state.database.as_ref();
    let result = match route {
        Route::Info => info_handler(database, state.database_file.as_deref()).await,
        Route::Tables => list_tables_handler(database).await,
        Route::Table => get_table_handler(database, request.uri()).await,
        Route::TableInfo => get_table_info_handler(database, request.uri()).await,
        Route::TableSql => get_table_sql_handler(database, request.uri()).await,
        Route::TableIndexes => get_table_indexes_handler(database, request.uri()).await,
        Route::Query => execute_query_handler(database, request).await,
        Route::Index => return frontend::serve_index_page(&state.root),
        Route::StaticAsset(path) => return frontend::serve_static_asset(&path),
        Route::NotFound => return frontend::not_found(request.uri().path()),
    };

    result.into_response()
}
