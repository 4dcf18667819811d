//! Table listing and per-table introspection endpoints

use axum::{http::StatusCode, http::Uri, response::Response};

use crate::api::params::url_pairs;
use crate::api::render::row_mapping;
use crate::api::response::{json_response, ApiError};
use crate::database::traits::DatabaseProvider;
use crate::schema::{TableInfoResponse, TableParams, TableSqlResponse, TablesResponse};

/// First `table` query parameter, empty when absent or unparsable
fn table_name(uri: &Uri) -> String {
    TableParams::from_pairs(&url_pairs(uri)).table
}

/// Handler for GET `api/tables`
///
/// Returns `{"tables": [...]}` with every table name.
pub async fn list_tables_handler<DB: DatabaseProvider>(
    database: &DB,
) -> Result<Response, ApiError> {
    let tables = database.tables().await?;
    Ok(json_response(StatusCode::OK, &TablesResponse { tables }))
}

/// Handler for GET `api/table?table=<name>`
///
/// Returns the first page of rows as one object per row.
pub async fn get_table_handler<DB: DatabaseProvider>(
    database: &DB,
    uri: &Uri,
) -> Result<Response, ApiError> {
    let table = table_name(uri);
    let result = database.table(&table).await?;
    Ok(json_response(StatusCode::OK, &row_mapping(&result)))
}

/// Handler for GET `api/table/info?table=<name>`
///
/// `indexes_count` is always zero.
pub async fn get_table_info_handler<DB: DatabaseProvider>(
    database: &DB,
    uri: &Uri,
) -> Result<Response, ApiError> {
    let table = table_name(uri);
    let result = database.table_info(&table).await?;

    let row_count = result
        .first_cell()
        .cloned()
        .ok_or_else(|| ApiError::internal(format!("no row count returned for table '{}'", table)))?;

    Ok(json_response(
        StatusCode::OK,
        &TableInfoResponse {
            row_count,
            indexes_count: 0,
        },
    ))
}

/// Handler for GET `api/table/sql?table=<name>`
///
/// Returns `{"sql": "CREATE TABLE ..."}`, or 404 when the table has no
/// creation statement.
pub async fn get_table_sql_handler<DB: DatabaseProvider>(
    database: &DB,
    uri: &Uri,
) -> Result<Response, ApiError> {
    let table = table_name(uri);
    let statements = database.table_sql(&table).await?;

    let sql = statements
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found(format!("table not found: {}", table)))?;

    Ok(json_response(StatusCode::OK, &TableSqlResponse { sql }))
}

/// Handler for GET `api/table/indexes?table=<name>`
pub async fn get_table_indexes_handler<DB: DatabaseProvider>(
    database: &DB,
    uri: &Uri,
) -> Result<Response, ApiError> {
    let table = table_name(uri);
    let result = database.table_indexes(&table).await?;
    Ok(json_response(StatusCode::OK, &row_mapping(&result)))
}
