//! Ad-hoc SQL query endpoint

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::Response,
};

use crate::api::params::{form_pairs, url_pairs};
use crate::api::render::{row_mapping, to_csv};
use crate::api::response::{csv_response, json_response, ApiError};
use crate::database::traits::DatabaseProvider;
use crate::schema::QueryParams;

/// Output shape selected by the `format` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `format=csv`
    Csv,
    /// `format=json`: one object per row
    Rows,
    /// Anything else: `{"columns": [...], "rows": [[...]]}`
    Raw,
}

impl OutputFormat {
    /// Case-sensitive match against `csv` and `json`
    pub fn from_param(format: Option<&str>) -> Self {
        match format {
            Some("csv") => OutputFormat::Csv,
            Some("json") => OutputFormat::Rows,
            _ => OutputFormat::Raw,
        }
    }
}

/// Handler for GET/POST `api/query`
///
/// The statement is read from the `query` field of an urlencoded POST body,
/// falling back to the `query` URL parameter. `format` is only read from the
/// URL. A repeated parameter resolves to its first value.
///
/// # Security Warning
///
/// Backend error text is returned to the client unchanged.
///
/// Response (no `format`):
/// ```json
/// {"columns": ["id", "name"], "rows": [[1, "a"], [2, "b"]]}
/// ```
///
/// Response (`format=json`):
/// ```json
/// [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]
/// ```
pub async fn execute_query_handler<DB: DatabaseProvider>(
    database: &DB,
    request: Request,
) -> Result<Response, ApiError> {
    let url_params = QueryParams::from_pairs(&url_pairs(request.uri()));

    let form_query = if request.method() == Method::POST {
        QueryParams::from_pairs(&form_pairs(request).await).query
    } else {
        None
    };

    let statement = form_query.or(url_params.query).unwrap_or_default();
    if statement.trim().is_empty() {
        return Err(ApiError::bad_request("Query missing"));
    }

    let result = database.query_sql(&statement).await?;

    let response = match OutputFormat::from_param(url_params.format.as_deref()) {
        OutputFormat::Csv => csv_response(StatusCode::OK, to_csv(&result)),
        OutputFormat::Rows => json_response(StatusCode::OK, &row_mapping(&result)),
        OutputFormat::Raw => json_response(StatusCode::OK, &result),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_is_case_sensitive() {
        assert_eq!(OutputFormat::from_param(Some("csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_param(Some("json")), OutputFormat::Rows);
        assert_eq!(OutputFormat::from_param(Some("CSV")), OutputFormat::Raw);
        assert_eq!(OutputFormat::from_param(Some("xml")), OutputFormat::Raw);
        assert_eq!(OutputFormat::from_param(None), OutputFormat::Raw);
    }
}
