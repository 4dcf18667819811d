//! Request path to endpoint resolution
//!
//! The API surface is a fixed set of exact paths under the mount prefix, so
//! dispatch is a plain `match` rather than a pattern router.

/// Endpoint selected for a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Info,
    Tables,
    Table,
    TableInfo,
    TableSql,
    TableIndexes,
    Query,
    /// The HTML shell page at the bare mount prefix
    Index,
    /// Anything else under the mount prefix, relative to it
    StaticAsset(String),
    /// Path outside the mount prefix
    NotFound,
}

impl Route {
    /// Resolve a request path against a normalized mount prefix
    ///
    /// `root` must start and end with `/` (see [`normalize_root`]).
    pub fn resolve(root: &str, path: &str) -> Self {
        let Some(relative) = path.strip_prefix(root) else {
            return Route::NotFound;
        };

        match relative {
            "" => Route::Index,
            "api/info" => Route::Info,
            "api/tables" => Route::Tables,
            "api/table" => Route::Table,
            "api/table/info" => Route::TableInfo,
            "api/table/sql" => Route::TableSql,
            "api/table/indexes" => Route::TableIndexes,
            "api/query" => Route::Query,
            other => Route::StaticAsset(other.to_string()),
        }
    }
}

/// Normalize a mount prefix so it starts and ends with `/`
///
/// ```
/// use axum_sqlite_viewer::api::router::normalize_root;
///
/// assert_eq!(normalize_root(""), "/");
/// assert_eq!(normalize_root("/sql-viewer"), "/sql-viewer/");
/// assert_eq!(normalize_root("db/"), "/db/");
/// ```
pub fn normalize_root(root: &str) -> String {
    let mut normalized = String::with_capacity(root.len() + 2);
    if !root.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(root);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_routes_at_root() {
        assert_eq!(Route::resolve("/", "/api/info"), Route::Info);
        assert_eq!(Route::resolve("/", "/api/tables"), Route::Tables);
        assert_eq!(Route::resolve("/", "/api/table"), Route::Table);
        assert_eq!(Route::resolve("/", "/api/table/info"), Route::TableInfo);
        assert_eq!(Route::resolve("/", "/api/table/sql"), Route::TableSql);
        assert_eq!(Route::resolve("/", "/api/table/indexes"), Route::TableIndexes);
        assert_eq!(Route::resolve("/", "/api/query"), Route::Query);
        assert_eq!(Route::resolve("/", "/"), Route::Index);
    }

    #[test]
    fn test_api_routes_under_prefix() {
        let root = "/viewer/";
        assert_eq!(Route::resolve(root, "/viewer/"), Route::Index);
        assert_eq!(Route::resolve(root, "/viewer/api/query"), Route::Query);
        assert_eq!(Route::resolve(root, "/api/query"), Route::NotFound);
        assert_eq!(Route::resolve(root, "/viewer"), Route::NotFound);
    }

    #[test]
    fn test_no_prefix_matching_on_api() {
        assert_eq!(
            Route::resolve("/", "/api/tables/"),
            Route::StaticAsset("api/tables/".to_string())
        );
        assert_eq!(
            Route::resolve("/", "/api/table/info/extra"),
            Route::StaticAsset("api/table/info/extra".to_string())
        );
    }

    #[test]
    fn test_static_fallback() {
        assert_eq!(
            Route::resolve("/db/", "/db/static/app.js"),
            Route::StaticAsset("static/app.js".to_string())
        );
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root("/"), "/");
        assert_eq!(normalize_root("/a/b"), "/a/b/");
    }
}
