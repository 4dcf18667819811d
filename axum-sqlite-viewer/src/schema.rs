//! Result and response types shared by the adapter and the API layer
//!
//! A database operation yields a [`TabularResult`]: ordered column names plus
//! rows of loosely typed [`Value`] cells. The response structs below are the
//! fixed JSON bodies of the introspection endpoints.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::ser::{Serialize, Serializer};

/// A single cell returned by the database
///
/// JSON encoding per variant:
///
/// | Variant   | JSON                                        |
/// |-----------|---------------------------------------------|
/// | `Null`    | `null`                                      |
/// | `Integer` | number                                      |
/// | `Real`    | number, or `null` when not finite           |
/// | `Text`    | string                                      |
/// | `Blob`    | string, standard padded base64 of all bytes |
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Convert the cell into a `serde_json::Value` using the encoding above
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Integer(value) => serde_json::Value::Number((*value).into()),
            Value::Real(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(value) => serde_json::Value::String(value.clone()),
            Value::Blob(bytes) => serde_json::Value::String(BASE64.encode(bytes)),
        }
    }

    /// Textual form used for CSV fields (`Null` becomes an empty field)
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(value) => value.to_string(),
            Value::Real(value) => value.to_string(),
            Value::Text(value) => value.clone(),
            Value::Blob(bytes) => BASE64.encode(bytes),
        }
    }

    /// Whether the cell is SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Real(value) if value.is_finite() => serializer.serialize_f64(*value),
            Value::Real(_) => serializer.serialize_none(),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Blob(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Column names plus rows of cells, as produced by one adapter call
///
/// Every row holds exactly one cell per column. Serializes to the raw
/// tabular shape `{"columns": [...], "rows": [[...], ...]}`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct TabularResult {
    /// Column names in result order (not necessarily unique)
    pub columns: Vec<String>,

    /// Rows in result order
    pub rows: Vec<Vec<Value>>,
}

impl TabularResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// First cell of the first row, if there is one
    pub fn first_cell(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// Response body of `api/info`
#[derive(Debug, Clone, serde::Serialize)]
pub struct InfoResponse {
    pub number_of_tables: Value,
    pub number_of_indexes: Value,

    /// Final path component of the database file
    pub filename: String,

    /// Absolute path of the database file, empty when it cannot be resolved
    pub fullname: String,

    /// File size in bytes, zero when it cannot be read
    pub size: u64,
}

/// Response body of `api/tables`
#[derive(Debug, Clone, serde::Serialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// Response body of `api/table/info`
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableInfoResponse {
    pub row_count: Value,

    /// Always zero; index details live under `api/table/indexes`
    pub indexes_count: u64,
}

/// Response body of `api/table/sql`
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableSqlResponse {
    pub sql: String,
}

/// Error envelope written for every failed request
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: "error",
            message: message.into(),
        }
    }
}

/// Value of the first `key` entry among decoded `key=value` pairs
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

/// Query string parameters of the per-table endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableParams {
    /// Table name; absent means empty and is forwarded as-is
    pub table: String,
}

impl TableParams {
    /// Repeated keys resolve to their first occurrence
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            table: first_value(pairs, "table").unwrap_or_default(),
        }
    }
}

/// Parameters of `api/query`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    /// SQL statement to run
    pub query: Option<String>,

    /// Output format, `csv` or `json`; anything else yields raw tabular JSON
    pub format: Option<String>,
}

impl QueryParams {
    /// Repeated keys resolve to their first occurrence
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            query: first_value(pairs, "query"),
            format: first_value(pairs, "format"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_json_encoding() {
        assert_eq!(serde_json::to_value(Value::Null).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Value::Integer(42)).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(Value::Real(1.5)).unwrap(), json!(1.5));
        assert_eq!(
            serde_json::to_value(Value::Text("hello".into())).unwrap(),
            json!("hello")
        );
        assert_eq!(
            serde_json::to_value(Value::Blob(b"Hello, World!".to_vec())).unwrap(),
            json!("SGVsbG8sIFdvcmxkIQ==")
        );
    }

    #[test]
    fn test_non_finite_real_is_null() {
        assert_eq!(serde_json::to_value(Value::Real(f64::NAN)).unwrap(), json!(null));
        assert_eq!(Value::Real(f64::INFINITY).to_json(), json!(null));
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let values = [
            Value::Null,
            Value::Integer(-7),
            Value::Real(0.25),
            Value::Text("x".into()),
            Value::Blob(vec![0, 255, 16]),
        ];
        for value in values {
            assert_eq!(serde_json::to_value(&value).unwrap(), value.to_json());
        }
    }

    #[test]
    fn test_field_text() {
        assert_eq!(Value::Null.to_field(), "");
        assert_eq!(Value::Integer(3).to_field(), "3");
        assert_eq!(Value::Real(2.5).to_field(), "2.5");
        assert_eq!(Value::Blob(vec![1, 2, 3]).to_field(), "AQID");
    }

    #[test]
    fn test_raw_tabular_shape() {
        let result = TabularResult::new(
            vec!["id".into(), "name".into()],
            vec![vec![Value::Integer(1), "a".into()]],
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"columns": ["id", "name"], "rows": [[1, "a"]]})
        );
    }

    #[test]
    fn test_error_envelope() {
        let envelope = ErrorEnvelope::new("Query missing");
        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({"code": "error", "message": "Query missing"})
        );
    }

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_params_take_first_of_repeated_keys() {
        let params = QueryParams::from_pairs(&pairs(&[
            ("format", "csv"),
            ("query", "SELECT 1"),
            ("format", "json"),
            ("query", "SELECT 2"),
        ]));
        assert_eq!(params.query.as_deref(), Some("SELECT 1"));
        assert_eq!(params.format.as_deref(), Some("csv"));

        let params = TableParams::from_pairs(&pairs(&[("table", "a"), ("table", "b")]));
        assert_eq!(params.table, "a");
    }

    #[test]
    fn test_missing_params() {
        assert_eq!(QueryParams::from_pairs(&[]), QueryParams::default());
        assert_eq!(TableParams::from_pairs(&pairs(&[("other", "x")])).table, "");
    }
}
