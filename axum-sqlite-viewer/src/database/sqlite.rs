//! SQLite database provider implementation

use crate::database::traits::{DatabaseError, DatabaseProvider};
use crate::schema::{TabularResult, Value};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{
    Column, Execute, Executor, Row, Sqlite, SqlitePool, Statement, TypeInfo, ValueRef,
};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Rows returned by the table endpoint when no page size is configured
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Per-operation timeout when none is configured
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// SQLite database provider
pub struct SqliteProvider {
    pool: SqlitePool,
    page_size: u32,
    query_timeout: Duration,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            page_size: DEFAULT_PAGE_SIZE,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Open an existing database file in read-only mode
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Set the number of rows returned by [`DatabaseProvider::table`]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the timeout applied to every database operation
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Quote an identifier (table or column name) to prevent SQL injection
    ///
    /// SQLite uses double quotes for identifiers. This function escapes any
    /// double quotes in the identifier by doubling them.
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    async fn with_timeout<T, F>(&self, operation: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, operation).await {
            Ok(result) => result.map_err(DatabaseError::from),
            Err(_) => Err(DatabaseError::Timeout),
        }
    }

    /// Run a query and collect its full result set
    ///
    /// Column names come from the first row, or from the prepared statement
    /// when there are no rows.
    async fn fetch_tabular<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<TabularResult, DatabaseError> {
        let sql = query.sql();
        let rows = self.with_timeout(query.fetch_all(&self.pool)).await?;

        let columns = match rows.first() {
            Some(first_row) => first_row
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
            None => {
                let statement = self.with_timeout((&self.pool).prepare(sql)).await?;
                statement
                    .columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect()
            }
        };

        let rows = rows
            .iter()
            .map(Self::decode_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TabularResult { columns, rows })
    }

    fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, DatabaseError> {
        (0..row.len())
            .map(|index| Self::decode_cell(row, index))
            .collect()
    }

    /// Decode one cell by its runtime storage class
    ///
    /// SQLite typing is per value, not per column, so the declared column
    /// type is not consulted.
    fn decode_cell(row: &SqliteRow, index: usize) -> Result<Value, DatabaseError> {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        let storage_class = raw.type_info().name().to_string();

        let value = match storage_class.as_str() {
            "INTEGER" => Value::Integer(row.try_get::<i64, _>(index)?),
            "REAL" => Value::Real(row.try_get::<f64, _>(index)?),
            "TEXT" => Value::Text(row.try_get::<String, _>(index)?),
            "BLOB" => Value::Blob(row.try_get::<Vec<u8>, _>(index)?),
            _ => {
                if let Ok(value) = row.try_get::<i64, _>(index) {
                    Value::Integer(value)
                } else if let Ok(value) = row.try_get::<f64, _>(index) {
                    Value::Real(value)
                } else if let Ok(value) = row.try_get::<String, _>(index) {
                    Value::Text(value)
                } else {
                    Value::Blob(row.try_get::<Vec<u8>, _>(index)?)
                }
            }
        };

        Ok(value)
    }
}

#[async_trait]
impl DatabaseProvider for SqliteProvider {
    async fn info(&self) -> Result<TabularResult, DatabaseError> {
        let query = "SELECT \
            (SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%') AS number_of_tables, \
            (SELECT count(*) FROM sqlite_master WHERE type = 'index') AS number_of_indexes";

        self.fetch_tabular(sqlx::query(query)).await
    }

    async fn tables(&self) -> Result<Vec<String>, DatabaseError> {
        let query = "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        self.with_timeout(sqlx::query_scalar::<_, String>(query).fetch_all(&self.pool))
            .await
    }

    async fn table(&self, table: &str) -> Result<TabularResult, DatabaseError> {
        let query = format!(
            "SELECT * FROM {} LIMIT {}",
            Self::quote_identifier(table),
            self.page_size
        );
        tracing::debug!(table, page_size = self.page_size, "fetching table page");

        self.fetch_tabular(sqlx::query(&query)).await
    }

    async fn table_info(&self, table: &str) -> Result<TabularResult, DatabaseError> {
        let query = format!(
            "SELECT count(*) AS row_count FROM {}",
            Self::quote_identifier(table)
        );

        self.fetch_tabular(sqlx::query(&query)).await
    }

    async fn table_sql(&self, table: &str) -> Result<Vec<String>, DatabaseError> {
        let query = "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?";

        let statements = self
            .with_timeout(
                sqlx::query_scalar::<_, Option<String>>(query)
                    .bind(table)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(statements.into_iter().flatten().collect())
    }

    async fn table_indexes(&self, table: &str) -> Result<TabularResult, DatabaseError> {
        let query =
            "SELECT name, sql FROM sqlite_master WHERE type = 'index' AND tbl_name = ? ORDER BY name";

        self.fetch_tabular(sqlx::query(query).bind(table)).await
    }

    async fn query_sql(&self, sql: &str) -> Result<TabularResult, DatabaseError> {
        tracing::debug!(sql, "executing query");

        self.fetch_tabular(sqlx::query(sql)).await
    }
}
