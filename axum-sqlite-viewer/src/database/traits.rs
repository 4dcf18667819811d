//! Database provider trait
//!
//! This trait defines the operations the HTTP layer needs from a database.

use crate::schema::TabularResult;
use async_trait::async_trait;
use thiserror::Error;

/// Database access used by the viewer endpoints
///
/// Implementations are shared across all in-flight requests behind an `Arc`
/// and are responsible for any synchronization the driver needs. Each method
/// runs exactly once per request; failures are surfaced without retry.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + 'static {
    /// Database-wide counts
    ///
    /// The first row holds `[table_count, index_count]`.
    async fn info(&self) -> Result<TabularResult, DatabaseError>;

    /// Names of all tables, ordered by name
    async fn tables(&self) -> Result<Vec<String>, DatabaseError>;

    /// First page of rows of a table
    ///
    /// The page size is owned by the implementation.
    async fn table(&self, table: &str) -> Result<TabularResult, DatabaseError>;

    /// Row count of a table, in the first cell of the first row
    async fn table_info(&self, table: &str) -> Result<TabularResult, DatabaseError>;

    /// Creation statements of a table
    ///
    /// Empty when no table with that name exists.
    async fn table_sql(&self, table: &str) -> Result<Vec<String>, DatabaseError>;

    /// Indexes defined on a table
    async fn table_indexes(&self, table: &str) -> Result<TabularResult, DatabaseError>;

    /// Execute an ad-hoc SQL statement
    ///
    /// # Arguments
    ///
    /// * `sql` - Statement text exactly as received from the client
    async fn query_sql(&self, sql: &str) -> Result<TabularResult, DatabaseError>;
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Error reported by the database engine, message kept verbatim
    #[error("{0}")]
    Query(String),

    /// Table not found
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Query timeout
    #[error("query timeout exceeded")]
    Timeout,
}

impl From<sqlx::Error> for DatabaseError {
    /// Engine errors keep the engine's own message, without the driver's
    /// `error returned from database` wrapper
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error() {
            Some(database_error) => DatabaseError::Query(database_error.message().to_string()),
            None => DatabaseError::Query(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_keep_their_text() {
        let error = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(error.to_string(), sqlx::Error::PoolTimedOut.to_string());
    }
}
