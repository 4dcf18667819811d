//! Database abstraction layer
//!
//! The API layer talks to the database only through [`DatabaseProvider`];
//! [`sqlite::SqliteProvider`] is the implementation backed by `sqlx`.

pub mod sqlite;
pub mod traits;

// Re-export the main trait
pub use traits::{DatabaseError, DatabaseProvider};
