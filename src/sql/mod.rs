//! SQL glue.
//!
//! Incidental to the protocol engine: a connection pool with explicit
//! configuration and helpers that turn query results into JSON responses.

pub mod pool;
pub mod responses;

pub use pool::{Connection, ConnectionPool, Connector, DbConfig, Rows, SqlError};
pub use responses::{direct_sql, direct_unique_sql};
