use serde::Deserialize;

/// Where and how to reach the database.
///
/// An explicit value: it is built from configuration, handed to the pool
/// that owns it, and goes away with the pool. Nothing here is global.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    #[error("failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("statement failed: {0}")]
    Statement(String),
}

/// A query result: column labels plus one row of values per entry.
#[derive(Debug, Clone, Default)]
pub struct Rows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// One open database connection.
///
/// Driver internals live behind this seam; the pool only needs to run
/// statements and read rows back.
pub trait Connection: Send {
    fn execute(&mut self, sql: &str) -> Result<(), SqlError>;
    fn query(&mut self, sql: &str) -> Result<Rows, SqlError>;
}

/// Opens a connection for a given configuration.
pub type Connector =
    Box<dyn Fn(&DbConfig) -> Result<Box<dyn Connection>, SqlError> + Send + Sync>;

/// Hands out database connections.
///
/// Each operation opens a fresh connection and drops it when done, so a
/// connection never outlives the statement it served.
pub struct ConnectionPool {
    config: DbConfig,
    connector: Connector,
}

impl ConnectionPool {
    pub fn new(config: DbConfig, connector: Connector) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn get(&self) -> Result<Box<dyn Connection>, SqlError> {
        (self.connector)(&self.config)
    }

    /// Runs a statement with no interest in its result.
    pub fn execute(&self, sql: &str) -> Result<(), SqlError> {
        self.get()?.execute(sql)
    }

    /// Runs a query and maps its rows through `f`.
    pub fn query<T>(&self, sql: &str, f: impl FnOnce(Rows) -> T) -> Result<T, SqlError> {
        let rows = self.get()?.query(sql)?;
        Ok(f(rows))
    }
}
