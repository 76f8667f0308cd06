//! Query results rendered as JSON responses.

use serde_json::{Map, Value};

use crate::http::response::Response;
use crate::sql::pool::{ConnectionPool, Rows};

/// Responds with the rows of a query as a JSON array of objects.
pub fn direct_sql(pool: &ConnectionPool, query: &str) -> anyhow::Result<Response> {
    let value = pool.query(query, rows_to_array)?;
    Ok(Response::json(&value))
}

/// Responds with a query expected to yield a single object.
///
/// All rows are folded into one object; on duplicate columns across rows
/// the later row wins.
pub fn direct_unique_sql(pool: &ConnectionPool, query: &str) -> anyhow::Result<Response> {
    let value = pool.query(query, rows_to_object)?;
    Ok(Response::json(&value))
}

fn rows_to_array(rows: Rows) -> Value {
    let objects = rows
        .rows
        .iter()
        .map(|row| row_to_object(&rows.columns, row))
        .collect();
    Value::Array(objects)
}

fn rows_to_object(rows: Rows) -> Value {
    let mut merged = Map::new();
    for row in &rows.rows {
        for (column, value) in rows.columns.iter().zip(row) {
            merged.insert(column.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

fn row_to_object(columns: &[String], row: &[Value]) -> Value {
    let fields = columns
        .iter()
        .zip(row)
        .map(|(c, v)| (c.clone(), v.clone()))
        .collect();
    Value::Object(fields)
}
