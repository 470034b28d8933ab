//! The JSON pseudo-connection.
//!
//! Read-only alternative to the native driver: compiled SQL is shipped
//! as finished text to a remote query service over HTTP and the JSON
//! response becomes result rows. Every mutating operation fails fast.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use ifx_core::dialect::{Dialect, InformixDialect};
use ifx_core::query::Query;
use ifx_core::SqlValue;
use ifx_driver::bindings::prepare_bindings;
use ifx_driver::Row;

use crate::decode::decode_value;
use crate::error::{JsonError, Result};
use crate::substitute::substitute_bindings;

fn default_timeout() -> u64 {
    150
}

/// Configuration for the remote query service.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    /// Endpoint URL queries are sent to.
    pub uri: String,
    /// Source identifier forwarded with every query.
    #[serde(default)]
    pub source: String,
    /// Static access token forwarded with every query.
    #[serde(default)]
    pub token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_timeout")]
    pub connection_timeout: u64,
}

impl JsonConfig {
    /// Creates a configuration for the given endpoint with default timeouts.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            source: String::new(),
            token: String::new(),
            timeout: default_timeout(),
            connection_timeout: default_timeout(),
        }
    }
}

/// A connection executing selects through the remote query service.
pub struct JsonConnection {
    config: JsonConfig,
    client: reqwest::Client,
    dialect: InformixDialect,
}

impl JsonConnection {
    /// Builds a connection with an HTTP client honoring the configured
    /// timeouts.
    pub fn new(config: JsonConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .build()
            .map_err(JsonError::Client)?;
        Ok(Self {
            config,
            client,
            dialect: InformixDialect::new(),
        })
    }

    /// Returns the SQL dialect this connection compiles with.
    #[must_use]
    pub fn dialect(&self) -> &InformixDialect {
        &self.dialect
    }

    /// Prepares bindings the way the native adapter does, minus charset
    /// conversion, then splices them into the SQL as literals.
    fn substituted_sql(&self, sql: &str, bindings: &[SqlValue]) -> Result<String> {
        let prepared = prepare_bindings(bindings.to_vec(), &self.dialect, None);
        substitute_bindings(sql, &prepared)
    }

    /// Runs a select remotely and returns the result rows.
    ///
    /// Bindings are spliced into the SQL as literals before dispatch; the
    /// response is percent-decoded and flattened into rows. An empty body
    /// means no rows.
    pub async fn select(&self, sql: &str, bindings: &[SqlValue]) -> Result<Vec<Row>> {
        let sql = self.substituted_sql(sql, bindings)?;
        debug!(sql = %sql, uri = %self.config.uri, "Dispatching query to remote service");

        let response = self
            .client
            .get(&self.config.uri)
            .query(&[
                ("action", "queryList"),
                ("source", self.config.source.as_str()),
                ("_token", self.config.token.as_str()),
                ("sql", sql.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received response");
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(rows_from_value(decode_value(value)))
    }

    /// Runs a select and returns the first row, if any.
    pub async fn select_one(&self, sql: &str, bindings: &[SqlValue]) -> Result<Option<Row>> {
        let mut rows = self.select(sql, bindings).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Compiles and runs a built query.
    pub async fn select_query(&self, query: &Query) -> Result<Vec<Row>> {
        let sql = self.dialect.compile_select(query);
        self.select(&sql, &query.bindings()).await
    }

    /// Statements are select-shaped on this backend.
    pub async fn statement(&self, sql: &str, bindings: &[SqlValue]) -> Result<Vec<Row>> {
        self.select(sql, bindings).await
    }

    /// Unsupported: the backend is read-only.
    pub async fn insert(&self, _sql: &str, _bindings: &[SqlValue]) -> Result<bool> {
        Err(JsonError::Unsupported("insert"))
    }

    /// Unsupported: the backend is read-only.
    pub async fn update(&self, _sql: &str, _bindings: &[SqlValue]) -> Result<u64> {
        Err(JsonError::Unsupported("update"))
    }

    /// Unsupported: the backend is read-only.
    pub async fn delete(&self, _sql: &str, _bindings: &[SqlValue]) -> Result<u64> {
        Err(JsonError::Unsupported("delete"))
    }

    /// Unsupported: the backend is read-only.
    pub async fn unprepared(&self, _sql: &str) -> Result<()> {
        Err(JsonError::Unsupported("unprepared statements"))
    }

    /// Unsupported: the backend has no transactions.
    pub async fn begin_transaction(&self) -> Result<()> {
        Err(JsonError::Unsupported("transactions"))
    }

    /// Unsupported: the backend has no transactions.
    pub async fn commit(&self) -> Result<()> {
        Err(JsonError::Unsupported("transactions"))
    }

    /// Unsupported: the backend has no transactions.
    pub async fn rollback(&self) -> Result<()> {
        Err(JsonError::Unsupported("transactions"))
    }
}

/// Flattens a decoded response document into rows.
///
/// An array yields one row per object element, a bare object yields a
/// single row, anything else yields nothing.
fn rows_from_value(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(row_from_value).collect(),
        Value::Object(_) => row_from_value(value).map_or_else(Vec::new, |row| vec![row]),
        _ => Vec::new(),
    }
}

fn row_from_value(value: Value) -> Option<Row> {
    match value {
        Value::Object(map) => Some(Row::new(
            map.into_iter()
                .map(|(name, value)| (name, sql_value_from_json(value)))
                .collect(),
        )),
        _ => None,
    }
}

fn sql_value_from_json(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(b),
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| SqlValue::Float(n.as_f64().unwrap_or(0.0)), SqlValue::Int),
        Value::String(s) => SqlValue::Text(s),
        // nested structures keep their JSON text
        other => SqlValue::Text(other.to_string()),
    }
}
