//! The Informix connection.
//!
//! Wraps a [`Driver`] with the execution policies the engine needs:
//! bind-parameter preparation, charset conversion on both paths, the
//! implicit multi-row batch behind `statement`, counted transactions and
//! catalog-backed schema introspection.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use ifx_core::dialect::{Dialect, InformixDialect};
use ifx_core::query::Query;
use ifx_core::schema::{Blueprint, InformixSchemaDialect, SchemaDialect};
use ifx_core::SqlValue;

use crate::bindings::{count_placeholders, prepare_bindings};
use crate::config::ConnectionConfig;
use crate::driver::{Driver, Row};
use crate::error::{DriverError, Result};
use crate::transcode::Transcoder;

/// A live Informix connection.
///
/// Transactions only count here; the driver sees a single transaction no
/// matter how deep the nesting, and a rollback abandons the whole stack.
pub struct Connection<D: Driver> {
    driver: D,
    dialect: InformixDialect,
    schema_dialect: InformixSchemaDialect,
    transcoder: Option<Transcoder>,
    transaction_depth: AtomicUsize,
}

impl<D: Driver> Connection<D> {
    /// Wraps an established driver handle.
    pub fn new(driver: D, config: &ConnectionConfig) -> Result<Self> {
        let transcoder = Transcoder::from_labels(
            config.client_encoding.as_deref(),
            config.db_encoding.as_deref(),
        )?;
        Ok(Self {
            driver,
            dialect: InformixDialect::with_prefix(config.prefix.clone()),
            schema_dialect: InformixSchemaDialect::with_prefix(config.prefix.clone()),
            transcoder,
            transaction_depth: AtomicUsize::new(0),
        })
    }

    /// Returns the SQL dialect this connection compiles with.
    #[must_use]
    pub fn dialect(&self) -> &InformixDialect {
        &self.dialect
    }

    /// Returns the schema dialect this connection compiles DDL with.
    #[must_use]
    pub fn schema_dialect(&self) -> &InformixSchemaDialect {
        &self.schema_dialect
    }

    fn prepare(&self, bindings: Vec<SqlValue>) -> Vec<SqlValue> {
        prepare_bindings(bindings, &self.dialect, self.transcoder.as_ref())
    }

    /// Converts database-encoded character data back to strings.
    fn decode_rows(&self, rows: Vec<Row>) -> Vec<Row> {
        let Some(transcoder) = &self.transcoder else {
            return rows;
        };
        rows.into_iter()
            .map(|row| {
                Row::new(
                    row.into_columns()
                        .into_iter()
                        .map(|(name, value)| {
                            let value = match value {
                                SqlValue::Bytes(bytes) => {
                                    SqlValue::Text(transcoder.decode_from_db(&bytes))
                                }
                                other => other,
                            };
                            (name, value)
                        })
                        .collect(),
                )
            })
            .collect()
    }

    // ============================================================
    // Reads
    // ============================================================

    /// Runs a select and returns all result rows.
    pub async fn select(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<Vec<Row>> {
        debug!(sql = %sql, bindings = bindings.len(), "Running select");
        let bindings = self.prepare(bindings);
        let rows = self.driver.query(sql, &bindings).await?;
        Ok(self.decode_rows(rows))
    }

    /// Runs a select and returns the first row, if any.
    pub async fn select_one(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<Option<Row>> {
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
        self.select(&sql, query.bindings()).await
    }

    /// Returns whether any row matches the query.
    pub async fn exists(&self, query: &Query) -> Result<bool> {
        let sql = self.dialect.compile_exists(query);
        let rows = self.select(&sql, query.bindings()).await?;
        Ok(!rows.is_empty())
    }

    // ============================================================
    // Writes
    // ============================================================

    /// Runs an insert statement.
    ///
    /// Multi-row inserts arrive here as single-row SQL with the bindings
    /// of every row concatenated; [`Connection::statement`] turns that
    /// into a batched execution.
    pub async fn insert(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<bool> {
        self.statement(sql, bindings).await
    }

    /// Runs an insert and returns the generated serial value.
    pub async fn insert_get_id(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<i64> {
        debug!(sql = %sql, "Running insert returning serial id");
        let bindings = self.prepare(bindings);
        self.driver.execute(sql, &bindings).await?;
        self.driver.last_insert_id().await
    }

    /// Runs an update and returns the affected row count.
    pub async fn update(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<u64> {
        self.affecting_statement(sql, bindings).await
    }

    /// Runs a delete and returns the affected row count.
    pub async fn delete(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<u64> {
        self.affecting_statement(sql, bindings).await
    }

    /// Executes a statement, batching when the bindings outnumber the
    /// placeholders.
    ///
    /// With as many bindings as `?` markers the statement runs once.
    /// With an exact multiple, the bindings are split into rows and the
    /// same statement runs once per row inside a transaction; any failure
    /// rolls the whole batch back and reports `false`. Anything else is
    /// a usage error.
    pub async fn statement(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<bool> {
        let placeholders = count_placeholders(sql);
        if placeholders == bindings.len() {
            debug!(sql = %sql, "Running statement");
            let bindings = self.prepare(bindings);
            self.driver.execute(sql, &bindings).await?;
            return Ok(true);
        }
        if placeholders == 0 || bindings.len() % placeholders != 0 {
            return Err(DriverError::UnevenBatch {
                placeholders,
                bindings: bindings.len(),
            });
        }
        let rows = bindings
            .chunks(placeholders)
            .map(<[SqlValue]>::to_vec)
            .collect();
        self.run_batch(sql, rows).await
    }

    /// Executes a statement once per binding row, all or nothing.
    ///
    /// The explicit spelling of the batch path: every row must carry
    /// exactly as many values as the statement has placeholders.
    pub async fn execute_batch(&self, sql: &str, rows: Vec<Vec<SqlValue>>) -> Result<bool> {
        let placeholders = count_placeholders(sql);
        for row in &rows {
            if row.len() != placeholders {
                return Err(DriverError::BindingCountMismatch {
                    placeholders,
                    bindings: row.len(),
                });
            }
        }
        self.run_batch(sql, rows).await
    }

    async fn run_batch(&self, sql: &str, rows: Vec<Vec<SqlValue>>) -> Result<bool> {
        debug!(sql = %sql, rows = rows.len(), "Running batch statement");
        self.begin_transaction().await?;
        for row in rows {
            let row = self.prepare(row);
            if let Err(error) = self.driver.execute(sql, &row).await {
                warn!(error = %error, "Batch statement failed, rolling back");
                self.rollback().await?;
                return Ok(false);
            }
        }
        self.commit().await?;
        Ok(true)
    }

    /// Runs a statement and returns the affected row count.
    pub async fn affecting_statement(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<u64> {
        debug!(sql = %sql, "Running affecting statement");
        let bindings = self.prepare(bindings);
        self.driver.execute(sql, &bindings).await
    }

    /// Runs raw SQL without binding parameters.
    pub async fn unprepared(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "Running unprepared statement");
        self.driver.execute_raw(sql).await
    }

    // ============================================================
    // Transactions
    // ============================================================

    /// Begins a transaction, or deepens the current one.
    pub async fn begin_transaction(&self) -> Result<()> {
        let depth = self.transaction_depth.fetch_add(1, Ordering::SeqCst);
        if depth == 0 {
            debug!("Beginning transaction");
            if let Err(error) = self.driver.begin().await {
                self.transaction_depth.fetch_sub(1, Ordering::SeqCst);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Commits the outermost transaction; inner commits only unwind the
    /// nesting count. A failed commit leaves the count unchanged.
    pub async fn commit(&self) -> Result<()> {
        let depth = self
            .transaction_depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| depth.checked_sub(1))
            .unwrap_or(0);
        if depth == 1 {
            debug!("Committing transaction");
            if let Err(error) = self.driver.commit().await {
                self.transaction_depth.fetch_add(1, Ordering::SeqCst);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Rolls back the transaction and resets the nesting count.
    pub async fn rollback(&self) -> Result<()> {
        if self.transaction_depth.swap(0, Ordering::SeqCst) > 0 {
            debug!("Rolling back transaction");
            self.driver.rollback().await?;
        }
        Ok(())
    }

    /// Returns the current transaction nesting depth.
    #[must_use]
    pub fn transaction_level(&self) -> usize {
        self.transaction_depth.load(Ordering::SeqCst)
    }

    // ============================================================
    // Schema
    // ============================================================

    /// Runs every statement a blueprint compiles to, in order.
    pub async fn apply_blueprint(&self, blueprint: &Blueprint) -> Result<()> {
        for sql in self.schema_dialect.compile(blueprint) {
            debug!(sql = %sql, "Running schema statement");
            self.driver.execute(&sql, &[]).await?;
        }
        Ok(())
    }

    /// Returns whether the (prefixed) table exists, per the catalog.
    pub async fn has_table(&self, table: &str) -> Result<bool> {
        let table = format!("{}{table}", self.schema_dialect.table_prefix());
        let rows = self
            .select(
                self.schema_dialect.compile_table_exists(),
                vec![SqlValue::Text(table)],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    /// Returns the column names of the (prefixed) table, per the catalog.
    pub async fn column_listing(&self, table: &str) -> Result<Vec<String>> {
        let table = format!("{}{table}", self.schema_dialect.table_prefix());
        let rows = self
            .select(
                self.schema_dialect.compile_column_listing(),
                vec![SqlValue::Text(table)],
            )
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| match row.get("colname") {
                Some(SqlValue::Text(name)) => Some(name.clone()),
                _ => None,
            })
            .collect())
    }
}
