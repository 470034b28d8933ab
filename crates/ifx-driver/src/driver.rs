//! Driver abstraction.
//!
//! The connection layer is written against this trait rather than a
//! concrete client library, so the same statement/batch/transcoding
//! logic runs over any Informix transport (and over fakes in tests).

use async_trait::async_trait;
use ifx_core::SqlValue;

use crate::error::Result;

/// A single result row as ordered column/value pairs.
///
/// Informix column names are not unique across a join, so the row keeps
/// the ordered pairs; by-name access returns the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates a row from ordered column/value pairs.
    #[must_use]
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Returns the value of the first column with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Returns the ordered column/value pairs.
    #[must_use]
    pub fn columns(&self) -> &[(String, SqlValue)] {
        &self.columns
    }

    /// Consumes the row, returning its ordered column/value pairs.
    #[must_use]
    pub fn into_columns(self) -> Vec<(String, SqlValue)> {
        self.columns
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// An established Informix connection.
///
/// Implementations take already-prepared bindings; date formatting,
/// boolean coercion and charset conversion happen a layer above.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Executes a prepared query and returns the result rows.
    async fn query(&self, sql: &str, bindings: &[SqlValue]) -> Result<Vec<Row>>;

    /// Executes a prepared statement and returns the affected row count.
    async fn execute(&self, sql: &str, bindings: &[SqlValue]) -> Result<u64>;

    /// Executes raw SQL without binding parameters.
    async fn execute_raw(&self, sql: &str) -> Result<()>;

    /// Opens a transaction.
    async fn begin(&self) -> Result<()>;

    /// Commits the open transaction.
    async fn commit(&self) -> Result<()>;

    /// Rolls back the open transaction.
    async fn rollback(&self) -> Result<()>;

    /// Returns the last serial value generated on this connection.
    async fn last_insert_id(&self) -> Result<i64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_get_returns_first_match() {
        let row = Row::new(vec![
            (String::from("id"), SqlValue::Int(1)),
            (String::from("id"), SqlValue::Int(2)),
            (String::from("name"), SqlValue::Text(String::from("ada"))),
        ]);
        assert_eq!(row.get("id"), Some(&SqlValue::Int(1)));
        assert_eq!(row.get("name"), Some(&SqlValue::Text(String::from("ada"))));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_empty_row() {
        let row = Row::default();
        assert!(row.is_empty());
        assert_eq!(row.get("anything"), None);
    }
}
