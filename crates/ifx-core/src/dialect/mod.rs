//! SQL dialect support.
//!
//! The query model is engine-neutral; everything engine-specific about
//! turning it into SQL text lives behind the [`Dialect`] trait. Identifier
//! wrapping and list helpers have standard default implementations, the
//! statement compilers are the per-engine part.

mod informix;

pub use informix::InformixDialect;

use crate::query::Query;

/// Trait for dialect-specific SQL generation.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the table prefix applied while wrapping table names.
    fn table_prefix(&self) -> &str {
        ""
    }

    /// Returns the format dates are rendered in before binding.
    fn date_format(&self) -> &'static str {
        "%Y-%m-%d %H:%M:%S"
    }

    /// Returns the parameter placeholder.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Wraps a single identifier segment.
    fn wrap_value(&self, value: &str) -> String;

    /// Wraps a column reference, handling aliases and dotted paths.
    fn wrap(&self, value: &str) -> String {
        if let Some((column, alias)) = split_alias(value) {
            return format!("{} as {}", self.wrap(column), self.wrap_value(alias));
        }
        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() > 1 {
            let mut parts = vec![self.wrap_table(segments[0])];
            parts.extend(segments[1..].iter().map(|s| self.wrap_value(s)));
            return parts.join(".");
        }
        self.wrap_value(value)
    }

    /// Wraps a table name, applying the prefix to the name and its alias.
    fn wrap_table(&self, table: &str) -> String {
        if let Some((name, alias)) = split_alias(table) {
            let aliased = format!("{}{}", self.table_prefix(), alias);
            return format!("{} as {}", self.wrap_table(name), self.wrap_value(&aliased));
        }
        let prefixed = format!("{}{}", self.table_prefix(), table);
        self.wrap_value(&prefixed)
    }

    /// Wraps and comma-joins a column list.
    fn columnize(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.wrap(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds a placeholder list for the given arity.
    fn parameterize(&self, count: usize) -> String {
        vec![self.parameter_placeholder(); count].join(", ")
    }

    /// Compiles a select statement.
    fn compile_select(&self, query: &Query) -> String;

    /// Compiles an existence probe for the query.
    fn compile_exists(&self, query: &Query) -> String;

    /// Compiles an insert for one row of the given columns.
    fn compile_insert(&self, query: &Query, columns: &[String]) -> String;

    /// Compiles an update assigning the given columns.
    fn compile_update(&self, query: &Query, columns: &[String]) -> String;

    /// Compiles a delete.
    fn compile_delete(&self, query: &Query) -> String;
}

/// Splits `expr as alias`, matching the keyword case-insensitively.
fn split_alias(value: &str) -> Option<(&str, &str)> {
    let lower = value.to_ascii_lowercase();
    lower.find(" as ").map(|idx| (&value[..idx], &value[idx + 4..]))
}
