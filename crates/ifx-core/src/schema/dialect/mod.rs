//! Dialect-specific DDL generation.
//!
//! A blueprint compiles into an ordered list of statements; how many and
//! what they look like is up to the engine. Catalog probes live here too
//! since they are as engine-specific as the DDL itself.

mod informix;

pub use informix::InformixSchemaDialect;

use super::blueprint::Blueprint;

/// Trait for dialect-specific schema compilation.
pub trait SchemaDialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the table prefix applied while wrapping table names.
    fn table_prefix(&self) -> &str {
        ""
    }

    /// Wraps a single identifier.
    fn wrap_value(&self, value: &str) -> String;

    /// Wraps a table name, applying the prefix.
    fn wrap_table(&self, table: &str) -> String {
        let prefixed = format!("{}{}", self.table_prefix(), table);
        self.wrap_value(&prefixed)
    }

    /// Wraps and comma-joins a column list.
    fn columnize(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.wrap_value(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Compiles the blueprint into the statements realizing it, in order.
    fn compile(&self, blueprint: &Blueprint) -> Vec<String>;

    /// Catalog probe for table existence; binds the unqualified table name.
    fn compile_table_exists(&self) -> &'static str;

    /// Catalog query listing the columns of a table; binds the table name.
    fn compile_column_listing(&self) -> &'static str;
}
