//! Schema definition and DDL compilation.
//!
//! Tables are described with a [`Blueprint`] of typed columns and key
//! commands, then handed to a [`SchemaDialect`] which turns the whole
//! blueprint into the DDL statements realizing it.

pub mod blueprint;
pub mod column;
pub mod dialect;

pub use blueprint::{Blueprint, Command, ForeignCommand, ForeignKey, Storage};
pub use column::{ColumnBuilder, ColumnDefinition, ColumnType, DefaultValue};
pub use dialect::{InformixSchemaDialect, SchemaDialect};
