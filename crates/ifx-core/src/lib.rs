//! # ifx-core
//!
//! SQL and DDL generation for IBM Informix.
//!
//! This crate provides:
//! - A fluent query builder compiling to parameterized Informix
//!   `select`/`insert`/`update`/`delete` statements
//! - Pagination through the `skip`/`first` select head and row locking
//!   via `for update` / `for read only`
//! - Schema blueprints compiling to Informix DDL, including serial
//!   primary keys and the catalog queries used for introspection
//!
//! ## Building Queries
//!
//! ```rust
//! use ifx_core::dialect::{Dialect, InformixDialect};
//! use ifx_core::query::Query;
//!
//! let dialect = InformixDialect::new();
//! let query = Query::table("users")
//!     .select(&["id", "name"])
//!     .where_clause("active", "=", true)
//!     .offset(10)
//!     .limit(5);
//!
//! let sql = dialect.compile_select(&query);
//! assert_eq!(sql, "select skip 10 first 5 id, name from users where active = ?");
//! ```
//!
//! Values never travel inside the SQL text; [`Query::bindings`] yields them
//! in placeholder order for the driver to bind.
//!
//! ## Defining Schema
//!
//! ```rust
//! use ifx_core::schema::column::{increments, string};
//! use ifx_core::schema::{Blueprint, InformixSchemaDialect, SchemaDialect};
//!
//! let blueprint = Blueprint::create("users")
//!     .column(increments("id"))
//!     .column(string("email", 255));
//!
//! let dialect = InformixSchemaDialect::new();
//! let statements = dialect.compile(&blueprint);
//! assert_eq!(
//!     statements[0],
//!     "create table users ( id serial(1) not null, email varchar(255) not null, \
//!      primary key ( id ) constraint users_id_primary )"
//! );
//! ```

pub mod dialect;
pub mod query;
pub mod reserved;
pub mod schema;
pub mod value;

pub use dialect::{Dialect, InformixDialect};
pub use query::Query;
pub use reserved::is_reserved;
pub use schema::{Blueprint, InformixSchemaDialect, SchemaDialect};
pub use value::{SqlValue, ToSqlValue};
