//! # ifx-driver
//!
//! Connection layer for Informix on top of the `ifx-core` dialects.
//!
//! This crate provides:
//! - A [`Driver`] trait abstracting the transport, so the execution
//!   policies run over any client library (or a fake in tests)
//! - A [`Connector`] that builds the DSN, resolves possibly-encrypted
//!   credentials, retries a lost connection once and runs init SQL
//! - A [`Connection`] implementing bind preparation, charset conversion
//!   on both paths, the implicit multi-row batch and counted
//!   transactions
//!
//! ## Executing A Query
//!
//! ```rust,no_run
//! # use ifx_driver::{Connection, ConnectionConfig, Driver, Result};
//! # async fn demo<D: Driver>(driver: D) -> Result<()> {
//! use ifx_core::query::Query;
//!
//! let config = ConnectionConfig::default();
//! let conn = Connection::new(driver, &config)?;
//!
//! let query = Query::table("users")
//!     .select(&["id", "name"])
//!     .where_clause("active", "=", true);
//! let rows = conn.select_query(&query).await?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod config;
pub mod connection;
pub mod connector;
pub mod driver;
pub mod error;
pub mod secret;
pub mod transcode;

pub use config::{ConnectionConfig, DriverKind, DriverOptions, InitSqls};
pub use connection::Connection;
pub use connector::{caused_by_lost_connection, Connector, DriverFactory};
pub use driver::{Driver, Row};
pub use error::{DriverError, Result};
pub use secret::SecretDecryptor;
pub use transcode::Transcoder;
