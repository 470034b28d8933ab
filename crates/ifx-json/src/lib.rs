//! # ifx-json
//!
//! HTTP/JSON pseudo-connection for Informix.
//!
//! Some deployments cannot reach the database directly and instead relay
//! queries through a small HTTP service that runs the SQL and answers
//! with JSON. This crate provides:
//! - [`JsonConnection`], a read-only connection that splices bindings
//!   into the compiled SQL as literals and ships the finished statement
//!   to the service
//! - Recursive percent-decoding of the response document, working around
//!   the service's encoding of string fields
//!
//! Mutating operations and transactions are unsupported on this backend
//! and fail fast.

pub mod connection;
pub mod decode;
pub mod error;
pub mod substitute;

pub use connection::{JsonConfig, JsonConnection};
pub use decode::decode_value;
pub use error::{JsonError, Result};
pub use substitute::substitute_bindings;
