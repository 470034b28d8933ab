//! Connection establishment.
//!
//! The connector turns a [`ConnectionConfig`] into a live driver handle:
//! it builds the DSN, resolves possibly-encrypted credentials, dials with
//! a single retry when the first attempt dies to a lost connection, and
//! runs any configured init SQL on the fresh handle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{ConnectionConfig, DriverOptions};
use crate::driver::Driver;
use crate::error::{DriverError, Result};
use crate::secret::{resolve_password, SecretDecryptor};

/// Message fragments identifying a connection that died under the driver.
const LOST_CONNECTION_MESSAGES: &[&str] = &[
    "server has gone away",
    "no connection to the server",
    "Lost connection",
    "is dead or not enabled",
    "Error while sending",
    "server closed the connection unexpectedly",
    "Connection timed out",
    "Communication link failure",
    "connection is no longer usable",
    "reset by peer",
    "Broken pipe",
    "Attempt to connect to database server",
    "System error occurred in network function",
];

/// Returns whether an error message describes a lost connection.
#[must_use]
pub fn caused_by_lost_connection(message: &str) -> bool {
    LOST_CONNECTION_MESSAGES
        .iter()
        .any(|fragment| message.contains(fragment))
}

/// Opens driver connections for a DSN and credentials.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// The connection type produced on a successful dial.
    type Conn: Driver;

    /// Opens a connection.
    async fn open(
        &self,
        dsn: &str,
        username: Option<&str>,
        password: Option<&str>,
        options: &DriverOptions,
    ) -> Result<Self::Conn>;
}

/// Establishes Informix connections from configuration.
pub struct Connector<F> {
    factory: F,
    decryptor: Option<Arc<dyn SecretDecryptor>>,
}

impl<F: DriverFactory> Connector<F> {
    /// Creates a connector dialing through the given factory.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            decryptor: None,
        }
    }

    /// Injects the decryptor used for encrypted passwords.
    #[must_use]
    pub fn with_decryptor(mut self, decryptor: Arc<dyn SecretDecryptor>) -> Self {
        self.decryptor = Some(decryptor);
        self
    }

    /// Connects, retrying once if the first attempt loses the connection.
    pub async fn connect(&self, config: &ConnectionConfig) -> Result<F::Conn> {
        if config.host.is_empty() || config.database.is_empty() {
            return Err(DriverError::Config(String::from(
                "host and database are required",
            )));
        }

        let dsn = config.dsn();
        let username = config.username.as_deref();
        let password = resolve_password(config.password.as_deref(), self.decryptor.as_deref())?;

        debug!(dsn = %dsn, "Connecting to Informix");
        let open = self
            .factory
            .open(&dsn, username, password.as_deref(), &config.options);
        let driver = match open.await {
            Ok(driver) => driver,
            Err(error) => {
                if !caused_by_lost_connection(&error.to_string()) {
                    return Err(error);
                }
                warn!(error = %error, "Connection lost while connecting, retrying once");
                self.factory
                    .open(&dsn, username, password.as_deref(), &config.options)
                    .await?
            }
        };

        if let Some(init_sqls) = &config.init_sqls {
            let sql = init_sqls.joined();
            if !sql.is_empty() {
                debug!(sql = %sql, "Running connection init SQL");
                driver.execute_raw(&sql).await?;
            }
        }

        Ok(driver)
    }
}
