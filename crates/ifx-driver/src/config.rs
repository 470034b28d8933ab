//! Connection configuration.
//!
//! Mirrors the option keys a deployment hands to the driver: where the
//! server lives, which credentials and locales to use, and any SQL to run
//! once per fresh connection. The whole struct deserializes from the usual
//! config formats, so it can sit inside a larger application config.

use serde::Deserialize;

fn default_protocol() -> String {
    String::from("onsoctcp")
}

/// Backend a configuration block selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DriverKind {
    /// Native Informix driver.
    #[default]
    #[serde(rename = "informix")]
    Informix,
    /// HTTP/JSON pseudo-driver.
    #[serde(rename = "informix-json")]
    InformixJson,
}

/// Options forwarded verbatim to the native driver at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Keep the underlying handle open across requests.
    pub persistent: bool,
    /// Connect timeout in seconds.
    pub timeout: Option<u64>,
}

/// SQL run once right after a connection is established.
///
/// Accepts either a single statement or a list; a list is joined with
/// `"; "` and sent as one command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InitSqls {
    /// A single statement.
    One(String),
    /// Several statements, run in order.
    Many(Vec<String>),
}

impl InitSqls {
    /// Returns the statements joined into a single command string.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::One(sql) => sql.clone(),
            Self::Many(sqls) => sqls.join("; "),
        }
    }
}

/// Configuration for a native Informix connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Backend this block configures.
    pub driver: DriverKind,
    /// Database server host.
    pub host: String,
    /// Database name.
    pub database: String,
    /// Service name or port.
    pub service: String,
    /// INFORMIXSERVER instance name.
    pub server: String,
    /// Connection protocol, `onsoctcp` unless overridden.
    pub protocol: String,
    /// Login user.
    pub username: Option<String>,
    /// Login password; values longer than 50 characters are treated as
    /// encrypted and handed to the configured decryptor.
    pub password: Option<String>,
    /// Enables scrollable cursors on the driver when set.
    pub enable_scroll: Option<u8>,
    /// Server-side locale, e.g. `en_US.819`.
    pub db_locale: Option<String>,
    /// Client-side locale, e.g. `en_US.utf8`.
    pub client_locale: Option<String>,
    /// Character set the database stores text in.
    pub db_encoding: Option<String>,
    /// Character set the application works in.
    pub client_encoding: Option<String>,
    /// SQL run once per fresh connection.
    #[serde(rename = "initSqls")]
    pub init_sqls: Option<InitSqls>,
    /// Options forwarded to the driver at connect time.
    pub options: DriverOptions,
    /// Prefix applied to every table name at compile time.
    pub prefix: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::Informix,
            host: String::new(),
            database: String::new(),
            service: String::new(),
            server: String::new(),
            protocol: default_protocol(),
            username: None,
            password: None,
            enable_scroll: None,
            db_locale: None,
            client_locale: None,
            db_encoding: None,
            client_encoding: None,
            init_sqls: None,
            options: DriverOptions::default(),
            prefix: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Builds the Informix DSN for this configuration.
    ///
    /// Scroll-cursor and locale options are only appended when set.
    #[must_use]
    pub fn dsn(&self) -> String {
        let mut dsn = format!(
            "informix:host={}; database={}; service={}; server={}; protocol={};",
            self.host, self.database, self.service, self.server, self.protocol
        );
        if let Some(scroll) = self.enable_scroll {
            dsn.push_str(&format!(" EnableScrollableCursors={scroll};"));
        }
        if let Some(locale) = &self.db_locale {
            dsn.push_str(&format!(" DB_LOCALE={locale};"));
        }
        if let Some(locale) = &self.client_locale {
            dsn.push_str(&format!(" CLIENT_LOCALE={locale};"));
        }
        dsn
    }

    /// Returns whether string values need to cross an encoding boundary.
    #[must_use]
    pub fn transcoding_required(&self) -> bool {
        match (&self.client_encoding, &self.db_encoding) {
            (Some(client), Some(db)) => client != db,
            _ => false,
        }
    }
}
