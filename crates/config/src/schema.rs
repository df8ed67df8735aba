//! Configuration schema definitions

use crate::fields;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Placeholder printed instead of the admin password
pub const REDACTED: &str = "[redacted]";

/// Startup configuration of the service
///
/// Built once by [`ConfigLoader`](crate::ConfigLoader) and never mutated
/// afterwards. The `Debug` implementation redacts the admin password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Username of the admin account
    pub admin_username: String,
    /// Password of the admin account, never empty
    pub admin_password: String,
    /// Listening port; not range checked
    pub port: i64,
    /// Path of the database file
    pub db_file: PathBuf,
}

impl Config {
    /// Copy of this configuration safe to print or log
    pub fn redacted(&self) -> Self {
        Self {
            admin_password: REDACTED.to_string(),
            ..self.clone()
        }
    }

    /// Render the redacted configuration as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.redacted())
    }

    /// Render the redacted configuration as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.redacted())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &REDACTED)
            .field("port", &self.port)
            .field("db_file", &self.db_file)
            .finish()
    }
}

pub(crate) fn default_admin_username() -> String {
    fields::ADMIN_USERNAME.default.unwrap_or_default().to_string()
}

pub(crate) fn default_port() -> i64 {
    fields::PORT
        .default
        .and_then(|port| port.parse().ok())
        .unwrap_or_default()
}

pub(crate) fn default_db_file() -> PathBuf {
    PathBuf::from(fields::DB_FILE.default.unwrap_or_default())
}

impl Default for Config {
    /// Defaults-only view with an empty password
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: String::new(),
            port: default_port(),
            db_file: default_db_file(),
        }
    }
}
