//! Configuration via `widerow.toml`
//!
//! Holds the few knobs the mapping layer itself reads, plus the connection
//! parameters handed to whichever external `StoreClient` implementation the
//! application binds. Load it once at startup and pass it to a `Session`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use widerow_core::{Error, KeyCell, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "widerow.toml";

/// Sentinel written for key components that have no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKey {
    /// Substitute the open lower bound
    #[default]
    InfMin,
    /// Substitute the open upper bound
    InfMax,
}

impl MissingKey {
    /// The key cell this setting stands for
    pub fn sentinel(self) -> KeyCell {
        match self {
            MissingKey::InfMin => KeyCell::InfMin,
            MissingKey::InfMax => KeyCell::InfMax,
        }
    }
}

/// Connection parameters for an external store client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Service endpoint URL
    pub endpoint: String,
    /// Access key id
    pub access_key_id: String,
    /// Access key secret
    pub access_key_secret: String,
    /// Store instance name
    pub instance_name: String,
}

impl ConnectionConfig {
    /// Check that every field is set
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("endpoint", &self.endpoint),
            ("access_key_id", &self.access_key_id),
            ("access_key_secret", &self.access_key_secret),
            ("instance_name", &self.instance_name),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::config(format!(
                    "connection.{} must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

// Keeps the secret out of logs
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"<redacted>")
            .field("instance_name", &self.instance_name)
            .finish()
    }
}

/// Mapping layer configuration loaded from `widerow.toml`
///
/// # Example
///
/// ```toml
/// missing_key = "inf_min"
/// page_limit = 100
///
/// [connection]
/// endpoint = "https://my-instance.cn-hangzhou.ots.aliyuncs.com"
/// access_key_id = "id"
/// access_key_secret = "secret"
/// instance_name = "my-instance"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WiderowConfig {
    /// Sentinel for unset, non-auto-increment key components
    #[serde(default)]
    pub missing_key: MissingKey,
    /// Default per-page row limit for range queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
    /// Fail a range query after this many pages (unbounded if absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
    /// External store connection parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionConfig>,
}

impl WiderowConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Widerow configuration
#
# Sentinel written for unset key components: "inf_min" (default) or "inf_max".
# Auto-increment components are always left to the store.
missing_key = "inf_min"

# Default per-page row limit for range queries (store default if absent).
# page_limit = 100

# Fail a range query that is still paginating after this many pages.
# Unbounded if absent.
# max_pages = 10000

# Connection parameters for the store client.
# [connection]
# endpoint = "https://my-instance.cn-hangzhou.ots.aliyuncs.com"
# access_key_id = "your-access-key-id"
# access_key_secret = "your-access-key-secret"
# instance_name = "my-instance"
"#
    }

    /// Check value ranges and the connection section
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == Some(0) {
            return Err(Error::config("page_limit must be greater than 0"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::config("max_pages must be greater than 0"));
        }
        if let Some(connection) = &self.connection {
            connection.validate()?;
        }
        Ok(())
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WiderowConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
