//! Configuration file and command-line merge
//!
//! ```toml
//! [link]
//! port = "/dev/ttyUSB0"
//! baud = 115200
//!
//! [session]
//! strictness = "strict"
//! catalog = "flagged"
//!
//! [session.bridge]
//! poll_timeout_ms = 250
//! line_ending = "lf"
//!
//! [catalog.overrides]
//! list_stations = "list -s"
//!
//! [payloads]
//! root = "payloads"
//! ```
//!
//! Every section is optional. Command-line flags win over the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ghostlink_core::config::{build_catalog, SessionConfig};
use ghostlink_hal::UartConfig;
use ghostlink_protocol::Catalog;
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{HostError, Result};
use crate::storage::DEFAULT_ROOT;

/// Serial link settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub port: Option<String>,
    pub baud: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: UartConfig::default().baudrate,
        }
    }
}

impl LinkConfig {
    pub fn uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baud)
    }
}

/// Catalog spelling overrides, keyed by action key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PayloadConfig {
    pub root: PathBuf,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

/// Everything the host reads at startup
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub link: LinkConfig,
    pub session: SessionConfig,
    pub catalog: CatalogConfig,
    pub payloads: PayloadConfig,
}

impl HostConfig {
    /// Parse TOML text
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| HostError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Apply command-line overrides
    pub fn merge(mut self, cli: &Cli) -> Self {
        if let Some(port) = &cli.port {
            self.link.port = Some(port.clone());
        }
        if let Some(baud) = cli.baud {
            self.link.baud = baud;
        }
        if let Some(version) = cli.catalog {
            self.session.catalog = version.into();
        }
        if let Some(strictness) = cli.strictness() {
            self.session.strictness = strictness;
        }
        if cli.legacy_timing {
            self.session.bridge = ghostlink_core::config::BridgeConfig::legacy();
        }
        if let Some(root) = &cli.payload_root {
            self.payloads.root = root.clone();
        }
        self
    }

    /// Serial device path
    pub fn port(&self) -> Result<&str> {
        self.link.port.as_deref().ok_or(HostError::MissingPort)
    }

    /// Catalog for the configured dialect with overrides applied
    pub fn catalog(&self) -> Result<Catalog> {
        let overrides = self
            .catalog
            .overrides
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        Ok(build_catalog(self.session.catalog, overrides)?)
    }
}
