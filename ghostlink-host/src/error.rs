//! Host error type

use std::io;
use std::path::PathBuf;

use ghostlink_core::config::ConfigError;
use ghostlink_core::menu::MenuError;
use thiserror::Error;

/// Errors raised while setting up or running the remote control
#[derive(Debug, Error)]
pub enum HostError {
    #[error("serial port {path}: {source}")]
    Serial {
        path: String,
        #[source]
        source: serial::Error,
    },
    #[error("no serial port given (use --port or [link] port)")]
    MissingPort,
    #[error("reading {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("catalog override rejected: {0:?}")]
    Catalog(ConfigError),
    #[error("menu tree is broken: {0:?}")]
    Menu(MenuError),
    #[error("invalid command: {0:?}")]
    Command(ghostlink_protocol::CommandError),
}

impl From<ConfigError> for HostError {
    fn from(e: ConfigError) -> Self {
        HostError::Catalog(e)
    }
}

impl From<MenuError> for HostError {
    fn from(e: MenuError) -> Self {
        HostError::Menu(e)
    }
}

impl From<ghostlink_protocol::CommandError> for HostError {
    fn from(e: ghostlink_protocol::CommandError) -> Self {
        HostError::Command(e)
    }
}

pub type Result<T> = std::result::Result<T, HostError>;
