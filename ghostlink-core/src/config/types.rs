//! Configuration type definitions

use ghostlink_protocol::{Action, Catalog, CatalogError, CatalogVersion, LineEnding};

use crate::input::Strictness;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default bounded read per poll (ms)
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 250;

/// Default upper bound on reads while draining stale output
pub const DEFAULT_MAX_DRAIN_READS: usize = 64;

/// Legacy "give up when the firmware goes quiet" behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IdleGiveUp {
    /// Silence (ms) before the retry
    pub silence_ms: u32,
    /// Wait (ms) before the single retry read
    pub retry_delay_ms: u32,
    /// Wait (ms) after the retry also came back empty
    pub final_delay_ms: u32,
}

impl Default for IdleGiveUp {
    fn default() -> Self {
        Self {
            silence_ms: 1_000,
            retry_delay_ms: 10_000,
            final_delay_ms: 2_000,
        }
    }
}

/// Bridge timing and framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig {
    /// Bounded read per poll (ms)
    pub poll_timeout_ms: u32,
    /// Read timeout while draining stale bytes (ms)
    pub drain_timeout_ms: u32,
    /// Upper bound on drain reads
    pub max_drain_reads: usize,
    /// Terminator appended to each command
    pub line_ending: LineEnding,
    /// Give up after silence instead of waiting for dismissal
    pub idle_give_up: Option<IdleGiveUp>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            drain_timeout_ms: 0,
            max_drain_reads: DEFAULT_MAX_DRAIN_READS,
            line_ending: LineEnding::Lf,
            idle_give_up: None,
        }
    }
}

impl BridgeConfig {
    /// Settings of the earliest control scripts: 1 s reads, no line
    /// ending, give up when the firmware goes quiet
    pub fn legacy() -> Self {
        Self {
            poll_timeout_ms: 1_000,
            line_ending: LineEnding::None,
            idle_give_up: Some(IdleGiveUp::default()),
            ..Self::default()
        }
    }
}

/// Session behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// How strictly prompted values are checked
    pub strictness: Strictness,
    /// Firmware command dialect
    pub catalog: CatalogVersion,
    /// Bridge settings
    pub bridge: BridgeConfig,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Override names an action that does not exist
    UnknownAction,
    /// Override could not be applied
    Catalog(CatalogError),
}

impl From<CatalogError> for ConfigError {
    fn from(e: CatalogError) -> Self {
        ConfigError::Catalog(e)
    }
}

/// Build a catalog for `version` and apply `(action key, spelling)` overrides
pub fn build_catalog<'a, I>(version: CatalogVersion, overrides: I) -> Result<Catalog, ConfigError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut catalog = Catalog::new(version);
    for (key, spelling) in overrides {
        let action = Action::from_key(key).ok_or(ConfigError::UnknownAction)?;
        catalog.set_override(action, spelling)?;
    }
    Ok(catalog)
}
