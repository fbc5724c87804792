//! # Node Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Precedence: defaults, then `PV_*` environment variables, then CLI flags.
//! Defaults describe a local three-node detector deployment.

use pv_02_consensus::{ConsensusConfig, ConsensusError};
use pv_03_ledger::GrantPolicy;
use pv_telemetry::TelemetryConfig;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Value of `PV_LEDGER_PATH` / `PV_CONTENT_DIR` that selects in-memory storage.
pub const IN_MEMORY: &str = ":memory:";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Detector node set and decision threshold.
    pub consensus: ConsensusConfig,
    /// Ledger persistence and grant policy.
    pub ledger: LedgerConfig,
    /// Content store location.
    pub content_store: ContentStoreConfig,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Ledger file; `None` keeps the ledger in memory.
    pub path: Option<PathBuf>,
    pub grant_policy: GrantPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("./data/ledger.db")),
            grant_policy: GrantPolicy::OwnerOnly,
        }
    }
}

/// Content store configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStoreConfig {
    /// Blob directory; `None` keeps content in memory.
    pub dir: Option<PathBuf>,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            dir: Some(PathBuf::from("./data/content")),
        }
    }
}

impl NodeConfig {
    /// Everything in memory: nothing survives the process.
    pub fn ephemeral() -> Self {
        Self {
            ledger: LedgerConfig {
                path: None,
                ..LedgerConfig::default()
            },
            content_store: ContentStoreConfig { dir: None },
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PV_DETECTOR_ENDPOINTS`: comma-separated detector URLs
    /// - `PV_CONSENSUS_THRESHOLD`: strict-majority threshold in `[0.5, 1)`
    /// - `PV_DETECTOR_TIMEOUT_SECS`: per-node timeout
    /// - `PV_LEDGER_PATH`: ledger file, or `:memory:`
    /// - `PV_CONTENT_DIR`: content directory, or `:memory:`
    /// - `PV_GRANT_POLICY`: `owner-only` or `owner-or-viewer`
    /// - plus the logging variables read by `TelemetryConfig`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(raw) = lookup("PV_DETECTOR_ENDPOINTS") {
            let endpoints: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
            if endpoints.is_empty() {
                return Err(ConfigError::invalid("PV_DETECTOR_ENDPOINTS", &raw, "no endpoints"));
            }
            config.consensus.endpoints = endpoints;
        }

        if let Some(raw) = lookup("PV_CONSENSUS_THRESHOLD") {
            config.consensus.threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("PV_CONSENSUS_THRESHOLD", &raw, "not a number"))?;
        }

        if let Some(raw) = lookup("PV_DETECTOR_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::invalid("PV_DETECTOR_TIMEOUT_SECS", &raw, "not a whole number of seconds")
            })?;
            config.consensus.node_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("PV_LEDGER_PATH") {
            config.ledger.path = storage_location(&raw);
        }

        if let Some(raw) = lookup("PV_CONTENT_DIR") {
            config.content_store.dir = storage_location(&raw);
        }

        if let Some(raw) = lookup("PV_GRANT_POLICY") {
            config.ledger.grant_policy = raw
                .parse()
                .map_err(|reason: String| ConfigError::invalid("PV_GRANT_POLICY", &raw, &reason))?;
        }

        Ok(config)
    }

    /// Put both stores under one directory.
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.ledger.path = Some(data_dir.join("ledger.db"));
        self.content_store.dir = Some(data_dir.join("content"));
        self
    }

    /// Reject a configuration the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.consensus.validate()?;

        if let Some(bad) = self
            .consensus
            .endpoints
            .iter()
            .find(|e| !(e.starts_with("http://") || e.starts_with("https://")))
        {
            return Err(ConfigError::InvalidEndpoint(bad.clone()));
        }

        Ok(())
    }
}

fn storage_location(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() || raw == IN_MEMORY {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Detector endpoint {0:?} is not an http(s) URL")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: &str) -> Self {
        ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
