//! # Node Container
//!
//! Builds every subsystem from a `NodeConfig` and hands out the runtime
//! services that share them.
//!
//! ## Wiring
//!
//! ```text
//! HttpDetectorClient ──→ ConsensusCoordinator ──┐
//!                                               ├──→ SubmissionPipeline
//! ContentStore (memory | dir) ──────────────────┤
//!                │                              │
//!                └──→ VerificationEngine ──┐    │
//!                                          ├────┴──→ LibraryReader
//! Ledger (memory | file) ──────────────────┴───────→ AccessService
//! ```
//!
//! ## Thread Safety
//!
//! - The ledger sits behind one `parking_lot::RwLock`: one mutation at a
//!   time, concurrent snapshot reads
//! - No guard is ever held across an `.await`

pub mod config;

pub use config::{ConfigError, ContentStoreConfig, LedgerConfig, NodeConfig, IN_MEMORY};

use crate::access::AccessService;
use crate::adapters::{FileContentStore, InMemoryContentStore};
use crate::library::LibraryReader;
use crate::pipeline::SubmissionPipeline;
use parking_lot::RwLock;
use pv_01_detector::{DetectorError, HttpDetectorClient};
use pv_02_consensus::{ConsensusApi, ConsensusCoordinator, ConsensusError};
use pv_03_ledger::{
    FileBackedKVStore, GrantPolicy, InMemoryKVStore, KVStoreError, Ledger, LedgerApi,
};
use pv_04_verification::VerificationEngine;
use shared_types::{ContentStore, SystemTimeSource};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// The ledger as every runtime service sees it.
pub type SharedLedger = Arc<RwLock<dyn LedgerApi>>;

/// Wrap any ledger implementation for sharing.
pub fn shared_ledger<L>(ledger: L) -> SharedLedger
where
    L: LedgerApi + 'static,
{
    Arc::new(RwLock::new(ledger))
}

/// Ledger with no persistence, for tests and ephemeral nodes.
pub fn in_memory_ledger(policy: GrantPolicy) -> SharedLedger {
    shared_ledger(Ledger::new(InMemoryKVStore::new(), SystemTimeSource, policy))
}

/// Errors raised while assembling the node.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Consensus setup failed: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("Ledger storage unavailable: {0}")]
    Storage(#[from] KVStoreError),

    #[error("Detector client setup failed: {0}")]
    Detector(#[from] DetectorError),
}

/// Central container holding all subsystem instances.
pub struct NodeContainer {
    pub consensus: Arc<dyn ConsensusApi>,
    pub ledger: SharedLedger,
    pub content_store: Arc<dyn ContentStore>,
    pub verification: VerificationEngine<dyn ContentStore>,
    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
}

impl NodeContainer {
    /// Create a container with all subsystems initialized.
    #[instrument(name = "node_init", skip(config))]
    pub fn build(config: NodeConfig) -> Result<Self, ContainerError> {
        config.validate()?;

        let detector = Arc::new(HttpDetectorClient::new()?);
        let consensus: Arc<dyn ConsensusApi> = Arc::new(ConsensusCoordinator::new(
            detector,
            config.consensus.clone(),
        )?);
        info!(
            nodes = config.consensus.endpoints.len(),
            threshold = config.consensus.threshold,
            "  [pv-02] Consensus coordinator initialized"
        );

        let ledger = open_ledger(config.ledger.path.as_deref(), config.ledger.grant_policy)?;
        info!(
            path = ?config.ledger.path,
            policy = %config.ledger.grant_policy,
            "  [pv-03] Ledger initialized"
        );

        let content_store: Arc<dyn ContentStore> = match &config.content_store.dir {
            Some(dir) => Arc::new(FileContentStore::new(dir)),
            None => Arc::new(InMemoryContentStore::new()),
        };
        info!(dir = ?config.content_store.dir, "  Content store initialized");

        Ok(Self::from_parts(consensus, ledger, content_store, config))
    }

    /// Assemble a container from already-built subsystems.
    pub fn from_parts(
        consensus: Arc<dyn ConsensusApi>,
        ledger: SharedLedger,
        content_store: Arc<dyn ContentStore>,
        config: NodeConfig,
    ) -> Self {
        let verification = VerificationEngine::new(Arc::clone(&content_store));
        Self {
            consensus,
            ledger,
            content_store,
            verification,
            config,
        }
    }

    /// Write path: consensus-gated submissions.
    pub fn submissions(&self) -> SubmissionPipeline {
        SubmissionPipeline::new(
            Arc::clone(&self.consensus),
            Arc::clone(&self.content_store),
            Arc::clone(&self.ledger),
        )
    }

    /// Grants, revocations and audit queries.
    pub fn access(&self) -> AccessService {
        AccessService::new(Arc::clone(&self.ledger))
    }

    /// Read path: accessible records, each re-verified.
    pub fn library(&self) -> LibraryReader {
        LibraryReader::new(Arc::clone(&self.ledger), self.verification.clone())
    }
}

fn open_ledger(path: Option<&Path>, policy: GrantPolicy) -> Result<SharedLedger, KVStoreError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| KVStoreError::IOError {
                    message: format!("cannot create {}: {}", parent.display(), e),
                })?;
            }
            let store = FileBackedKVStore::open(path)?;
            Ok(shared_ledger(Ledger::new(store, SystemTimeSource, policy)))
        }
        None => Ok(in_memory_ledger(policy)),
    }
}
