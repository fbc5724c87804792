//! # Command line
//!
//! `provenance-node` runs one operation per invocation against the node's
//! persistent stores, then exits.

use crate::container::{NodeConfig, NodeContainer};
use crate::status::UserStatus;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pv_03_ledger::LedgerEvent;
use shared_types::{ContentId, Identity};
use std::path::PathBuf;
use std::time::Duration;

/// Media provenance node: consensus-gated recording and verified retrieval
#[derive(Parser, Debug)]
#[command(name = "provenance-node", version)]
pub struct Cli {
    /// Detector endpoint (repeat for each node; replaces the configured set)
    #[arg(long = "endpoint", global = true)]
    pub endpoints: Vec<String>,

    /// Strict-majority threshold in [0.5, 1)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Per-detector timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory holding the ledger and content store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit a media file for detection and, if accepted, record it
    Submit {
        #[arg(long = "as")]
        caller: String,
        file: PathBuf,
    },
    /// List everything the caller can see, re-verified
    List {
        #[arg(long = "as")]
        caller: String,
    },
    /// Give a viewer access to a record
    Grant {
        #[arg(long = "as")]
        caller: String,
        id: String,
        viewer: String,
    },
    /// Withdraw a viewer's access to a record
    Revoke {
        #[arg(long = "as")]
        caller: String,
        id: String,
        viewer: String,
    },
    /// Check whether an identity can see a record
    Check { id: String, identity: String },
    /// Show who shared a record, with whom, and when
    History { id: String },
    /// Re-fetch a record's content and compare fingerprints
    Verify { id: String },
}

impl Cli {
    /// Apply command-line flags over environment configuration.
    pub fn apply_overrides(&self, mut config: NodeConfig) -> NodeConfig {
        if !self.endpoints.is_empty() {
            config.consensus.endpoints = self.endpoints.clone();
        }
        if let Some(threshold) = self.threshold {
            config.consensus.threshold = threshold;
        }
        if let Some(secs) = self.timeout_secs {
            config.consensus.node_timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if self.verbose {
            config.telemetry = config.telemetry.with_log_level("debug");
        }
        config
    }
}

/// What a command printed and whether it succeeded.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub success: bool,
}

impl CommandOutput {
    fn status(status: UserStatus) -> Self {
        Self {
            success: status.is_recorded(),
            lines: vec![status.to_string()],
        }
    }
}

/// Run one command against a built node.
pub async fn execute(command: &Command, node: &NodeContainer) -> Result<CommandOutput> {
    match command {
        Command::Submit { caller, file } => {
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let result = node
                .submissions()
                .submit(&Identity::new(caller.as_str()), bytes, &file_name)
                .await;
            Ok(CommandOutput::status(UserStatus::from_submission(&result)))
        }

        Command::List { caller } => {
            let reports = node
                .library()
                .list_verified(&Identity::new(caller.as_str()))
                .await
                .context("Failed to read the ledger")?;
            let lines = reports
                .iter()
                .map(|report| {
                    format!(
                        "{}  owner={}  [{}] {}",
                        report.record.id,
                        report.record.owner,
                        report.status.as_str(),
                        UserStatus::from_report(report)
                    )
                })
                .collect();
            Ok(CommandOutput {
                lines,
                success: reports.iter().all(|r| r.status.is_verified()),
            })
        }

        Command::Grant { caller, id, viewer } => {
            let result = node.access().grant(
                &Identity::new(caller.as_str()),
                &ContentId::new(id.as_str()),
                &Identity::new(viewer.as_str()),
            );
            let action = format!("{} can now view {}", viewer, id);
            Ok(CommandOutput::status(UserStatus::from_access(&action, &result)))
        }

        Command::Revoke { caller, id, viewer } => {
            let result = node.access().revoke(
                &Identity::new(caller.as_str()),
                &ContentId::new(id.as_str()),
                &Identity::new(viewer.as_str()),
            );
            let action = format!("{} can no longer view {}", viewer, id);
            Ok(CommandOutput::status(UserStatus::from_access(&action, &result)))
        }

        Command::Check { id, identity } => {
            let allowed = node
                .access()
                .check(&ContentId::new(id.as_str()), &Identity::new(identity.as_str()))
                .context("Failed to read the ledger")?;
            let verdict = if allowed { "has access to" } else { "has no access to" };
            Ok(CommandOutput {
                lines: vec![format!("{} {} {}", identity, verdict, id)],
                success: allowed,
            })
        }

        Command::History { id } => {
            let events = node
                .access()
                .history(&ContentId::new(id.as_str()))
                .context("Failed to read the ledger")?;
            let lines = events
                .iter()
                .map(|e| format!("#{} @{} {}", e.sequence, e.timestamp, describe(&e.event)))
                .collect();
            Ok(CommandOutput {
                lines,
                success: !events.is_empty(),
            })
        }

        Command::Verify { id } => {
            let report = node
                .library()
                .verify(&ContentId::new(id.as_str()))
                .await
                .context("Failed to read the ledger")?;
            Ok(match report {
                Some(report) => {
                    let status = UserStatus::from_report(&report);
                    CommandOutput {
                        success: report.status.is_verified(),
                        lines: vec![status.to_string()],
                    }
                }
                None => CommandOutput::status(UserStatus::NothingRecorded(format!(
                    "{} is not in the ledger",
                    id
                ))),
            })
        }
    }
}

fn describe(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::RecordAdded {
            owner, fingerprint, ..
        } => format!("recorded by {} ({})", owner, fingerprint),
        LedgerEvent::AccessGranted {
            granted_by, viewer, ..
        } => format!("{} granted access to {}", granted_by, viewer),
        LedgerEvent::AccessRevoked { owner, viewer, .. } => {
            format!("{} revoked access from {}", owner, viewer)
        }
    }
}
