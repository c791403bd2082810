//! Configuration schema definitions.
//!
//! Field names in the file are PascalCase (`Logfile`, `Address`, `Port`,
//! `Repositories`) to stay compatible with configs written for the original
//! Gogs-era hook runner. Optional fields added since then follow the same
//! convention.

use serde::{Deserialize, Serialize};

/// Root configuration for the hook runner.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct HookConfig {
    /// Path to the log file. Empty means log to stdout.
    pub logfile: String,

    /// Bind host (e.g., "0.0.0.0").
    pub address: String,

    /// Bind port.
    pub port: u16,

    /// Repository rules, consulted in order for every push event.
    pub repositories: Vec<RepositoryRule>,

    /// Upper bound on a single command's runtime, in seconds.
    /// Absent means wait indefinitely.
    pub command_timeout_secs: Option<u64>,

    /// Bind address for the Prometheus metrics endpoint.
    /// Absent means no metrics endpoint.
    pub metrics_address: Option<String>,
}

impl HookConfig {
    /// The "host:port" string the webhook listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// A configured association between a repository, a shared secret, and the
/// commands to run when a verified push for that repository arrives.
///
/// Several rules may carry the same `name`; every rule whose name and secret
/// both match is triggered.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryRule {
    /// Full repository name as the forge reports it (e.g. "org/repo").
    pub name: String,

    /// Shared secret the forge is configured to send with each delivery.
    pub secret: String,

    /// Shell commands to run on a match, strictly in list order.
    #[serde(default)]
    pub commands: Vec<String>,
}
