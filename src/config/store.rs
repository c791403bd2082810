//! The active-configuration store.
//!
//! Holds the configuration every request handler reads, behind an
//! [`arc_swap::ArcSwap`]: readers take a snapshot with a lock-free load,
//! reloads replace the snapshot with a single atomic store. A request that
//! already took its snapshot keeps it for the rest of its processing, no
//! matter how many reloads land in the meantime.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::HookConfig;

/// Shared handle to the active configuration.
///
/// Cheap to clone; all clones observe the same active snapshot.
#[derive(Clone)]
pub struct ConfigStore {
    active: Arc<ArcSwap<HookConfig>>,
    path: Arc<PathBuf>,
}

impl ConfigStore {
    /// Create a store with an initial configuration and the file path
    /// reloads read from.
    pub fn new(initial: HookConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            active: Arc::new(ArcSwap::from_pointee(initial)),
            path: Arc::new(path.into()),
        }
    }

    /// The presently active configuration snapshot.
    ///
    /// Safe to call from any task while a reload is in progress; never
    /// observes a partially constructed value.
    pub fn current(&self) -> Arc<HookConfig> {
        self.active.load_full()
    }

    /// Atomically install an already-validated configuration.
    pub fn install(&self, config: HookConfig) {
        self.active.store(Arc::new(config));
    }

    /// Re-read the backing file and install the result.
    ///
    /// On any failure the active configuration is left untouched and the
    /// error is returned for the caller to log.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let fresh = load_config(&self.path)?;
        let previous = self.active.load();
        if fresh.bind_address() != previous.bind_address() {
            tracing::warn!(
                active = %previous.bind_address(),
                configured = %fresh.bind_address(),
                "listen address changed in config; rebinding requires a restart"
            );
        }
        self.active.store(Arc::new(fresh));
        Ok(())
    }

    /// The file path reloads read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
