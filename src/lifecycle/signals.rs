//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate signals to internal actions (shutdown, reload)
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a config reload, not shutdown; a reload that fails
//!   leaves the active configuration untouched

use crate::config::store::ConfigStore;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics;

/// Reload the configuration on every SIGHUP, forever.
///
/// Runs as a dedicated task; a failed reload is logged and the loop keeps
/// listening for the next signal.
#[cfg(unix)]
pub async fn reload_on_sighup(store: ConfigStore) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGHUP handler");
            return;
        }
    };

    while hangup.recv().await.is_some() {
        tracing::info!(path = %store.path().display(), "SIGHUP received, reloading configuration");
        match store.reload() {
            Ok(()) => {
                metrics::record_reload("success");
                tracing::info!("configuration reloaded");
            }
            Err(e) => {
                metrics::record_reload("failure");
                tracing::error!(error = %e, "reload failed, keeping current configuration");
            }
        }
    }
}

#[cfg(not(unix))]
pub async fn reload_on_sighup(_store: ConfigStore) {}

/// Trigger graceful shutdown on Ctrl-C or SIGTERM.
pub async fn shutdown_on_signal(shutdown: Shutdown) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("interrupt received"),
            _ = terminate.recv() => tracing::info!("terminate signal received"),
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::info!("interrupt received");
    }

    shutdown.trigger();
}
