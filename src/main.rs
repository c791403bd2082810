//! forgehook
//!
//! Receives push notifications from a self-hosted git forge and runs the
//! commands configured for the matching repository.
//!
//! ```text
//! forge push webhook ──▶ http::server ──▶ dispatch::Dispatcher ──▶ exec::ShellRunner
//!                                              │
//!                                   config::ConfigStore (ArcSwap snapshot)
//!                                              ▲
//!               SIGHUP (lifecycle::signals) ───┤
//!               file change (config::watcher) ─┘
//! ```
//!
//! Startup is fail-fast: an unreadable config or log file terminates the
//! process before it serves. After that, nothing does — malformed deliveries
//! and failed reloads are log entries, not crashes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use forgehook::config::{load_config, watcher, ConfigStore};
use forgehook::dispatch::Dispatcher;
use forgehook::exec::ShellRunner;
use forgehook::http::HttpServer;
use forgehook::lifecycle::{signals, Shutdown};
use forgehook::observability;

#[derive(Parser)]
#[command(name = "forgehook", version, about = "Run configured commands on forge push webhooks")]
struct Args {
    /// Path to the configuration file.
    #[arg(default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initial load is fatal on failure; reloads later are not.
    let config = load_config(&args.config)?;

    observability::logging::init(&config.logfile)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        repositories = config.repositories.len(),
        "forgehook starting"
    );

    if let Some(metrics_address) = &config.metrics_address {
        match metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let store = ConfigStore::new(config.clone(), &args.config);

    let command_timeout = config.command_timeout_secs.map(Duration::from_secs);
    let runner = Arc::new(ShellRunner::new(command_timeout));
    let dispatcher = Arc::new(Dispatcher::new(store.clone(), runner));

    // Reload triggers: SIGHUP and the file watcher both feed the same store.
    tokio::spawn(signals::reload_on_sighup(store.clone()));
    let _watcher = match watcher::watch_config_file(&store) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable, SIGHUP reload still works");
            None
        }
    };

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    let listener = TcpListener::bind(config.bind_address()).await?;
    let server = HttpServer::new(dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
