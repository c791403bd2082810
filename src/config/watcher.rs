//! Configuration file watcher for hot reload.

use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::store::ConfigStore;
use crate::observability::metrics;

/// Watch the store's backing file and reload on every modify/create event.
///
/// Returns the watcher handle, which must be kept alive for as long as the
/// file should be observed. A malformed file is logged and dropped; the
/// active configuration stays as it was.
pub fn watch_config_file(store: &ConfigStore) -> Result<RecommendedWatcher, notify::Error> {
    let path = store.path().to_path_buf();
    let reload_store = store.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if event.kind.is_modify() || event.kind.is_create() {
                    tracing::info!("configuration file changed, reloading");
                    match reload_store.reload() {
                        Ok(()) => {
                            metrics::record_reload("success");
                            tracing::info!("configuration reloaded");
                        }
                        Err(e) => {
                            metrics::record_reload("failure");
                            tracing::error!(
                                error = %e,
                                "reload failed, keeping current configuration"
                            );
                        }
                    }
                }
            }
            Err(e) => tracing::error!(error = %e, "configuration watch error"),
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;

    tracing::info!(path = %path.display(), "configuration watcher started");
    Ok(watcher)
}
