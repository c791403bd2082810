//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Writer chosen at startup from the config: a log file, or stdout when
//!   no file is configured
//! - Level configurable via RUST_LOG; info by default

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `logfile` empty means stdout. Failure to open the file is returned to the
/// caller, which treats it as fatal: a hook runner that cannot record what
/// it executed must not serve.
pub fn init(logfile: &str) -> Result<(), std::io::Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "forgehook=info,tower_http=info".into());

    if logfile.is_empty() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        let file = OpenOptions::new().create(true).append(true).open(logfile)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init();
    }

    Ok(())
}
