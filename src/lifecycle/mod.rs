//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//!     SIGHUP → trigger config reload
//!
//! Shutdown (shutdown.rs):
//!     Signal received → stop accepting → drain in-flight deliveries → exit
//! ```
//!
//! # Design Decisions
//! - Reload runs in its own task, decoupled from request handling; the only
//!   contention with requests is the snapshot swap itself
//! - A failed reload is logged; the process never exits over one

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
