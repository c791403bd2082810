//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (read whole file, deserialize)
//!     → validation.rs (semantic checks)
//!     → HookConfig (validated, immutable)
//!     → store.rs (active snapshot behind ArcSwap)
//!
//! On reload (SIGHUP or file change):
//!     loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the active snapshot
//!     → subsequent requests observe the new config;
//!       in-flight requests keep the snapshot they took
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - A failed reload never disturbs the active configuration
//! - Readers are lock-free; a request takes exactly one snapshot

pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{HookConfig, RepositoryRule};
pub use store::ConfigStore;
