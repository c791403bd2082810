//! Webhook-to-command bridge for self-hosted git forges.
//!
//! Listens for Gitea/Gogs push deliveries and runs the commands configured
//! for the matching repository, with hot-reloadable configuration.

pub mod config;
pub mod dispatch;
pub mod exec;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigStore, HookConfig, RepositoryRule};
pub use dispatch::Dispatcher;
pub use exec::ShellRunner;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
