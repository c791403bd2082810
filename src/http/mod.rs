//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → hook handler (event header, body read)
//!     → dispatch::Dispatcher (rule matching, command execution)
//!     → 200 OK (the forge's webhook contract has no failure channel)
//! ```

pub mod server;

pub use server::HttpServer;
