//! External command execution.
//!
//! The dispatcher talks to a narrow [`CommandRunner`] port: one command
//! string in, one terminal outcome out. The production implementation
//! spawns real processes; tests substitute a recording fake.

pub mod runner;

pub use runner::{CommandError, CommandOutcome, CommandRunner, ShellRunner};
