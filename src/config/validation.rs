//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject listen endpoints that cannot be bound
//! - Reject rules that could never be matched safely
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: HookConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the store, at startup and on reload

use thiserror::Error;

use crate::config::schema::HookConfig;

/// A single semantic problem found in a configuration document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listen address is empty")]
    EmptyAddress,

    #[error("listen port is zero")]
    PortZero,

    #[error("repository rule {index} has an empty name")]
    EmptyRepositoryName { index: usize },

    /// An empty secret would match any delivery that omits the token,
    /// turning the rule into an unauthenticated trigger.
    #[error("repository rule \"{name}\" has an empty secret")]
    EmptySecret { name: String },
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &HookConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.address.is_empty() {
        errors.push(ValidationError::EmptyAddress);
    }
    if config.port == 0 {
        errors.push(ValidationError::PortZero);
    }

    for (index, rule) in config.repositories.iter().enumerate() {
        if rule.name.is_empty() {
            errors.push(ValidationError::EmptyRepositoryName { index });
        } else if rule.secret.is_empty() {
            errors.push(ValidationError::EmptySecret {
                name: rule.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
