//! The forge's push payload.
//!
//! The wire schema is owned by Gitea/Gogs; only the fields the dispatcher
//! consumes are modeled here, and unknown fields are ignored so payload
//! additions on the forge side never break parsing.

use serde::Deserialize;

/// A push notification as delivered by the forge.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    /// Shared-secret token the forge was configured with.
    /// Older Gogs versions omit it; an absent token never matches a rule.
    #[serde(default)]
    pub secret: String,

    /// The pushed ref (e.g. "refs/heads/main").
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,

    /// Commit id the ref now points at.
    #[serde(default)]
    pub after: Option<String>,

    pub repository: Repository,

    #[serde(default)]
    pub pusher: Option<Pusher>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Full name as configured in repository rules (e.g. "org/repo").
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pusher {
    #[serde(default)]
    pub username: String,
}
