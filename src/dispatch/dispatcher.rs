//! The request-dispatch core.
//!
//! # Responsibilities
//! - Gate on the event type (only "push" proceeds)
//! - Parse the payload; reject malformed bodies with a safe diagnostic
//! - Match repository rules against one configuration snapshot
//! - Verify the shared secret per rule, then run that rule's commands in order
//!
//! # Design Decisions
//! - `dispatch` is infallible by signature; every failure becomes a log
//!   entry and a normal return, so the listener can never be taken down by
//!   one delivery
//! - The configuration snapshot is taken once per delivery; a concurrent
//!   reload does not change which rules this delivery sees
//! - A failing command aborts neither its sibling commands nor other rules

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::config::store::ConfigStore;
use crate::dispatch::event::PushEvent;
use crate::exec::runner::{CommandOutcome, CommandRunner};
use crate::observability::metrics;

/// Event type that triggers dispatch; everything else is ignored.
const PUSH_EVENT: &str = "push";

/// Routes verified push events to their configured commands.
pub struct Dispatcher {
    store: ConfigStore,
    runner: Arc<dyn CommandRunner>,
}

/// Per-delivery tallies, for the summary log and metrics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Rules whose name and secret both matched.
    pub rules_matched: usize,
    /// Rules whose name matched but whose secret did not.
    pub secret_mismatches: usize,
    pub commands_run: usize,
    pub command_failures: usize,
}

/// What became of one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Event type was not "push"; nothing was parsed or executed.
    Ignored { event: String },
    /// Body was not a valid push payload; nothing was executed.
    Rejected,
    /// Rules were consulted; see the report for what ran.
    Completed(DispatchReport),
}

impl Dispatcher {
    pub fn new(store: ConfigStore, runner: Arc<dyn CommandRunner>) -> Self {
        Self { store, runner }
    }

    /// Handle one delivery: `event_kind` is the forge's event-type header
    /// value, `body` the raw request body.
    pub async fn dispatch(&self, event_kind: Option<&str>, body: &[u8]) -> DispatchOutcome {
        let kind = event_kind.unwrap_or("");
        if kind != PUSH_EVENT {
            metrics::record_ignored_event();
            tracing::info!(event = %kind, "ignoring non-push event");
            return DispatchOutcome::Ignored {
                event: kind.to_string(),
            };
        }

        let event: PushEvent = match serde_json::from_slice(body) {
            Ok(event) => event,
            Err(e) => {
                metrics::record_rejected_payload();
                // Base64 keeps arbitrary attacker-controlled bytes out of the
                // log stream while preserving them for diagnosis.
                tracing::error!(
                    error = %e,
                    body_base64 = %BASE64.encode(body),
                    "failed to parse push payload"
                );
                return DispatchOutcome::Rejected;
            }
        };

        let repository = event.repository.full_name.as_str();
        tracing::info!(
            repository = %repository,
            git_ref = event.git_ref.as_deref().unwrap_or(""),
            head = event.after.as_deref().unwrap_or(""),
            pusher = event.pusher.as_ref().map(|p| p.username.as_str()).unwrap_or(""),
            "received push event"
        );

        // One snapshot for the whole delivery.
        let config = self.store.current();
        let mut report = DispatchReport::default();

        for rule in config
            .repositories
            .iter()
            .filter(|rule| rule.name == repository)
        {
            if rule.secret != event.secret {
                metrics::record_secret_mismatch();
                tracing::warn!(repository = %rule.name, "secret mismatch, skipping rule");
                report.secret_mismatches += 1;
                continue;
            }

            report.rules_matched += 1;
            for command in &rule.commands {
                report.commands_run += 1;
                match self.runner.run(command).await {
                    CommandOutcome::Success { output } => {
                        metrics::record_command("success");
                        tracing::info!(
                            repository = %rule.name,
                            command = %command,
                            output = %output.trim_end(),
                            "command succeeded"
                        );
                    }
                    CommandOutcome::Failure { error, output } => {
                        metrics::record_command("failure");
                        report.command_failures += 1;
                        tracing::error!(
                            repository = %rule.name,
                            command = %command,
                            error = %error,
                            output = %output.trim_end(),
                            "command failed"
                        );
                    }
                }
            }
        }

        if report.rules_matched == 0 && report.secret_mismatches == 0 {
            tracing::info!(repository = %repository, "no rule configured for repository");
        }

        DispatchOutcome::Completed(report)
    }
}
