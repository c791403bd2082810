//! End-to-end tests for the webhook listener: real HTTP server, real shell
//! commands, marker files as evidence of execution.
//!
//! Commands run to completion before the handler answers, so a 200 response
//! means any triggered command has already finished.

use forgehook::ConfigStore;

mod common;
use common::{deliver, push_payload, rule, start_server, test_config, unique_temp_path};

fn touch_command(path: &std::path::Path) -> String {
    format!("touch {}", path.display())
}

#[tokio::test]
async fn push_event_runs_configured_commands() {
    let marker = unique_temp_path("push-runs");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = deliver(addr, "push", &push_payload("org/repo", "abc")).await;

    assert_eq!(response.status(), 200);
    assert!(marker.exists(), "configured command should have run");

    std::fs::remove_file(&marker).unwrap();
    shutdown.trigger();
}

#[tokio::test]
async fn secret_mismatch_runs_no_commands() {
    let marker = unique_temp_path("mismatch");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = deliver(addr, "push", &push_payload("org/repo", "wrong")).await;

    // Sender still sees success; the mismatch is a log entry, not a response.
    assert_eq!(response.status(), 200);
    assert!(!marker.exists(), "no command may run on a secret mismatch");

    shutdown.trigger();
}

#[tokio::test]
async fn non_push_event_is_ignored() {
    let marker = unique_temp_path("non-push");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = deliver(addr, "pull_request", &push_payload("org/repo", "abc")).await;

    assert_eq!(response.status(), 200);
    assert!(!marker.exists());

    shutdown.trigger();
}

#[tokio::test]
async fn malformed_body_keeps_listener_serving() {
    let marker = unique_temp_path("malformed");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/hook"))
        .header("X-Gitea-Event", "push")
        .body("{ this is not json")
        .send()
        .await
        .expect("listener unreachable");
    assert_eq!(response.status(), 200);
    assert!(!marker.exists());

    // The listener must still dispatch the next, well-formed delivery.
    let response = deliver(addr, "push", &push_payload("org/repo", "abc")).await;
    assert_eq!(response.status(), 200);
    assert!(marker.exists());

    std::fs::remove_file(&marker).unwrap();
    shutdown.trigger();
}

#[tokio::test]
async fn failing_command_does_not_stop_the_rest() {
    let marker = unique_temp_path("after-failure");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec!["false".to_string(), touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = deliver(addr, "push", &push_payload("org/repo", "abc")).await;

    assert_eq!(response.status(), 200);
    assert!(marker.exists(), "commands after a failure must still run");

    std::fs::remove_file(&marker).unwrap();
    shutdown.trigger();
}

#[tokio::test]
async fn rules_sharing_a_name_route_by_secret() {
    let marker_abc = unique_temp_path("shared-abc");
    let marker_xyz = unique_temp_path("shared-xyz");
    let config = test_config(vec![
        rule("org/repo", "abc", vec![touch_command(&marker_abc)]),
        rule("org/repo", "xyz", vec![touch_command(&marker_xyz)]),
    ]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    deliver(addr, "push", &push_payload("org/repo", "xyz")).await;

    assert!(!marker_abc.exists(), "mismatched rule must be skipped");
    assert!(marker_xyz.exists(), "matching rule must run");

    std::fs::remove_file(&marker_xyz).unwrap();
    shutdown.trigger();
}

#[tokio::test]
async fn unknown_repository_still_gets_success_response() {
    let marker = unique_temp_path("unknown-repo");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = deliver(addr, "push", &push_payload("org/elsewhere", "abc")).await;

    assert_eq!(response.status(), 200);
    assert!(!marker.exists());

    shutdown.trigger();
}

#[tokio::test]
async fn any_path_reaches_the_hook_handler() {
    let marker = unique_temp_path("root-path");
    let config = test_config(vec![rule(
        "org/repo",
        "abc",
        vec![touch_command(&marker)],
    )]);
    let store = ConfigStore::new(config, "unused.json");
    let (addr, shutdown) = start_server(store).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .header("X-Gitea-Event", "push")
        .json(&push_payload("org/repo", "abc"))
        .send()
        .await
        .expect("listener unreachable");

    assert_eq!(response.status(), 200);
    assert!(marker.exists());

    std::fs::remove_file(&marker).unwrap();
    shutdown.trigger();
}
