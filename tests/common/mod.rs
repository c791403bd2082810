//! Shared utilities for the integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use forgehook::{ConfigStore, Dispatcher, HookConfig, HttpServer, RepositoryRule, ShellRunner, Shutdown};

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// A path under the system temp dir that no other test in this run uses.
pub fn unique_temp_path(tag: &str) -> PathBuf {
    let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("forgehook-it-{}-{}-{}", std::process::id(), id, tag))
}

pub fn rule(name: &str, secret: &str, commands: Vec<String>) -> RepositoryRule {
    RepositoryRule {
        name: name.to_string(),
        secret: secret.to_string(),
        commands,
    }
}

pub fn test_config(rules: Vec<RepositoryRule>) -> HookConfig {
    HookConfig {
        address: "127.0.0.1".to_string(),
        // The tests bind an ephemeral port themselves; this only has to validate.
        port: 3344,
        repositories: rules,
        ..HookConfig::default()
    }
}

/// Start a real server over the given store with a real shell runner.
///
/// Returns the bound address and the shutdown handle.
#[allow(dead_code)]
pub async fn start_server(store: ConfigStore) -> (SocketAddr, Shutdown) {
    let runner = Arc::new(ShellRunner::new(None));
    let dispatcher = Arc::new(Dispatcher::new(store, runner));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(dispatcher);
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}

#[allow(dead_code)]
pub fn push_payload(repository: &str, secret: &str) -> serde_json::Value {
    serde_json::json!({
        "secret": secret,
        "ref": "refs/heads/main",
        "after": "4b825dc642cb6eb9a060e54bf8d69288fbee4904",
        "repository": { "full_name": repository },
        "pusher": { "username": "alice" }
    })
}

/// POST a delivery with the given event header to an arbitrary path.
#[allow(dead_code)]
pub async fn deliver(
    addr: SocketAddr,
    event: &str,
    payload: &serde_json::Value,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/hook"))
        .header("X-Gitea-Event", event)
        .json(payload)
        .send()
        .await
        .expect("listener unreachable")
}
