//! Shared utilities for integration testing.

use std::net::SocketAddr;

use import_redirector::config::validation::parse_mapping;
use import_redirector::http::ServerError;
use import_redirector::{HttpServer, RedirectorConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A redirector serving in the background.
pub struct Running {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), ServerError>>,
}

/// Start a redirector on an ephemeral localhost port.
pub async fn start_redirector(import: &str, repo: &str) -> Running {
    let mapping = parse_mapping(import, repo).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(RedirectorConfig::new(mapping, addr)).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let task = tokio::spawn(server.run(listener, server_shutdown));

    Running {
        addr,
        shutdown,
        task,
    }
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// GET `path` on `addr` presenting `host` as the Host header.
pub async fn get(addr: SocketAddr, host: &str, path: &str) -> reqwest::Response {
    client()
        .get(format!("http://{addr}{path}"))
        .header(reqwest::header::HOST, host)
        .send()
        .await
        .expect("redirector unreachable")
}
