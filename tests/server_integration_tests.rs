//! Integration Tests for the Connection Loop
//!
//! Runs the real accept loop on an ephemeral port and talks to it over TCP.

use std::net::SocketAddr;
use std::time::Duration;

use static_cache_server::{api::create_routes, cache::CacheStore, serve, ServerContext};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

// == Helper Functions ==

struct TestServer {
    addr: SocketAddr,
    root: TempDir,
    _files: TempDir,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<ServerContext>,
}

impl TestServer {
    async fn start(capacity: usize) -> Self {
        let files = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        std::fs::write(files.path().join("404.html"), b"<h1>not here</h1>").unwrap();
        std::fs::write(root.path().join("index.html"), b"<h1>home</h1>").unwrap();
        std::fs::write(root.path().join("profile.html"), b"<h1>profile</h1>").unwrap();

        let mut ctx = ServerContext::new(
            CacheStore::new(capacity),
            create_routes(),
            files.path(),
            root.path(),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            serve(listener, &mut ctx, 64 * 1024, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
            ctx
        });

        Self {
            addr,
            root,
            _files: files,
            shutdown: tx,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn stop(self) -> ServerContext {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap()
    }
}

async fn raw_request(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    out
}

fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let split = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
    (
        String::from_utf8(raw[..split].to_vec()).unwrap(),
        raw[split..].to_vec(),
    )
}

// == GET Routes ==

#[tokio::test]
async fn test_home_page() {
    let server = TestServer::start(10).await;

    let response = reqwest::get(server.url("/")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/html"
    );
    assert_eq!(response.headers()["connection"].to_str().unwrap(), "close");
    assert_eq!(response.text().await.unwrap(), "<h1>home</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_profile_page() {
    let server = TestServer::start(10).await;

    let response = reqwest::get(server.url("/profile/ada")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>profile</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_path_serves_home() {
    let server = TestServer::start(10).await;

    let response = reqwest::get(server.url("/d20")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>home</h1>");

    server.stop().await;
}

// == Not Found ==

#[tokio::test]
async fn test_post_returns_404_page() {
    let server = TestServer::start(10).await;

    let response = reqwest::Client::new()
        .post(server.url("/save"))
        .header("content-type", "text/plain")
        .body("Hello, sample data!")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "<h1>not here</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_request_returns_404() {
    let server = TestServer::start(10).await;

    let raw = raw_request(server.addr, b"HELLO\r\n\r\n").await;
    let (head, body) = split_response(&raw);

    assert!(head.starts_with("HTTP/1.1 404 NOT FOUND\r\n"));
    assert_eq!(body, b"<h1>not here</h1>");

    server.stop().await;
}

// == Wire Format ==

#[tokio::test]
async fn test_wire_format() {
    let server = TestServer::start(10).await;

    let raw = raw_request(server.addr, b"GET / HTTP/1.1\r\nHost: test\r\n\r\n").await;
    let (head, body) = split_response(&raw);
    let lines: Vec<&str> = head.split("\r\n").collect();

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert!(lines[1].starts_with("Date: ") && lines[1].ends_with(" GMT"));
    assert_eq!(lines[2], "Connection: close");
    assert_eq!(lines[3], "Content-Length: 13");
    assert_eq!(lines[4], "Content-Type: text/html");
    assert_eq!(body, b"<h1>home</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_binary_body_is_byte_exact() {
    let server = TestServer::start(10).await;
    let bytes: Vec<u8> = (0..=255u8).cycle().take(300_000).collect();
    std::fs::write(server.root.path().join("index.html"), &bytes).unwrap();

    let raw = raw_request(server.addr, b"GET / HTTP/1.1\r\n\r\n").await;
    let (head, body) = split_response(&raw);

    assert!(head.contains("Content-Length: 300000\r\n"));
    assert_eq!(body, bytes);

    server.stop().await;
}

// == Caching ==

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let server = TestServer::start(10).await;

    let first = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(first.text().await.unwrap(), "<h1>home</h1>");

    std::fs::remove_file(server.root.path().join("index.html")).unwrap();

    let second = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(second.status().as_u16(), 200);
    assert_eq!(second.text().await.unwrap(), "<h1>home</h1>");

    let ctx = server.stop().await;
    let stats = ctx.cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_capacity_one_evicts_between_pages() {
    let server = TestServer::start(1).await;

    reqwest::get(server.url("/")).await.unwrap();
    reqwest::get(server.url("/profile/ada")).await.unwrap();

    let ctx = server.stop().await;
    assert_eq!(ctx.cache.len(), 1);
    assert!(ctx.cache.contains("/profile.html"));
    assert_eq!(ctx.cache.stats().evictions, 1);
}

// == Sequential Handling ==

#[tokio::test]
async fn test_connections_are_handled_one_at_a_time() {
    let server = TestServer::start(10).await;

    // First connection is accepted but sends nothing yet
    let mut first = TcpStream::connect(server.addr).await.unwrap();
    let mut second = TcpStream::connect(server.addr).await.unwrap();
    second.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();

    let mut buf = [0u8; 1];
    let waited = tokio::time::timeout(Duration::from_millis(300), second.read(&mut buf)).await;
    assert!(waited.is_err(), "second connection must wait for the first");

    first
        .write_all(b"GET /profile/x HTTP/1.1\r\n\r\n")
        .await
        .unwrap();
    let mut out = Vec::new();
    first.read_to_end(&mut out).await.unwrap();
    assert!(out.ends_with(b"<h1>profile</h1>"));

    let mut out = Vec::new();
    second.read_to_end(&mut out).await.unwrap();
    assert!(out.ends_with(b"<h1>home</h1>"));

    server.stop().await;
}

#[tokio::test]
async fn test_abandoned_connection_does_not_stop_server() {
    let server = TestServer::start(10).await;

    // Connect and hang up without sending a request
    drop(TcpStream::connect(server.addr).await.unwrap());

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.stop().await;
}

#[tokio::test]
async fn test_request_line_without_headers_is_answered() {
    let server = TestServer::start(10).await;

    // Peer sends only the request line and keeps its write side open
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.0\r\n").await.unwrap();

    let mut out = Vec::new();
    tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut out))
        .await
        .expect("server must answer a bare request line")
        .unwrap();

    let (head, body) = split_response(&out);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"<h1>home</h1>");

    server.stop().await;
}
