//! Drives the reqwest-backed transport against a one-shot local HTTP server.

use simplenote_lib::api::{ApiClient, AuthService, NoteService, ReqwestTransport};
use simplenote_lib::ApiError;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Accepts one connection, answers with `status` and `body`, and returns
/// the raw request it received.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "client closed before sending headers");
            received.extend_from_slice(&buf[..n]);
            if let Some(pos) = find(&received, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&received[..header_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        while received.len() < header_end + content_length {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&received).to_string()
    });

    (base_url, handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn client(base_url: &str) -> Arc<ApiClient> {
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
    Arc::new(ApiClient::new(base_url, Arc::new(transport)).unwrap())
}

#[test]
fn login_posts_json_body() {
    let (base_url, server) = serve_once("200 OK", r#"{"access":"acc","refresh":"ref"}"#);

    let tokens = AuthService::new(client(&base_url))
        .login("alice", "secret")
        .unwrap();

    assert_eq!(tokens.access, "acc");
    assert_eq!(tokens.refresh, "ref");

    let request = server.join().unwrap();
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST /api/auth/token/ HTTP/1.1"));
    assert!(lower.contains("content-type: application/json"));
    assert!(!lower.contains("authorization:"));
    assert!(request.contains(r#""username":"alice""#));
    assert!(request.contains(r#""password":"secret""#));
}

#[test]
fn authenticated_get_sends_bearer_and_query() {
    let body = r#"{"count":0,"next":null,"previous":null,"results":[]}"#;
    let (base_url, server) = serve_once("200 OK", body);

    let page = NoteService::new(client(&base_url))
        .search("acc-token", "road trip", 2, Some(20))
        .unwrap();

    assert_eq!(page.count, 0);
    let request = server.join().unwrap();
    assert!(request.starts_with("GET /api/notes/filter?title=road+trip&page=2&page_size=20 HTTP/1.1"));
    assert!(request
        .to_lowercase()
        .contains("authorization: bearer acc-token"));
}

#[test]
fn not_found_keeps_raw_body() {
    let (base_url, server) = serve_once("404 Not Found", r#"{"detail":"Not found."}"#);

    let err = NoteService::new(client(&base_url))
        .delete("acc", 999999)
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            body: r#"{"detail":"Not found."}"#.to_string()
        }
    );
    assert!(server
        .join()
        .unwrap()
        .starts_with("DELETE /api/notes/999999/ HTTP/1.1"));
}

#[test]
fn no_content_delete_succeeds() {
    let (base_url, server) = serve_once("204 No Content", "");

    let deleted = NoteService::new(client(&base_url)).delete("acc", 4).unwrap();

    assert!(deleted);
    server.join().unwrap();
}

#[test]
fn malformed_success_body_is_decoding_error() {
    let (base_url, server) = serve_once("200 OK", r#"{"id": 1, "title": "#);

    let err = NoteService::new(client(&base_url)).get("acc", 1).unwrap_err();

    match err {
        ApiError::Decoding(msg) => assert!(msg.contains(r#"{"id": 1, "title": "#)),
        other => panic!("expected decoding error, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn refused_connection_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);

    let err = AuthService::new(client(&base_url))
        .refresh("ref")
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
