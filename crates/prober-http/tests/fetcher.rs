//! Integration tests for HttpFetcher and RestTester against a local HTTP server.

use std::sync::mpsc;
use std::thread;

use prober_http::{ContentFetcher, FetchError, HttpFetcher, RestError, RestTester};
use tiny_http::{Response, Server};

/// Spawns a server answering one request, reporting the requested path.
fn spawn_server(
  body: &'static str,
  status: u16,
) -> (String, mpsc::Receiver<String>, thread::JoinHandle<()>) {
  let server = Server::http("127.0.0.1:0").unwrap();
  let addr = server.server_addr().to_ip().unwrap();
  let url = format!("http://{}", addr);
  let (tx, rx) = mpsc::channel();

  let handle = thread::spawn(move || {
    if let Ok(request) = server.recv() {
      let _ = tx.send(request.url().to_string());
      let response = Response::from_string(body).with_status_code(status);
      let _ = request.respond(response);
    }
  });

  (url, rx, handle)
}

#[tokio::test]
async fn test_fetch_returns_body() {
  let (url, _rx, handle) = spawn_server("hello", 200);
  let fetcher = HttpFetcher::new(reqwest::Client::new());

  let body = fetcher.fetch(&url).await.unwrap();
  assert_eq!(body, "hello");

  handle.join().unwrap();
}

#[tokio::test]
async fn test_fetch_error_status() {
  let (url, _rx, handle) = spawn_server("nope", 503);
  let fetcher = HttpFetcher::new(reqwest::Client::new());

  let result = fetcher.fetch(&url).await;
  assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));

  handle.join().unwrap();
}

#[tokio::test]
async fn test_rest_operation_requests_query_string() {
  let (url, rx, handle) = spawn_server("42", 200);
  let tester = RestTester::new(HttpFetcher::new(reqwest::Client::new()));

  let names = vec!["a".to_string(), "b".to_string()];
  let values = vec!["1".to_string(), "2".to_string()];
  let content = tester
    .test_rest_operation(&url, "Add", &names, &values)
    .await
    .unwrap();

  assert_eq!(content, "42");
  assert_eq!(rx.recv().unwrap(), "/Add?a=1&b=2");

  handle.join().unwrap();
}

#[tokio::test]
async fn test_rest_operation_surfaces_http_error() {
  let tester = RestTester::new(HttpFetcher::new(reqwest::Client::new()));

  let result = tester
    .test_rest_operation("http://127.0.0.1:1", "Add", &[], &[])
    .await;

  assert!(matches!(result, Err(RestError::Http(FetchError::Request { .. }))));
}
