//! REST operation testing.
//!
//! A REST operation is addressed as `{base_url}/{op_name}` with its arguments in
//! the query string, e.g. `http://host/Foo?a=1&b=2`.

use tracing::info;

use crate::error::RestError;
use crate::fetcher::ContentFetcher;

/// Build the URL for a REST operation call.
///
/// Fails if `base_url` or `op_name` is empty, or if both `param_names` and
/// `input_values` are non-empty but differ in length. The query string is only
/// added when both lists are non-empty; pairs keep list order and are not
/// percent-encoded.
pub fn build_rest_url(
  base_url: &str,
  op_name: &str,
  param_names: &[String],
  input_values: &[String],
) -> Result<String, RestError> {
  if base_url.is_empty() {
    return Err(RestError::Argument {
      argument: "base_url".to_string(),
      message: "cannot be empty".to_string(),
    });
  }
  if op_name.is_empty() {
    return Err(RestError::Argument {
      argument: "op_name".to_string(),
      message: "cannot be empty".to_string(),
    });
  }

  let mut url = format!("{}/{}", base_url, op_name);

  if !param_names.is_empty() && !input_values.is_empty() {
    if param_names.len() != input_values.len() {
      return Err(RestError::Argument {
        argument: "param_names".to_string(),
        message: format!(
          "has {} entries but input_values has {}",
          param_names.len(),
          input_values.len()
        ),
      });
    }

    let query: Vec<String> = param_names
      .iter()
      .zip(input_values)
      .map(|(name, value)| format!("{}={}", name, value))
      .collect();
    url.push('?');
    url.push_str(&query.join("&"));
  }

  Ok(url)
}

/// Tests REST operations by fetching their content.
pub struct RestTester<F: ContentFetcher> {
  fetcher: F,
}

impl<F: ContentFetcher> RestTester<F> {
  pub fn new(fetcher: F) -> Self {
    Self { fetcher }
  }

  /// Invoke a REST operation and return its raw output.
  ///
  /// Argument errors are returned before any request is made.
  pub async fn test_rest_operation(
    &self,
    base_url: &str,
    op_name: &str,
    param_names: &[String],
    input_values: &[String],
  ) -> Result<String, RestError> {
    let url = build_rest_url(base_url, op_name, param_names, input_values)?;
    info!(url = %url, "rest_operation_started");
    let content = self.fetcher.fetch(&url).await?;
    Ok(content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::FetchError;
  use async_trait::async_trait;
  use std::sync::Mutex;

  /// Fetcher that records requested URLs and echoes them back.
  struct RecordingFetcher {
    urls: Mutex<Vec<String>>,
  }

  impl RecordingFetcher {
    fn new() -> Self {
      Self {
        urls: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl ContentFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
      self.urls.lock().unwrap().push(url.to_string());
      Ok(format!("content of {}", url))
    }
  }

  fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_build_url_with_params() {
    let url = build_rest_url("http://host", "Foo", &strings(&["a", "b"]), &strings(&["1", "2"]))
      .unwrap();
    assert_eq!(url, "http://host/Foo?a=1&b=2");
  }

  #[test]
  fn test_build_url_without_params() {
    let url = build_rest_url("http://host", "Foo", &[], &[]).unwrap();
    assert_eq!(url, "http://host/Foo");
  }

  #[test]
  fn test_build_url_ignores_one_sided_lists() {
    let url = build_rest_url("http://host", "Foo", &strings(&["a"]), &[]).unwrap();
    assert_eq!(url, "http://host/Foo");

    let url = build_rest_url("http://host", "Foo", &[], &strings(&["1"])).unwrap();
    assert_eq!(url, "http://host/Foo");
  }

  #[test]
  fn test_build_url_rejects_empty_arguments() {
    let result = build_rest_url("", "Foo", &[], &[]);
    assert!(matches!(result, Err(RestError::Argument { ref argument, .. }) if argument == "base_url"));

    let result = build_rest_url("http://host", "", &[], &[]);
    assert!(matches!(result, Err(RestError::Argument { ref argument, .. }) if argument == "op_name"));
  }

  #[tokio::test]
  async fn test_rest_operation_fetches_built_url() {
    let tester = RestTester::new(RecordingFetcher::new());

    let content = tester
      .test_rest_operation("http://host", "Foo", &strings(&["a", "b"]), &strings(&["1", "2"]))
      .await
      .unwrap();

    assert_eq!(content, "content of http://host/Foo?a=1&b=2");
    assert_eq!(
      *tester.fetcher.urls.lock().unwrap(),
      vec!["http://host/Foo?a=1&b=2".to_string()]
    );
  }

  #[tokio::test]
  async fn test_rest_operation_mismatched_lengths_never_fetches() {
    let tester = RestTester::new(RecordingFetcher::new());

    let result = tester
      .test_rest_operation("http://host", "Foo", &strings(&["a", "b"]), &strings(&["1"]))
      .await;

    assert!(matches!(result, Err(RestError::Argument { .. })));
    assert!(tester.fetcher.urls.lock().unwrap().is_empty());
  }
}
