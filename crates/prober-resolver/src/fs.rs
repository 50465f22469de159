use std::path::{Path, PathBuf};

use async_trait::async_trait;
use prober_service::ServiceInfo;
use tokio::fs;

use crate::description::parse_description;
use crate::error::ResolveError;
use crate::resolver::MetadataResolver;

/// Filesystem-based metadata resolver.
///
/// Description documents are stored one per endpoint:
/// ```text
/// {root}/
/// ├── calc.example.com_svc_Calculator.svc.json
/// └── localhost_8080_echo.json
/// ```
pub struct FsMetadataResolver {
  root: PathBuf,
}

impl FsMetadataResolver {
  /// Create a new filesystem resolver at the given root path.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Get the root directory of the resolver.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Map an endpoint id to its description file name.
  /// Example: "http://localhost:8080/echo" -> "localhost_8080_echo.json"
  ///
  /// The mapping is lossy. The scheme is dropped and every character other than
  /// ASCII alphanumerics, `.` and `-` becomes `_`, so `http://a/b`, `https://a/b`
  /// and `a_b` all share `a_b.json` and resolve to the same description.
  pub fn file_name(endpoint_id: &str) -> String {
    let without_scheme = endpoint_id
      .split_once("://")
      .map(|(_, rest)| rest)
      .unwrap_or(endpoint_id);

    let mut name: String = without_scheme
      .chars()
      .map(|c| {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
          c
        } else {
          '_'
        }
      })
      .collect();

    while name.ends_with('_') {
      name.pop();
    }

    format!("{}.json", name)
  }

  /// Full path of the description file for an endpoint.
  pub fn path_for(&self, endpoint_id: &str) -> PathBuf {
    self.root.join(Self::file_name(endpoint_id))
  }
}

#[async_trait]
impl MetadataResolver for FsMetadataResolver {
  async fn describe(&self, endpoint_id: &str) -> Result<ServiceInfo, ResolveError> {
    let path = self.path_for(endpoint_id);
    let content = fs::read_to_string(&path)
      .await
      .map_err(|e| ResolveError::Unavailable {
        endpoint_id: endpoint_id.to_string(),
        message: format!("{}: {}", path.display(), e),
      })?;

    parse_description(endpoint_id, &content)
  }
}
