use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where endpoint descriptions are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
  /// Fetch the description document from the endpoint URL itself.
  #[default]
  Http,
  /// Read description documents from a local directory.
  Fs { dir: PathBuf },
}
