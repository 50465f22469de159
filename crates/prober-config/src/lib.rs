//! Prober Config
//!
//! This crate contains the serializable runtime configuration for prober.
//!
//! Configuration can be loaded from a JSON file (via CLI with `--config=prober.json`).
//! Every field has a default, so an empty object `{}` is a valid configuration:
//!
//! ```json
//! {
//!   "http": { "timeout_ms": 10000, "user_agent": "prober-ci" },
//!   "engine": { "max_concurrent_endpoints": 4 },
//!   "metadata": { "fs": { "dir": "./descriptions" } }
//! }
//! ```

mod enums;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use enums::MetadataSource;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse config file: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid config: {message}")]
  Invalid { message: String },
}

/// Top-level prober configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProberConfig {
  #[serde(default)]
  pub http: HttpConfig,
  #[serde(default)]
  pub engine: EngineConfig,
  #[serde(default)]
  pub metadata: MetadataSource,
}

impl ProberConfig {
  /// Load and validate a configuration from a JSON file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Self::from_json(&content)
  }

  /// Parse and validate a configuration from a JSON string.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    let config: ProberConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.engine.max_concurrent_endpoints == 0 {
      return Err(ConfigError::Invalid {
        message: "engine.max_concurrent_endpoints must be at least 1".to_string(),
      });
    }
    if self.http.timeout_ms == 0 {
      return Err(ConfigError::Invalid {
        message: "http.timeout_ms must be at least 1".to_string(),
      });
    }
    Ok(())
  }
}

/// Settings for the HTTP collaborators (metadata, invocation, content fetch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  #[serde(default = "default_user_agent")]
  pub user_agent: String,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      timeout_ms: default_timeout_ms(),
      user_agent: default_user_agent(),
    }
  }
}

/// Settings for the test orchestration engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// How many endpoints a batch test works on at once.
  #[serde(default = "default_max_concurrent_endpoints")]
  pub max_concurrent_endpoints: usize,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      max_concurrent_endpoints: default_max_concurrent_endpoints(),
    }
  }
}

fn default_timeout_ms() -> u64 {
  30_000
}

fn default_user_agent() -> String {
  format!("prober/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_concurrent_endpoints() -> usize {
  8
}
