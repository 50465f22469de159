//! Endpoint metadata as reported by a metadata resolver.

use serde::{Deserialize, Serialize};

/// Name and declared type of one operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
  pub name: String,
  /// Primitive type tag, e.g. `string`, `int`, `boolean`.
  #[serde(rename = "type")]
  pub type_tag: String,
}

impl ParameterDescriptor {
  pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      type_tag: type_tag.into(),
    }
  }
}

/// Description of a single operation exposed by an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationInfo {
  pub name: String,
  /// Interface (port type) the operation belongs to.
  pub port_type_name: String,
  #[serde(default)]
  pub input_parameters: Vec<ParameterDescriptor>,
  #[serde(default)]
  pub output_parameters: Vec<ParameterDescriptor>,
}

/// Description of an endpoint: its name and the operations it exposes.
///
/// Operations are kept in the order the endpoint reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
  pub service_name: String,
  pub operations: Vec<OperationInfo>,
}

impl ServiceInfo {
  /// Look up an operation by name.
  pub fn operation(&self, name: &str) -> Option<&OperationInfo> {
    self.operations.iter().find(|op| op.name == name)
  }

  /// Whether the endpoint exposes an operation with the given name.
  pub fn has_operation(&self, name: &str) -> bool {
    self.operation(name).is_some()
  }
}
