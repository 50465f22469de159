//! Accumulated test state for endpoints and their operations.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::metadata::{OperationInfo, ServiceInfo};
use crate::value::{Value, inputs_equal};

/// Test state for a single operation.
///
/// Pairs the operation's metadata with the input last tried, the output it
/// produced, and whether that attempt completed without error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
  #[serde(flatten)]
  pub info: OperationInfo,
  /// Arguments used for the most recent attempt. `None` until first attempted.
  pub input: Option<Vec<Value>>,
  /// Output of the most recent successful attempt.
  pub output: Option<Value>,
  /// True iff the most recent attempt with `input` succeeded.
  pub is_valid: bool,
}

impl OperationRecord {
  pub fn new(info: OperationInfo) -> Self {
    Self {
      info,
      input: None,
      output: None,
      is_valid: false,
    }
  }

  pub fn name(&self) -> &str {
    &self.info.name
  }

  /// Whether `other` matches the stored input (see [`inputs_equal`]).
  ///
  /// Always false while no input has been stored.
  pub fn input_equals(&self, other: &[Value]) -> bool {
    match &self.input {
      Some(input) => inputs_equal(input, other),
      None => false,
    }
  }
}

/// Aggregate test outcome for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
  pub endpoint_id: String,
  /// Service name reported by the endpoint's metadata.
  pub name: String,
  /// Whether the endpoint could be described and bound to.
  pub succeeded: bool,
  /// Whether this result was taken from the result cache.
  pub from_cache: bool,
  /// Every failure message recorded against this endpoint, oldest first.
  pub errors: Vec<String>,
  /// One record per reported operation, in reported order. Names are unique.
  ///
  /// Serialized as a JSON object keyed by operation name.
  #[serde(with = "operations_by_name")]
  pub operations: Vec<OperationRecord>,
}

impl EndpointResult {
  /// An empty, unsuccessful result for an endpoint that has not been described.
  pub fn new(endpoint_id: impl Into<String>) -> Self {
    Self {
      endpoint_id: endpoint_id.into(),
      name: String::new(),
      succeeded: false,
      from_cache: false,
      errors: Vec::new(),
      operations: Vec::new(),
    }
  }

  /// Build a result with a fresh record for every operation in `service`.
  pub fn from_service(endpoint_id: impl Into<String>, service: &ServiceInfo) -> Self {
    let mut result = Self::new(endpoint_id);
    result.name = service.service_name.clone();
    for info in &service.operations {
      if result.operation(&info.name).is_none() {
        result.operations.push(OperationRecord::new(info.clone()));
      }
    }
    result
  }

  pub fn operation(&self, name: &str) -> Option<&OperationRecord> {
    self.operations.iter().find(|op| op.name() == name)
  }

  pub fn operation_mut(&mut self, name: &str) -> Option<&mut OperationRecord> {
    self.operations.iter_mut().find(|op| op.name() == name)
  }

  /// Append a failure message.
  pub fn record_error(&mut self, error: impl Display) {
    self.errors.push(error.to_string());
  }
}

/// Serializes operation records as a map from name to record, in order.
mod operations_by_name {
  use std::collections::HashSet;
  use std::fmt;

  use serde::de::{self, MapAccess, Visitor};
  use serde::ser::SerializeMap;
  use serde::{Deserializer, Serializer};

  use super::OperationRecord;

  pub fn serialize<S: Serializer>(
    operations: &[OperationRecord],
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(operations.len()))?;
    for op in operations {
      map.serialize_entry(op.name(), op)?;
    }
    map.end()
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Vec<OperationRecord>, D::Error> {
    deserializer.deserialize_map(OperationsVisitor)
  }

  struct OperationsVisitor;

  impl<'de> Visitor<'de> for OperationsVisitor {
    type Value = Vec<OperationRecord>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("a map of operation name to operation record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
      let mut seen = HashSet::new();
      let mut operations = Vec::with_capacity(access.size_hint().unwrap_or(0));

      while let Some((key, record)) = access.next_entry::<String, OperationRecord>()? {
        if key != record.name() {
          return Err(de::Error::custom(format!(
            "operation key '{}' does not match record name '{}'",
            key,
            record.name()
          )));
        }
        if !seen.insert(key.clone()) {
          return Err(de::Error::custom(format!("duplicate operation '{}'", key)));
        }
        operations.push(record);
      }

      Ok(operations)
    }
  }
}
