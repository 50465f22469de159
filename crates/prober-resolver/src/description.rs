//! Parsing of JSON description documents.
//!
//! A description document is a serialized [`ServiceInfo`]:
//!
//! ```json
//! {
//!   "service_name": "Calculator",
//!   "operations": [
//!     {
//!       "name": "Add",
//!       "port_type_name": "ICalculator",
//!       "input_parameters": [{"name": "a", "type": "int"}, {"name": "b", "type": "int"}],
//!       "output_parameters": [{"name": "result", "type": "int"}]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use prober_service::ServiceInfo;

use crate::error::ResolveError;

/// Parse and validate a description document.
pub(crate) fn parse_description(endpoint_id: &str, content: &str) -> Result<ServiceInfo, ResolveError> {
  let info: ServiceInfo = serde_json::from_str(content).map_err(|e| ResolveError::Malformed {
    endpoint_id: endpoint_id.to_string(),
    message: e.to_string(),
  })?;

  let mut seen = HashSet::new();
  for op in &info.operations {
    if !seen.insert(op.name.as_str()) {
      return Err(ResolveError::DuplicateOperation {
        endpoint_id: endpoint_id.to_string(),
        operation: op.name.clone(),
      });
    }
  }

  Ok(info)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_keeps_reported_order() {
    let content = r#"{
      "service_name": "Svc",
      "operations": [
        {"name": "Zeta", "port_type_name": "IPort"},
        {"name": "Alpha", "port_type_name": "IPort", "input_parameters": [{"name": "x", "type": "int"}]}
      ]
    }"#;

    let info = parse_description("http://svc", content).unwrap();
    assert_eq!(info.service_name, "Svc");
    assert_eq!(info.operations[0].name, "Zeta");
    assert_eq!(info.operations[1].name, "Alpha");
    assert!(info.operations[0].input_parameters.is_empty());
    assert_eq!(info.operations[1].input_parameters[0].type_tag, "int");
  }

  #[test]
  fn test_parse_rejects_duplicates() {
    let content = r#"{
      "service_name": "Svc",
      "operations": [
        {"name": "Op", "port_type_name": "IPort"},
        {"name": "Op", "port_type_name": "IOther"}
      ]
    }"#;

    let result = parse_description("http://svc", content);
    assert!(matches!(
      result,
      Err(ResolveError::DuplicateOperation { ref operation, .. }) if operation == "Op"
    ));
  }

  #[test]
  fn test_parse_rejects_garbage() {
    let result = parse_description("http://svc", "<wsdl/>");
    assert!(matches!(result, Err(ResolveError::Malformed { .. })));
  }
}
