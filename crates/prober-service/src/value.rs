//! Argument and return values.
//!
//! Remote operations take positional arguments of a handful of primitive types.
//! A [`Value`] is one such argument (or a returned result). `Value::Null` stands in
//! for anything that is not a primitive, and for "no output" on return.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors converting loosely-typed JSON into a [`Value`].
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
  /// The JSON value has no primitive counterpart.
  #[error("unsupported argument value: {value}")]
  Unsupported { value: String },

  /// A JSON number that fits neither i64 nor f64.
  #[error("number out of range: {value}")]
  OutOfRange { value: String },
}

/// A single positional value sent to or received from a remote operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
  String(String),
  Integer(i64),
  Float(f64),
  Boolean(bool),
  Char(char),
  Null,
}

impl Value {
  /// Convert a JSON scalar into a value.
  ///
  /// Integers become [`Value::Integer`], every other number becomes
  /// [`Value::Float`]. Arrays and objects are rejected.
  pub fn from_json(json: &serde_json::Value) -> Result<Self, ValueError> {
    match json {
      serde_json::Value::Null => Ok(Value::Null),
      serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
      serde_json::Value::String(s) => Ok(Value::String(s.clone())),
      serde_json::Value::Number(n) => {
        if let Some(i) = n.as_i64() {
          Ok(Value::Integer(i))
        } else if let Some(f) = n.as_f64() {
          Ok(Value::Float(f))
        } else {
          Err(ValueError::OutOfRange {
            value: n.to_string(),
          })
        }
      }
      other => Err(ValueError::Unsupported {
        value: other.to_string(),
      }),
    }
  }

  /// Whether this is the null / "no output" value.
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::String(s) => f.write_str(s),
      Value::Integer(i) => write!(f, "{}", i),
      Value::Float(x) => write!(f, "{}", x),
      Value::Boolean(b) => write!(f, "{}", b),
      Value::Char(c) => write!(f, "{}", c),
      Value::Null => f.write_str("null"),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Integer(i)
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Float(x)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Boolean(b)
  }
}

impl From<char> for Value {
  fn from(c: char) -> Self {
    Value::Char(c)
  }
}

/// Compare two argument lists as sets of distinct values.
///
/// Order and repeated occurrences are ignored: `[1, 1]` equals `[1]`, and
/// `[1, 2]` equals `[2, 1]`.
pub fn inputs_equal(a: &[Value], b: &[Value]) -> bool {
  a.iter().all(|v| b.contains(v)) && b.iter().all(|v| a.contains(v))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_renders_canonical_strings() {
    assert_eq!(Value::from("Test Input").to_string(), "Test Input");
    assert_eq!(Value::Integer(50).to_string(), "50");
    assert_eq!(Value::Float(50.5).to_string(), "50.5");
    assert_eq!(Value::Boolean(false).to_string(), "false");
    assert_eq!(Value::Char('a').to_string(), "a");
    assert_eq!(Value::Null.to_string(), "null");
  }

  #[test]
  fn test_from_json_scalars() {
    assert_eq!(
      Value::from_json(&serde_json::json!(42)).unwrap(),
      Value::Integer(42)
    );
    assert_eq!(
      Value::from_json(&serde_json::json!(1.25)).unwrap(),
      Value::Float(1.25)
    );
    assert_eq!(
      Value::from_json(&serde_json::json!("x")).unwrap(),
      Value::String("x".to_string())
    );
    assert_eq!(
      Value::from_json(&serde_json::json!(true)).unwrap(),
      Value::Boolean(true)
    );
    assert_eq!(
      Value::from_json(&serde_json::Value::Null).unwrap(),
      Value::Null
    );
  }

  #[test]
  fn test_from_json_rejects_compound_values() {
    let result = Value::from_json(&serde_json::json!([1, 2]));
    assert!(matches!(result, Err(ValueError::Unsupported { .. })));

    let result = Value::from_json(&serde_json::json!({"a": 1}));
    assert!(matches!(result, Err(ValueError::Unsupported { .. })));
  }

  #[test]
  fn test_serde_uses_type_tags() {
    let json = serde_json::to_value(Value::Char('a')).unwrap();
    assert_eq!(json, serde_json::json!({"type": "char", "value": "a"}));

    let json = serde_json::to_value(Value::Null).unwrap();
    assert_eq!(json, serde_json::json!({"type": "null"}));

    let back: Value = serde_json::from_value(serde_json::json!({"type": "integer", "value": 7})).unwrap();
    assert_eq!(back, Value::Integer(7));
  }

  #[test]
  fn test_inputs_equal_ignores_order_and_duplicates() {
    let one = vec![Value::Integer(1)];
    let one_one = vec![Value::Integer(1), Value::Integer(1)];
    assert!(inputs_equal(&one, &one_one));

    let ab = vec![Value::from("a"), Value::from("b")];
    let ba = vec![Value::from("b"), Value::from("a")];
    assert!(inputs_equal(&ab, &ba));
  }

  #[test]
  fn test_inputs_equal_distinguishes_variants_and_values() {
    assert!(!inputs_equal(&[Value::Integer(50)], &[Value::Float(50.0)]));
    assert!(!inputs_equal(&[Value::Integer(50)], &[Value::Integer(51)]));
    assert!(!inputs_equal(&[Value::Integer(1)], &[]));
    assert!(inputs_equal(&[], &[]));
  }
}
