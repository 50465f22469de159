//! Synthetic input generation.
//!
//! Produces one type-correct argument per parameter from its declared type tag.
//! The values are fixed, so the same parameter list always yields the same input;
//! the batch orchestrator relies on this to skip operations that already failed
//! with generated input.

use prober_service::{ParameterDescriptor, Value};

/// Generated value for `string` parameters.
pub const GENERATED_STRING: &str = "Test Input";
/// Generated value for `char` parameters.
pub const GENERATED_CHAR: char = 'a';
/// Generated value for integer parameters.
pub const GENERATED_INTEGER: i64 = 50;
/// Generated value for floating-point parameters.
pub const GENERATED_FLOAT: f64 = 50.5;
/// Generated value for `boolean` parameters.
pub const GENERATED_BOOLEAN: bool = false;

/// Generate an argument list for the given parameters, in parameter order.
///
/// Unknown type tags (typically complex types) get [`Value::Null`].
pub fn generate_input(parameters: &[ParameterDescriptor]) -> Vec<Value> {
  parameters
    .iter()
    .map(|p| generate_value(&p.type_tag))
    .collect()
}

/// Generate a value for a single type tag.
pub fn generate_value(type_tag: &str) -> Value {
  match type_tag {
    "string" => Value::String(GENERATED_STRING.to_string()),
    "char" => Value::Char(GENERATED_CHAR),
    "int" | "long" | "unsignedlong" | "short" | "unsignedshort" => {
      Value::Integer(GENERATED_INTEGER)
    }
    "float" | "double" | "decimal" => Value::Float(GENERATED_FLOAT),
    "boolean" => Value::Boolean(GENERATED_BOOLEAN),
    _ => Value::Null,
  }
}
