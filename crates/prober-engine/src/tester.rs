//! Single operation testing.

use prober_invoker::InvokerFactory;
use prober_service::EndpointResult;
use tracing::{info, warn};

use crate::error::ProbeError;

/// Invoke one operation of `result` with its stored input and record the outcome.
///
/// - Binding failure: `result.succeeded` becomes false, the record is left untouched.
/// - Call failure: the record is marked invalid.
/// - Success: the output is stored and the record is marked valid.
///
/// Every failure is appended to `result.errors`; nothing is returned to the caller.
pub async fn test_operation<I>(invokers: &I, result: &mut EndpointResult, op_name: &str)
where
  I: InvokerFactory + ?Sized,
{
  let Some(record) = result.operation(op_name) else {
    warn!(
      endpoint_id = %result.endpoint_id,
      operation = %op_name,
      "operation has no record, skipping"
    );
    return;
  };
  let port_type_name = record.info.port_type_name.clone();
  let args = record.input.clone().unwrap_or_default();

  let invoker = match invokers
    .create_invoker(&result.endpoint_id, &port_type_name)
    .await
  {
    Ok(invoker) => invoker,
    Err(e) => {
      warn!(
        endpoint_id = %result.endpoint_id,
        port_type = %port_type_name,
        error = %e,
        "invoker_creation_failed"
      );
      result.succeeded = false;
      result.record_error(ProbeError::ProxyCreationFailed(e));
      return;
    }
  };

  match invoker.call(op_name, &args).await {
    Ok(output) => {
      info!(
        endpoint_id = %result.endpoint_id,
        operation = %op_name,
        output = %output,
        "operation_succeeded"
      );
      if let Some(record) = result.operation_mut(op_name) {
        record.output = Some(output);
        record.is_valid = true;
      }
    }
    Err(e) => {
      warn!(
        endpoint_id = %result.endpoint_id,
        operation = %op_name,
        error = %e,
        "operation_failed"
      );
      if let Some(record) = result.operation_mut(op_name) {
        record.is_valid = false;
      }
      result.record_error(ProbeError::InvocationFailed(e));
    }
  }
}
