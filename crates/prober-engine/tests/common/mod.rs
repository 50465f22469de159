//! Mock collaborators shared by the engine integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prober_invoker::{InvokeError, Invoker, InvokerFactory};
use prober_resolver::{MetadataResolver, ResolveError};
use prober_service::{OperationInfo, ParameterDescriptor, ServiceInfo, Value};

/// Build an operation on port `IService` with the given parameter type tags.
pub fn operation(name: &str, param_types: &[&str]) -> OperationInfo {
  OperationInfo {
    name: name.to_string(),
    port_type_name: "IService".to_string(),
    input_parameters: param_types
      .iter()
      .enumerate()
      .map(|(i, tag)| ParameterDescriptor::new(format!("arg{}", i), *tag))
      .collect(),
    output_parameters: vec![],
  }
}

pub fn service(name: &str, operations: Vec<OperationInfo>) -> ServiceInfo {
  ServiceInfo {
    service_name: name.to_string(),
    operations,
  }
}

/// Resolver backed by a map of known endpoints. Unknown endpoints are unavailable.
#[derive(Clone, Default)]
pub struct MockResolver {
  services: Arc<Mutex<HashMap<String, ServiceInfo>>>,
  calls: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&self, endpoint_id: &str, service: ServiceInfo) {
    self
      .services
      .lock()
      .unwrap()
      .insert(endpoint_id.to_string(), service);
  }

  /// Number of describe calls made for an endpoint.
  pub fn calls_for(&self, endpoint_id: &str) -> usize {
    self
      .calls
      .lock()
      .unwrap()
      .iter()
      .filter(|id| id.as_str() == endpoint_id)
      .count()
  }
}

#[async_trait]
impl MetadataResolver for MockResolver {
  async fn describe(&self, endpoint_id: &str) -> Result<ServiceInfo, ResolveError> {
    self.calls.lock().unwrap().push(endpoint_id.to_string());
    tokio::task::yield_now().await;

    let service = self.services.lock().unwrap().get(endpoint_id).cloned();
    service.ok_or_else(|| ResolveError::Unavailable {
      endpoint_id: endpoint_id.to_string(),
      message: "connection refused".to_string(),
    })
  }
}

/// A recorded operation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
  pub endpoint_id: String,
  pub operation: String,
  pub args: Vec<Value>,
}

#[derive(Default)]
struct InvokerState {
  /// Endpoints for which binding fails.
  unbindable: HashSet<String>,
  /// Operations that always fail.
  failing: HashSet<String>,
  /// Operations that only succeed with exactly these arguments.
  accepted_args: HashMap<String, Vec<Value>>,
  /// Operations that return nothing.
  void: HashSet<String>,
  bindings: usize,
  calls: Vec<Call>,
}

/// Invoker factory with scripted behaviour that records every call.
///
/// By default every operation succeeds and returns `"<operation> ok"`.
#[derive(Clone, Default)]
pub struct MockInvokers {
  state: Arc<Mutex<InvokerState>>,
}

impl MockInvokers {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn make_unbindable(&self, endpoint_id: &str) {
    self
      .state
      .lock()
      .unwrap()
      .unbindable
      .insert(endpoint_id.to_string());
  }

  pub fn make_bindable(&self, endpoint_id: &str) {
    self.state.lock().unwrap().unbindable.remove(endpoint_id);
  }

  pub fn fail_operation(&self, operation: &str) {
    self
      .state
      .lock()
      .unwrap()
      .failing
      .insert(operation.to_string());
  }

  pub fn accept_only(&self, operation: &str, args: Vec<Value>) {
    self
      .state
      .lock()
      .unwrap()
      .accepted_args
      .insert(operation.to_string(), args);
  }

  pub fn return_nothing(&self, operation: &str) {
    self
      .state
      .lock()
      .unwrap()
      .void
      .insert(operation.to_string());
  }

  pub fn calls(&self) -> Vec<Call> {
    self.state.lock().unwrap().calls.clone()
  }

  pub fn calls_to(&self, endpoint_id: &str, operation: &str) -> usize {
    self
      .calls()
      .iter()
      .filter(|c| c.endpoint_id == endpoint_id && c.operation == operation)
      .count()
  }

  pub fn bindings(&self) -> usize {
    self.state.lock().unwrap().bindings
  }
}

#[async_trait]
impl InvokerFactory for MockInvokers {
  async fn create_invoker(
    &self,
    endpoint_id: &str,
    port_type_name: &str,
  ) -> Result<Box<dyn Invoker>, InvokeError> {
    let mut state = self.state.lock().unwrap();
    if state.unbindable.contains(endpoint_id) {
      return Err(InvokeError::ProxyCreation {
        endpoint_id: endpoint_id.to_string(),
        port_type_name: port_type_name.to_string(),
        message: "no such port".to_string(),
      });
    }
    state.bindings += 1;

    Ok(Box::new(MockInvoker {
      endpoint_id: endpoint_id.to_string(),
      state: self.state.clone(),
    }))
  }
}

struct MockInvoker {
  endpoint_id: String,
  state: Arc<Mutex<InvokerState>>,
}

#[async_trait]
impl Invoker for MockInvoker {
  async fn call(&self, operation: &str, args: &[Value]) -> Result<Value, InvokeError> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(Call {
      endpoint_id: self.endpoint_id.clone(),
      operation: operation.to_string(),
      args: args.to_vec(),
    });

    let rejected = state.failing.contains(operation)
      || state
        .accepted_args
        .get(operation)
        .is_some_and(|accepted| accepted.as_slice() != args);
    if rejected {
      return Err(InvokeError::Invocation {
        operation: operation.to_string(),
        message: "fault: bad input".to_string(),
      });
    }

    if state.void.contains(operation) {
      return Ok(Value::Null);
    }
    Ok(Value::String(format!("{} ok", operation)))
  }
}
