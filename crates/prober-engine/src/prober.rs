//! Test orchestration.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use prober_config::EngineConfig;
use prober_invoker::InvokerFactory;
use prober_resolver::MetadataResolver;
use prober_service::{EndpointResult, Value};
use tracing::{debug, info, instrument, warn};

use crate::cache::{EndpointLock, ResultCache};
use crate::error::ProbeError;
use crate::input::generate_input;
use crate::tester::test_operation;

/// Probes endpoints and caches what it learns about them.
///
/// Generic over the metadata resolver and invoker factory so callers can plug in
/// any transport. The [`ResultCache`] can be shared between probers.
pub struct Prober<R: MetadataResolver, I: InvokerFactory> {
  resolver: R,
  invokers: I,
  cache: Arc<ResultCache>,
  config: EngineConfig,
}

impl<R: MetadataResolver, I: InvokerFactory> Prober<R, I> {
  /// Create a prober with its own empty cache and default settings.
  pub fn new(resolver: R, invokers: I) -> Self {
    Self {
      resolver,
      invokers,
      cache: Arc::new(ResultCache::new()),
      config: EngineConfig::default(),
    }
  }

  /// Use an existing cache.
  pub fn with_cache(mut self, cache: Arc<ResultCache>) -> Self {
    self.cache = cache;
    self
  }

  pub fn with_config(mut self, config: EngineConfig) -> Self {
    self.config = config;
    self
  }

  pub fn cache(&self) -> &Arc<ResultCache> {
    &self.cache
  }

  /// Test a single operation with caller-supplied input.
  ///
  /// Returns the cached result untouched when the endpoint is cached and the
  /// operation's stored input matches `input`. Otherwise the endpoint is described
  /// afresh, only `op_name` is invoked, and the result is cached if the endpoint
  /// was reachable and the operation succeeded.
  #[instrument(
    name = "test_operation_given_input",
    skip_all,
    fields(endpoint_id = %endpoint_id, operation = %op_name)
  )]
  pub async fn test_operation_given_input(
    &self,
    endpoint_id: &str,
    op_name: &str,
    input: Vec<Value>,
  ) -> EndpointResult {
    let lock = self.cache.lock(endpoint_id).await;

    if let Some(mut cached) = lock.get()
      && cached
        .operation(op_name)
        .is_some_and(|op| op.input_equals(&input))
    {
      info!(endpoint_id = %endpoint_id, operation = %op_name, "cache_hit");
      cached.from_cache = true;
      return cached;
    }

    let mut result = EndpointResult::new(endpoint_id);
    match self.resolver.describe(endpoint_id).await {
      Ok(service) if service.has_operation(op_name) => {
        result = EndpointResult::from_service(endpoint_id, &service);
        result.succeeded = true;
        if let Some(record) = result.operation_mut(op_name) {
          record.input = Some(input);
        }
        test_operation(&self.invokers, &mut result, op_name).await;
      }
      Ok(service) => {
        warn!(endpoint_id = %endpoint_id, operation = %op_name, "operation_not_found");
        result.name = service.service_name;
        result.record_error(ProbeError::OperationNotFound {
          endpoint_id: endpoint_id.to_string(),
          operation: op_name.to_string(),
        });
      }
      Err(e) => {
        warn!(endpoint_id = %endpoint_id, error = %e, "metadata_unavailable");
        result.record_error(ProbeError::MetadataUnavailable(e));
      }
    }

    let operation_valid = result.operation(op_name).is_some_and(|op| op.is_valid);
    if result.succeeded && operation_valid {
      lock.commit(result.clone());
    }

    result
  }

  /// Test every operation of every endpoint with generated input.
  ///
  /// Endpoints are processed concurrently, up to
  /// `max_concurrent_endpoints` at a time. When an id appears more than once the
  /// last occurrence's result is the one returned.
  #[instrument(name = "test_endpoints", skip_all, fields(count = endpoint_ids.len()))]
  pub async fn test_endpoints(&self, endpoint_ids: &[String]) -> HashMap<String, EndpointResult> {
    let concurrency = self.config.max_concurrent_endpoints.max(1);

    let results: Vec<(String, EndpointResult)> = stream::iter(endpoint_ids.iter().cloned())
      .map(|endpoint_id| async move {
        let result = self.test_endpoint(&endpoint_id).await;
        (endpoint_id, result)
      })
      .buffered(concurrency)
      .collect()
      .await;

    let mut by_endpoint = HashMap::with_capacity(results.len());
    for (endpoint_id, result) in results {
      by_endpoint.insert(endpoint_id, result);
    }
    by_endpoint
  }

  /// Batch-test one endpoint while holding its cache lock.
  async fn test_endpoint(&self, endpoint_id: &str) -> EndpointResult {
    let lock = self.cache.lock(endpoint_id).await;

    match lock.get() {
      Some(cached) => self.retest_cached(&lock, cached).await,
      None => self.test_uncached(&lock).await,
    }
  }

  /// Retest the operations of a cached endpoint that are not yet valid.
  async fn retest_cached(
    &self,
    lock: &EndpointLock<'_>,
    mut result: EndpointResult,
  ) -> EndpointResult {
    info!(endpoint_id = %lock.endpoint_id(), "cache_hit");
    result.from_cache = true;

    let pending: Vec<String> = result
      .operations
      .iter()
      .filter(|op| !op.is_valid)
      .map(|op| op.name().to_string())
      .collect();

    for op_name in pending {
      let Some(record) = result.operation_mut(&op_name) else {
        continue;
      };

      let input = generate_input(&record.info.input_parameters);
      if record.input_equals(&input) {
        debug!(
          endpoint_id = %lock.endpoint_id(),
          operation = %op_name,
          "generated input already failed, skipping"
        );
        continue;
      }

      record.input = Some(input);
      test_operation(&self.invokers, &mut result, &op_name).await;
    }

    if result.succeeded {
      lock.commit(result.clone());
    } else {
      lock.evict();
    }

    result
  }

  /// Describe an endpoint and test all of its operations.
  async fn test_uncached(&self, lock: &EndpointLock<'_>) -> EndpointResult {
    let endpoint_id = lock.endpoint_id();

    let service = match self.resolver.describe(endpoint_id).await {
      Ok(service) => service,
      Err(e) => {
        warn!(endpoint_id = %endpoint_id, error = %e, "metadata_unavailable");
        let mut result = EndpointResult::new(endpoint_id);
        result.record_error(ProbeError::MetadataUnavailable(e));
        return result;
      }
    };

    let mut result = EndpointResult::from_service(endpoint_id, &service);
    result.succeeded = true;

    for info in &service.operations {
      if let Some(record) = result.operation_mut(&info.name) {
        record.input = Some(generate_input(&info.input_parameters));
      }
      test_operation(&self.invokers, &mut result, &info.name).await;
    }

    info!(
      endpoint_id = %endpoint_id,
      succeeded = result.succeeded,
      valid_operations = result.operations.iter().filter(|op| op.is_valid).count(),
      "endpoint_tested"
    );

    if result.succeeded {
      lock.commit(result.clone());
    }

    result
  }
}
