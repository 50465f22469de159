use async_trait::async_trait;
use prober_service::Value;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::InvokeError;
use crate::invoker::{Invoker, InvokerFactory};

/// Request body for an operation call.
#[derive(Debug, Serialize)]
struct CallRequest<'a> {
  args: &'a [Value],
}

/// Reply body for an operation call.
#[derive(Debug, Deserialize)]
struct CallResponse {
  #[serde(default)]
  output: Option<Value>,
}

/// Creates [`HttpInvoker`]s that call operations as JSON `POST` requests.
#[derive(Debug, Clone)]
pub struct HttpInvokerFactory {
  client: Client,
}

impl HttpInvokerFactory {
  pub fn new(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl InvokerFactory for HttpInvokerFactory {
  async fn create_invoker(
    &self,
    endpoint_id: &str,
    port_type_name: &str,
  ) -> Result<Box<dyn Invoker>, InvokeError> {
    let proxy_error = |message: String| InvokeError::ProxyCreation {
      endpoint_id: endpoint_id.to_string(),
      port_type_name: port_type_name.to_string(),
      message,
    };

    if port_type_name.is_empty() {
      return Err(proxy_error("port type name is empty".to_string()));
    }

    let mut base = Url::parse(endpoint_id).map_err(|e| proxy_error(e.to_string()))?;
    if base.scheme() != "http" && base.scheme() != "https" {
      return Err(proxy_error(format!("unsupported scheme '{}'", base.scheme())));
    }
    base.set_query(None);
    base.set_fragment(None);
    base
      .path_segments_mut()
      .map_err(|_| proxy_error("endpoint url cannot be a base".to_string()))?
      .pop_if_empty()
      .push(port_type_name);

    debug!(endpoint_id = %endpoint_id, base_url = %base, "bound invoker");

    Ok(Box::new(HttpInvoker {
      client: self.client.clone(),
      base,
    }))
  }
}

/// Calls operations of one interface over HTTP.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
  client: Client,
  base: Url,
}

impl HttpInvoker {
  /// URL an operation is posted to.
  pub fn operation_url(&self, operation: &str) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.push(operation);
    }
    url
  }
}

#[async_trait]
impl Invoker for HttpInvoker {
  async fn call(&self, operation: &str, args: &[Value]) -> Result<Value, InvokeError> {
    let failed = |message: String| InvokeError::Invocation {
      operation: operation.to_string(),
      message,
    };

    let response = self
      .client
      .post(self.operation_url(operation))
      .json(&CallRequest { args })
      .send()
      .await
      .map_err(|e| failed(e.to_string()))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| failed(e.to_string()))?;

    if !status.is_success() {
      return Err(failed(format!("server responded with status {}: {}", status, body)));
    }

    if body.trim().is_empty() {
      return Ok(Value::Null);
    }

    let reply: CallResponse =
      serde_json::from_str(&body).map_err(|e| failed(format!("invalid reply: {}", e)))?;

    Ok(reply.output.unwrap_or(Value::Null))
  }
}
