//! Prober Invoker
//!
//! Calls operations on remote endpoints.
//!
//! An [`InvokerFactory`] binds to one interface (port type) of an endpoint and
//! hands back an [`Invoker`], which calls operations by name with positional
//! [`Value`](prober_service::Value) arguments.
//!
//! [`HttpInvokerFactory`] is a JSON-over-HTTP implementation: each call is a
//! `POST {endpoint}/{port_type}/{operation}` with body `{"args": [...]}`, and the
//! reply body is `{"output": ...}`.

mod error;
mod http;
mod invoker;

pub use error::InvokeError;
pub use http::{HttpInvoker, HttpInvokerFactory};
pub use invoker::{Invoker, InvokerFactory};
