//! Test orchestration for prober.
//!
//! This crate provides the [`Prober`] which handles:
//! - Targeted tests of one operation with caller-supplied input
//! - Batch tests of whole endpoints with generated input
//! - Caching of successful results, shared across both kinds of test
//!
//! # Architecture
//!
//! ```text
//! Prober
//! ├── test_operation_given_input(endpoint, op, input) -> EndpointResult
//! └── test_endpoints(endpoints) -> HashMap<endpoint, EndpointResult>
//!       │
//!       ├── ResultCache      - per-endpoint lock, check and commit
//!       ├── MetadataResolver - describes endpoints on a cache miss
//!       ├── generate_input   - synthetic arguments from parameter types
//!       └── test_operation   - binds an invoker and calls one operation
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use prober_engine::Prober;
//!
//! let prober = Prober::new(resolver, invokers);
//!
//! // Probe whole endpoints
//! let results = prober.test_endpoints(&["http://host/svc".to_string()]).await;
//!
//! // Probe one operation with specific input
//! let result = prober
//!     .test_operation_given_input("http://host/svc", "Add", vec![Value::Integer(1)])
//!     .await;
//! ```

mod cache;
mod error;
mod input;
mod prober;
mod tester;

pub use cache::{EndpointLock, ResultCache};
pub use error::ProbeError;
pub use input::{generate_input, generate_value};
pub use prober::Prober;
pub use tester::test_operation;
