//! Prober Service
//!
//! This crate contains the data types shared by every part of prober:
//!
//! - [`Value`] - a single argument or return value passed to a remote operation
//! - [`ParameterDescriptor`], [`OperationInfo`], [`ServiceInfo`] - endpoint metadata
//!   as reported by a metadata resolver
//! - [`OperationRecord`], [`EndpointResult`] - the accumulated test state for an
//!   endpoint and each of its operations
//!
//! All types serialize to JSON so results can be printed or persisted as-is.

mod metadata;
mod result;
mod value;

pub use metadata::{OperationInfo, ParameterDescriptor, ServiceInfo};
pub use result::{EndpointResult, OperationRecord};
pub use value::{Value, ValueError, inputs_equal};
