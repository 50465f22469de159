//! Prober Resolver
//!
//! Resolves an endpoint id into a [`ServiceInfo`](prober_service::ServiceInfo):
//! the service name and the operations it exposes, with their parameters.
//!
//! The [`MetadataResolver`] trait is the seam the engine depends on. Two
//! implementations are provided:
//! - [`HttpMetadataResolver`] fetches a JSON description document from the endpoint URL
//! - [`FsMetadataResolver`] reads description documents from a local directory

mod description;
mod error;
mod fs;
mod http;
mod resolver;

pub use error::ResolveError;
pub use fs::FsMetadataResolver;
pub use http::HttpMetadataResolver;
pub use resolver::MetadataResolver;
