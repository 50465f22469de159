//! Prober HTTP
//!
//! Content fetching for REST-style endpoints.
//!
//! - [`ContentFetcher`] - downloads the body at a URL as text
//! - [`HttpFetcher`] - `reqwest` implementation of [`ContentFetcher`]
//! - [`RestTester`] - validates a REST operation request, builds its URL and fetches it

mod error;
mod fetcher;
mod rest;

pub use error::{FetchError, RestError};
pub use fetcher::{ContentFetcher, HttpFetcher};
pub use rest::{RestTester, build_rest_url};
