//! Pluggable HTTP execution layer.
//!
//! `BeerClient` never performs I/O itself; it hands a fully built
//! `HttpRequest` to an `HttpTransport` and interprets whatever comes back.
//! Bring your own implementation (hyper, a test double, a platform API) or
//! enable one of the bundled ones:
//!
//! - `reqwest-transport` (default): async, connection pooled.
//! - `ureq-transport`: blocking agent driven from tokio's blocking pool.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "reqwest-transport")]
mod reqwest_impl;
#[cfg(feature = "ureq-transport")]
mod ureq_impl;

#[cfg(feature = "reqwest-transport")]
pub use reqwest_impl::ReqwestTransport;
#[cfg(feature = "ureq-transport")]
pub use ureq_impl::UreqTransport;

/// Executes one HTTP round-trip.
///
/// Implementations must return every response the server sends, including
/// 4xx and 5xx, as `Ok(HttpResponse)`. `Err` is reserved for requests that
/// never produced a response. Implementations must not retry.
///
/// Dropping the returned future must abandon the in-flight request; this is
/// how `OperationHandle::cancel` reaches the network layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
