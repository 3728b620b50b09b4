//! Typed asynchronous client core for the beer catalog service.
//!
//! # Overview
//! `BeerRequests` builds `HttpRequest` values and interprets `HttpResponse`
//! values without touching the network. `BeerClient` puts an `HttpTransport`
//! between the two and runs every operation as a cancellable
//! `OperationHandle`.
//!
//! # Design
//! - Both `BeerRequests` and `BeerClient` are stateless apart from the base
//!   URL; a client can be cloned freely and shared across tasks.
//! - Optional parameters are `Option`s and are left off the wire entirely
//!   when absent.
//! - Every failure is an `ApiError` variant: caller error, not found,
//!   rejected status, transport failure or decode failure.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod beer_client;
pub mod client;
pub mod config;
pub mod error;
pub mod handle;
pub mod http;
pub mod transport;
pub mod types;

pub use beer_client::BeerClient;
pub use client::BeerRequests;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ErrorKind, TransportError};
pub use handle::OperationHandle;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::HttpTransport;
#[cfg(feature = "reqwest-transport")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use types::{parse_beer_id, Acknowledgement, Beer, BeerPage, ListBeersParams};
