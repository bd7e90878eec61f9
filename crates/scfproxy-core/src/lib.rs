//! Translation between API Gateway proxy events and `http` requests/responses.
//!
//! This crate lets an `http`-based web application run inside a cloud function
//! triggered by API Gateway. It handles:
//!
//! - **Requests** ([`request`]): [`RequestAccessor`] converts a
//!   [`ProxyEvent`](scfproxy_model::ProxyEvent) into an `http::Request<Bytes>`,
//!   stripping a configured base path, rebuilding the query string, copying
//!   headers, and attaching the gateway context.
//!
//! - **Responses** ([`response`]): [`ProxyResponseWriter`] implements
//!   [`ResponseWriter`], captures what the application writes, and renders a
//!   [`ProxyResponse`](scfproxy_model::ProxyResponse).
//!
//! - **Sniffing** ([`sniff`]): content-type detection for bodies written
//!   without a `Content-Type`.
//!
//! - **Adapter** ([`adapter`]): [`ProxyAdapter`] runs an [`HttpHandler`] for
//!   one event end to end.
//!
//! # Usage
//!
//! ```rust
//! use bytes::Bytes;
//! use scfproxy_core::{ProxyAdapter, ResponseWriter};
//! use scfproxy_model::ProxyEvent;
//!
//! let adapter = ProxyAdapter::new(|w: &mut dyn ResponseWriter, _req: http::Request<Bytes>| {
//!     w.write(b"pong").unwrap();
//! });
//! let resp = adapter.proxy(&ProxyEvent::new("/ping", "GET")).unwrap();
//! assert_eq!(resp.status_code, 200);
//! assert_eq!(resp.body, "pong");
//! ```

pub mod adapter;
mod config;
mod error;
pub mod request;
pub mod response;
pub mod sniff;

pub use adapter::{HttpHandler, ProxyAdapter};
pub use config::{CUSTOM_HOST_VARIABLE, DEFAULT_SERVER_ADDRESS, ProxyConfig};
pub use error::{ProxyError, ProxyResult};
pub use request::{
    API_GW_CONTEXT_HEADER, RequestAccessor, SYNTHETIC_HEADERS, gateway_context_from_header,
    gateway_context_from_request, runtime_context_from_request,
};
pub use response::{ProxyResponseWriter, ResponseWriter, write_response};
