//! Wire types exchanged between the API Gateway trigger and a cloud function.
//!
//! This crate only describes data. It provides:
//!
//! - **Events** ([`event`]): the inbound [`ProxyEvent`] envelope and the
//!   [`GatewayContext`] metadata the gateway attaches to it.
//! - **Responses** ([`response`]): the [`ProxyResponse`] returned upstream.
//! - **Function context** ([`function`]): the [`FunctionContext`] supplied by
//!   the invocation runtime for each call.
//!
//! Translation between these types and `http` requests/responses lives in
//! `scfproxy-core`.

pub mod event;
pub mod function;
pub mod response;

pub use event::{GatewayContext, ProxyEvent, QueryString, RequestIdentity};
pub use function::FunctionContext;
pub use response::ProxyResponse;
