//! Framework-agnostic event handling.
//!
//! [`ProxyAdapter`] wires the two halves of the crate together for one
//! invocation:
//!
//! ```text
//! ProxyEvent
//!   -> RequestAccessor (http::Request<Bytes>)
//!   -> HttpHandler::serve_http (writes into ProxyResponseWriter)
//!   -> ProxyResponseWriter::proxy_response
//! ProxyResponse
//! ```
//!
//! Any framework that can serve an `http::Request<Bytes>` into a
//! [`ResponseWriter`] plugs in by implementing [`HttpHandler`]; plain closures
//! already do.

use bytes::Bytes;
use scfproxy_model::{FunctionContext, ProxyEvent, ProxyResponse};

use crate::error::ProxyResult;
use crate::request::RequestAccessor;
use crate::response::{ProxyResponseWriter, ResponseWriter};

/// Something that serves a single HTTP request into a response writer.
pub trait HttpHandler {
    /// Handle `request`, writing status, headers, and body into `writer`.
    fn serve_http(&self, writer: &mut dyn ResponseWriter, request: http::Request<Bytes>);
}

impl<F> HttpHandler for F
where
    F: Fn(&mut dyn ResponseWriter, http::Request<Bytes>),
{
    fn serve_http(&self, writer: &mut dyn ResponseWriter, request: http::Request<Bytes>) {
        self(writer, request);
    }
}

/// Runs an [`HttpHandler`] against proxy events.
pub struct ProxyAdapter<H> {
    handler: H,
    accessor: RequestAccessor,
}

impl<H> std::fmt::Debug for ProxyAdapter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyAdapter")
            .field("handler", &"...")
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<H: HttpHandler> ProxyAdapter<H> {
    /// Create an adapter that resolves the request host from the environment.
    pub fn new(handler: H) -> Self {
        Self::with_accessor(handler, RequestAccessor::new())
    }

    /// Create an adapter around a preconfigured accessor.
    pub fn with_accessor(handler: H, accessor: RequestAccessor) -> Self {
        Self { handler, accessor }
    }

    /// Set the base path stripped from incoming paths. Call before serving
    /// traffic.
    pub fn strip_base_path(&mut self, base_path: &str) -> String {
        self.accessor.strip_base_path(base_path)
    }

    /// Handle an event, passing the gateway context to the handler in the
    /// [`API_GW_CONTEXT_HEADER`](crate::API_GW_CONTEXT_HEADER) header.
    pub fn proxy(&self, event: &ProxyEvent) -> ProxyResult<ProxyResponse> {
        let request = self.accessor.proxy_event_to_http_request(event)?;
        self.serve(request)
    }

    /// Handle an event, passing the gateway and runtime contexts to the
    /// handler through the request extensions.
    pub fn proxy_with_context(
        &self,
        runtime: FunctionContext,
        event: &ProxyEvent,
    ) -> ProxyResult<ProxyResponse> {
        let request = self.accessor.event_to_request_with_context(runtime, event)?;
        self.serve(request)
    }

    fn serve(&self, request: http::Request<Bytes>) -> ProxyResult<ProxyResponse> {
        let mut writer = ProxyResponseWriter::new();
        self.handler.serve_http(&mut writer, request);
        writer.proxy_response()
    }
}
