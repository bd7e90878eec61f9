//! Proxy event to `http::Request` translation.
//!
//! [`RequestAccessor`] turns a [`ProxyEvent`] into an `http::Request<Bytes>`
//! that any `http`-based framework can route. Gateway metadata travels with
//! the request in one of two ways, each with its own entry point and its own
//! accessor:
//!
//! - **Header mode** ([`RequestAccessor::proxy_event_to_http_request`]): the
//!   [`GatewayContext`] is serialized to JSON under [`API_GW_CONTEXT_HEADER`]
//!   and read back with [`gateway_context_from_header`].
//! - **Extension mode** ([`RequestAccessor::event_to_request_with_context`]):
//!   the [`GatewayContext`] and the runtime [`FunctionContext`] are stored in
//!   the request extensions under private key types and read back with
//!   [`gateway_context_from_request`] and [`runtime_context_from_request`].
//!
//! Both modes also add the `x-apigateway-*` headers listed in
//! [`SYNTHETIC_HEADERS`].

use bytes::Bytes;
use http::header::HeaderValue;
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};
use scfproxy_model::{FunctionContext, GatewayContext, ProxyEvent};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, ProxyResult};

/// Header carrying the JSON-encoded gateway context in header mode.
pub const API_GW_CONTEXT_HEADER: &str = "X-GoLambdaProxy-ApiGw-Context";

/// Headers added to every translated request, in insertion order.
pub const SYNTHETIC_HEADERS: [&str; 7] = [
    "x-apigateway-serviceid",
    "x-apigateway-requestid",
    "x-apigateway-method",
    "x-apigateway-path",
    "x-apigateway-sourceip",
    "x-forwarded-for",
    "x-apigateway-stage",
];

/// Query component escaping: everything except unreserved characters.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path escaping. `%` and `/` are left alone so existing escapes and
/// segment boundaries survive.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
struct GatewayContextSlot(GatewayContext);

#[derive(Debug, Clone)]
struct RuntimeContextSlot(FunctionContext);

/// Converts proxy events into `http` requests.
///
/// The base path is configured once at startup through
/// [`strip_base_path`](Self::strip_base_path); translation itself only reads
/// the accessor, so a configured accessor can be shared across invocations.
#[derive(Debug, Clone, Default)]
pub struct RequestAccessor {
    strip_base_path: String,
    config: Option<ProxyConfig>,
}

impl RequestAccessor {
    /// Create an accessor that resolves the host from the environment on
    /// every translation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accessor with a fixed configuration. The environment is
    /// never consulted.
    #[must_use]
    pub fn with_config(config: ProxyConfig) -> Self {
        Self {
            strip_base_path: String::new(),
            config: Some(config),
        }
    }

    /// Set the base path removed from every request path before routing.
    ///
    /// Blank input disables stripping. Otherwise the stored value always
    /// starts with `/` and never ends with one. Returns the stored value.
    pub fn strip_base_path(&mut self, base_path: &str) -> String {
        if base_path.trim().is_empty() {
            self.strip_base_path.clear();
            return String::new();
        }

        let mut normalized = if base_path.starts_with('/') {
            base_path.to_owned()
        } else {
            format!("/{base_path}")
        };
        if normalized.ends_with('/') {
            normalized.pop();
        }

        self.strip_base_path.clone_from(&normalized);
        normalized
    }

    /// The currently configured base path, empty when disabled.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.strip_base_path
    }

    /// Translate an event and embed its gateway context as a JSON header.
    pub fn proxy_event_to_http_request(
        &self,
        event: &ProxyEvent,
    ) -> ProxyResult<http::Request<Bytes>> {
        let mut request = self.event_to_request(event)?;

        let json = serde_json::to_string(&event.context)?;
        let value = HeaderValue::from_str(&json).map_err(|e| invalid_request(event, e.into()))?;
        request.headers_mut().append(API_GW_CONTEXT_HEADER, value);

        Ok(request)
    }

    /// Translate an event and attach its gateway context, together with the
    /// runtime context, to the request extensions.
    pub fn event_to_request_with_context(
        &self,
        runtime: FunctionContext,
        event: &ProxyEvent,
    ) -> ProxyResult<http::Request<Bytes>> {
        let mut request = self.event_to_request(event)?;

        let extensions = request.extensions_mut();
        extensions.insert(GatewayContextSlot(event.context.clone()));
        extensions.insert(RuntimeContextSlot(runtime));

        Ok(request)
    }

    /// Translate an event into a request with its headers and the
    /// `x-apigateway-*` headers, but no gateway context attachment.
    pub fn event_to_request(&self, event: &ProxyEvent) -> ProxyResult<http::Request<Bytes>> {
        let path = self.resolve_path(&event.path);
        let server_address = match &self.config {
            Some(config) => config.server_address.clone(),
            None => ProxyConfig::from_env().server_address,
        };

        let mut url = format!("{server_address}{path}");
        let query = build_query_string(event);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let method = if event.method.is_empty() {
            http::Method::GET.as_str().to_owned()
        } else {
            event.method.to_uppercase()
        };

        let mut builder = http::Request::builder().method(method.as_str()).uri(url);
        for (name, value) in &event.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let ctx = &event.context;
        let synthetic = [
            &ctx.service_id,
            &ctx.request_id,
            &ctx.method,
            &ctx.path,
            &ctx.source_ip,
            &ctx.source_ip,
            &ctx.stage,
        ];
        for (name, value) in SYNTHETIC_HEADERS.into_iter().zip(synthetic) {
            builder = builder.header(name, value.as_str());
        }

        let request = builder
            .body(Bytes::from(event.body.clone()))
            .map_err(|e| invalid_request(event, e))?;

        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            request_id = %ctx.request_id,
            "translated proxy event"
        );

        Ok(request)
    }

    fn resolve_path(&self, raw: &str) -> String {
        let mut path = raw;
        if self.strip_base_path.len() > 1 {
            if let Some(rest) = path.strip_prefix(self.strip_base_path.as_str()) {
                path = rest;
            }
        }

        let encoded = utf8_percent_encode(path, PATH_ENCODE_SET).to_string();
        if encoded.starts_with('/') {
            encoded
        } else {
            format!("/{encoded}")
        }
    }
}

/// Read the gateway context embedded by
/// [`RequestAccessor::proxy_event_to_http_request`].
pub fn gateway_context_from_header<B>(request: &http::Request<B>) -> ProxyResult<GatewayContext> {
    let raw = request
        .headers()
        .get(API_GW_CONTEXT_HEADER)
        .map(HeaderValue::as_bytes)
        .filter(|raw| !raw.is_empty())
        .ok_or(ProxyError::MissingContext)?;

    serde_json::from_slice(raw).map_err(|e| {
        tracing::warn!(error = %e, "could not decode API Gateway context header");
        ProxyError::Deserialization(e)
    })
}

/// Look up the gateway context attached by
/// [`RequestAccessor::event_to_request_with_context`].
///
/// Returns `None` for requests translated in header mode.
#[must_use]
pub fn gateway_context_from_request<B>(request: &http::Request<B>) -> Option<&GatewayContext> {
    request
        .extensions()
        .get::<GatewayContextSlot>()
        .map(|slot| &slot.0)
}

/// Look up the runtime context attached by
/// [`RequestAccessor::event_to_request_with_context`].
#[must_use]
pub fn runtime_context_from_request<B>(request: &http::Request<B>) -> Option<&FunctionContext> {
    request
        .extensions()
        .get::<RuntimeContextSlot>()
        .map(|slot| &slot.0)
}

/// Only the first value of each parameter is kept; the gateway format has
/// already collapsed most repeats by the time the event arrives.
fn build_query_string(event: &ProxyEvent) -> String {
    event
        .query_string
        .iter()
        .filter_map(|(name, values)| values.first().map(|value| (name, value)))
        .map(|(name, value)| format!("{}={}", query_escape(name), query_escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_escape(s: &str) -> String {
    // Every literal `%` is itself escaped, so `%20` can only come from a space.
    utf8_percent_encode(s, QUERY_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

fn invalid_request(event: &ProxyEvent, source: http::Error) -> ProxyError {
    tracing::warn!(
        method = %event.method,
        path = %event.path,
        error = %source,
        "could not convert proxy event to http request"
    );
    ProxyError::InvalidRequest {
        method: event.method.clone(),
        path: event.path.clone(),
        source,
    }
}
