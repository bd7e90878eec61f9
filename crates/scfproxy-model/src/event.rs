//! Inbound API Gateway proxy event.
//!
//! The JSON shape matches what the API Gateway trigger delivers to a function:
//!
//! ```json
//! {
//!   "path": "/orders",
//!   "httpMethod": "GET",
//!   "headers": { "accept": "application/json" },
//!   "queryString": { "page": ["1"], "sort": "asc" },
//!   "body": "",
//!   "requestContext": {
//!     "serviceId": "service-abc",
//!     "requestId": "req-123",
//!     "httpMethod": "GET",
//!     "path": "/orders",
//!     "sourceIp": "10.0.0.1",
//!     "stage": "release",
//!     "identity": { "secretId": null }
//!   }
//! }
//! ```
//!
//! Missing or `null` collections deserialize to empty ones.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters keyed by name, each holding its values in arrival order.
pub type QueryString = HashMap<String, Vec<String>>;

/// An API Gateway proxy event as received by the function.
///
/// Immutable input: translation never mutates the event it reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// Request path as seen by the gateway, possibly including a base path.
    #[serde(default)]
    pub path: String,

    /// HTTP method in whatever casing the gateway sent.
    #[serde(default, rename = "httpMethod")]
    pub method: String,

    /// Request headers, one value per name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,

    /// Multi-value query parameters.
    ///
    /// The gateway sends a bare string for single values and an array when a
    /// parameter repeats; both are read as a sequence.
    #[serde(default, deserialize_with = "deserialize_query_string")]
    pub query_string: QueryString,

    /// Request body, passed through verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    /// Gateway metadata for this request.
    #[serde(default, rename = "requestContext")]
    pub context: GatewayContext,

    /// Header parameters extracted by the gateway. Not interpreted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub header_parameters: HashMap<String, String>,

    /// Path parameters extracted by the gateway. Not interpreted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: HashMap<String, String>,

    /// Query parameters extracted by the gateway. Not interpreted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,
}

impl ProxyEvent {
    /// Create an event carrying only a path and a method.
    #[must_use]
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            ..Self::default()
        }
    }
}

/// Metadata about the originating request supplied by the gateway.
///
/// Passed through opaquely: values are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayContext {
    /// API Gateway service identifier.
    #[serde(default, rename = "serviceId")]
    pub service_id: String,

    /// Gateway-assigned request identifier.
    #[serde(default, rename = "requestId")]
    pub request_id: String,

    /// Method of the original request at the gateway.
    #[serde(default, rename = "httpMethod")]
    pub method: String,

    /// Path of the original request at the gateway.
    #[serde(default)]
    pub path: String,

    /// Client address as seen by the gateway.
    #[serde(default, rename = "sourceIp")]
    pub source_ip: String,

    /// Deployment stage (e.g. `release`, `prepub`, `test`).
    #[serde(default)]
    pub stage: String,

    /// Caller identity, when the API uses key authentication.
    #[serde(default)]
    pub identity: RequestIdentity,
}

/// Identity of the caller for key-authenticated APIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdentity {
    /// Secret id used to sign the request, if any.
    #[serde(default)]
    pub secret_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn deserialize_query_string<'de, D>(deserializer: D) -> Result<QueryString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, OneOrMany>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, values)| match values {
            OneOrMany::One(v) => (name, vec![v]),
            OneOrMany::Many(vs) => (name, vs),
        })
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
