//! Outbound API Gateway proxy response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The response returned to the gateway for one invocation.
///
/// Headers hold a single value per name; the gateway format has no way to
/// carry repeated headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, one value per name.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Body text, or the standard base64 encoding of binary bodies.
    #[serde(default)]
    pub body: String,
    /// Whether `body` is base64 encoded.
    #[serde(default)]
    pub is_base64_encoded: bool,
}
