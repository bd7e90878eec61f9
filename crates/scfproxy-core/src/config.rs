//! Proxy configuration.
//!
//! Provides [`ProxyConfig`], which decides the scheme and host prepended to
//! every translated request path. The host can be overridden through the
//! [`CUSTOM_HOST_VARIABLE`] environment variable.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Environment variable holding a custom `scheme://host[:port]` for
/// translated requests.
pub const CUSTOM_HOST_VARIABLE: &str = "SCF_API_HOST";

/// Scheme and host used when no custom host is configured.
pub const DEFAULT_SERVER_ADDRESS: &str = "https://scf-api-proxy.com";

/// Request translation configuration.
///
/// # Examples
///
/// ```
/// use scfproxy_core::ProxyConfig;
///
/// let config = ProxyConfig::builder()
///     .server_address("http://localhost:9000/")
///     .build();
/// assert_eq!(config.server_address, "http://localhost:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Scheme and host (no trailing slash) prepended to request paths.
    #[builder(
        default = String::from(DEFAULT_SERVER_ADDRESS),
        setter(transform = |address: &str| normalize_server_address(address))
    )]
    pub server_address: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            server_address: String::from(DEFAULT_SERVER_ADDRESS),
        }
    }
}

impl ProxyConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// A set variable replaces the default verbatim, minus a trailing `/`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup(CUSTOM_HOST_VARIABLE) {
            config.server_address = normalize_server_address(&v);
        }

        config
    }
}

fn normalize_server_address(address: &str) -> String {
    address.strip_suffix('/').unwrap_or(address).to_owned()
}
