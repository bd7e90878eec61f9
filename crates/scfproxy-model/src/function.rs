//! Per-invocation runtime context.

use serde::{Deserialize, Serialize};

/// Identity and limits of the current function invocation.
///
/// Supplied by the invocation runtime and carried alongside a translated
/// request. The proxy never reads its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionContext {
    /// Name of the function being invoked.
    pub function_name: String,
    /// Published version (or `$LATEST`).
    pub function_version: String,
    /// Namespace the function belongs to.
    pub namespace: String,
    /// Configured memory limit in MB.
    pub memory_limit_in_mb: u32,
    /// Configured execution time limit in milliseconds.
    pub time_limit_in_ms: u64,
    /// Runtime-assigned invocation id.
    pub request_id: String,
    /// Raw function environment, as delivered by the runtime.
    pub environment: String,
    /// Region the function runs in.
    pub region: String,
    /// Owning account app id.
    pub app_id: String,
    /// Owning account uin.
    pub uin: String,
}
