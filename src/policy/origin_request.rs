//! Origin request (forwarding) policies for the HTTP-origin bundles.

use serde::{Deserialize, Serialize};

use crate::policy::cache::Forwarding;

/// Values forwarded to the origin without joining the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRequestPolicy {
    pub name: String,
    pub query_strings: Forwarding,
    pub headers: Forwarding,
    pub cookies: Forwarding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagedOriginRequestPolicy {
    /// Every viewer header, cookie and query string except `Host`.
    AllViewerExceptHostHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OriginRequestPolicyRef {
    Managed { policy: ManagedOriginRequestPolicy },
    Existing { id: String },
    Custom(OriginRequestPolicy),
}

/// Default forwarding for function URL origins, which must receive their own `Host`.
pub const DEFAULT_ORIGIN_REQUEST_POLICY: ManagedOriginRequestPolicy =
    ManagedOriginRequestPolicy::AllViewerExceptHostHeader;
