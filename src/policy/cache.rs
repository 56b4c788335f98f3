//! Cache policy definitions and the predefined server/image defaults.

use serde::{Deserialize, Serialize};

const DAY_SECS: u64 = 24 * 60 * 60;

/// How a class of request values (query strings, headers, cookies) reaches the origin
/// and participates in the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Forwarding {
    None,
    All,
    AllowList(Vec<String>),
}

/// A fully specified cache policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub name: String,
    pub query_strings: Forwarding,
    pub headers: Forwarding,
    pub cookies: Forwarding,
    pub min_ttl_secs: u64,
    pub default_ttl_secs: u64,
    pub max_ttl_secs: u64,
    #[serde(default)]
    pub enable_accept_encoding_brotli: bool,
    #[serde(default)]
    pub enable_accept_encoding_gzip: bool,
}

/// Cache policies managed by the platform, referenced by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagedCachePolicy {
    CachingOptimized,
    CachingDisabled,
}

/// Cache policy slot value on a routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachePolicyRef {
    Managed { policy: ManagedCachePolicy },
    Existing { id: String },
    Custom(CachePolicy),
}

/// Immutable property set for one of the predefined cache policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicyDefaults {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub min_ttl_secs: u64,
    pub default_ttl_secs: u64,
    pub max_ttl_secs: u64,
}

/// Dynamic handler responses: nothing is cached unless the response says so.
pub const SERVER_CACHE_POLICY: CachePolicyDefaults = CachePolicyDefaults {
    name: "server-cache-policy",
    headers: &[
        "accept",
        "rsc",
        "next-router-prefetch",
        "next-router-state-tree",
        "next-url",
    ],
    min_ttl_secs: 0,
    default_ttl_secs: 0,
    max_ttl_secs: 365 * DAY_SECS,
};

/// Optimized images: content negotiation on `accept`, cached for a day by default.
pub const IMAGE_CACHE_POLICY: CachePolicyDefaults = CachePolicyDefaults {
    name: "image-cache-policy",
    headers: &["accept"],
    min_ttl_secs: 0,
    default_ttl_secs: DAY_SECS,
    max_ttl_secs: 365 * DAY_SECS,
};

impl CachePolicyDefaults {
    /// Materialize the defaults: all query strings and cookies, brotli and gzip on.
    pub fn to_policy(&self) -> CachePolicy {
        CachePolicy {
            name: self.name.to_string(),
            query_strings: Forwarding::All,
            headers: Forwarding::AllowList(self.headers.iter().map(|h| h.to_string()).collect()),
            cookies: Forwarding::All,
            min_ttl_secs: self.min_ttl_secs,
            default_ttl_secs: self.default_ttl_secs,
            max_ttl_secs: self.max_ttl_secs,
            enable_accept_encoding_brotli: true,
            enable_accept_encoding_gzip: true,
        }
    }
}
