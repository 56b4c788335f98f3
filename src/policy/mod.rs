//! Cache, response-header and forwarding policy resolution.
//!
//! # Data Flow
//! ```text
//! PolicyOverrides (config, every slot optional)
//!     → one resolve_* function per slot (override or default)
//!     → CachePolicySet (fully resolved, one value per slot)
//!     → routing::behavior builds rule bundles from it
//! ```
//!
//! # Design Decisions
//! - Each slot resolves independently; no slot looks at another's override
//! - Predefined policy property sets are `const` data (see `cache.rs`)
//! - `static_client_max_age_default_secs` only shapes the default header policy;
//!   it has no effect when the response headers slot is overridden

pub mod cache;
pub mod headers;
pub mod origin_request;

use serde::{Deserialize, Serialize};

pub use cache::{CachePolicy, CachePolicyRef, Forwarding, ManagedCachePolicy};
pub use headers::{ResponseHeadersPolicy, ResponseHeadersPolicyRef};
pub use origin_request::{ManagedOriginRequestPolicy, OriginRequestPolicy, OriginRequestPolicyRef};

use cache::{IMAGE_CACHE_POLICY, SERVER_CACHE_POLICY};
use headers::{static_response_headers, DEFAULT_STATIC_CLIENT_MAX_AGE_SECS};
use origin_request::DEFAULT_ORIGIN_REQUEST_POLICY;

/// Caller-supplied policy overrides. Absent slots fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyOverrides {
    pub static_response_headers_policy: Option<ResponseHeadersPolicyRef>,
    pub static_cache_policy: Option<CachePolicyRef>,
    pub server_cache_policy: Option<CachePolicyRef>,
    pub image_cache_policy: Option<CachePolicyRef>,
    pub server_origin_request_policy: Option<OriginRequestPolicyRef>,
    pub static_client_max_age_default_secs: Option<u64>,
}

/// The resolved policy for every slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachePolicySet {
    pub static_response_headers: ResponseHeadersPolicyRef,
    pub static_cache: CachePolicyRef,
    pub server_cache: CachePolicyRef,
    pub image_cache: CachePolicyRef,
    pub origin_request: OriginRequestPolicyRef,
}

impl CachePolicySet {
    pub fn resolve(overrides: &PolicyOverrides) -> Self {
        Self {
            static_response_headers: resolve_static_response_headers(overrides),
            static_cache: resolve_static_cache(overrides),
            server_cache: resolve_server_cache(overrides),
            image_cache: resolve_image_cache(overrides),
            origin_request: resolve_origin_request(overrides),
        }
    }
}

pub fn resolve_static_response_headers(overrides: &PolicyOverrides) -> ResponseHeadersPolicyRef {
    match &overrides.static_response_headers_policy {
        Some(policy) => policy.clone(),
        None => {
            let max_age = overrides
                .static_client_max_age_default_secs
                .unwrap_or(DEFAULT_STATIC_CLIENT_MAX_AGE_SECS);
            ResponseHeadersPolicyRef::Custom(static_response_headers(max_age))
        }
    }
}

pub fn resolve_static_cache(overrides: &PolicyOverrides) -> CachePolicyRef {
    overrides
        .static_cache_policy
        .clone()
        .unwrap_or(CachePolicyRef::Managed {
            policy: ManagedCachePolicy::CachingOptimized,
        })
}

pub fn resolve_server_cache(overrides: &PolicyOverrides) -> CachePolicyRef {
    overrides
        .server_cache_policy
        .clone()
        .unwrap_or_else(|| CachePolicyRef::Custom(SERVER_CACHE_POLICY.to_policy()))
}

pub fn resolve_image_cache(overrides: &PolicyOverrides) -> CachePolicyRef {
    overrides
        .image_cache_policy
        .clone()
        .unwrap_or_else(|| CachePolicyRef::Custom(IMAGE_CACHE_POLICY.to_policy()))
}

pub fn resolve_origin_request(overrides: &PolicyOverrides) -> OriginRequestPolicyRef {
    overrides
        .server_origin_request_policy
        .clone()
        .unwrap_or(OriginRequestPolicyRef::Managed {
            policy: DEFAULT_ORIGIN_REQUEST_POLICY,
        })
}
