//! Response headers policies for the static bundle.

use serde::{Deserialize, Serialize};

/// Browser cache lifetime for immutable static assets when not overridden (30 days).
pub const DEFAULT_STATIC_CLIENT_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// A header injected into viewer responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHeader {
    pub header: String,
    pub value: String,
    /// Replace a header of the same name sent by the origin.
    #[serde(rename = "override", default)]
    pub override_origin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeadersPolicy {
    pub name: String,
    #[serde(default)]
    pub custom_headers: Vec<CustomHeader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseHeadersPolicyRef {
    Existing { id: String },
    Custom(ResponseHeadersPolicy),
}

/// `cache-control: public,max-age=<N>,immutable`, leaving any origin-sent value intact.
pub fn static_response_headers(max_age_secs: u64) -> ResponseHeadersPolicy {
    ResponseHeadersPolicy {
        name: "static-response-headers".to_string(),
        custom_headers: vec![CustomHeader {
            header: "cache-control".to_string(),
            value: format!("public,max-age={},immutable", max_age_secs),
            override_origin: false,
        }],
    }
}
