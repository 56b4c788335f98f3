//! Distribution aggregate and routing rule types.
//!
//! # Responsibilities
//! - Describe a backend bundle (origin, methods, policies, transforms)
//! - Collect routing rules in insertion order, rejecting duplicate patterns
//! - Close the mutation window: `DistributionBuilder::finish` yields a read-only `Distribution`

use serde::{Deserialize, Serialize};

use crate::domain::CertificateRef;
use crate::error::ValidationFailure;
use crate::platform::{EdgeFunctionRef, ViewerFunctionRef};
use crate::policy::{CachePolicyRef, OriginRequestPolicyRef, ResponseHeadersPolicyRef};
use crate::routing::pattern::PathPattern;

/// Destination of a routing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Static,
    Server,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    /// Object storage bucket holding the static assets.
    Bucket { bucket: String },
    /// HTTPS origin, addressed by host name.
    Http { domain_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedMethods {
    GetHeadOptions,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachedMethods {
    GetHeadOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    RedirectToHttps,
}

/// Point in the request lifecycle where a transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformEvent {
    ViewerRequest,
    OriginRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestTransform {
    /// Full edge function (may read the request body).
    EdgeFunction {
        function: EdgeFunctionRef,
        event: TransformEvent,
        include_body: bool,
    },
    /// Lightweight viewer function.
    ViewerFunction {
        function: ViewerFunctionRef,
        event: TransformEvent,
    },
}

/// Everything a rule needs except its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorOptions {
    pub backend: BackendKind,
    pub allowed_methods: AllowedMethods,
    pub cached_methods: CachedMethods,
    pub viewer_protocol_policy: ViewerProtocolPolicy,
    pub compress: bool,
    pub cache_policy: CachePolicyRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_request_policy: Option<OriginRequestPolicyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_headers_policy: Option<ResponseHeadersPolicyRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<RequestTransform>,
}

/// A complete backend bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub origin: Origin,
    #[serde(flatten)]
    pub options: BehaviorOptions,
}

impl Behavior {
    pub fn backend(&self) -> BackendKind {
        self.options.backend
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub pattern: PathPattern,
    #[serde(flatten)]
    pub behavior: Behavior,
}

/// Identity the platform assigns to a finalized distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistributionIdentity {
    pub id: String,
    pub domain_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceClass {
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpVersion {
    #[serde(rename = "http1.1")]
    Http1_1,
    #[serde(rename = "http2")]
    Http2,
    #[serde(rename = "http2and3")]
    Http2And3,
    #[serde(rename = "http3")]
    Http3,
}

/// Minimum TLS security policy for viewer connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityPolicy {
    #[serde(rename = "TLSv1.2_2018")]
    TlsV1_2_2018,
    #[serde(rename = "TLSv1.2_2019")]
    TlsV1_2_2019,
    #[serde(rename = "TLSv1.2_2021")]
    TlsV1_2_2021,
}

/// Distribution-level properties of a new distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Empty string means no default root object.
    pub default_root_object: String,
    pub minimum_protocol_version: SecurityPolicy,
    pub price_class: PriceClass,
    pub http_version: HttpVersion,
    pub enable_ipv6: bool,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_acl_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_bucket: Option<String>,
}

impl Default for DistributionProps {
    fn default() -> Self {
        Self {
            comment: None,
            default_root_object: String::new(),
            minimum_protocol_version: SecurityPolicy::TlsV1_2_2021,
            price_class: PriceClass::PriceClassAll,
            http_version: HttpVersion::Http2,
            enable_ipv6: true,
            enabled: true,
            web_acl_id: None,
            logging_bucket: None,
        }
    }
}

/// Caller overrides for a new distribution.
///
/// Domain names, certificate and default behavior are not overridable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionOverrides {
    pub comment: Option<String>,
    pub default_root_object: Option<String>,
    pub minimum_protocol_version: Option<SecurityPolicy>,
    pub price_class: Option<PriceClass>,
    pub http_version: Option<HttpVersion>,
    pub enable_ipv6: Option<bool>,
    pub enabled: Option<bool>,
    pub web_acl_id: Option<String>,
    pub logging_bucket: Option<String>,
}

impl DistributionOverrides {
    /// Apply the overrides on top of the default props.
    pub fn to_props(&self) -> DistributionProps {
        let defaults = DistributionProps::default();
        DistributionProps {
            comment: self.comment.clone().or(defaults.comment),
            default_root_object: self
                .default_root_object
                .clone()
                .unwrap_or(defaults.default_root_object),
            minimum_protocol_version: self
                .minimum_protocol_version
                .unwrap_or(defaults.minimum_protocol_version),
            price_class: self.price_class.unwrap_or(defaults.price_class),
            http_version: self.http_version.unwrap_or(defaults.http_version),
            enable_ipv6: self.enable_ipv6.unwrap_or(defaults.enable_ipv6),
            enabled: self.enabled.unwrap_or(defaults.enabled),
            web_acl_id: self.web_acl_id.clone().or(defaults.web_acl_id),
            logging_bucket: self.logging_bucket.clone().or(defaults.logging_bucket),
        }
    }
}

/// A finalized distribution. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    existing: Option<DistributionIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    props: Option<DistributionProps>,
    domain_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    certificate: Option<CertificateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_behavior: Option<Behavior>,
    rules: Vec<RoutingRule>,
}

impl Distribution {
    /// Identity of a caller-supplied distribution; `None` for a new one.
    pub fn existing(&self) -> Option<&DistributionIdentity> {
        self.existing.as_ref()
    }

    pub fn props(&self) -> Option<&DistributionProps> {
        self.props.as_ref()
    }

    pub fn domain_names(&self) -> &[String] {
        &self.domain_names
    }

    pub fn certificate(&self) -> Option<&CertificateRef> {
        self.certificate.as_ref()
    }

    pub fn default_behavior(&self) -> Option<&Behavior> {
        self.default_behavior.as_ref()
    }

    /// Additional rules in insertion order.
    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.pattern.as_str()).collect()
    }
}

/// Mutable construction phase of a distribution. Rules can only be appended.
#[derive(Debug)]
pub struct DistributionBuilder {
    inner: Distribution,
}

impl DistributionBuilder {
    /// Start a new distribution.
    pub fn new(
        props: DistributionProps,
        domain_names: Vec<String>,
        certificate: Option<CertificateRef>,
        default_behavior: Behavior,
    ) -> Self {
        Self {
            inner: Distribution {
                existing: None,
                props: Some(props),
                domain_names,
                certificate,
                default_behavior: Some(default_behavior),
                rules: Vec::new(),
            },
        }
    }

    /// Append to a distribution owned by the caller.
    pub fn existing(identity: DistributionIdentity) -> Self {
        Self {
            inner: Distribution {
                existing: Some(identity),
                props: None,
                domain_names: Vec::new(),
                certificate: None,
                default_behavior: None,
                rules: Vec::new(),
            },
        }
    }

    pub fn add_rule(
        &mut self,
        pattern: PathPattern,
        origin: Origin,
        options: BehaviorOptions,
    ) -> Result<(), ValidationFailure> {
        if self.inner.rules.iter().any(|r| r.pattern == pattern) {
            return Err(ValidationFailure::DuplicatePattern {
                pattern: pattern.to_string(),
            });
        }

        tracing::debug!(pattern = %pattern, backend = ?options.backend, "Routing rule added");
        self.inner.rules.push(RoutingRule {
            pattern,
            behavior: Behavior { origin, options },
        });
        Ok(())
    }

    pub fn add_behavior(
        &mut self,
        pattern: PathPattern,
        behavior: &Behavior,
    ) -> Result<(), ValidationFailure> {
        self.add_rule(pattern, behavior.origin.clone(), behavior.options.clone())
    }

    pub fn finish(self) -> Distribution {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ManagedCachePolicy;

    fn options(backend: BackendKind) -> BehaviorOptions {
        BehaviorOptions {
            backend,
            allowed_methods: AllowedMethods::GetHeadOptions,
            cached_methods: CachedMethods::GetHeadOptions,
            viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
            compress: true,
            cache_policy: CachePolicyRef::Managed {
                policy: ManagedCachePolicy::CachingOptimized,
            },
            origin_request_policy: None,
            response_headers_policy: None,
            transforms: Vec::new(),
        }
    }

    fn bucket() -> Origin {
        Origin::Bucket {
            bucket: "assets".into(),
        }
    }

    #[test]
    fn test_rules_keep_insertion_order() {
        let mut builder = DistributionBuilder::existing(DistributionIdentity {
            id: "E1".into(),
            domain_name: "d1.example.net".into(),
        });
        for p in ["b/*", "a", "c/*"] {
            builder
                .add_rule(PathPattern::parse(p).unwrap(), bucket(), options(BackendKind::Static))
                .unwrap();
        }
        let dist = builder.finish();
        assert_eq!(dist.patterns(), ["b/*", "a", "c/*"]);
        assert!(dist.props().is_none());
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let mut builder = DistributionBuilder::existing(DistributionIdentity {
            id: "E1".into(),
            domain_name: "d1.example.net".into(),
        });
        let pattern = PathPattern::parse("api/*").unwrap();
        builder
            .add_rule(pattern.clone(), bucket(), options(BackendKind::Static))
            .unwrap();
        let err = builder
            .add_rule(pattern, bucket(), options(BackendKind::Server))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::DuplicatePattern {
                pattern: "api/*".into()
            }
        );
        let dist = builder.finish();
        assert_eq!(dist.patterns(), ["api/*"]);
        assert_eq!(dist.rules()[0].behavior.backend(), BackendKind::Static);
    }

    #[test]
    fn test_overrides_apply_on_defaults() {
        let overrides = DistributionOverrides {
            comment: Some("docs".into()),
            price_class: Some(PriceClass::PriceClass100),
            ..Default::default()
        };
        let props = overrides.to_props();
        assert_eq!(props.comment.as_deref(), Some("docs"));
        assert_eq!(props.price_class, PriceClass::PriceClass100);
        assert_eq!(props.minimum_protocol_version, SecurityPolicy::TlsV1_2_2021);
        assert_eq!(props.default_root_object, "");
    }

    #[test]
    fn test_overrides_reject_composer_fields() {
        let parsed: Result<DistributionOverrides, _> =
            toml::from_str(r#"domain_names = ["evil.example.com"]"#);
        assert!(parsed.is_err());
    }
}
