//! Backend bundles and the path patterns routed to them.
//!
//! # Responsibilities
//! - Build the static, server and image behavior bundles from resolved policies
//! - Enumerate the fixed server/image patterns
//! - Turn manifest entries into static patterns, enforcing the rule ceiling
//!
//! # Design Decisions
//! - Artifact count is checked before any artifact pattern, so an oversized
//!   manifest fails on the ceiling rather than on its first odd name
//! - Artifact patterns are validated before base-path prefixing; the error
//!   names the pattern as derived from the entry

use url::Url;

use crate::distribution::{
    AllowedMethods, BackendKind, Behavior, BehaviorOptions, CachedMethods, Origin, RequestTransform,
    ViewerProtocolPolicy,
};
use crate::error::{ValidationFailure, MAX_ROUTING_RULES};
use crate::manifest::BuildManifest;
use crate::policy::CachePolicySet;
use crate::routing::pattern::{self, PathPattern};

/// One rule slot stays reserved for the default/root behavior.
pub const MAX_STATIC_ARTIFACTS: usize = MAX_ROUTING_RULES - 1;

pub const API_PATTERN: &str = "api/*";
pub const DATA_PATTERN: &str = "_next/data/*";
pub const IMAGE_PATTERN: &str = "_next/image*";

/// Inputs shared by the three bundles.
#[derive(Debug, Clone)]
pub struct BehaviorInputs<'a> {
    pub static_bucket: &'a str,
    pub server_url: &'a Url,
    pub image_url: &'a Url,
    pub policies: &'a CachePolicySet,
    /// Edge-sign transforms; empty when function URLs are open.
    pub sign_transforms: Vec<RequestTransform>,
    pub host_forwarding: RequestTransform,
}

/// Rule bundles for the three backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorSet {
    pub static_assets: Behavior,
    pub server: Behavior,
    pub image: Behavior,
}

impl BehaviorSet {
    pub fn build(inputs: BehaviorInputs<'_>) -> Result<Self, ValidationFailure> {
        let policies = inputs.policies;

        let static_assets = Behavior {
            origin: Origin::Bucket {
                bucket: inputs.static_bucket.to_string(),
            },
            options: BehaviorOptions {
                backend: BackendKind::Static,
                allowed_methods: AllowedMethods::GetHeadOptions,
                cached_methods: CachedMethods::GetHeadOptions,
                viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
                compress: true,
                cache_policy: policies.static_cache.clone(),
                origin_request_policy: None,
                response_headers_policy: Some(policies.static_response_headers.clone()),
                transforms: Vec::new(),
            },
        };

        let mut server_transforms = inputs.sign_transforms.clone();
        server_transforms.push(inputs.host_forwarding);

        let server = Behavior {
            origin: http_origin("server", inputs.server_url)?,
            options: BehaviorOptions {
                backend: BackendKind::Server,
                allowed_methods: AllowedMethods::All,
                cached_methods: CachedMethods::GetHeadOptions,
                viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
                compress: true,
                cache_policy: policies.server_cache.clone(),
                origin_request_policy: Some(policies.origin_request.clone()),
                response_headers_policy: None,
                transforms: server_transforms,
            },
        };

        let image = Behavior {
            origin: http_origin("image", inputs.image_url)?,
            options: BehaviorOptions {
                backend: BackendKind::Image,
                allowed_methods: AllowedMethods::GetHeadOptions,
                cached_methods: CachedMethods::GetHeadOptions,
                viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
                compress: true,
                cache_policy: policies.image_cache.clone(),
                origin_request_policy: Some(policies.origin_request.clone()),
                response_headers_policy: None,
                transforms: inputs.sign_transforms,
            },
        };

        Ok(Self {
            static_assets,
            server,
            image,
        })
    }

    pub fn for_backend(&self, backend: BackendKind) -> &Behavior {
        match backend {
            BackendKind::Static => &self.static_assets,
            BackendKind::Server => &self.server,
            BackendKind::Image => &self.image,
        }
    }
}

/// HTTP origin addressed by the host of a function URL.
pub fn http_origin(backend: &'static str, url: &Url) -> Result<Origin, ValidationFailure> {
    if url.scheme() != "https" {
        return Err(ValidationFailure::InvalidEndpoint {
            backend,
            url: url.to_string(),
            reason: "scheme must be https",
        });
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(Origin::Http {
            domain_name: host.to_string(),
        }),
        _ => Err(ValidationFailure::InvalidEndpoint {
            backend,
            url: url.to_string(),
            reason: "missing host",
        }),
    }
}

/// Static patterns for every top-level manifest entry, in manifest order.
pub fn static_patterns(
    manifest: &BuildManifest,
    base_path: Option<&str>,
) -> Result<Vec<PathPattern>, ValidationFailure> {
    if manifest.len() > MAX_STATIC_ARTIFACTS {
        return Err(ValidationFailure::TooManyArtifacts {
            count: manifest.len(),
        });
    }

    manifest
        .entries()
        .iter()
        .map(|entry| {
            let raw = pattern::artifact_pattern(&entry.name, entry.is_dir);
            pattern::validate(&raw)?;
            PathPattern::parse(pattern::build(base_path, &raw))
        })
        .collect()
}

/// The fixed dynamic patterns, in install order.
pub fn dynamic_patterns(
    base_path: Option<&str>,
) -> Result<Vec<(PathPattern, BackendKind)>, ValidationFailure> {
    [
        (API_PATTERN, BackendKind::Server),
        (DATA_PATTERN, BackendKind::Server),
        (IMAGE_PATTERN, BackendKind::Image),
    ]
    .into_iter()
    .map(|(raw, backend)| Ok((PathPattern::parse(pattern::build(base_path, raw))?, backend)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::TransformEvent;
    use crate::manifest::ManifestEntry;
    use crate::platform::{EdgeFunctionRef, ViewerFunctionRef};
    use crate::policy::PolicyOverrides;

    fn host_forwarding() -> RequestTransform {
        RequestTransform::ViewerFunction {
            function: ViewerFunctionRef {
                name: "fwd".into(),
                arn: "arn:fwd".into(),
            },
            event: TransformEvent::ViewerRequest,
        }
    }

    fn signer() -> RequestTransform {
        RequestTransform::EdgeFunction {
            function: EdgeFunctionRef {
                name: "sign".into(),
                version_arn: "arn:sign:1".into(),
            },
            event: TransformEvent::OriginRequest,
            include_body: true,
        }
    }

    fn build(sign: Vec<RequestTransform>) -> BehaviorSet {
        let server_url = Url::parse("https://srv.lambda-url.us-east-1.on.aws/").unwrap();
        let image_url = Url::parse("https://img.lambda-url.us-east-1.on.aws/").unwrap();
        let policies = CachePolicySet::resolve(&PolicyOverrides::default());
        BehaviorSet::build(BehaviorInputs {
            static_bucket: "assets",
            server_url: &server_url,
            image_url: &image_url,
            policies: &policies,
            sign_transforms: sign,
            host_forwarding: host_forwarding(),
        })
        .unwrap()
    }

    #[test]
    fn test_bundle_shapes() {
        let set = build(Vec::new());

        assert_eq!(set.static_assets.origin, Origin::Bucket { bucket: "assets".into() });
        assert_eq!(set.static_assets.options.allowed_methods, AllowedMethods::GetHeadOptions);
        assert_eq!(set.static_assets.options.cached_methods, CachedMethods::GetHeadOptions);
        assert!(set.static_assets.options.response_headers_policy.is_some());
        assert!(set.static_assets.options.origin_request_policy.is_none());

        assert_eq!(
            set.server.origin,
            Origin::Http {
                domain_name: "srv.lambda-url.us-east-1.on.aws".into()
            }
        );
        assert_eq!(set.server.options.allowed_methods, AllowedMethods::All);
        assert_eq!(set.server.options.transforms, vec![host_forwarding()]);

        assert_eq!(set.image.options.allowed_methods, AllowedMethods::GetHeadOptions);
        assert!(set.image.options.transforms.is_empty());
        assert_eq!(
            set.image.options.origin_request_policy,
            set.server.options.origin_request_policy
        );
    }

    #[test]
    fn test_sign_transform_on_server_and_image() {
        let set = build(vec![signer()]);
        assert_eq!(set.server.options.transforms, vec![signer(), host_forwarding()]);
        assert_eq!(set.image.options.transforms, vec![signer()]);
        assert!(set.static_assets.options.transforms.is_empty());
    }

    #[test]
    fn test_http_origin_rejects_plain_http() {
        let url = Url::parse("http://srv.example.com/").unwrap();
        assert!(matches!(
            http_origin("server", &url),
            Err(ValidationFailure::InvalidEndpoint { backend: "server", .. })
        ));
    }

    #[test]
    fn test_static_patterns() {
        let manifest = BuildManifest::new([
            ManifestEntry::dir("_next"),
            ManifestEntry::file("favicon.ico"),
        ]);
        let patterns: Vec<String> = static_patterns(&manifest, None)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(patterns, ["_next/*", "favicon.ico"]);

        let prefixed: Vec<String> = static_patterns(&manifest, Some("/docs"))
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(prefixed, ["/docs/_next/*", "/docs/favicon.ico"]);
    }

    #[test]
    fn test_static_patterns_reject_bad_name() {
        let manifest = BuildManifest::new([ManifestEntry::dir("my assets")]);
        assert_eq!(
            static_patterns(&manifest, Some("/docs")).unwrap_err(),
            ValidationFailure::InvalidPathPattern {
                pattern: "my assets/*".into()
            }
        );
    }

    #[test]
    fn test_static_patterns_ceiling() {
        let at_limit = BuildManifest::new((0..24).map(|i| ManifestEntry::file(format!("f{i}"))));
        assert_eq!(static_patterns(&at_limit, None).unwrap().len(), 24);

        let over = BuildManifest::new((0..25).map(|i| ManifestEntry::file(format!("f {i}"))));
        assert_eq!(
            static_patterns(&over, None).unwrap_err(),
            ValidationFailure::TooManyArtifacts { count: 25 }
        );
    }

    #[test]
    fn test_dynamic_patterns() {
        let patterns = dynamic_patterns(Some("/docs")).unwrap();
        let rendered: Vec<(String, BackendKind)> =
            patterns.into_iter().map(|(p, b)| (p.to_string(), b)).collect();
        assert_eq!(
            rendered,
            [
                ("/docs/api/*".to_string(), BackendKind::Server),
                ("/docs/_next/data/*".to_string(), BackendKind::Server),
                ("/docs/_next/image*".to_string(), BackendKind::Image),
            ]
        );
    }
}
