//! Configuration schema definitions.
//!
//! This module defines the site configuration consumed by the composer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::distribution::{DistributionIdentity, DistributionOverrides};
use crate::domain::{CustomDomainInput, CustomDomainSpec};
use crate::edge::FunctionUrlAuth;
use crate::policy::PolicyOverrides;

/// Root configuration for one site.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix the whole site is mounted under (e.g. "/docs").
    #[serde(default)]
    pub base_path: Option<String>,

    /// Authorization mode of the server and image function URLs.
    #[serde(default)]
    pub function_url_auth: FunctionUrlAuth,

    /// Custom domain: a bare name or a table.
    #[serde(default)]
    pub custom_domain: Option<CustomDomainInput>,

    /// Backend locations.
    pub backends: BackendEndpoints,

    /// Cache and forwarding policy overrides.
    #[serde(default)]
    pub policies: PolicyOverrides,

    /// Override properties for a new distribution.
    #[serde(default)]
    pub distribution: Option<DistributionOverrides>,

    /// Append to this distribution instead of creating one.
    #[serde(default)]
    pub existing_distribution: Option<DistributionIdentity>,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl SiteConfig {
    /// Minimal config with default policies and no custom domain.
    pub fn new(backends: BackendEndpoints) -> Self {
        Self {
            base_path: None,
            function_url_auth: FunctionUrlAuth::default(),
            custom_domain: None,
            backends,
            policies: PolicyOverrides::default(),
            distribution: None,
            existing_distribution: None,
            observability: ObservabilityConfig::default(),
        }
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Normalized custom domain, if configured.
    pub fn custom_domain_spec(&self) -> Option<CustomDomainSpec> {
        self.custom_domain.clone().map(CustomDomainSpec::from)
    }
}

/// Where each backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendEndpoints {
    /// Bucket holding the static build output.
    pub static_bucket: String,

    /// Function URL of the dynamic request handler.
    pub server_function_url: Url,

    /// Function URL of the image optimization handler.
    pub image_function_url: Url,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HostedZoneInput;
    use crate::policy::CachePolicyRef;

    const MINIMAL: &str = r#"
        [backends]
        static_bucket = "site-assets"
        server_function_url = "https://srv.lambda-url.us-east-1.on.aws/"
        image_function_url = "https://img.lambda-url.us-east-1.on.aws/"
    "#;

    #[test]
    fn test_minimal_config() {
        let config: SiteConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.base_path(), None);
        assert_eq!(config.function_url_auth, FunctionUrlAuth::None);
        assert!(config.custom_domain_spec().is_none());
        assert_eq!(config.policies, PolicyOverrides::default());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(
            config.backends.server_function_url.host_str(),
            Some("srv.lambda-url.us-east-1.on.aws")
        );
    }

    #[test]
    fn test_full_config() {
        let text = format!(
            r#"
            base_path = "/docs"
            function_url_auth = "aws_iam"

            [custom_domain]
            domain_name = "docs.example.com"
            hosted_zone = "example.com"

            [policies]
            static_client_max_age_default_secs = 86400
            server_cache_policy = {{ kind = "existing", id = "srv-policy" }}

            [distribution]
            comment = "docs"
            price_class = "PriceClass_100"
            {MINIMAL}
            "#
        );
        let config: SiteConfig = toml::from_str(&text).unwrap();

        assert_eq!(config.base_path(), Some("/docs"));
        assert_eq!(config.function_url_auth, FunctionUrlAuth::AwsIam);
        let domain = config.custom_domain_spec().unwrap();
        assert_eq!(domain.domain_name, "docs.example.com");
        assert_eq!(domain.hosted_zone, Some(HostedZoneInput::Name("example.com".into())));
        assert_eq!(config.policies.static_client_max_age_default_secs, Some(86_400));
        assert_eq!(
            config.policies.server_cache_policy,
            Some(CachePolicyRef::Existing { id: "srv-policy".into() })
        );
        assert_eq!(config.distribution.unwrap().comment.as_deref(), Some("docs"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = format!("listen = \"0.0.0.0:80\"\n{MINIMAL}");
        assert!(toml::from_str::<SiteConfig>(&text).is_err());
    }
}
