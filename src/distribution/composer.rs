//! Distribution composition.
//!
//! # Responsibilities
//! - Reject conflicting or invalid inputs before anything is provisioned
//! - Resolve policies, custom domain and edge transforms
//! - Install routing rules in a fixed order and finalize the distribution
//! - Emit DNS records against the finalized distribution's identity

use std::collections::HashSet;

use serde::Serialize;

use crate::config::validation::{check_distribution_inputs, validate_endpoints};
use crate::config::SiteConfig;
use crate::distribution::model::{Distribution, DistributionBuilder, DistributionIdentity};
use crate::domain::{alias_records, DnsRecord, DomainResolver, ResolvedDomain};
use crate::edge::{edge_sign_transforms, host_forwarding_transform};
use crate::error::{ComposeResult, ValidationFailure};
use crate::manifest::BuildManifest;
use crate::platform::CdnPlatform;
use crate::policy::CachePolicySet;
use crate::routing::behavior::{dynamic_patterns, static_patterns, BehaviorInputs, BehaviorSet};
use crate::routing::fallback::root_fallback_patterns;
use crate::routing::pattern::{validate_base_path, PathPattern};

/// Result of one composition: the distribution plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    identity: DistributionIdentity,
    distribution: Distribution,
    domain: ResolvedDomain,
    records: Vec<DnsRecord>,
}

impl Composition {
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn domain(&self) -> &ResolvedDomain {
        &self.domain
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }

    pub fn distribution_id(&self) -> &str {
        &self.identity.id
    }

    pub fn distribution_domain(&self) -> &str {
        &self.identity.domain_name
    }

    /// `https://` URL on the platform-assigned domain.
    pub fn url(&self) -> String {
        format!("https://{}", self.identity.domain_name)
    }

    /// `https://` URL on the custom domain, when one is configured.
    pub fn custom_domain_url(&self) -> Option<String> {
        self.domain.domain_name().map(|name| format!("https://{}", name))
    }
}

/// Builds one distribution for one site. Single use, single threaded.
pub struct DistributionComposer<'a> {
    config: &'a SiteConfig,
    platform: &'a mut dyn CdnPlatform,
}

impl<'a> DistributionComposer<'a> {
    pub fn new(config: &'a SiteConfig, platform: &'a mut dyn CdnPlatform) -> Self {
        Self { config, platform }
    }

    pub fn compose(self, manifest: &BuildManifest) -> ComposeResult<Composition> {
        let config = self.config;
        let base_path = config.base_path();
        let domain_spec = config.custom_domain_spec();

        tracing::info!(
            base_path = base_path.unwrap_or("-"),
            artifacts = manifest.len(),
            existing_distribution = config.existing_distribution.is_some(),
            "Composing distribution"
        );

        // Input checks. Nothing below this block may fail on user input alone.
        check_distribution_inputs(config)?;
        if let Some(spec) = &domain_spec {
            spec.check_names()?;
            spec.validate()?;
        }
        if let Some(base) = base_path {
            validate_base_path(base)?;
        }
        if let Some(err) = validate_endpoints(&config.backends).into_iter().next() {
            return Err(err.into());
        }
        let static_rules = static_patterns(manifest, base_path)?;
        let dynamic_rules = dynamic_patterns(base_path)?;
        let fallback_rules = root_fallback_patterns(manifest, base_path)?;
        check_unique(
            static_rules
                .iter()
                .chain(dynamic_rules.iter().map(|(p, _)| p))
                .chain(fallback_rules.iter()),
        )?;

        let policies = CachePolicySet::resolve(&config.policies);
        let domain = DomainResolver::new(&mut *self.platform).resolve(domain_spec.as_ref())?;

        let sign_transforms = edge_sign_transforms(
            config.function_url_auth,
            &mut *self.platform,
            &config.backends.server_function_url,
            &config.backends.image_function_url,
        )?;
        let host_forwarding = host_forwarding_transform(&mut *self.platform)?;

        let behaviors = BehaviorSet::build(BehaviorInputs {
            static_bucket: &config.backends.static_bucket,
            server_url: &config.backends.server_function_url,
            image_url: &config.backends.image_function_url,
            policies: &policies,
            sign_transforms,
            host_forwarding,
        })?;

        let mut builder = match &config.existing_distribution {
            Some(identity) => DistributionBuilder::existing(identity.clone()),
            None => DistributionBuilder::new(
                config.distribution.clone().unwrap_or_default().to_props(),
                domain.domain_names(),
                domain.certificate.clone(),
                behaviors.server.clone(),
            ),
        };

        for pattern in static_rules {
            builder.add_behavior(pattern, &behaviors.static_assets)?;
        }
        for (pattern, backend) in dynamic_rules {
            builder.add_behavior(pattern, behaviors.for_backend(backend))?;
        }
        for pattern in fallback_rules {
            builder.add_rule(
                pattern,
                behaviors.server.origin.clone(),
                behaviors.server.options.clone(),
            )?;
        }

        let distribution = builder.finish();
        let identity = self.platform.finalize_distribution(&distribution)?;
        let records = alias_records(&domain, &identity);

        tracing::info!(
            distribution_id = %identity.id,
            domain_name = %identity.domain_name,
            rules = distribution.rules().len(),
            records = records.len(),
            "Distribution composed"
        );

        Ok(Composition {
            identity,
            distribution,
            domain,
            records,
        })
    }
}

/// Reject repeated patterns before anything is provisioned.
fn check_unique<'p>(
    patterns: impl Iterator<Item = &'p PathPattern>,
) -> Result<(), ValidationFailure> {
    let mut seen = HashSet::new();
    for pattern in patterns {
        if !seen.insert(pattern.as_str()) {
            return Err(ValidationFailure::DuplicatePattern {
                pattern: pattern.to_string(),
            });
        }
    }
    Ok(())
}

/// Compose `config` and `manifest` against `platform`.
pub fn compose(
    config: &SiteConfig,
    manifest: &BuildManifest,
    platform: &mut dyn CdnPlatform,
) -> ComposeResult<Composition> {
    DistributionComposer::new(config, platform).compose(manifest)
}
