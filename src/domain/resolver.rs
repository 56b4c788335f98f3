//! Zone and certificate resolution for the custom domain.
//!
//! # Responsibilities
//! - Reject conflicting external-domain specs before any platform call
//! - Pick the DNS zone (first matching rule wins)
//! - Pick or issue the certificate once the zone is known

use serde::Serialize;

use crate::domain::spec::{CertificateRef, CustomDomainSpec, HostedZone, HostedZoneInput};
use crate::error::ComposeResult;
use crate::platform::{CdnPlatform, EDGE_REGION};

/// Outcome of domain resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<CustomDomainSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<HostedZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRef>,
}

impl ResolvedDomain {
    pub fn domain_name(&self) -> Option<&str> {
        self.domain.as_ref().map(|d| d.domain_name.as_str())
    }

    /// Host names the distribution answers to; empty without a custom domain.
    pub fn domain_names(&self) -> Vec<String> {
        self.domain
            .as_ref()
            .map(CustomDomainSpec::domain_names)
            .unwrap_or_default()
    }
}

/// Resolves a custom domain against the platform.
pub struct DomainResolver<'a> {
    platform: &'a mut dyn CdnPlatform,
}

impl<'a> DomainResolver<'a> {
    pub fn new(platform: &'a mut dyn CdnPlatform) -> Self {
        Self { platform }
    }

    pub fn resolve(&mut self, spec: Option<&CustomDomainSpec>) -> ComposeResult<ResolvedDomain> {
        let Some(spec) = spec else {
            return Ok(ResolvedDomain::default());
        };
        spec.validate()?;

        let zone = self.resolve_zone(spec)?;
        let certificate = match (&zone, &spec.certificate) {
            (_, Some(certificate)) => Some(certificate.clone()),
            (Some(zone), None) => {
                Some(self.platform.issue_certificate(&spec.domain_name, zone, EDGE_REGION)?)
            }
            (None, None) => None,
        };

        if certificate.is_none() {
            tracing::warn!(
                domain = %spec.domain_name,
                "Custom domain resolved without a certificate"
            );
        }
        tracing::info!(
            domain = %spec.domain_name,
            zone = zone.as_ref().map(|z| z.zone_id.as_str()).unwrap_or("-"),
            has_certificate = certificate.is_some(),
            "Custom domain resolved"
        );

        Ok(ResolvedDomain {
            domain: Some(spec.clone()),
            zone,
            certificate,
        })
    }

    fn resolve_zone(&mut self, spec: &CustomDomainSpec) -> ComposeResult<Option<HostedZone>> {
        match &spec.hosted_zone {
            Some(HostedZoneInput::Name(name)) => Ok(Some(self.platform.lookup_hosted_zone(name)?)),
            Some(HostedZoneInput::Zone(zone)) => Ok(Some(zone.clone())),
            None if spec.is_external_domain => Ok(None),
            None => Ok(Some(self.platform.lookup_hosted_zone(&spec.domain_name)?)),
        }
    }
}
