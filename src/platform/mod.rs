//! Provisioning collaborator boundary.
//!
//! # Data Flow
//! ```text
//! domain::resolver  → lookup_hosted_zone / issue_certificate
//! edge::signer      → create_edge_function / grant_invoke
//! edge::host_header → create_viewer_function
//! distribution::composer → finalize_distribution (returns identity)
//! ```
//!
//! # Design Decisions
//! - Every call is a one-shot request; failures are returned, never retried
//! - DNS records are not provisioned here; the composer returns them as descriptions
//! - `PlanningPlatform` is the in-process implementation used for dry runs and tests

pub mod planner;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::distribution::{Distribution, DistributionIdentity};
use crate::domain::{CertificateRef, HostedZone};
use crate::error::ProvisionError;

pub use planner::{PlannedAction, PlanningPlatform};

/// Region where certificates and edge functions for the CDN must live.
pub const EDGE_REGION: &str = "us-east-1";

/// Published version of an edge-executed function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeFunctionRef {
    pub name: String,
    pub version_arn: String,
}

/// Lightweight function running on viewer request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewerFunctionRef {
    pub name: String,
    pub arn: String,
}

/// Edge function to publish. `code` is the `index.js` module exporting `handler`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeFunctionSpec {
    pub name: String,
    pub region: String,
    pub handler: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerFunctionSpec {
    pub name: String,
    pub code: String,
}

/// The cloud API the composer provisions against.
pub trait CdnPlatform {
    /// Find the DNS zone serving `domain_name`.
    fn lookup_hosted_zone(&mut self, domain_name: &str) -> Result<HostedZone, ProvisionError>;

    /// Issue a DNS-validated certificate for `domain_name` in `region`.
    fn issue_certificate(
        &mut self,
        domain_name: &str,
        zone: &HostedZone,
        region: &str,
    ) -> Result<CertificateRef, ProvisionError>;

    fn create_edge_function(
        &mut self,
        spec: &EdgeFunctionSpec,
    ) -> Result<EdgeFunctionRef, ProvisionError>;

    /// Allow `principal`, acting through `function`, to invoke the function URL `endpoint`.
    fn grant_invoke(
        &mut self,
        function: &EdgeFunctionRef,
        principal: &str,
        endpoint: &Url,
    ) -> Result<(), ProvisionError>;

    fn create_viewer_function(
        &mut self,
        spec: &ViewerFunctionSpec,
    ) -> Result<ViewerFunctionRef, ProvisionError>;

    /// Materialize the distribution and return its stable identity.
    fn finalize_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<DistributionIdentity, ProvisionError>;
}
