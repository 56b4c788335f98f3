//! In-process platform that records requests instead of calling a cloud API.

use serde::Serialize;
use url::Url;

use crate::distribution::{Distribution, DistributionIdentity};
use crate::domain::{CertificateRef, HostedZone};
use crate::error::ProvisionError;
use crate::platform::{
    CdnPlatform, EdgeFunctionRef, EdgeFunctionSpec, ViewerFunctionRef, ViewerFunctionSpec,
};

/// One recorded platform request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedAction {
    LookupHostedZone { domain_name: String },
    IssueCertificate { domain_name: String, zone_id: String, region: String },
    CreateEdgeFunction { name: String, region: String },
    GrantInvoke { function: String, principal: String, endpoint: String },
    CreateViewerFunction { name: String },
    FinalizeDistribution { id: String, rules: usize },
}

impl PlannedAction {
    fn operation(&self) -> &'static str {
        match self {
            PlannedAction::LookupHostedZone { .. } => "lookup_hosted_zone",
            PlannedAction::IssueCertificate { .. } => "issue_certificate",
            PlannedAction::CreateEdgeFunction { .. } => "create_edge_function",
            PlannedAction::GrantInvoke { .. } => "grant_invoke",
            PlannedAction::CreateViewerFunction { .. } => "create_viewer_function",
            PlannedAction::FinalizeDistribution { .. } => "finalize_distribution",
        }
    }
}

/// Deterministic stand-in for the cloud API.
///
/// Identities are derived from names, so identical inputs plan identical output.
#[derive(Debug, Default)]
pub struct PlanningPlatform {
    actions: Vec<PlannedAction>,
    fail_on: Option<&'static str>,
}

impl PlanningPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform whose `operation` (e.g. `"issue_certificate"`) always fails.
    pub fn failing(operation: &'static str) -> Self {
        Self {
            actions: Vec::new(),
            fail_on: Some(operation),
        }
    }

    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    pub fn count(&self, operation: &str) -> usize {
        self.actions.iter().filter(|a| a.operation() == operation).count()
    }

    fn record(&mut self, action: PlannedAction) -> Result<(), ProvisionError> {
        let operation = action.operation();
        if self.fail_on == Some(operation) {
            tracing::warn!(operation, "Injected platform failure");
            return Err(ProvisionError::new(operation, "rejected by planning platform"));
        }
        self.actions.push(action);
        Ok(())
    }
}

impl CdnPlatform for PlanningPlatform {
    fn lookup_hosted_zone(&mut self, domain_name: &str) -> Result<HostedZone, ProvisionError> {
        self.record(PlannedAction::LookupHostedZone {
            domain_name: domain_name.to_string(),
        })?;
        Ok(HostedZone {
            zone_id: format!("planned-zone/{}", domain_name),
            zone_name: domain_name.to_string(),
        })
    }

    fn issue_certificate(
        &mut self,
        domain_name: &str,
        zone: &HostedZone,
        region: &str,
    ) -> Result<CertificateRef, ProvisionError> {
        self.record(PlannedAction::IssueCertificate {
            domain_name: domain_name.to_string(),
            zone_id: zone.zone_id.clone(),
            region: region.to_string(),
        })?;
        Ok(CertificateRef {
            arn: format!("planned-certificate/{}/{}", region, domain_name),
        })
    }

    fn create_edge_function(
        &mut self,
        spec: &EdgeFunctionSpec,
    ) -> Result<EdgeFunctionRef, ProvisionError> {
        self.record(PlannedAction::CreateEdgeFunction {
            name: spec.name.clone(),
            region: spec.region.clone(),
        })?;
        Ok(EdgeFunctionRef {
            name: spec.name.clone(),
            version_arn: format!("planned-function/{}/{}:1", spec.region, spec.name),
        })
    }

    fn grant_invoke(
        &mut self,
        function: &EdgeFunctionRef,
        principal: &str,
        endpoint: &Url,
    ) -> Result<(), ProvisionError> {
        self.record(PlannedAction::GrantInvoke {
            function: function.name.clone(),
            principal: principal.to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    fn create_viewer_function(
        &mut self,
        spec: &ViewerFunctionSpec,
    ) -> Result<ViewerFunctionRef, ProvisionError> {
        self.record(PlannedAction::CreateViewerFunction {
            name: spec.name.clone(),
        })?;
        Ok(ViewerFunctionRef {
            name: spec.name.clone(),
            arn: format!("planned-viewer-function/{}", spec.name),
        })
    }

    fn finalize_distribution(
        &mut self,
        distribution: &Distribution,
    ) -> Result<DistributionIdentity, ProvisionError> {
        let identity = match distribution.existing() {
            Some(identity) => identity.clone(),
            None => DistributionIdentity {
                id: "EPLANNED".to_string(),
                domain_name: "eplanned.cloudfront.net".to_string(),
            },
        };
        self.record(PlannedAction::FinalizeDistribution {
            id: identity.id.clone(),
            rules: distribution.rules().len(),
        })?;
        Ok(identity)
    }
}
