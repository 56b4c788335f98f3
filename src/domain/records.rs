//! DNS record descriptions pointing the custom domain at the distribution.

use serde::Serialize;

use crate::distribution::DistributionIdentity;
use crate::domain::resolver::ResolvedDomain;
use crate::domain::spec::HostedZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AliasRecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
}

/// A record for a DNS-provisioning collaborator to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DnsRecord {
    Alias {
        record_type: AliasRecordType,
        zone: HostedZone,
        record_name: String,
        /// Distribution domain the alias resolves to.
        target: String,
    },
    /// Redirects every listed host name to `https://<target_domain>`.
    HttpsRedirect {
        zone: HostedZone,
        record_names: Vec<String>,
        target_domain: String,
    },
}

/// Records for a resolved domain. Empty unless a zone was resolved.
pub fn alias_records(
    resolved: &ResolvedDomain,
    distribution: &DistributionIdentity,
) -> Vec<DnsRecord> {
    let (Some(zone), Some(domain)) = (&resolved.zone, &resolved.domain) else {
        return Vec::new();
    };

    let mut records: Vec<DnsRecord> = [AliasRecordType::A, AliasRecordType::Aaaa]
        .into_iter()
        .map(|record_type| DnsRecord::Alias {
            record_type,
            zone: zone.clone(),
            record_name: domain.domain_name.clone(),
            target: distribution.domain_name.clone(),
        })
        .collect();

    if let Some(alias) = &domain.domain_alias {
        records.push(DnsRecord::HttpsRedirect {
            zone: zone.clone(),
            record_names: vec![alias.clone()],
            target_domain: domain.domain_name.clone(),
        });
    }

    records
}
