//! Custom domain subsystem.
//!
//! # Data Flow
//! ```text
//! CustomDomainInput (bare name | table)
//!     → spec.rs (normalize to CustomDomainSpec, external-domain checks)
//!     → resolver.rs (zone lookup, certificate issue)  [before the distribution]
//!     → ResolvedDomain (names + certificate feed the distribution)
//!     → records.rs (A/AAAA alias, HTTPS redirect)     [after the distribution]
//! ```
//!
//! # Design Decisions
//! - The input shape is inspected exactly once, at normalization
//! - Conflicts are reported before any lookup is attempted
//! - No zone, no records

pub mod records;
pub mod resolver;
pub mod spec;

pub use records::{alias_records, AliasRecordType, DnsRecord};
pub use resolver::{DomainResolver, ResolvedDomain};
pub use spec::{
    CertificateRef, CustomDomainInput, CustomDomainProps, CustomDomainSpec, HostedZone,
    HostedZoneInput,
};
