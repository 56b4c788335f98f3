//! Error taxonomy for distribution composition.
//!
//! Every error is terminal: composition never retries and never returns a
//! partially built distribution.

use thiserror::Error;

use crate::routing::behavior::MAX_STATIC_ARTIFACTS;

/// Platform ceiling on routing rules per distribution, default rule included.
pub const MAX_ROUTING_RULES: usize = 25;

/// Mutually exclusive inputs were supplied together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationConflict {
    /// An existing distribution and override properties for a new one.
    #[error("an existing distribution cannot be combined with distribution override properties")]
    DistributionWithOverrides,

    #[error("custom domain {domain}: domain_alias is not supported for external domains")]
    ExternalDomainWithAlias { domain: String },

    #[error("custom domain {domain}: hosted_zone is not supported for external domains")]
    ExternalDomainWithHostedZone { domain: String },

    #[error("custom domain {domain}: a certificate is required for external domains")]
    ExternalDomainWithoutCertificate { domain: String },
}

/// A generated or supplied value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("invalid path pattern {pattern:?}: allowed characters are a-z A-Z 0-9 _ - . * $ / ~ \" ' @ : + ? &")]
    InvalidPathPattern { pattern: String },

    #[error(
        "too many top-level static artifacts ({count}): at most {max} are allowed because the \
         platform caps a distribution at {ceiling} routing rules",
        max = MAX_STATIC_ARTIFACTS,
        ceiling = MAX_ROUTING_RULES
    )]
    TooManyArtifacts { count: usize },

    #[error("path pattern {pattern:?} is already routed by this distribution")]
    DuplicatePattern { pattern: String },

    #[error("invalid base path {base_path:?}: {reason}")]
    InvalidBasePath { base_path: String, reason: &'static str },

    #[error("invalid {backend} endpoint {url:?}: {reason}")]
    InvalidEndpoint {
        backend: &'static str,
        url: String,
        reason: &'static str,
    },

    #[error("invalid domain name {name:?}: {reason}")]
    InvalidDomainName { name: String, reason: &'static str },
}

/// Failure reported by the provisioning collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct ProvisionError {
    pub operation: &'static str,
    pub message: String,
}

impl ProvisionError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Terminal outcome of a failed composition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("configuration conflict: {0}")]
    Conflict(#[from] ConfigurationConflict),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("provisioning error: {0}")]
    Provision(#[from] ProvisionError),
}

/// Result type for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;
