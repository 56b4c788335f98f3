//! Configuration validation.
//!
//! # Responsibilities
//! - Check the base path shape
//! - Check backend endpoints (https function URLs, non-empty bucket)
//! - Check custom domain host names are non-empty
//! - Detect mutually exclusive inputs (existing distribution + overrides,
//!   external domain + zone/alias, external domain without certificate)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; the composer repeats the
//!   same checks fail-fast for configs built in code

use thiserror::Error;

use crate::config::schema::{BackendEndpoints, SiteConfig};
use crate::error::{ConfigurationConflict, ValidationFailure};
use crate::routing::behavior::http_origin;
use crate::routing::pattern::validate_base_path;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Conflict(#[from] ConfigurationConflict),

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

/// Validate a parsed config, collecting every problem.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if let Some(base_path) = config.base_path() {
        if let Err(e) = validate_base_path(base_path) {
            errors.push(e.into());
        }
    }

    errors.extend(validate_endpoints(&config.backends).into_iter().map(ValidationError::from));

    if let Err(e) = check_distribution_inputs(config) {
        errors.push(e.into());
    }

    if let Some(domain) = config.custom_domain_spec() {
        if let Err(e) = domain.check_names() {
            errors.push(e.into());
        }
        if let Err(e) = domain.validate() {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An existing distribution cannot be combined with override properties.
pub fn check_distribution_inputs(config: &SiteConfig) -> Result<(), ConfigurationConflict> {
    if config.existing_distribution.is_some() && config.distribution.is_some() {
        return Err(ConfigurationConflict::DistributionWithOverrides);
    }
    Ok(())
}

pub fn validate_endpoints(backends: &BackendEndpoints) -> Vec<ValidationFailure> {
    let mut errors = Vec::new();

    if backends.static_bucket.trim().is_empty() {
        errors.push(ValidationFailure::InvalidEndpoint {
            backend: "static",
            url: backends.static_bucket.clone(),
            reason: "bucket name is empty",
        });
    }
    if let Err(e) = http_origin("server", &backends.server_function_url) {
        errors.push(e);
    }
    if let Err(e) = http_origin("image", &backends.image_function_url) {
        errors.push(e);
    }

    errors
}
