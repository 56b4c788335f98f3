//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKENDS: &str = r#"
        [backends]
        static_bucket = "site-assets"
        server_function_url = "https://srv.lambda-url.us-east-1.on.aws/"
        image_function_url = "https://img.lambda-url.us-east-1.on.aws/"
    "#;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, format!("base_path = \"/docs\"\n{BACKENDS}")).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_path(), Some("/docs"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("base_path = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_misspelled_policy_key_rejected() {
        let text = format!(
            r#"
            [policies]
            server_cache_polcy = {{ kind = "existing", id = "srv" }}
            {BACKENDS}
            "#
        );
        let err = parse_config(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("server_cache_polcy"), "{}", err);
    }

    #[test]
    fn test_unknown_keys_rejected_in_nested_tables() {
        for extra in [
            "[observability]\nlog_levle = \"debug\"",
            "[existing_distribution]\nid = \"E1\"\ndomain_name = \"d1.net\"\narn = \"x\"",
        ] {
            let text = format!("{extra}\n{BACKENDS}");
            assert!(
                matches!(parse_config(&text), Err(ConfigError::Parse(_))),
                "accepted: {}",
                extra
            );
        }

        let text = BACKENDS.replace("static_bucket", "static_bucket = \"a\"\nstatic_buckt");
        assert!(matches!(parse_config(&text), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_policy_override_survives_loading() {
        let text = format!(
            r#"
            [policies]
            server_cache_policy = {{ kind = "existing", id = "srv" }}
            static_client_max_age_default_secs = 60
            {BACKENDS}
            "#
        );
        let config = parse_config(&text).unwrap();
        assert_eq!(
            config.policies.server_cache_policy,
            Some(crate::policy::CachePolicyRef::Existing { id: "srv".into() })
        );
        assert_eq!(config.policies.static_client_max_age_default_secs, Some(60));
    }

    #[test]
    fn test_validation_reports_every_error() {
        let text = format!(
            r#"
            base_path = "docs/"
            custom_domain = {{ domain_name = "example.com", is_external_domain = true }}

            [distribution]
            comment = "x"

            [existing_distribution]
            id = "E1"
            domain_name = "d1.cloudfront.net"
            {BACKENDS}
            "#
        );
        match parse_config(&text).unwrap_err() {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 3, "{:?}", errors);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
