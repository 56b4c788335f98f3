//! Custom domain input shapes and their normalized form.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationConflict, ValidationFailure};

/// A DNS zone in which alias records can be created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedZone {
    pub zone_id: String,
    pub zone_name: String,
}

/// A TLS certificate usable by the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateRef {
    pub arn: String,
}

/// `hosted_zone` is either a name to look up or a known zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostedZoneInput {
    Name(String),
    Zone(HostedZone),
}

/// Structured custom domain record as written in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDomainProps {
    pub domain_name: String,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    #[serde(default)]
    pub hosted_zone: Option<HostedZoneInput>,
    #[serde(default)]
    pub certificate: Option<CertificateRef>,
    /// Secondary host name redirected to `domain_name`.
    #[serde(default)]
    pub domain_alias: Option<String>,
    /// DNS for the domain is managed outside this deployment.
    #[serde(default)]
    pub is_external_domain: bool,
}

/// Boundary form: `custom_domain = "example.com"` or a `[custom_domain]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomDomainInput {
    Name(String),
    Detailed(CustomDomainProps),
}

/// Normalized custom domain. Internal logic only sees this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDomainSpec {
    pub domain_name: String,
    pub alternate_names: Vec<String>,
    pub hosted_zone: Option<HostedZoneInput>,
    pub certificate: Option<CertificateRef>,
    pub domain_alias: Option<String>,
    pub is_external_domain: bool,
}

impl From<CustomDomainInput> for CustomDomainSpec {
    fn from(input: CustomDomainInput) -> Self {
        match input {
            CustomDomainInput::Name(domain_name) => Self {
                domain_name,
                alternate_names: Vec::new(),
                hosted_zone: None,
                certificate: None,
                domain_alias: None,
                is_external_domain: false,
            },
            CustomDomainInput::Detailed(props) => Self {
                domain_name: props.domain_name,
                alternate_names: props.alternate_names,
                hosted_zone: props.hosted_zone,
                certificate: props.certificate,
                domain_alias: props.domain_alias,
                is_external_domain: props.is_external_domain,
            },
        }
    }
}

impl CustomDomainSpec {
    /// Shortcut for the bare-name form.
    pub fn named(domain_name: impl Into<String>) -> Self {
        CustomDomainInput::Name(domain_name.into()).into()
    }

    /// External domains bring their own certificate and take no zone or alias.
    pub fn validate(&self) -> Result<(), ConfigurationConflict> {
        if !self.is_external_domain {
            return Ok(());
        }
        let domain = self.domain_name.clone();
        if self.certificate.is_none() {
            return Err(ConfigurationConflict::ExternalDomainWithoutCertificate { domain });
        }
        if self.domain_alias.is_some() {
            return Err(ConfigurationConflict::ExternalDomainWithAlias { domain });
        }
        if self.hosted_zone.is_some() {
            return Err(ConfigurationConflict::ExternalDomainWithHostedZone { domain });
        }
        Ok(())
    }

    /// Every configured host name must be non-empty and free of whitespace.
    pub fn check_names(&self) -> Result<(), ValidationFailure> {
        let names = std::iter::once(&self.domain_name)
            .chain(&self.alternate_names)
            .chain(&self.domain_alias);
        for name in names {
            let reason = if name.trim().is_empty() {
                "must not be empty"
            } else if name.chars().any(char::is_whitespace) {
                "must not contain whitespace"
            } else {
                continue;
            };
            return Err(ValidationFailure::InvalidDomainName {
                name: name.clone(),
                reason,
            });
        }
        Ok(())
    }

    /// Primary name followed by the alternates.
    pub fn domain_names(&self) -> Vec<String> {
        std::iter::once(self.domain_name.clone())
            .chain(self.alternate_names.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        custom_domain: CustomDomainInput,
    }

    fn external(cert: bool) -> CustomDomainSpec {
        CustomDomainSpec {
            is_external_domain: true,
            certificate: cert.then(|| CertificateRef { arn: "arn:cert".into() }),
            ..CustomDomainSpec::named("example.com")
        }
    }

    #[test]
    fn test_bare_name_from_toml() {
        let w: Wrapper = toml::from_str(r#"custom_domain = "example.com""#).unwrap();
        let spec = CustomDomainSpec::from(w.custom_domain);
        assert_eq!(spec, CustomDomainSpec::named("example.com"));
        assert_eq!(spec.domain_names(), ["example.com"]);
    }

    #[test]
    fn test_table_from_toml() {
        let w: Wrapper = toml::from_str(
            r#"
            [custom_domain]
            domain_name = "example.com"
            alternate_names = ["www.example.com"]
            hosted_zone = { zone_id = "Z123", zone_name = "example.com" }
            domain_alias = "example.org"
            "#,
        )
        .unwrap();
        let spec = CustomDomainSpec::from(w.custom_domain);
        assert_eq!(spec.domain_names(), ["example.com", "www.example.com"]);
        assert_eq!(
            spec.hosted_zone,
            Some(HostedZoneInput::Zone(HostedZone {
                zone_id: "Z123".into(),
                zone_name: "example.com".into()
            }))
        );
        assert_eq!(spec.domain_alias.as_deref(), Some("example.org"));
    }

    #[test]
    fn test_hosted_zone_name_from_toml() {
        let w: Wrapper = toml::from_str(
            r#"custom_domain = { domain_name = "app.example.com", hosted_zone = "example.com" }"#,
        )
        .unwrap();
        let spec = CustomDomainSpec::from(w.custom_domain);
        assert_eq!(spec.hosted_zone, Some(HostedZoneInput::Name("example.com".into())));
    }

    #[test]
    fn test_external_domain_rules() {
        assert!(external(true).validate().is_ok());
        assert_eq!(
            external(false).validate(),
            Err(ConfigurationConflict::ExternalDomainWithoutCertificate {
                domain: "example.com".into()
            })
        );

        let with_alias = CustomDomainSpec {
            domain_alias: Some("www.example.com".into()),
            ..external(true)
        };
        assert!(matches!(
            with_alias.validate(),
            Err(ConfigurationConflict::ExternalDomainWithAlias { .. })
        ));

        let with_zone = CustomDomainSpec {
            hosted_zone: Some(HostedZoneInput::Name("example.com".into())),
            ..external(true)
        };
        assert!(matches!(
            with_zone.validate(),
            Err(ConfigurationConflict::ExternalDomainWithHostedZone { .. })
        ));
    }

    #[test]
    fn test_empty_or_blank_names_rejected() {
        assert!(CustomDomainSpec::named("example.com").check_names().is_ok());
        assert_eq!(
            CustomDomainSpec::named("").check_names(),
            Err(ValidationFailure::InvalidDomainName {
                name: String::new(),
                reason: "must not be empty"
            })
        );

        let alternate = CustomDomainSpec {
            alternate_names: vec!["www example.com".into()],
            ..CustomDomainSpec::named("example.com")
        };
        assert!(matches!(
            alternate.check_names(),
            Err(ValidationFailure::InvalidDomainName {
                reason: "must not contain whitespace",
                ..
            })
        ));

        let alias = CustomDomainSpec {
            domain_alias: Some(" ".into()),
            ..CustomDomainSpec::named("example.com")
        };
        assert!(alias.check_names().is_err());
    }

    #[test]
    fn test_non_external_never_conflicts() {
        let spec = CustomDomainSpec {
            domain_alias: Some("www.example.com".into()),
            hosted_zone: Some(HostedZoneInput::Name("example.com".into())),
            ..CustomDomainSpec::named("example.com")
        };
        assert!(spec.validate().is_ok());
    }
}
