//! Path pattern construction and validation.
//!
//! # Responsibilities
//! - Prefix raw patterns with the optional base path
//! - Derive the pattern for a top-level static artifact
//! - Check patterns against the platform's pattern grammar
//!
//! # Design Decisions
//! - Building is pure and never fails; validation is a separate step
//! - The grammar regex is compiled once per process

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;

static PATTERN_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Z0-9_\-.*$/~"'@:+?&]+$"#).expect("path pattern grammar is a valid regex")
});

/// A path-matching expression as installed on a routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathPattern(String);

impl PathPattern {
    /// Wrap a pattern after checking it against the grammar.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationFailure> {
        let raw = raw.into();
        validate(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefix `raw` with `base_path`.
///
/// An empty `raw` means "exact root" and yields the base path itself, with no
/// trailing slash. Without a base path `raw` is returned unchanged.
pub fn build(base_path: Option<&str>, raw: &str) -> String {
    match base_path {
        None => raw.to_string(),
        Some(base) if raw.is_empty() => base.to_string(),
        Some(base) => format!("{}/{}", base, raw),
    }
}

/// Pattern for a top-level build artifact: `name/*` for directories, `name` for files.
pub fn artifact_pattern(name: &str, is_dir: bool) -> String {
    if is_dir {
        format!("{}/*", name)
    } else {
        name.to_string()
    }
}

/// Check `pattern` against the grammar.
pub fn validate(pattern: &str) -> Result<(), ValidationFailure> {
    if PATTERN_GRAMMAR.is_match(pattern) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidPathPattern {
            pattern: pattern.to_string(),
        })
    }
}

/// Check a base path: leading slash, no trailing slash, grammar characters only.
pub fn validate_base_path(base_path: &str) -> Result<(), ValidationFailure> {
    let reason = if !base_path.starts_with('/') {
        Some("must start with '/'")
    } else if base_path.len() > 1 && base_path.ends_with('/') {
        Some("must not end with '/'")
    } else if base_path == "/" {
        Some("must name at least one segment")
    } else if !PATTERN_GRAMMAR.is_match(base_path) {
        Some("contains characters outside the path pattern grammar")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationFailure::InvalidBasePath {
            base_path: base_path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_base_path() {
        assert_eq!(build(None, "blog"), "blog");
        assert_eq!(build(None, "api/*"), "api/*");
        assert_eq!(build(None, ""), "");
    }

    #[test]
    fn test_build_with_base_path() {
        assert_eq!(build(Some("/docs"), ""), "/docs");
        assert_eq!(build(Some("/docs"), "blog"), "/docs/blog");
        assert_eq!(build(Some("/docs"), "_next/image*"), "/docs/_next/image*");
    }

    #[test]
    fn test_artifact_pattern() {
        assert_eq!(artifact_pattern("_next", true), "_next/*");
        assert_eq!(artifact_pattern("favicon.ico", false), "favicon.ico");
    }

    #[test]
    fn test_validate_accepts_grammar() {
        for ok in ["api/*", "_next/image*", "/", "a-b.c~d$e", "x@y:z+q?r&s", "'quoted'\""] {
            assert!(validate(ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects_outside_grammar() {
        for bad in ["", "my file", "über", "a#b", "a%20b", "[x]"] {
            let err = validate(bad).unwrap_err();
            assert_eq!(
                err,
                ValidationFailure::InvalidPathPattern {
                    pattern: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn test_path_pattern_parse() {
        assert_eq!(PathPattern::parse("api/*").unwrap().as_str(), "api/*");
        assert!(PathPattern::parse("a b").is_err());
    }

    #[test]
    fn test_validate_base_path() {
        assert!(validate_base_path("/docs").is_ok());
        assert!(validate_base_path("/docs/v2").is_ok());
        assert!(validate_base_path("docs").is_err());
        assert!(validate_base_path("/docs/").is_err());
        assert!(validate_base_path("/").is_err());
        assert!(validate_base_path("/my docs").is_err());
    }
}
