//! Root path fallback.
//!
//! Without a top-level `index.html` the site root has nothing to serve from
//! the bucket, so it is routed to the server bundle. Under a base path the
//! platform's default behavior cannot be used, and both the exact base path
//! and everything below it are routed explicitly.

use crate::error::ValidationFailure;
use crate::manifest::BuildManifest;
use crate::routing::pattern::{self, PathPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootDocument {
    HasIndexDocument,
    NoIndexDocument,
}

impl RootDocument {
    pub fn classify(manifest: &BuildManifest) -> Self {
        if manifest.has_index_document() {
            RootDocument::HasIndexDocument
        } else {
            RootDocument::NoIndexDocument
        }
    }
}

/// Patterns to route to the server bundle for the site root. Install these last.
pub fn root_fallback_patterns(
    manifest: &BuildManifest,
    base_path: Option<&str>,
) -> Result<Vec<PathPattern>, ValidationFailure> {
    match (RootDocument::classify(manifest), base_path) {
        (RootDocument::HasIndexDocument, _) => Ok(Vec::new()),
        (RootDocument::NoIndexDocument, None) => Ok(vec![PathPattern::parse("/")?]),
        (RootDocument::NoIndexDocument, Some(base)) => Ok(vec![
            PathPattern::parse(pattern::build(Some(base), ""))?,
            PathPattern::parse(pattern::build(Some(base), "*"))?,
        ]),
    }
}
