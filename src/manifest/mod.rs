//! Static build output description.
//!
//! # Data Flow
//! ```text
//! static build directory (external build step)
//!     → reader.rs (top-level listing only)
//!     → BuildManifest (sorted, read-only)
//!     → routing::behavior (one static rule per entry)
//!     → routing::fallback (index document check)
//! ```

pub mod reader;

use serde::{Deserialize, Serialize};

pub use reader::read_build_dir;

/// Name of the root document the platform serves natively.
pub const INDEX_DOCUMENT: &str = "index.html";

/// One top-level entry of the static output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default)]
    pub is_dir: bool,
}

impl ManifestEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Top-level entries of the static asset output, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildManifest {
    entries: Vec<ManifestEntry>,
}

impl BuildManifest {
    pub fn new(entries: impl IntoIterator<Item = ManifestEntry>) -> Self {
        let mut entries: Vec<ManifestEntry> = entries.into_iter().collect();
        entries.sort();
        entries.dedup();
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when a top-level file named `index.html` exists.
    pub fn has_index_document(&self) -> bool {
        self.entries
            .iter()
            .any(|e| !e.is_dir && e.name == INDEX_DOCUMENT)
    }
}

impl<'de> Deserialize<'de> for BuildManifest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<ManifestEntry>::deserialize(deserializer)?;
        Ok(Self::new(entries))
    }
}
