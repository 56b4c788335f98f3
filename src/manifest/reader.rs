//! Build directory listing.

use std::fs;
use std::io;
use std::path::Path;

use crate::manifest::{BuildManifest, ManifestEntry};

/// Read the top-level entries of a static build directory.
///
/// Only the first level is listed. Symlinks are classified by their target.
pub fn read_build_dir(path: &Path) -> io::Result<BuildManifest> {
    let mut entries = Vec::new();

    for dirent in fs::read_dir(path)? {
        let dirent = dirent?;
        let name = dirent.file_name().into_string().map_err(|raw| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non UTF-8 entry name in {}: {:?}", path.display(), raw),
            )
        })?;
        let is_dir = fs::metadata(dirent.path())?.is_dir();
        entries.push(ManifestEntry { name, is_dir });
    }

    tracing::debug!(path = %path.display(), entries = entries.len(), "Build directory listed");
    Ok(BuildManifest::new(entries))
}
