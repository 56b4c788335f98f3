//! Shared fixtures for integration tests.

use cdn_composer::config::{BackendEndpoints, SiteConfig};
use cdn_composer::manifest::{BuildManifest, ManifestEntry};
use url::Url;

/// Site config with default policies, no domain, no base path.
pub fn site_config() -> SiteConfig {
    SiteConfig::new(BackendEndpoints {
        static_bucket: "site-assets".into(),
        server_function_url: Url::parse("https://server.lambda-url.us-east-1.on.aws/").unwrap(),
        image_function_url: Url::parse("https://image.lambda-url.us-east-1.on.aws/").unwrap(),
    })
}

/// A typical build output without a root document.
pub fn app_manifest() -> BuildManifest {
    BuildManifest::new([
        ManifestEntry::dir("_next"),
        ManifestEntry::dir("images"),
        ManifestEntry::file("favicon.ico"),
        ManifestEntry::file("robots.txt"),
    ])
}

/// `count` distinct valid entries, alternating files and directories.
#[allow(dead_code)]
pub fn manifest_of(count: usize) -> BuildManifest {
    BuildManifest::new((0..count).map(|i| {
        if i % 2 == 0 {
            ManifestEntry::dir(format!("dir{:02}", i))
        } else {
            ManifestEntry::file(format!("file{:02}.txt", i))
        }
    }))
}
