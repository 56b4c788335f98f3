//! CDN distribution composer for static + server + image web applications.

pub mod config;
pub mod distribution;
pub mod domain;
pub mod edge;
pub mod error;
pub mod manifest;
pub mod observability;
pub mod platform;
pub mod policy;
pub mod routing;

pub use config::schema::SiteConfig;
pub use distribution::{compose, Composition, DistributionComposer};
pub use error::{ComposeError, ComposeResult};
pub use manifest::BuildManifest;
pub use platform::{CdnPlatform, PlanningPlatform};
