//! Distribution aggregate and its composer.
//!
//! # Data Flow
//! ```text
//! SiteConfig + BuildManifest
//!     → composer.rs
//!         input checks (conflicts, patterns, ceiling)     no side effects
//!         CachePolicySet, DomainResolver, edge transforms  platform calls
//!         DistributionBuilder (model.rs)                   rules appended in order
//!         finalize_distribution                            identity assigned
//!         alias_records                                    DNS descriptions
//!     → Composition
//! ```
//!
//! # Design Decisions
//! - One composition per call; the builder is owned, never shared
//! - Any failure aborts; no partial distribution is returned
//! - Domain names, certificate and default behavior are composer-controlled

pub mod composer;
pub mod model;

pub use composer::{compose, Composition, DistributionComposer};
pub use model::{
    AllowedMethods, BackendKind, Behavior, BehaviorOptions, CachedMethods, Distribution,
    DistributionBuilder, DistributionIdentity, DistributionOverrides, DistributionProps,
    HttpVersion, Origin, PriceClass, RequestTransform, RoutingRule, SecurityPolicy,
    TransformEvent, ViewerProtocolPolicy,
};
