//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! BuildManifest + base path + CachePolicySet
//!     → pattern.rs (prefix, grammar check)
//!     → behavior.rs (static/server/image bundles, static + dynamic patterns)
//!     → fallback.rs (root rules when there is no index document)
//!     → distribution::composer installs them in order:
//!         static artifacts → api/* → _next/data/* → _next/image* → root fallback
//! ```
//!
//! # Design Decisions
//! - Patterns are validated before anything is installed
//! - The platform picks the most specific match; install order only breaks ties
//! - Same input always yields the same rule order

pub mod behavior;
pub mod fallback;
pub mod pattern;

pub use behavior::{BehaviorInputs, BehaviorSet, MAX_STATIC_ARTIFACTS};
pub use fallback::{root_fallback_patterns, RootDocument};
pub use pattern::PathPattern;
