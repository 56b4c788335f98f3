//! Request transforms executed at the CDN edge.
//!
//! # Data Flow
//! ```text
//! FunctionUrlAuth::AwsIam
//!     → signer.rs (edge function + invoke grants) → origin-request transform
//!                                                   (server and image bundles)
//! always
//!     → host_header.rs (viewer function) → viewer-request transform (server bundle)
//! ```

pub mod host_header;
pub mod signer;

pub use host_header::host_forwarding_transform;
pub use signer::{edge_sign_transforms, FunctionUrlAuth, EDGE_INVOKE_PRINCIPALS};
