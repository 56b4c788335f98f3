//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (pattern, backend, domain, ...)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary owns subscriber setup
//! - Per-rule events at debug, phase boundaries at info

pub mod logging;

pub use logging::init_logging;
