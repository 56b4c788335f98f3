//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → distribution::composer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Only backend endpoints are required; every other section has defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::BackendEndpoints;
pub use schema::ObservabilityConfig;
pub use schema::SiteConfig;
pub use validation::{validate_config, ValidationError};
