//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CmsConfig (validated, immutable)
//!     → CmsRuntime built from it, shared via ArcSwap
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → runtime rebuilt and swapped atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, CmsConfig, CmsSettings, DecoratorConfig, ListenerConfig, ObservabilityConfig,
    RouteConfig, SeoConfig, TimeoutConfig,
};
pub use validation::{validate_config, validate_page_update, ValidationError};
pub use watcher::ConfigWatcher;
