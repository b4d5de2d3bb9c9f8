//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → RouterConfig (immutable once loaded)
//!     → consumed at router construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; route mutation happens through the
//!   router's register/deregister operations, never through config
//! - All fields have defaults to allow minimal configs

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::RouterConfig;
