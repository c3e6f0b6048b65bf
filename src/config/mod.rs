//! Configuration management for kiln jobs
//!
//! This module contains the configuration system components:
//! - `types`: immutable configuration value objects
//! - `loader`: configuration file loading and validation
//! - `expander`: multi-output and foreach expansion

pub mod expander;
pub mod loader;
pub mod types;

// Re-export commonly used items for convenience
pub use expander::{expand_config, interpolate_path};
pub use loader::{load_config, parse_config};
pub use types::{BatchConfig, Config, Format, OutputSpec};
