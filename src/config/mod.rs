//! Configuration module for tube-snapper.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Input and output mode definitions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, OptionsConfig, ToolsConfig, DEFAULT_QUALITY};
pub use modes::{InputMode, OutputFormat};
pub use validation::{parse_quality, resolve_quality, validate_config, validate_url};
