//! Configuration module for the snapmap-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - The acquisition policy toggles
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AcquisitionPolicy, ApiConfig, Config, OptionsConfig, SearchConfig};
pub use modes::InputMode;
pub use validation::validate_config;
