//! Configuration and file locations for the visual console
//!
//! This crate provides:
//! - File path utilities for config and cache files
//! - Configuration file loading (TOML)
//! - Console configuration (ConsoleConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::ConsoleConfig;
pub use config_file::load_config_file;
pub use paths::{app_config_path, cache_dir, config_dir, log_file_name};
