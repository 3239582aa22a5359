//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{ConfigValidationError, FileChorusConfig, FileConfig, FileQueryConfig};
pub use loader::ConfigLoader;
