#[cfg(feature = "cli")]
pub mod cli;
pub mod mapping;
pub mod run_config;
pub mod toml_config;

pub use run_config::{RunConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
