//! Application configuration module.
//!
//! Reads the optional TOML config file holding the backend URL and the
//! filter applied at startup.

/// Config file schema and loading.
#[allow(clippy::module_inception)]
pub mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
