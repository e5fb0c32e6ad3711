//! Configuration module for ringprov
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (RINGPROV_*)
//! 3. Config file (`--config`, `RINGPROV_CONFIG`, or /etc/ringprov/config.toml)
//! 4. Built-in defaults

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{load_effective, parse_with_warnings};
pub use types::{
    AppConfig, BackendConfig, ColorMode, Config, DatabaseConfig, FilesConfig, FirewallConfig,
    OutputConfig, PackagesConfig, ProxyConfig, ReadinessConfig, Verbosity, DEFAULT_CONFIG_PATH,
};
