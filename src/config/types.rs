//! Configuration type definitions
//!
//! Every value has a default, so an absent or empty file provisions the
//! standard "ring" layout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::entities::DatabaseCredentials;
use crate::domain::services::{BackendUnit, ProxySite};
use crate::domain::value_objects::{ConfigWarning, PgVersion, WritePolicy};
use crate::error::ProvisionResult;

use super::loader;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/ringprov/config.toml";

/// Application root and deploy identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub root: PathBuf,
    pub user: String,
    pub group: String,
    /// Mode applied recursively to the root, as passed to `chmod -R`
    pub mode: String,
    /// Static frontend tree, relative to the root
    pub frontend: PathBuf,
    /// Backend code and its virtualenv, relative to the root
    pub backend: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/var/www/ring"),
            user: "ubuntu".to_string(),
            group: "www-data".to_string(),
            mode: "755".to_string(),
            frontend: PathBuf::from("frontend"),
            backend: PathBuf::from("backend"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub install: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            install: [
                "postgresql",
                "postgresql-contrib",
                "nginx",
                "python3",
                "python3-venv",
                "python3-pip",
                "ufw",
                "curl",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub name: String,
    /// Role whose password is set and which receives the grants
    pub user: String,
    pub password: String,
    /// OS account `psql` and `createdb` run as
    pub os_user: String,
    pub host: String,
    pub port: u16,
    /// Major version used when `psql --version` cannot be parsed
    pub fallback_version: String,
    pub cluster: String,
    pub service: String,
    /// Parent of `<version>/<cluster>/postgresql.conf`
    pub config_root: PathBuf,
    pub listen_addresses: String,
    pub max_connections: u32,
    pub shared_buffers: String,
    pub hba_rules: Vec<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: "ring".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            os_user: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            fallback_version: "14".to_string(),
            cluster: "main".to_string(),
            service: "postgresql".to_string(),
            config_root: PathBuf::from("/etc/postgresql"),
            listen_addresses: "*".to_string(),
            max_connections: 100,
            shared_buffers: "256MB".to_string(),
            hba_rules: vec![
                "host    all    all    0.0.0.0/0    md5".to_string(),
                "host    all    all    ::/0         md5".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval_ms: 1000,
        }
    }
}

impl ReadinessConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// File name under sites-available and sites-enabled
    pub site_name: String,
    pub server_name: String,
    pub listen_port: u16,
    pub api_prefix: String,
    /// Built static tree, relative to the frontend directory
    pub static_dir: PathBuf,
    pub sites_available: PathBuf,
    pub sites_enabled: PathBuf,
    pub remove_default_site: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            site_name: "ring".to_string(),
            server_name: "_".to_string(),
            listen_port: 80,
            api_prefix: "/api".to_string(),
            static_dir: PathBuf::from("dist"),
            sites_available: PathBuf::from("/etc/nginx/sites-available"),
            sites_enabled: PathBuf::from("/etc/nginx/sites-enabled"),
            remove_default_site: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub service: String,
    pub description: String,
    pub host: String,
    pub port: u16,
    pub app_module: String,
    pub restart_sec: u32,
    pub python: String,
    pub unit_dir: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            service: "ring-backend".to_string(),
            description: "Ring backend (FastAPI)".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            app_module: "main:app".to_string(),
            restart_sec: 5,
            python: "python3".to_string(),
            unit_dir: PathBuf::from("/etc/systemd/system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallConfig {
    /// Application profiles passed to `ufw allow`
    pub allow: Vec<String>,
    pub enable: bool,
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            allow: vec!["OpenSSH".to_string(), "Nginx Full".to_string()],
            enable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub write_policy: WritePolicy,
    pub state_file: PathBuf,
    pub lock_file: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::default(),
            state_file: PathBuf::from("/var/lib/ringprov/state.toml"),
            lock_file: PathBuf::from("/run/ringprov.lock"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verbosity: Verbosity,
    pub color: ColorMode,
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub packages: PackagesConfig,
    pub database: DatabaseConfig,
    pub readiness: ReadinessConfig,
    pub proxy: ProxyConfig,
    pub backend: BackendConfig,
    pub firewall: FirewallConfig,
    pub files: FilesConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProvisionResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (RINGPROV_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn frontend_dir(&self) -> PathBuf {
        self.app.root.join(&self.app.frontend)
    }

    pub fn backend_dir(&self) -> PathBuf {
        self.app.root.join(&self.app.backend)
    }

    /// Directories the layout stage creates, in creation order
    pub fn app_directories(&self) -> Vec<PathBuf> {
        vec![self.frontend_dir(), self.backend_dir()]
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.backend_dir().join("venv")
    }

    pub fn site_path(&self) -> PathBuf {
        self.proxy.sites_available.join(&self.proxy.site_name)
    }

    pub fn site_link(&self) -> PathBuf {
        self.proxy.sites_enabled.join(&self.proxy.site_name)
    }

    pub fn default_site_link(&self) -> PathBuf {
        self.proxy.sites_enabled.join("default")
    }

    pub fn unit_name(&self) -> String {
        format!("{}.service", self.backend.service)
    }

    pub fn unit_path(&self) -> PathBuf {
        self.backend.unit_dir.join(self.unit_name())
    }

    /// Directory holding `postgresql.conf` and `pg_hba.conf`
    pub fn pg_config_dir(&self, version: &PgVersion) -> PathBuf {
        self.database
            .config_root
            .join(version.as_str())
            .join(&self.database.cluster)
    }

    /// `postgresql.conf` settings, in the order they are applied
    pub fn pg_settings(&self) -> Vec<(&'static str, String)> {
        vec![
            ("listen_addresses", self.database.listen_addresses.clone()),
            ("max_connections", self.database.max_connections.to_string()),
            ("shared_buffers", self.database.shared_buffers.clone()),
        ]
    }

    pub fn credentials(&self) -> DatabaseCredentials {
        DatabaseCredentials {
            database: self.database.name.clone(),
            user: self.database.user.clone(),
            password: self.database.password.clone(),
            host: self.database.host.clone(),
            port: self.database.port,
        }
    }

    pub fn proxy_site(&self) -> ProxySite {
        ProxySite {
            server_name: self.proxy.server_name.clone(),
            listen_port: self.proxy.listen_port,
            static_root: self.frontend_dir().join(&self.proxy.static_dir),
            api_prefix: self.proxy.api_prefix.clone(),
            backend_host: self.backend.host.clone(),
            backend_port: self.backend.port,
        }
    }

    pub fn backend_unit(&self) -> BackendUnit {
        BackendUnit {
            description: self.backend.description.clone(),
            user: self.app.user.clone(),
            group: self.app.group.clone(),
            working_dir: self.backend_dir(),
            venv_dir: self.venv_dir(),
            app_module: self.backend.app_module.clone(),
            host: self.backend.host.clone(),
            port: self.backend.port,
            restart_sec: self.backend.restart_sec,
            after: vec![format!("{}.service", self.database.service)],
        }
    }
}
