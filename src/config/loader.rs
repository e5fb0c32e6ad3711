//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::FsError;
use crate::domain::value_objects::{ConfigWarning, WritePolicy};
use crate::error::{ProvisionError, ProvisionResult};

use super::types::{Config, Verbosity, DEFAULT_CONFIG_PATH};

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for error and warning locations
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ProvisionError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve and load the effective configuration
///
/// An explicit path must exist. Without one, `RINGPROV_CONFIG` and then the
/// default location are tried; a missing default file means built-in
/// defaults. Environment overrides are applied last.
pub fn load_effective(explicit: Option<&Path>) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let from_env = std::env::var_os("RINGPROV_CONFIG").map(PathBuf::from);
    let (config, warnings) = match explicit.map(Path::to_path_buf).or(from_env) {
        Some(path) => load_with_warnings(&path)?,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_with_warnings(default)?
            } else {
                log::debug!("no config at {}, using defaults", default.display());
                (Config::default(), Vec::new())
            }
        }
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (RINGPROV_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(root) = var("RINGPROV_APP_ROOT") {
        config.app.root = PathBuf::from(root);
    }
    if let Some(user) = var("RINGPROV_DEPLOY_USER") {
        config.app.user = user;
    }
    if let Some(group) = var("RINGPROV_DEPLOY_GROUP") {
        config.app.group = group;
    }
    if let Some(password) = var("RINGPROV_DB_PASSWORD") {
        config.database.password = password;
    }

    if let Some(policy) = var("RINGPROV_WRITE_POLICY") {
        match policy.parse::<WritePolicy>() {
            Ok(policy) => config.files.write_policy = policy,
            Err(err) => log::warn!("ignoring RINGPROV_WRITE_POLICY: {err}"),
        }
    }

    if let Some(verbosity) = var("RINGPROV_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(needle)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "app",
        "root",
        "user",
        "group",
        "mode",
        "frontend",
        "packages",
        "install",
        "database",
        "name",
        "password",
        "os_user",
        "host",
        "port",
        "fallback_version",
        "cluster",
        "service",
        "config_root",
        "listen_addresses",
        "max_connections",
        "shared_buffers",
        "hba_rules",
        "readiness",
        "max_attempts",
        "interval_ms",
        "proxy",
        "site_name",
        "server_name",
        "listen_port",
        "api_prefix",
        "static_dir",
        "sites_available",
        "sites_enabled",
        "remove_default_site",
        "backend",
        "description",
        "app_module",
        "restart_sec",
        "python",
        "unit_dir",
        "firewall",
        "allow",
        "enable",
        "files",
        "write_policy",
        "state_file",
        "lock_file",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
