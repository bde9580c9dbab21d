// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ConfigError;

/// On-disk shape of the shopctl configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub common_opts: CommonOpts,

    #[serde(default)]
    pub services: ServiceEndpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CommonOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Redis URL used to mirror user sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_store: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_ttl: Option<String>,
}

/// Per-service `host:port` overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServiceEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

fn home_config_file() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("shopctl")
            .join("config.yaml")
    })
}

fn candidate_config_files() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home_cfg) = home_config_file() {
        candidates.push(home_cfg);
    }
    candidates.push(PathBuf::from("config.yaml"));
    candidates
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the first existing file among
/// `$HOME/.config/shopctl/config.yaml` and `./config.yaml` is used, and a
/// missing file yields the default configuration.
pub fn load_config(explicit: Option<&str>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(Path::new(path));
    }

    for file_path in candidate_config_files() {
        if file_path.exists() {
            return read_config(&file_path);
        }
    }

    debug!("no configuration file found, using defaults");
    Ok(AppConfig::default())
}

/// Load the configuration that is about to be rewritten.
///
/// Same lookup as [`load_config`], but an explicit path that does not exist
/// yet yields the default configuration.
pub fn load_config_for_update(explicit: Option<&str>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) if !Path::new(path).exists() => {
            debug!(path, "configuration file does not exist yet, starting empty");
            Ok(AppConfig::default())
        }
        _ => load_config(explicit),
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // an empty file is a valid, empty config
    if raw.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let parsed = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(parsed)
}

/// Persist the configuration, to the explicit path or to the home config file.
pub fn save_config(config: &AppConfig, explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => home_config_file().ok_or(ConfigError::MissingHome)?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let serialized = serde_yaml::to_string(config)?;
    fs::write(&path, serialized).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Serialize the configuration for display.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(config)?)
}

#[cfg(test)]
pub(crate) static HOME_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            common_opts: CommonOpts {
                timeout: Some("5s".to_string()),
                session_store: Some("redis://127.0.0.1:6379".to_string()),
                session_ttl: None,
            },
            services: ServiceEndpoints {
                user: Some("users.internal:7000".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn update_starts_empty_when_explicit_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.yaml");
        let loaded = load_config_for_update(path.to_str()).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn update_reads_existing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "common_opts: [unterminated").unwrap();
        let err = load_config_for_update(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn save_then_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let path_str = path.to_str().unwrap();

        let written = save_config(&sample(), Some(path_str)).unwrap();
        assert_eq!(written, path);

        let loaded = load_config(Some(path_str)).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        let loaded = load_config(path.to_str()).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "services:\n  cart: carts:9000\n").unwrap();
        let loaded = load_config(path.to_str()).unwrap();
        assert_eq!(loaded.services.cart.as_deref(), Some("carts:9000"));
        assert_eq!(loaded.common_opts, CommonOpts::default());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "common_opts: [unterminated").unwrap();
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn home_config_is_used_when_present() {
        let _guard = HOME_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let previous = env::var_os("HOME");
        // SAFETY: serialized by HOME_LOCK.
        unsafe { env::set_var("HOME", dir.path()) };

        let saved = save_config(&sample(), None).unwrap();
        assert!(saved.ends_with(".config/shopctl/config.yaml"));
        let loaded = load_config(None).unwrap();
        assert_eq!(loaded, sample());

        // SAFETY: serialized by HOME_LOCK.
        unsafe {
            match previous {
                Some(home) => env::set_var("HOME", home),
                None => env::remove_var("HOME"),
            }
        }
    }

    #[test]
    fn render_skips_unset_values() {
        let rendered = render_config(&AppConfig::default()).unwrap();
        assert!(rendered.contains("common_opts"));
        assert!(!rendered.contains("timeout"));
    }
}
