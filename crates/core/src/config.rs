//! Application configuration layered from defaults, a TOML file, and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "campus";

/// Prefix for environment overrides, e.g. `CAMPUS_ROSTER_PATH`.
pub const ENV_PREFIX: &str = "CAMPUS";

const DEFAULT_CONFIG: &str = r#"# campus configuration

# Roster JSON used to seed the registry. The built-in demo roster is used when unset.
# roster_path = "/path/to/roster.json"

# Directory receiving campus.log.
log_dir = "logs"
"#;

/// Runtime settings for the `campus` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Roster to seed from; `None` selects the demo roster.
    #[serde(default)]
    pub roster_path: Option<PathBuf>,
    /// Directory for the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default config file plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from `path` (optional on disk) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from `path` with `env` as the highest-priority layer.
    pub fn load_with(path: impl AsRef<Path>, env: Environment) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("log_dir", defaults.log_dir.to_string_lossy().into_owned())?
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Location of `config.toml` under the user's config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(default_config_path())
}

/// Write the default config to `path` unless a file is already there.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Default config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::Map;
    use tempfile::tempdir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_with(dir.path().join("absent.toml"), env(&[]))?;
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(config.roster_path.is_none());
        Ok(())
    }

    #[test]
    fn default_file_is_written_once_and_parses() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");

        ensure_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, DEFAULT_CONFIG);

        fs::write(&path, "log_dir = \"custom\"\nroster_path = \"roster.json\"\n")?;
        ensure_config_at(&path)?;

        let config = AppConfig::load_with(&path, env(&[]))?;
        assert_eq!(config.log_dir, PathBuf::from("custom"));
        assert_eq!(config.roster_path, Some(PathBuf::from("roster.json")));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_dir = \"custom\"\nroster_path = \"roster.json\"\n")?;

        let config = AppConfig::load_with(
            &path,
            env(&[
                ("CAMPUS_ROSTER_PATH", "/srv/campus/roster.json"),
                ("CAMPUS_LOG_DIR", "/var/log/campus"),
            ]),
        )?;
        assert_eq!(
            config.roster_path,
            Some(PathBuf::from("/srv/campus/roster.json"))
        );
        assert_eq!(config.log_dir, PathBuf::from("/var/log/campus"));
        Ok(())
    }

    #[test]
    fn environment_applies_without_file() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_with(
            dir.path().join("absent.toml"),
            env(&[("CAMPUS_ROSTER_PATH", "seed.json")]),
        )?;
        assert_eq!(config.roster_path, Some(PathBuf::from("seed.json")));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        Ok(())
    }
}
