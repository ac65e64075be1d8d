use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name used under the platform config and data dirs.
const APP_DIR: &str = "medsched";
const CONFIG_FILE_NAME: &str = "config.yaml";
const DATA_DIR_ENV: &str = "MEDS_DATA_DIR";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Where a setting came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "environment",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    fn set(&mut self, value: T, source: ConfigSource) {
        *self = Self::new(value, source);
    }
}

/// Settings for the `meds` binary.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the schedule document
    pub data_dir: ConfigValue<PathBuf>,
    /// Used when RUST_LOG is not set
    pub log_filter: ConfigValue<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Keys accepted in the YAML file. All optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_filter: Option<String>,
}

impl ConfigFile {
    /// `Ok(None)` when there is no file at `path`.
    fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Config {
    /// Builds the configuration from defaults, then the config file (the
    /// given one or the platform default), then the environment.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if let Some(file) = ConfigFile::read(&path)? {
            config.apply_file(file, &path);
            config.config_file = Some(path);
        }
        config.apply_env();

        Ok(config)
    }

    fn defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(Self::default_data_dir(), ConfigSource::Default),
            log_filter: ConfigValue::new(DEFAULT_LOG_FILTER.to_string(), ConfigSource::Default),
            config_file: None,
        }
    }

    /// A relative `data_dir` is taken relative to the file that names it.
    fn apply_file(&mut self, file: ConfigFile, path: &Path) {
        if let Some(dir) = file.data_dir {
            let dir = match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            };
            self.data_dir.set(dir, ConfigSource::File);
        }
        if let Some(filter) = file.log_filter {
            self.log_filter.set(filter, ConfigSource::File);
        }
    }

    fn apply_env(&mut self) {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.data_dir.set(PathBuf::from(dir), ConfigSource::Environment);
        }
    }

    /// e.g. `~/.config/medsched` on Linux
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// e.g. `~/.local/share/medsched` on Linux
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(CONFIG_FILE_NAME)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.data_dir.value.ends_with("medsched"));
        assert_eq!(config.data_dir.source, ConfigSource::Default);
        assert_eq!(config.log_filter.value, "warn");
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "database_path: /tmp/fit.db\n").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /custom/meds").unwrap();
        writeln!(file, "log_filter: debug").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/custom/meds"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.log_filter.value, "debug");
        assert_eq!(config.log_filter.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_data_dir_resolves_against_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: schedule").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("schedule"));
        assert_eq!(config.log_filter.source, ConfigSource::Default);
    }

    #[test]
    #[ignore] // mutates process env; run alone with --ignored
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /from/file").unwrap();

        std::env::set_var("MEDS_DATA_DIR", "/from/env");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/from/env"));
        assert_eq!(config.data_dir.source, ConfigSource::Environment);

        std::env::remove_var("MEDS_DATA_DIR");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
