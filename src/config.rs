use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{Result, UserError};

pub const DEFAULT_DATA_FILE: &str = "users.json";
pub const DATA_FILE_ENV: &str = "USERS_FILE";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load the config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| UserError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| UserError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "users").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get data file, preferring explicit argument, then env var, then config
    pub fn resolve_data_file(&self, explicit: Option<&Path>) -> PathBuf {
        self.resolve_data_file_with(explicit, std::env::var_os(DATA_FILE_ENV))
    }

    fn resolve_data_file_with(&self, explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env.map(PathBuf::from))
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.data_file.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn reads_keys_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_file = \"/tmp/people.json\"\nlog_level = \"debug\"\n")
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/people.json")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_file = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, UserError::ConfigParse { .. }));
    }

    fn with_data_file(path: &str) -> Config {
        Config {
            data_file: Some(PathBuf::from(path)),
            log_level: None,
        }
    }

    #[test]
    fn explicit_path_wins() {
        let config = with_data_file("from-config.json");
        let resolved = config.resolve_data_file_with(
            Some(Path::new("explicit.json")),
            Some(OsString::from("from-env.json")),
        );
        assert_eq!(resolved, PathBuf::from("explicit.json"));
    }

    #[test]
    fn env_beats_config() {
        let config = with_data_file("from-config.json");
        let resolved = config.resolve_data_file_with(None, Some(OsString::from("from-env.json")));
        assert_eq!(resolved, PathBuf::from("from-env.json"));
    }

    #[test]
    fn config_beats_default() {
        let config = with_data_file("from-config.json");
        assert_eq!(
            config.resolve_data_file_with(None, None),
            PathBuf::from("from-config.json")
        );
    }

    #[test]
    fn falls_back_to_users_json() {
        let resolved = Config::default().resolve_data_file_with(None, None);
        assert_eq!(resolved, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(resolved, PathBuf::from("users.json"));
    }
}
