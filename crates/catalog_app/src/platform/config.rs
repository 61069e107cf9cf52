//! Application configuration.
//!
//! Values come from an optional RON file in the working directory, then
//! `CATALOG_*` environment variables override them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_engine::{ApiCredentials, DEFAULT_BASE_URL};
use catalog_logging::LogDestination;
use serde::Deserialize;

pub(crate) const CONFIG_FILENAME: &str = "catalog.ron";
const ENV_PUBLIC_KEY: &str = "CATALOG_PUBLIC_KEY";
const ENV_PRIVATE_KEY: &str = "CATALOG_PRIVATE_KEY";
const ENV_BASE_URL: &str = "CATALOG_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("missing {0}; set it in catalog.ron or the environment")]
    MissingCredential(&'static str),
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FileConfig {
    base_url: String,
    public_key: String,
    private_key: String,
    data_dir: PathBuf,
    log: LogTarget,
    log_file: PathBuf,
    request_timeout_secs: Option<u64>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            public_key: String::new(),
            private_key: String::new(),
            data_dir: PathBuf::from(".catalog"),
            log: LogTarget::File,
            log_file: PathBuf::from("catalog.log"),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub credentials: ApiCredentials,
    pub data_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_path: PathBuf,
    pub request_timeout: Option<Duration>,
}

pub(crate) fn load_from_environment(path: &Path) -> Result<AppConfig, ConfigError> {
    load(path, |key| std::env::var(key).ok())
}

pub(crate) fn load(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut file = read_file_config(path)?;

    let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());
    if let Some(value) = non_empty(ENV_PUBLIC_KEY) {
        file.public_key = value;
    }
    if let Some(value) = non_empty(ENV_PRIVATE_KEY) {
        file.private_key = value;
    }
    if let Some(value) = non_empty(ENV_BASE_URL) {
        file.base_url = value;
    }

    if file.public_key.is_empty() {
        return Err(ConfigError::MissingCredential("public key"));
    }
    if file.private_key.is_empty() {
        return Err(ConfigError::MissingCredential("private key"));
    }

    Ok(AppConfig {
        base_url: file.base_url,
        credentials: ApiCredentials {
            public_key: file.public_key,
            private_key: file.private_key,
        },
        data_dir: file.data_dir,
        log_destination: match file.log {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        },
        log_path: file.log_file,
        request_timeout: file.request_timeout_secs.map(Duration::from_secs),
    })
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_file_uses_defaults_and_env_credentials() {
        let temp = TempDir::new().unwrap();
        let config = load(
            &temp.path().join(CONFIG_FILENAME),
            env_of(&[(ENV_PUBLIC_KEY, "pub"), (ENV_PRIVATE_KEY, "priv")]),
        )
        .unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.credentials.public_key, "pub");
        assert_eq!(config.data_dir, PathBuf::from(".catalog"));
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                base_url: "https://file.example.com",
                public_key: "file-pub",
                private_key: "file-priv",
                log: Both,
                request_timeout_secs: Some(15),
            )"#,
        )
        .unwrap();

        let config = load(&path, env_of(&[(ENV_PUBLIC_KEY, "env-pub")])).unwrap();
        assert_eq!(config.base_url, "https://file.example.com");
        assert_eq!(config.credentials.public_key, "env-pub");
        assert_eq!(config.credentials.private_key, "file-priv");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn missing_private_key_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = load(
            &temp.path().join(CONFIG_FILENAME),
            env_of(&[(ENV_PUBLIC_KEY, "pub"), (ENV_PRIVATE_KEY, "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("private key")));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(public_key: 42)").unwrap();

        let err = load(&path, env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
