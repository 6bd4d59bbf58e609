use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use sntrack_platform::DEFAULT_SYSFS_ROOT;

pub const APP_NAME: &str = "sntrack";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from(format!("/usr/local/share/{APP_NAME}/history.db"))
}

fn default_marker_path() -> PathBuf {
    PathBuf::from(format!("/tmp/{APP_NAME}"))
}

/// User configuration, read from `config.toml`.
///
/// The sleep hooks usually run as root while reports run as a regular
/// user, so both paths default to system-wide locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub database_path: PathBuf,
    pub marker_path: PathBuf,
    pub sysfs_root: PathBuf,
    /// Sessions this long or shorter are hidden from reports by default.
    pub short_session_secs: i64,
    pub log_level: LogLevel,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            marker_path: default_marker_path(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            short_session_secs: 300,
            log_level: LogLevel::Info,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_NAME)
}

pub fn runtime_dir() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(APP_NAME)
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl UserConfig {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                eprintln!(
                    "Warning: Ignoring invalid config {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let td = TempDir::new().unwrap();
        let config = UserConfig::load_from(&td.path().join("config.toml"));
        assert_eq!(config, UserConfig::default());
        assert_eq!(config.short_session_secs, 300);
        assert_eq!(config.marker_path, PathBuf::from("/tmp/sntrack"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("config.toml");
        fs::write(
            &path,
            "database_path = \"/var/lib/sntrack/history.db\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = UserConfig::load_from(&path);
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/sntrack/history.db")
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.sysfs_root, PathBuf::from("/sys"));
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("config.toml");
        fs::write(&path, "short_session_secs = \"five\"").unwrap();
        assert_eq!(UserConfig::load_from(&path), UserConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("nested").join("config.toml");
        let config = UserConfig {
            short_session_secs: 60,
            log_level: LogLevel::Warn,
            ..UserConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(UserConfig::load_from(&path), config);
    }

    #[test]
    fn test_log_level_mapping() {
        assert!(LogLevel::Off.as_tracing_level().is_none());
        assert_eq!(LogLevel::Warn.as_tracing_level(), Some(tracing::Level::WARN));
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
