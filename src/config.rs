//! Configuration file handling

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Get the default config file path for this platform
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sbc-detect").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load config from the given or default path. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Save config with header comments, returning the written path
    pub fn save_with_header(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path().ok_or(ConfigError::NoConfigDir)?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let header = r#"# sbc-detect configuration file

"#;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, format!("{header}{contents}"))?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// cpuinfo file providing the Hardware and Revision fields
    pub cpuinfo: PathBuf,
    /// Armbian release file
    pub armbian_release: PathBuf,
    /// DMI board name, used as the native platform name
    pub dmi_board_name: PathBuf,
    /// Query the native platform name at all
    pub native_helper: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            cpuinfo: sbc_detect_core::CPUINFO.into(),
            armbian_release: sbc_detect_core::release::ARMBIAN_RELEASE.into(),
            dmi_board_name: sbc_detect_core::DMI_BOARD_NAME.into(),
            native_helper: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Override the detected platform description
    pub platform: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[sources]
cpuinfo = "/tmp/cpuinfo"
native_helper = false
"#,
        )
        .unwrap();
        assert_eq!(config.sources.cpuinfo, PathBuf::from("/tmp/cpuinfo"));
        assert!(!config.sources.native_helper);
        assert_eq!(
            config.sources.armbian_release,
            PathBuf::from("/etc/armbian-release")
        );
        assert_eq!(config.runtime.platform, None);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.runtime.platform = Some("Linux-4.14-armv7l-with-debian-9".into());
        let written = config.save_with_header(Some(&path)).unwrap();
        assert_eq!(written, path);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# sbc-detect configuration file"));
        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[sources]\nnative_helper = \"yes\"\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
