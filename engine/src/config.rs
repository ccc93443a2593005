use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use codebox_types::{EdgePolicy, FilterPolicy, PresetCodes, UiOptions};

/// Overrides the default `~/.codebox/config.toml` location.
pub const CONFIG_PATH_ENV: &str = "CODEBOX_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct CodeboxConfig {
    pub app: Option<AppConfig>,
    pub entry: Option<EntryConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the cell underline and cursor marker.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

/// Code entry behavior.
///
/// ```toml
/// [entry]
/// filter = "permissive"
/// edge = "clamp"
/// preset = "123456"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EntryConfig {
    /// "permissive" (any character) or "digits".
    #[serde(default)]
    pub filter: FilterPolicy,
    /// "clamp" (stay on the boundary cell) or "release" (drop focus).
    #[serde(default)]
    pub edge: EdgePolicy,
    /// Text placed in the cells by "Set Codes". Must be six characters.
    pub preset: Option<String>,
}

impl CodeboxConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Loads `path`, returning `Ok(None)` when it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|cfg| cfg.ascii_only),
            high_contrast: app.is_some_and(|cfg| cfg.high_contrast),
        }
    }

    #[must_use]
    pub fn filter_policy(&self) -> FilterPolicy {
        self.entry.as_ref().map(|e| e.filter).unwrap_or_default()
    }

    #[must_use]
    pub fn edge_policy(&self) -> EdgePolicy {
        self.entry.as_ref().map(|e| e.edge).unwrap_or_default()
    }

    /// The "Set Codes" preset. An invalid preset falls back to the default.
    #[must_use]
    pub fn preset(&self) -> PresetCodes {
        let Some(raw) = self.entry.as_ref().and_then(|e| e.preset.as_deref()) else {
            return PresetCodes::default();
        };
        match PresetCodes::parse(raw) {
            Ok(preset) => preset,
            Err(err) => {
                tracing::warn!("Ignoring [entry] preset {raw:?}: {err}");
                PresetCodes::default()
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".codebox").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(toml: &str) -> CodeboxConfig {
        toml::from_str(toml).expect("valid config")
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config.filter_policy(), FilterPolicy::Permissive);
        assert_eq!(config.edge_policy(), EdgePolicy::Clamp);
        assert_eq!(config.preset(), PresetCodes::default());
        assert_eq!(config.ui_options(), UiOptions::default());
    }

    #[test]
    fn entry_section_parses_policies() {
        let config = parse(
            r#"
            [entry]
            filter = "digits"
            edge = "release"
            preset = "987654"
            "#,
        );
        assert_eq!(config.filter_policy(), FilterPolicy::Digits);
        assert_eq!(config.edge_policy(), EdgePolicy::Release);
        assert_eq!(config.preset().joined(), "987654");
    }

    #[test]
    fn app_section_sets_ui_options() {
        let config = parse(
            r"
            [app]
            high_contrast = true
            ",
        );
        let options = config.ui_options();
        assert!(options.high_contrast);
        assert!(!options.ascii_only);
    }

    #[test]
    fn invalid_preset_falls_back_to_default() {
        let config = parse(
            r#"
            [entry]
            preset = "12"
            "#,
        );
        assert_eq!(config.preset(), PresetCodes::default());
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let result: Result<CodeboxConfig, _> = toml::from_str("[entry]\nedge = \"wrap\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = CodeboxConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[entry]\nfilter = \"digits\"").unwrap();

        let loaded = CodeboxConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.filter_policy(), FilterPolicy::Digits);
    }

    #[test]
    fn load_from_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[entry\n").unwrap();

        let err = CodeboxConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
        assert!(err.to_string().starts_with("failed to parse config at "));
    }
}
