use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/markup-conventions";
const DEFAULT_STORE: &str = "~/.local/share/markup-conventions/conventions.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding the custom conventions.
    #[serde(default = "Config::default_store_path")]
    pub store_path: PathBuf,

    /// Color for keyword-colored conventions. Unset means the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_color: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: Self::default_store_path(),
            keyword_color: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the store path
        config.store_path = Self::expand_path(&config.store_path).unwrap_or(config.store_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Loaded config, or defaults when no config file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde(CONFIG_DIR);
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn default_store_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(DEFAULT_STORE).as_ref())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markup-conventions/config.toml"));
    }

    #[test]
    fn test_default_store_path() {
        let store = Config::default().store_path;
        let path_str = store.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with("markup-conventions/conventions.json"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unset_keyword_color_is_not_written() {
        let config = Config {
            store_path: PathBuf::from("/tmp/conventions.json"),
            keyword_color: None,
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(!toml_str.contains("keyword_color"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/stores/conventions.json")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("stores/conventions.json"));
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        for plain in ["/absolute/path.json", "relative/path.json"] {
            assert_eq!(Config::expand_path(Path::new(plain)).unwrap(), PathBuf::from(plain));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "store_path = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            store_path: PathBuf::from("/tmp/conventions.json"),
            keyword_color: Some("#00ffff".to_string()),
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_store_path_env_var_expanded_on_load() {
        unsafe {
            env::set_var("MARKUP_TEST_STORE_ROOT", "/custom/stores");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "store_path = \"$MARKUP_TEST_STORE_ROOT/conventions.json\"\nkeyword_color = \"#ffd700\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.store_path,
            PathBuf::from("/custom/stores/conventions.json")
        );
        assert_eq!(config.keyword_color.as_deref(), Some("#ffd700"));

        unsafe {
            env::remove_var("MARKUP_TEST_STORE_ROOT");
        }
    }
}
