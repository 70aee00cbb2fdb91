use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "showdeck";

pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 15;

const VALID_KEYS: &str = "defaults.windowed, defaults.start_slide, defaults.catalog, \
    defaults.assets, images.timeout_secs, presentation.reset_modal_on_navigate";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImagesConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<PresentationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// 1-indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    /// Catalog presented when no file is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Directory for `/`-prefixed image references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Close the image lightbox whenever the slide changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_modal_on_navigate: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `showdeck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default configuration: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# showdeck configuration\n{yaml}");
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn catalog(&self) -> Option<&Path> {
        self.defaults.as_ref().and_then(|d| d.catalog.as_deref())
    }

    pub fn assets(&self) -> Option<&Path> {
        self.defaults.as_ref().and_then(|d| d.assets.as_deref())
    }

    pub fn image_timeout(&self) -> Duration {
        let secs = self
            .images
            .as_ref()
            .and_then(|i| i.timeout_secs)
            .unwrap_or(DEFAULT_IMAGE_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn reset_modal_on_navigate(&self) -> bool {
        self.presentation
            .as_ref()
            .and_then(|p| p.reset_modal_on_navigate)
            .unwrap_or(false)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.windowed" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parse_bool(key, value)?);
            }
            "defaults.start_slide" => {
                let slide = match value.parse::<usize>() {
                    Ok(n) if n >= 1 => n,
                    _ => anyhow::bail!(
                        "Invalid start_slide: {value}. Must be a slide number starting at 1."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            "defaults.catalog" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid catalog: path must not be empty.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .catalog = Some(PathBuf::from(value));
            }
            "defaults.assets" => {
                if value.is_empty() {
                    anyhow::bail!("Invalid assets: path must not be empty.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .assets = Some(PathBuf::from(value));
            }
            "images.timeout_secs" => {
                let secs = match value.parse::<u64>() {
                    Ok(n) if (1..=300).contains(&n) => n,
                    _ => anyhow::bail!(
                        "Invalid timeout_secs: {value}. Must be a number of seconds from 1 to 300."
                    ),
                };
                self.images
                    .get_or_insert_with(ImagesConfig::default)
                    .timeout_secs = Some(secs);
            }
            "presentation.reset_modal_on_navigate" => {
                self.presentation
                    .get_or_insert_with(PresentationConfig::default)
                    .reset_modal_on_navigate = Some(parse_bool(key, value)?);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {key}: {value}. Must be 'true' or 'false'."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::default();
        assert!(!config.windowed());
        assert_eq!(config.start_slide(), None);
        assert_eq!(config.image_timeout(), Duration::from_secs(15));
        assert!(!config.reset_modal_on_navigate());
    }

    #[test]
    fn test_set_valid_values() {
        let mut config = Config::default();
        config.set("defaults.windowed", "true").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        config.set("defaults.assets", "/srv/deck").unwrap();
        config.set("images.timeout_secs", "5").unwrap();
        config
            .set("presentation.reset_modal_on_navigate", "yes")
            .unwrap();
        assert!(config.windowed());
        assert_eq!(config.start_slide(), Some(3));
        assert_eq!(config.assets(), Some(Path::new("/srv/deck")));
        assert_eq!(config.image_timeout(), Duration::from_secs(5));
        assert!(config.reset_modal_on_navigate());
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.windowed", "maybe").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "first").is_err());
        assert!(config.set("images.timeout_secs", "0").is_err());
        assert!(config.set("images.timeout_secs", "1000").is_err());
        assert!(config.set("defaults.catalog", "").is_err());
        assert!(config.defaults.is_none());
        assert!(config.images.is_none());
    }

    #[test]
    fn test_unknown_key_lists_valid_keys() {
        let mut config = Config::default();
        let err = config.set("defaults.theme", "dark").unwrap_err().to_string();
        assert!(err.contains("Unknown config key"));
        assert!(err.contains("images.timeout_secs"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("showdeck-config-{}", std::process::id()));
        let path = dir.join(FILENAME);
        let mut config = Config::default();
        config.set("defaults.start_slide", "2").unwrap();
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# showdeck configuration"));
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.start_slide(), Some(2));
        assert!(loaded.images.is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::load_from(Path::new("/nonexistent/showdeck/config.yaml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("No config found"));
    }
}
