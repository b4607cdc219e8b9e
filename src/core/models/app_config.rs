use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::Region;
use crate::errors::{AcquireError, ConfigError};
use crate::global_constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_TAG_CONFIG, SCREENSHOT_DIR_NAME,
};

/// User settings, loaded once at startup and passed explicitly into the
/// workflow and overlay rather than read through module globals.
///
/// The on-disk form is a flat JSON key/value document; the keys keep the
/// names earlier releases used so existing config files stay valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "ScreenshotFolder")]
    pub screenshot_folder: PathBuf,

    #[serde(rename = "CustomString", default)]
    pub custom_string: String,

    #[serde(rename = "ShowInSystray", default = "default_show_in_systray")]
    pub show_in_systray: bool,

    /// Comma-joined `x,y,w,h` of the last selected region, empty when none.
    #[serde(rename = "SelectedRegionCoordinates", default)]
    pub last_region: String,

    #[serde(rename = "NoCompositorMode", default)]
    pub no_compositor_mode: bool,

    #[serde(skip)]
    storage_path: Option<PathBuf>,
}

fn default_show_in_systray() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        let screenshot_folder = default_config_dir()
            .map(|dir| dir.join(SCREENSHOT_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(SCREENSHOT_DIR_NAME));

        Self {
            screenshot_folder,
            custom_string: String::new(),
            show_in_systray: true,
            last_region: String::new(),
            no_compositor_mode: false,
            storage_path: None,
        }
    }
}

fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

impl AppConfig {
    /// Loads the config file, creating it with defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            log::info!(
                "{} no config at {}, writing defaults",
                LOG_TAG_CONFIG,
                config_path.display()
            );
            let mut defaults = Self::default();
            defaults.storage_path = Some(config_path);
            defaults.save()?;
            return Ok(defaults);
        }

        let mut config = Self::read_from(&config_path)?;
        config.storage_path = Some(config_path.clone());

        log::info!(
            "{} loaded config from {}",
            LOG_TAG_CONFIG,
            config_path.display()
        );
        log::debug!(
            "{} folder={} systray={} no_compositor={}",
            LOG_TAG_CONFIG,
            config.screenshot_folder.display(),
            config.show_in_systray,
            config.no_compositor_mode
        );

        Ok(config)
    }

    /// Persists the current snapshot. Called immediately on every mutation
    /// so a crash never loses the last successfully selected region.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = match &self.storage_path {
            Some(path) => path.clone(),
            None => Self::config_file_path()?,
        };
        self.write_to(&path)
    }

    /// Creates the config and screenshot directories. The only startup
    /// failure treated as fatal by the caller.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self
            .storage_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(default_config_dir)
        {
            fs::create_dir_all(&parent)
                .map_err(|e| ConfigError::Unreadable(format!("{}: {}", parent.display(), e)))?;
        }

        fs::create_dir_all(&self.screenshot_folder).map_err(|e| {
            ConfigError::Unreadable(format!("{}: {}", self.screenshot_folder.display(), e))
        })?;

        Ok(())
    }

    /// Persists `region` as the previous selection. Failure here must not
    /// fail the acquisition, so the caller only logs the error.
    pub fn save_region(&mut self, region: &Region) -> Result<(), ConfigError> {
        self.last_region = region.to_string();
        self.save()?;
        log::info!(
            "{} saved region {} for reuse",
            LOG_TAG_CONFIG,
            self.last_region
        );
        Ok(())
    }

    pub fn load_last_region(&self) -> Result<Region, AcquireError> {
        if self.last_region.trim().is_empty() {
            return Err(AcquireError::NoSavedRegion);
        }

        Region::parse(&self.last_region)
            .map_err(|e| AcquireError::MalformedSavedRegion(e.to_string()))
    }

    fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = default_config_dir().ok_or_else(|| {
            ConfigError::KeyMissing("no config directory for this platform".to_string())
        })?;
        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))
    }

    fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Unreadable(format!("{}: {}", parent.display(), e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Unreadable(e.to_string()))?;
        fs::write(path, contents)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;

        log::debug!("{} wrote config to {}", LOG_TAG_CONFIG, path.display());
        Ok(())
    }

    #[cfg(test)]
    pub fn with_storage_path(mut self, path: PathBuf) -> Self {
        self.storage_path = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.screenshot_folder = dir.join("shots");
        config.with_storage_path(dir.join("config.json"))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(config.custom_string.is_empty());
        assert!(config.show_in_systray);
        assert!(config.last_region.is_empty());
        assert!(!config.no_compositor_mode);
        assert!(config
            .screenshot_folder
            .to_string_lossy()
            .contains(SCREENSHOT_DIR_NAME));
    }

    #[test]
    fn test_serialized_form_uses_config_file_key_names() {
        let config = AppConfig::default();

        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("\"ScreenshotFolder\""));
        assert!(json.contains("\"CustomString\""));
        assert!(json.contains("\"ShowInSystray\""));
        assert!(json.contains("\"SelectedRegionCoordinates\""));
        assert!(json.contains("\"NoCompositorMode\""));
    }

    #[test]
    fn test_missing_optional_keys_take_defaults() {
        let json = r#"{ "ScreenshotFolder": "/tmp/shots" }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.show_in_systray);
        assert!(config.custom_string.is_empty());
        assert!(config.last_region.is_empty());
        assert!(!config.no_compositor_mode);
    }

    #[test]
    fn test_save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.custom_string = "tag:".to_string();
        config.no_compositor_mode = true;

        config.save().unwrap();
        let loaded = AppConfig::read_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(loaded.custom_string, "tag:");
        assert!(loaded.no_compositor_mode);
        assert_eq!(loaded.screenshot_folder, config.screenshot_folder);
    }

    #[test]
    fn test_save_region_then_load_last_region_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        let region = Region::new(10, 10, 100, 100).unwrap();

        config.save_region(&region).unwrap();

        assert_eq!(config.load_last_region().unwrap(), region);

        // And the persisted copy agrees.
        let reloaded = AppConfig::read_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(reloaded.load_last_region().unwrap(), region);
    }

    #[test]
    fn test_load_last_region_empty_means_no_saved_region() {
        let config = AppConfig::default();

        assert_eq!(config.load_last_region(), Err(AcquireError::NoSavedRegion));
    }

    #[test]
    fn test_load_last_region_malformed_fails_typed() {
        let mut config = AppConfig::default();
        config.last_region = "12,34".to_string();

        let result = config.load_last_region();

        assert!(matches!(
            result,
            Err(AcquireError::MalformedSavedRegion(_))
        ));
    }

    #[test]
    fn test_ensure_directories_creates_screenshot_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        config.ensure_directories().unwrap();

        assert!(dir.path().join("shots").is_dir());
    }
}
