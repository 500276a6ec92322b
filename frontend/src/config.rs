//! Persistent user settings, stored as TOML under the platform config
//! directory (`~/.config/lantern/config.toml` on Linux).

use std::path::{Path, PathBuf};

use lantern_core::shell::menu::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub volume: u8,
    pub brightness: u8,
    pub state_slot: u8,
    pub rom_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: 8,
            brightness: 10,
            state_slot: 0,
            rom_dir: None,
        }
    }
}

impl Config {
    /// Shell settings seeded from this config, clamped to valid ranges.
    pub fn settings(&self) -> Settings {
        Settings {
            volume: self.volume.min(10),
            brightness: self.brightness.min(10),
            palette: 0,
            state_slot: self.state_slot.min(9),
        }
    }

    /// Fold the settings the user changed in the menu back into the config.
    pub fn absorb(&mut self, settings: &Settings) {
        self.volume = settings.volume;
        self.brightness = settings.brightness;
        self.state_slot = settings.state_slot;
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lantern").join("config.toml"))
}

/// Load the config from the platform path. Missing or unparseable files
/// fall back to defaults; this must never stop the emulator from starting.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

pub fn load_from(path: &Path) -> Config {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring malformed config {}: {e}", path.display());
            Config::default()
        }
    }
}

pub fn save(config: &Config) -> std::io::Result<()> {
    match config_path() {
        Some(path) => save_to(&path, config),
        None => Ok(()),
    }
}

pub fn save_to(path: &Path, config: &Config) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("config.toml")
    }

    #[test]
    fn round_trips_through_toml() {
        let path = temp_config_path("lantern_config_test_rt");
        let config = Config {
            volume: 5,
            brightness: 7,
            state_slot: 3,
            rom_dir: Some(PathBuf::from("/roms")),
        };

        save_to(&path, &config).unwrap();
        assert_eq!(load_from(&path), config);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_config_path("lantern_config_test_missing");
        assert_eq!(load_from(&path), Config::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let path = temp_config_path("lantern_config_test_bad");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "volume = \"loud\"").unwrap();

        assert_eq!(load_from(&path), Config::default());

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn settings_clamp_out_of_range_values() {
        let config = Config {
            volume: 200,
            brightness: 11,
            state_slot: 99,
            rom_dir: None,
        };
        let settings = config.settings();
        assert_eq!(settings.volume, 10);
        assert_eq!(settings.brightness, 10);
        assert_eq!(settings.state_slot, 9);
    }

    #[test]
    fn absorb_copies_menu_changes_back() {
        let mut config = Config::default();
        let settings = Settings {
            volume: 3,
            brightness: 6,
            palette: 2,
            state_slot: 4,
        };
        config.absorb(&settings);
        assert_eq!(config.volume, 3);
        assert_eq!(config.brightness, 6);
        assert_eq!(config.state_slot, 4);
    }
}
