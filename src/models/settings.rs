//! Persisted user settings (`settings.toml`).

use crate::error::SettingsError;
use crate::models::engine::{CoreConfig, Difficulty};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const FILE_NAME: &str = "settings.toml";

/// Default lane keys for the six-lane layout.
pub const DEFAULT_LANE_KEYS: [&str; 6] = ["KeyS", "KeyD", "KeyF", "KeyJ", "KeyK", "KeyL"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    pub difficulty: Difficulty,
    pub master_volume: f32,
    /// Logic thread ticks per second.
    pub tick_rate: u32,
    pub gameplay: CoreConfig,
    /// Lane keys indexed by lane count ("6" → six key codes).
    pub keybinds: HashMap<String, Vec<String>>,
}

impl Default for SettingsState {
    fn default() -> Self {
        let mut keybinds = HashMap::new();
        keybinds.insert(
            DEFAULT_LANE_KEYS.len().to_string(),
            DEFAULT_LANE_KEYS.iter().map(|k| k.to_string()).collect(),
        );

        Self {
            difficulty: Difficulty::default(),
            master_volume: 0.7,
            tick_rate: 200,
            gameplay: CoreConfig::classic(),
            keybinds,
        }
    }
}

impl SettingsState {
    /// Loads `settings.toml` from the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(FILE_NAME))
    }

    /// Loads settings, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("SETTINGS: {:?} not found, using defaults", path);
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("SETTINGS: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: SettingsState = toml::from_str(&content)?;
        settings.gameplay.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("SETTINGS: saved to {:?}", path);
        Ok(())
    }

    /// Key codes for the configured lane count, padded with the defaults.
    pub fn lane_keys(&self) -> Vec<String> {
        let lanes = self.gameplay.lane_count;
        let custom = self.keybinds.get(&lanes.to_string());

        (0..lanes)
            .filter_map(|lane| {
                custom
                    .and_then(|keys| keys.get(lane))
                    .cloned()
                    .or_else(|| DEFAULT_LANE_KEYS.get(lane).map(|k| k.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::HitWindow;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = SettingsState::load_from(&dir.path().join(FILE_NAME));
        assert_eq!(settings, SettingsState::default());
        assert_eq!(settings.lane_keys(), DEFAULT_LANE_KEYS.to_vec());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let mut settings = SettingsState::default();
        settings.difficulty = Difficulty::Hard;
        settings.gameplay = settings.gameplay.with_hit_window(HitWindow::compact());
        settings.save_to(&path).unwrap();

        let loaded = SettingsState::try_load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "difficulty = \"hyper\"\n\n[gameplay]\nnote_speed = 300.0\n").unwrap();

        let settings = SettingsState::load_from(&path);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.gameplay.note_speed, 300.0);
        assert_eq!(settings.gameplay.lane_count, 6);
    }

    #[test]
    fn invalid_gameplay_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "[gameplay]\nlane_count = 0\n").unwrap();

        assert!(matches!(
            SettingsState::try_load_from(&path),
            Err(SettingsError::Invalid(_))
        ));
        assert_eq!(SettingsState::load_from(&path), SettingsState::default());
    }

    #[test]
    fn garbage_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(SettingsState::load_from(&path), SettingsState::default());
    }

    #[test]
    fn lane_keys_are_padded_from_defaults() {
        let mut settings = SettingsState::default();
        settings
            .keybinds
            .insert("6".to_string(), vec!["KeyA".to_string(), "KeyW".to_string()]);
        assert_eq!(
            settings.lane_keys(),
            vec!["KeyA", "KeyW", "KeyF", "KeyJ", "KeyK", "KeyL"]
        );
    }
}
