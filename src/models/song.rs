//! Song records and the flat JSON song library.
//!
//! The core never sees these: a song only matters to it once it has been
//! turned into a [`Chart`].

use crate::error::LibraryError;
use crate::models::engine::{Chart, Difficulty, density_chart};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Level and expected note count for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyInfo {
    pub level: u32,
    pub notes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    #[serde(alias = "beginner")]
    pub easy: DifficultyInfo,
    pub normal: DifficultyInfo,
    #[serde(alias = "hyper")]
    pub hard: DifficultyInfo,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyInfo { level: 1, notes: 100 },
            normal: DifficultyInfo { level: 5, notes: 200 },
            hard: DifficultyInfo { level: 9, notes: 350 },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyInfo {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Table derived from tempo and length: one note per beat scaled by density.
    pub fn estimate(bpm: f64, duration_secs: u32) -> Self {
        let info = |difficulty: Difficulty| DifficultyInfo {
            level: difficulty.level(),
            notes: (duration_secs as f64 * bpm / 60.0 * difficulty.density()).floor() as u32,
        };
        Self {
            easy: info(Difficulty::Easy),
            normal: info(Difficulty::Normal),
            hard: info(Difficulty::Hard),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: "#00ffff".to_string(),
            secondary: "#0088cc".to_string(),
            accent: "#44aaff".to_string(),
        }
    }
}

fn default_genre() -> String {
    "Original".to_string()
}

/// Metadata of one playable song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default)]
    pub bpm: f64,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub difficulty: DifficultyTable,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color_theme: ColorTheme,
}

impl SongRecord {
    /// New record with an estimated difficulty table and default styling.
    pub fn new(id: &str, title: &str, artist: &str, bpm: f64, duration: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            genre: default_genre(),
            bpm,
            duration,
            difficulty: DifficultyTable::estimate(bpm, duration),
            description: String::new(),
            color_theme: ColorTheme::default(),
        }
    }

    pub fn validate(&self) -> Result<(), LibraryError> {
        if self.id.is_empty() {
            return Err(LibraryError::MissingField("id"));
        }
        if self.title.is_empty() {
            return Err(LibraryError::MissingField("title"));
        }
        if self.artist.is_empty() {
            return Err(LibraryError::MissingField("artist"));
        }
        if !(self.bpm > 0.0) {
            return Err(LibraryError::MissingField("bpm"));
        }
        if self.duration == 0 {
            return Err(LibraryError::MissingField("duration"));
        }
        Ok(())
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration as f64 * 1000.0
    }

    /// Generates a playable chart for this song.
    pub fn chart<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        difficulty: Difficulty,
        lane_count: usize,
    ) -> Chart {
        density_chart(rng, difficulty, self.bpm, self.duration_ms(), lane_count)
    }
}

/// Flat list of songs, stored as one JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongLibrary {
    songs: Vec<SongRecord>,
}

impl SongLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let content = fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json(&content)?;
        log::info!("LIBRARY: loaded {} songs from {:?}", library.len(), path);
        Ok(library)
    }

    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        let content = self.to_json()?;
        fs::write(path, content).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Adds a song, replacing any record with the same id.
    /// Returns `true` when an existing record was replaced.
    pub fn add(&mut self, song: SongRecord) -> Result<bool, LibraryError> {
        song.validate()?;

        if let Some(existing) = self.songs.iter_mut().find(|s| s.id == song.id) {
            *existing = song;
            return Ok(true);
        }

        log::info!("LIBRARY: added {} by {}", song.title, song.artist);
        self.songs.push(song);
        Ok(false)
    }

    pub fn remove(&mut self, id: &str) -> Option<SongRecord> {
        let index = self.songs.iter().position(|s| s.id == id)?;
        Some(self.songs.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&SongRecord> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn by_genre<'a>(&'a self, genre: &'a str) -> impl Iterator<Item = &'a SongRecord> + 'a {
        self.songs.iter().filter(move |s| s.genre == genre)
    }

    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
