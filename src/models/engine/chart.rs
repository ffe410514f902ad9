//! Time-ordered note charts handed to the core by chart providers.

use super::constants::FALLBACK_NOTE_INTERVAL_MS;
use super::note::Note;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An immutable chart: notes sorted by arrival time plus the song length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    notes: Vec<Note>,
    duration_ms: f64,
}

impl Chart {
    /// Wraps notes as given. Ordering is checked by [`Chart::validate`].
    pub fn new(notes: Vec<Note>, duration_ms: f64) -> Self {
        Self { notes, duration_ms }
    }

    /// Sorts the notes by time before wrapping them. Used by generators.
    pub fn from_unsorted(mut notes: Vec<Note>, duration_ms: f64) -> Self {
        notes.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        Self::new(notes, duration_ms)
    }

    /// Parses the provider document `{ "notes": [{time, lane}], "durationMs": n }`.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a provider document from disk.
    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Checks the provider contract: non-empty, ascending, lanes in range.
    pub fn validate(&self, lane_count: usize) -> Result<(), ChartError> {
        if self.notes.is_empty() {
            return Err(ChartError::Empty);
        }

        let mut previous = f64::NEG_INFINITY;
        for (index, note) in self.notes.iter().enumerate() {
            if !note.time_ms.is_finite() || note.time_ms < 0.0 {
                return Err(ChartError::InvalidTime {
                    index,
                    time_ms: note.time_ms,
                });
            }
            if note.time_ms < previous {
                return Err(ChartError::Unsorted { index });
            }
            if note.lane >= lane_count {
                return Err(ChartError::LaneOutOfRange {
                    index,
                    lane: note.lane,
                    lane_count,
                });
            }
            previous = note.time_ms;
        }

        Ok(())
    }

    /// Evenly spaced notes cycling through every lane, strictly inside the song.
    ///
    /// Songs shorter than two intervals still get one note at their midpoint.
    pub fn fallback(duration_ms: f64, lane_count: usize) -> Self {
        let lane_count = lane_count.max(1);
        let spacing = FALLBACK_NOTE_INTERVAL_MS.min(duration_ms / 2.0);

        let mut notes = Vec::new();
        if spacing > 0.0 {
            let mut time = spacing;
            let mut lane = 0;
            while time < duration_ms {
                notes.push(Note::normal(time, lane));
                lane = (lane + 1) % lane_count;
                time += spacing;
            }
        }

        Self::new(notes, duration_ms)
    }

    /// MD5 fingerprint of the note layout, used to tag results.
    pub fn hash(&self) -> String {
        let mut bytes = Vec::with_capacity(self.notes.len() * 16 + 8);
        for note in &self.notes {
            bytes.extend_from_slice(&note.time_ms.to_bits().to_le_bytes());
            bytes.extend_from_slice(&(note.lane as u64).to_le_bytes());
        }
        bytes.extend_from_slice(&self.duration_ms.to_bits().to_le_bytes());
        format!("{:x}", md5::compute(&bytes))
    }
}
