use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::moods::MoodDef;
use crate::search::TrackCandidate;

/// A catalog row: one track plus the mood and language it was discovered
/// under. Mood assignment is a direct consequence of which search phrase
/// produced the track, not a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: String,
    pub preview_url: Option<String>,
    pub mood_key: String,
    pub mood_label: String,
    pub language: String,
}

impl LabeledTrack {
    pub fn from_candidate(candidate: TrackCandidate, mood: &MoodDef, language: &str) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            artist: candidate.artist,
            album: candidate.album,
            artwork_url: candidate.artwork_url,
            preview_url: candidate.preview_url,
            mood_key: mood.key.clone(),
            mood_label: mood.label.clone(),
            language: language.to_string(),
        }
    }
}

/// The deduplicated labeled catalog produced by one build run. Read-only
/// once persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub tracks: Vec<LabeledTrack>,
}

impl Catalog {
    pub fn new(tracks: Vec<LabeledTrack>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&LabeledTrack> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks discovered under a mood key and language.
    pub fn by_mood_and_language(&self, mood_key: &str, language: &str) -> Vec<&LabeledTrack> {
        self.tracks
            .iter()
            .filter(|t| t.mood_key == mood_key && t.language == language)
            .collect()
    }

    /// Random sample of up to `count` tracks for a mood/language pair.
    pub fn recommend(&self, mood_key: &str, language: &str, count: usize) -> Vec<&LabeledTrack> {
        let pool = self.by_mood_and_language(mood_key, language);
        let mut rng = rand::rng();
        pool.choose_multiple(&mut rng, count).copied().collect()
    }

    /// (mood label, language, count) rows in first-seen order.
    pub fn mood_language_counts(&self) -> Vec<(String, String, usize)> {
        let mut counts: Vec<(String, String, usize)> = Vec::new();
        for t in &self.tracks {
            match counts
                .iter_mut()
                .find(|(label, lang, _)| *label == t.mood_label && *lang == t.language)
            {
                Some(entry) => entry.2 += 1,
                None => counts.push((t.mood_label.clone(), t.language.clone(), 1)),
            }
        }
        counts
    }
}
