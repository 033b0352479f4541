use serde::Deserialize;

use crate::terms::TermTable;

/// Languages the builder iterates, in build order.
pub const LANGUAGES: &[&str] = &["English", "Hindi", "Spanish", "Korean", "Telugu"];

/// Language whose default term lists are used without a suffix.
pub const BASE_LANGUAGE: &str = "English";

/// A single mood entry: emoji key, display label, and the lowercase
/// substrings that disqualify a candidate from this mood.
#[derive(Debug, Clone)]
pub struct MoodDef {
    pub key: String,
    pub label: String,
    pub negative: Vec<String>,
}

/// Config file mood definition (deserialized from TOML).
#[derive(Debug, Deserialize, Clone)]
pub struct CustomMoodConfig {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub negative: Vec<String>,
    /// Default search phrases registered for the label.
    #[serde(default)]
    pub terms: Vec<String>,
}

/// The mood registry — the ordered mood table plus the search-term tables.
/// Built once at startup and passed by reference to everything that needs
/// it; iteration order is the build order.
#[derive(Debug)]
pub struct MoodRegistry {
    moods: Vec<MoodDef>,
    terms: TermTable,
}

impl MoodRegistry {
    pub fn new(custom_moods: &[CustomMoodConfig]) -> Self {
        let mut moods = builtin_moods();
        let mut terms = TermTable::builtin();

        // Merge custom moods
        for custom in custom_moods {
            let existing = moods
                .iter_mut()
                .find(|m| m.label.eq_ignore_ascii_case(&custom.label));

            if let Some(entry) = existing {
                // Additive merge: append new negative keywords
                for neg in &custom.negative {
                    let lower = neg.to_lowercase();
                    if !entry.negative.contains(&lower) {
                        entry.negative.push(lower);
                    }
                }
            } else {
                moods.push(MoodDef {
                    key: custom.key.clone(),
                    label: custom.label.clone(),
                    negative: custom.negative.iter().map(|n| n.to_lowercase()).collect(),
                });
            }

            if !custom.terms.is_empty() {
                terms.set_default_terms(&custom.label, custom.terms.clone());
            }
        }

        MoodRegistry { moods, terms }
    }

    /// All moods in build order.
    pub fn moods(&self) -> &[MoodDef] {
        &self.moods
    }

    /// Look up a mood by emoji key or by label (case-insensitive).
    pub fn find(&self, key_or_label: &str) -> Option<&MoodDef> {
        self.moods
            .iter()
            .find(|m| m.key == key_or_label || m.label.eq_ignore_ascii_case(key_or_label))
    }

    /// Resolve the ordered search phrases for a mood/language pair.
    pub fn search_terms(&self, mood_label: &str, language: &str) -> Vec<String> {
        self.terms.terms_for(mood_label, language)
    }
}

/// The builtin mood table. Order matters: it is the build iteration order,
/// and first-wins deduplication makes earlier moods claim shared tracks.
fn builtin_moods() -> Vec<MoodDef> {
    fn mood(key: &str, label: &str, negative: &[&str]) -> MoodDef {
        MoodDef {
            key: key.to_string(),
            label: label.to_string(),
            negative: negative.iter().map(|n| n.to_string()).collect(),
        }
    }

    vec![
        mood("😊", "Happy", &["sad", "gloom", "breakup", "remix"]),
        mood("😢", "Sad", &["remix", "club", "dance", "happy", "party", "mix", "techno"]),
        mood("😌", "Calm", &["rock", "metal", "techno", "dubstep"]),
        mood("🔥", "Energetic", &["lullaby", "sleep", "balled", "slow"]),
        mood("💪", "Motivated", &["sad", "weak", "slow"]),
        mood("😴", "Sleepy", &["rock", "pop", "dance", "drum", "beat"]),
        mood("🥰", "Romantic", &["breakup", "hate", "metal"]),
        mood("😠", "Angry", &["calm", "soft", "love"]),
        mood("🎉", "Party", &["acoustic", "slow", "sad"]),
        mood("🙏", "Devotion", &["explicit"]),
        mood("😎", "Cool", &["country", "metal"]),
        mood("💭", "Thoughtful", &["party", "scream"]),
        mood("🌙", "Melancholic", &["happy", "upbeat", "dance"]),
    ]
}
