use std::collections::HashMap;

use crate::moods::BASE_LANGUAGE;

/// Search-phrase tables: explicit localized lists for a handful of
/// (mood label × language) pairs, language-agnostic defaults for the rest.
#[derive(Debug)]
pub struct TermTable {
    /// mood label → language → ordered phrases
    localized: HashMap<String, HashMap<String, Vec<String>>>,
    /// mood label → ordered language-agnostic phrases
    defaults: HashMap<String, Vec<String>>,
}

impl TermTable {
    /// Resolve the ordered, non-empty phrase list for a mood/language pair.
    ///
    /// Localized entries win verbatim, order preserved. Everything else
    /// falls back to the label's default list (or the lowercased label when
    /// the label is entirely unmapped), suffixed with the language name
    /// unless the language is the base language.
    pub fn terms_for(&self, mood_label: &str, language: &str) -> Vec<String> {
        if let Some(phrases) = self.localized.get(mood_label).and_then(|langs| langs.get(language)) {
            return phrases.clone();
        }

        // A localized mood missing the requested language falls through to
        // the default list, never to an empty one.
        let base = match self.defaults.get(mood_label) {
            Some(terms) => terms.clone(),
            None => vec![mood_label.to_lowercase()],
        };

        if language == BASE_LANGUAGE {
            return base;
        }
        base.iter().map(|t| format!("{t} {language}")).collect()
    }

    /// Register (or replace) the default phrase list for a label. Used when
    /// merging user-defined moods from the config file.
    pub(crate) fn set_default_terms(&mut self, label: &str, terms: Vec<String>) {
        self.defaults.insert(label.to_string(), terms);
    }

    /// The builtin tables.
    pub fn builtin() -> Self {
        let mut table = TermTable {
            localized: HashMap::new(),
            defaults: HashMap::new(),
        };

        let loc = |table: &mut TermTable, label: &str, lang: &str, phrases: &[&str]| {
            table
                .localized
                .entry(label.to_string())
                .or_default()
                .insert(
                    lang.to_string(),
                    phrases.iter().map(|p| p.to_string()).collect(),
                );
        };
        let def = |table: &mut TermTable, label: &str, phrases: &[&str]| {
            table.defaults.insert(
                label.to_string(),
                phrases.iter().map(|p| p.to_string()).collect(),
            );
        };

        loc(&mut table, "Happy", "English", &["happy hits", "feel good pop", "upbeat hits", "walking on sunshine"]);
        loc(&mut table, "Happy", "Hindi", &["bollywood happy songs", "hindi dance hits", "punjabi bhangra", "bollywood party"]);
        loc(&mut table, "Happy", "Spanish", &["latin pop hits", "reggaeton fiesta", "musica alegre", "happy latin"]);
        loc(&mut table, "Happy", "Korean", &["k-pop upbeat", "k-pop dance hits", "happy k-pop", "korean pop energy"]);
        loc(&mut table, "Happy", "Telugu", &["telugu dance hits", "tollywood party", "telugu upbeat", "telugu mass songs"]);

        loc(&mut table, "Sad", "English", &["sad songs", "heartbreak", "piano ballads", "cry me a river"]);
        loc(&mut table, "Sad", "Hindi", &["bollywood sad songs", "arijit singh sad", "hindi breakup", "dard bhare"]);
        loc(&mut table, "Sad", "Spanish", &["musica triste", "baladas romanticas", "cortavenas", "sad latin"]);
        loc(&mut table, "Sad", "Korean", &["k-pop ballad", "k-drama ost sad", "sad k-pop", "korean heartbreak"]);
        loc(&mut table, "Sad", "Telugu", &["telugu sad songs", "tollywood melody sad", "telugu heartbreak", "love failure telugu"]);

        loc(&mut table, "Calm", "English", &["acoustic chill", "lo-fi beats", "relaxing piano", "stress relief"]);
        loc(&mut table, "Calm", "Hindi", &["bollywood acoustic", "hindi lo-fi", "sufi songs", "calm hindi"]);
        loc(&mut table, "Calm", "Spanish", &["latin acoustic", "guitarras relajantes", "bossa nova", "calm spanish"]);
        loc(&mut table, "Calm", "Korean", &["k-indie", "korean acoustic", "piano k-pop", "calm k-drama"]);
        loc(&mut table, "Calm", "Telugu", &["telugu melody", "telugu acoustic", "calm tollywood", "pleasant telugu"]);

        loc(&mut table, "Energetic", "English", &["workout hits", "gym motivation", "power rock", "high energy pop"]);
        loc(&mut table, "Energetic", "Hindi", &["bollywood workout", "punjabi high energy", "hindi gym songs", "chak de india"]);
        loc(&mut table, "Energetic", "Spanish", &["latin gym", "reggaeton workout", "zumba hits", "energia latina"]);
        loc(&mut table, "Energetic", "Korean", &["k-pop workout", "k-pop high energy", "gym k-pop", "korean rock"]);
        loc(&mut table, "Energetic", "Telugu", &["telugu workout", "tollywood action", "mass beats telugu", "dsp hits high energy"]);

        loc(&mut table, "Romantic", "English", &["love songs", "romantic ballads", "wedding songs", "first dance"]);
        loc(&mut table, "Romantic", "Hindi", &["bollywood romantic", "love songs hindi", "arijit singh romantic", "shreya ghoshal love"]);
        loc(&mut table, "Romantic", "Spanish", &["musica romantica", "latin love songs", "bachata romantica", "amor latino"]);
        loc(&mut table, "Romantic", "Korean", &["k-drama romance", "sweet k-pop", "korean love songs", "wedding k-pop"]);
        loc(&mut table, "Romantic", "Telugu", &["telugu love songs", "sid sriram melody", "romantic tollywood", "telugu duets"]);

        loc(&mut table, "Party", "English", &["party hits", "club bangers", "dance pop", "house music"]);
        loc(&mut table, "Party", "Hindi", &["bollywood party anthem", "punjabi party mix", "remix hindi", "badshah hits"]);
        loc(&mut table, "Party", "Spanish", &["fiesta latina", "reggaeton hits", "salsa party", "club latino"]);
        loc(&mut table, "Party", "Korean", &["k-pop party", "club k-pop", "korean edm", "big bang hits"]);
        loc(&mut table, "Party", "Telugu", &["telugu folk songs", "teenmaar beats", "tollywood party mix", "ramuloo ramulaa"]);

        def(&mut table, "Motivated", &["motivation", "champions", "success"]);
        def(&mut table, "Sleepy", &["sleep", "lullaby", "ambient"]);
        def(&mut table, "Angry", &["rock", "metal", "rage"]);
        def(&mut table, "Devotion", &["devotional", "spiritual", "gospel"]);
        def(&mut table, "Cool", &["cool", "jazz", "smooth"]);
        def(&mut table, "Thoughtful", &["focus", "study", "instrumental"]);
        def(&mut table, "Melancholic", &["lonely", "sad", "night"]);

        table
    }
}
