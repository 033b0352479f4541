use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{Catalog, LabeledTrack};
use crate::moods::MoodRegistry;
use crate::search::TrackSearch;

/// Substrings that disqualify a candidate regardless of mood: karaoke and
/// tribute versions, covers, ringtones, podcasts, spoken commentary.
pub const GLOBAL_NEGATIVE: &[&str] = &[
    "karaoke", "tribute", "cover", "ringtone", "podcast", "commentary",
];

/// Knobs for one build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Results requested per search call.
    pub result_limit: usize,
    /// Sleep between successive search calls, in milliseconds.
    pub rate_limit_ms: u64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            result_limit: 12,
            rate_limit_ms: 100,
        }
    }
}

/// Counters for one build run.
#[derive(Debug, Default)]
pub struct BuildStats {
    pub searches: usize,
    pub fetch_errors: usize,
    pub candidates: usize,
    pub rejected_global: usize,
    pub rejected_mood: usize,
    pub duplicates: usize,
}

/// The catalog plus the counters that produced it.
pub struct BuildOutcome {
    pub catalog: Catalog,
    pub stats: BuildStats,
}

/// Build the mood catalog: one search per (language, mood, phrase) triple,
/// the two-stage negative filter on every candidate, then first-wins
/// deduplication by track id.
///
/// Individual search failures are logged, counted and swallowed — they
/// never abort the build. An empty catalog is the caller's signal that
/// nothing was reachable.
pub fn build_catalog(
    searcher: &dyn TrackSearch,
    registry: &MoodRegistry,
    languages: &[String],
    opts: &BuildOptions,
) -> BuildOutcome {
    // Term resolution is deterministic, so the full search count is known
    // up front.
    let total: usize = languages
        .iter()
        .map(|lang| {
            registry
                .moods()
                .iter()
                .map(|m| registry.search_terms(&m.label, lang).len())
                .sum::<usize>()
        })
        .sum();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} searches ({eta} remaining) {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut all_tracks: Vec<LabeledTrack> = Vec::new();
    let mut stats = BuildStats::default();

    for language in languages {
        log::info!("Fetching {language} tracks from {}", searcher.name());

        for mood in registry.moods() {
            let terms = registry.search_terms(&mood.label, language);

            for term in &terms {
                pb.set_message(term.clone());
                stats.searches += 1;

                match searcher.search(term, opts.result_limit) {
                    Ok(candidates) => {
                        for candidate in candidates {
                            stats.candidates += 1;
                            let text = candidate.filter_text();

                            if GLOBAL_NEGATIVE.iter().any(|bad| text.contains(bad)) {
                                stats.rejected_global += 1;
                                continue;
                            }
                            if mood.negative.iter().any(|neg| text.contains(neg.as_str())) {
                                stats.rejected_mood += 1;
                                continue;
                            }

                            all_tracks.push(LabeledTrack::from_candidate(
                                candidate, mood, language,
                            ));
                        }
                    }
                    Err(e) => {
                        stats.fetch_errors += 1;
                        log::warn!("Search \"{term}\" failed: {e:#}");
                    }
                }

                pb.inc(1);
                thread::sleep(Duration::from_millis(opts.rate_limit_ms));
            }
        }
    }

    let before = all_tracks.len();
    let tracks = dedup_by_id(all_tracks);
    stats.duplicates = before - tracks.len();

    pb.finish_with_message(format!("{} tracks", tracks.len()));

    BuildOutcome {
        catalog: Catalog::new(tracks),
        stats,
    }
}

/// Keep the first occurrence of each track id, preserving order. A track
/// discovered under several (mood, language, phrase) combinations keeps its
/// first labeling.
pub fn dedup_by_id(tracks: Vec<LabeledTrack>) -> Vec<LabeledTrack> {
    let mut seen = HashSet::new();
    tracks.into_iter().filter(|t| seen.insert(t.id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::anyhow;

    use super::*;
    use crate::moods::MoodDef;
    use crate::search::TrackCandidate;

    fn candidate(id: &str, name: &str, artist: &str, album: &str) -> TrackCandidate {
        TrackCandidate {
            id: id.to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            artwork_url: "https://example.com/600x600.jpg".to_string(),
            preview_url: None,
        }
    }

    /// Returns canned candidates for known terms, nothing for the rest.
    struct StubSearch {
        responses: HashMap<String, Vec<TrackCandidate>>,
    }

    impl StubSearch {
        fn new(responses: &[(&str, Vec<TrackCandidate>)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(term, c)| (term.to_string(), c.clone()))
                    .collect(),
            }
        }
    }

    impl TrackSearch for StubSearch {
        fn name(&self) -> &str {
            "stub"
        }

        fn search(&self, term: &str, _limit: usize) -> anyhow::Result<Vec<TrackCandidate>> {
            Ok(self.responses.get(term).cloned().unwrap_or_default())
        }
    }

    /// Fails every call, like a network outage.
    struct FailingSearch;

    impl TrackSearch for FailingSearch {
        fn name(&self) -> &str {
            "failing"
        }

        fn search(&self, _term: &str, _limit: usize) -> anyhow::Result<Vec<TrackCandidate>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn english() -> Vec<String> {
        vec!["English".to_string()]
    }

    fn fast() -> BuildOptions {
        BuildOptions {
            result_limit: 12,
            rate_limit_ms: 0,
        }
    }

    #[test]
    fn test_global_filter_excludes_everywhere() {
        // "Karaoke" in the album text disqualifies under every mood.
        let registry = MoodRegistry::new(&[]);
        let stub = StubSearch::new(&[
            ("sad songs", vec![candidate("1", "Lonely", "X", "Karaoke Classics")]),
            ("happy hits", vec![candidate("1", "Lonely", "X", "Karaoke Classics")]),
        ]);

        let outcome = build_catalog(&stub, &registry, &english(), &fast());
        assert!(outcome.catalog.is_empty());
        assert_eq!(outcome.stats.rejected_global, 2);
    }

    #[test]
    fn test_mood_filter_scenario() {
        // Under Sad, "Happy Song" is rejected (negative keyword "happy")
        // while "Lonely Night" survives with the Sad labeling.
        let registry = MoodRegistry::new(&[]);
        let stub = StubSearch::new(&[(
            "sad songs",
            vec![
                candidate("10", "Happy Song", "X", "Y"),
                candidate("11", "Lonely Night", "X", "Y"),
            ],
        )]);

        let outcome = build_catalog(&stub, &registry, &english(), &fast());
        assert_eq!(outcome.stats.rejected_mood, 1);
        assert_eq!(outcome.catalog.len(), 1);

        let kept = outcome.catalog.find("11").expect("Lonely Night kept");
        assert_eq!(kept.mood_key, "😢");
        assert_eq!(kept.mood_label, "Sad");
        assert_eq!(kept.language, "English");
        assert!(outcome.catalog.find("10").is_none());
    }

    #[test]
    fn test_mood_filter_is_per_mood() {
        // "Happy Song" is disqualified from Sad but fine under Happy.
        let registry = MoodRegistry::new(&[]);
        let stub = StubSearch::new(&[
            ("sad songs", vec![candidate("10", "Happy Song", "X", "Y")]),
            ("happy hits", vec![candidate("10", "Happy Song", "X", "Y")]),
        ]);

        let outcome = build_catalog(&stub, &registry, &english(), &fast());
        assert_eq!(outcome.catalog.len(), 1);
        let kept = outcome.catalog.find("10").unwrap();
        assert_eq!(kept.mood_label, "Happy");
        assert_eq!(outcome.stats.rejected_mood, 1);
    }

    #[test]
    fn test_dedup_keeps_first_labeling() {
        // Happy precedes Sad in the mood table, so the shared track keeps
        // its Happy labeling and the later discovery counts as a duplicate.
        let registry = MoodRegistry::new(&[]);
        let shared = candidate("42", "Blue Sky", "X", "Y");
        let stub = StubSearch::new(&[
            ("happy hits", vec![shared.clone()]),
            ("sad songs", vec![shared.clone()]),
        ]);

        let outcome = build_catalog(&stub, &registry, &english(), &fast());
        assert_eq!(outcome.catalog.len(), 1);
        assert_eq!(outcome.stats.duplicates, 1);
        assert_eq!(outcome.catalog.find("42").unwrap().mood_label, "Happy");
    }

    #[test]
    fn test_all_searches_failing_yields_empty_catalog() {
        let registry = MoodRegistry::new(&[]);
        let outcome = build_catalog(&FailingSearch, &registry, &english(), &fast());

        assert!(outcome.catalog.is_empty());
        assert!(outcome.stats.searches > 0);
        assert_eq!(outcome.stats.fetch_errors, outcome.stats.searches);
        assert_eq!(outcome.stats.candidates, 0);
    }

    #[test]
    fn test_language_tagging() {
        let registry = MoodRegistry::new(&[]);
        let stub = StubSearch::new(&[(
            "bollywood sad songs",
            vec![candidate("7", "Dard", "A", "B")],
        )]);

        let outcome = build_catalog(&stub, &registry, &["Hindi".to_string()], &fast());
        let kept = outcome.catalog.find("7").unwrap();
        assert_eq!(kept.language, "Hindi");
        assert_eq!(kept.mood_label, "Sad");
    }

    #[test]
    fn test_dedup_by_id_preserves_order() {
        let mood = MoodDef {
            key: "😊".to_string(),
            label: "Happy".to_string(),
            negative: vec![],
        };
        let tracks: Vec<LabeledTrack> = ["1", "2", "1", "3", "2"]
            .iter()
            .map(|id| LabeledTrack::from_candidate(candidate(id, "N", "A", "B"), &mood, "English"))
            .collect();

        let deduped = dedup_by_id(tracks);
        let ids: Vec<&str> = deduped.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
