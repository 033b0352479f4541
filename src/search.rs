use anyhow::Result;

/// A raw track candidate from an external search, before filtering.
/// Lives only for the duration of one fetch call.
#[derive(Debug, Clone)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: String,
    pub preview_url: Option<String>,
}

impl TrackCandidate {
    /// Lowercase concatenation of name, artist and album — the text the
    /// negative-keyword filters match against.
    pub fn filter_text(&self) -> String {
        format!("{} {} {}", self.name, self.artist, self.album).to_lowercase()
    }
}

/// A track search provider. The builder only sees this trait, so the full
/// filter pipeline can be driven by a stub in tests.
pub trait TrackSearch {
    fn name(&self) -> &str;

    /// Search for tracks matching a free-text term, capped at `limit`
    /// results per call.
    fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackCandidate>>;
}
