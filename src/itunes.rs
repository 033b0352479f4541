use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use ureq::Agent;

use crate::search::{TrackCandidate, TrackSearch};

const SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Thumbnail resolution the API returns artwork at, and the resolution the
/// catalog stores after URL substitution.
const ARTWORK_THUMB: &str = "100x100";
const ARTWORK_FULL: &str = "600x600";

/// iTunes Search API client. No authentication; one blocking round-trip per
/// search with an agent-level timeout.
pub struct ItunesClient {
    agent: Agent,
}

/// iTunes search response (partial — we only need `results`).
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ItunesTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesTrack {
    track_id: Option<u64>,
    #[serde(default)]
    track_name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    collection_name: String,
    artwork_url100: Option<String>,
    preview_url: Option<String>,
}

impl ItunesClient {
    pub fn new(timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();
        Self { agent }
    }
}

impl TrackSearch for ItunesClient {
    fn name(&self) -> &str {
        "iTunes"
    }

    fn search(&self, term: &str, limit: usize) -> Result<Vec<TrackCandidate>> {
        let mut response = self
            .agent
            .get(SEARCH_URL)
            .query("term", term)
            .query("media", "music")
            .query("entity", "song")
            .query("limit", &limit.to_string())
            .call()
            .with_context(|| format!("HTTP request failed for \"{term}\""))?;

        let parsed: SearchResponse = response
            .body_mut()
            .read_json()
            .with_context(|| format!("Failed to parse JSON for \"{term}\""))?;

        Ok(parsed.results.into_iter().filter_map(convert).collect())
    }
}

/// Convert a wire track into a candidate. Records missing a track id or
/// artwork URL are dropped here so the rest of the pipeline sees fully
/// populated candidates.
fn convert(track: ItunesTrack) -> Option<TrackCandidate> {
    let id = match track.track_id {
        Some(id) => id.to_string(),
        None => {
            log::debug!("Skipping result without trackId ({})", track.track_name);
            return None;
        }
    };

    let artwork_url = match track.artwork_url100 {
        Some(url) => url.replace(ARTWORK_THUMB, ARTWORK_FULL),
        None => {
            log::debug!("Skipping track {id} without artwork");
            return None;
        }
    };

    Some(TrackCandidate {
        id,
        name: track.track_name,
        artist: track.artist_name,
        album: track.collection_name,
        artwork_url,
        preview_url: track.preview_url,
    })
}
