use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use ureq::Agent;

/// Default Invidious-compatible instance for video lookups.
pub const DEFAULT_API_BASE: &str = "https://yewtu.be";

/// Client resolving a free-text query to a single playable video id.
pub struct VideoLookup {
    agent: Agent,
    api_base: String,
}

/// One entry of an Invidious search response. Non-video entries (channels,
/// playlists) carry no `videoId`.
#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

impl VideoLookup {
    pub fn new(api_base: &str, timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Best-match video id for a query, or `None` when nothing matches.
    /// A video-only search runs first, then an unfiltered fallback.
    pub fn find_video_id(&self, query: &str) -> Result<Option<String>> {
        if let Some(id) = self.search(query, Some("video"))? {
            return Ok(Some(id));
        }
        self.search(query, None)
    }

    fn search(&self, query: &str, kind: Option<&str>) -> Result<Option<String>> {
        let url = format!("{}/api/v1/search", self.api_base);
        let mut request = self.agent.get(&url).query("q", query);
        if let Some(kind) = kind {
            request = request.query("type", kind);
        }

        let items: Vec<SearchItem> = request
            .call()
            .with_context(|| format!("Video search failed for \"{query}\""))?
            .body_mut()
            .read_json()
            .with_context(|| format!("Failed to parse video search response for \"{query}\""))?;

        Ok(first_video_id(items))
    }
}

/// Embeddable watch URL for a resolved video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

fn first_video_id(items: Vec<SearchItem>) -> Option<String> {
    items.into_iter().find_map(|i| i.video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_items() {
        let json = r#"[
            {"type": "channel", "author": "Some Channel"},
            {"type": "video", "videoId": "dQw4w9WgXcQ", "title": "A Song"},
            {"type": "video", "videoId": "xyz123", "title": "Another"}
        ]"#;
        let items: Vec<SearchItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(first_video_id(items).as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_no_video_entries() {
        let json = r#"[{"type": "channel"}, {"type": "playlist"}]"#;
        let items: Vec<SearchItem> = serde_json::from_str(json).unwrap();
        assert!(first_video_id(items).is_none());
    }

    #[test]
    fn test_empty_response() {
        let items: Vec<SearchItem> = serde_json::from_str("[]").unwrap();
        assert!(first_video_id(items).is_none());
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let lookup = VideoLookup::new("https://example.com/", 5);
        assert_eq!(lookup.api_base, "https://example.com");
    }
}
