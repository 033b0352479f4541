use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::LabeledTrack;
use crate::store::Result;

pub const LIKED_FILE: &str = "liked_songs.json";

/// The liked-tracks list. Read once at startup; every mutation rewrites
/// the file in full.
#[derive(Debug)]
pub struct LikedList {
    path: PathBuf,
    tracks: Vec<LabeledTrack>,
}

impl LikedList {
    /// Load the list from `dir`, starting empty when the file is missing.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(LIKED_FILE);
        let tracks = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        Ok(Self { path, tracks })
    }

    pub fn tracks(&self) -> &[LabeledTrack] {
        &self.tracks
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Add a track; returns false (without rewriting) when already present.
    pub fn add(&mut self, track: LabeledTrack) -> Result<bool> {
        if self.contains(&track.id) {
            return Ok(false);
        }
        self.tracks.push(track);
        self.save()?;
        Ok(true)
    }

    /// Remove a track by id; returns false when it was not in the list.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        if self.tracks.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.tracks)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> LabeledTrack {
        LabeledTrack {
            id: id.to_string(),
            name: format!("Track {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            artwork_url: "https://example.com/600x600.jpg".to_string(),
            preview_url: None,
            mood_key: "🥰".to_string(),
            mood_label: "Romantic".to_string(),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let liked = LikedList::load(dir.path()).unwrap();
        assert!(liked.tracks().is_empty());
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();

        let mut liked = LikedList::load(dir.path()).unwrap();
        assert!(liked.add(track("1")).unwrap());
        assert!(liked.add(track("2")).unwrap());

        let reloaded = LikedList::load(dir.path()).unwrap();
        assert_eq!(reloaded.tracks().len(), 2);
        assert!(reloaded.contains("1"));
        assert!(reloaded.contains("2"));
    }

    #[test]
    fn test_add_duplicate_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();

        let mut liked = LikedList::load(dir.path()).unwrap();
        assert!(liked.add(track("1")).unwrap());
        assert!(!liked.add(track("1")).unwrap());
        assert_eq!(liked.tracks().len(), 1);
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();

        let mut liked = LikedList::load(dir.path()).unwrap();
        liked.add(track("1")).unwrap();
        liked.add(track("2")).unwrap();

        assert!(liked.remove("1").unwrap());
        assert!(!liked.remove("1").unwrap());

        let reloaded = LikedList::load(dir.path()).unwrap();
        assert_eq!(reloaded.tracks().len(), 1);
        assert!(!reloaded.contains("1"));
    }
}
