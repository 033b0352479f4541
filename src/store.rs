use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, LabeledTrack};

pub const CATALOG_FILE: &str = "catalog.json";
pub const CSV_FILE: &str = "catalog.csv";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no catalog artifact at {0} (run `moodbox build` first)")]
    MissingArtifact(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The persisted build artifact. `model` is always `None`: mood labels come
/// straight from the search phrases that produced each track, there is no
/// trained classifier, and the field records that.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogArtifact {
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub tracks: Vec<LabeledTrack>,
}

impl CatalogArtifact {
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.tracks)
    }
}

/// Write the artifact bundle, creating the directory if needed. Written
/// once per build; the consuming subcommands treat it as read-only.
pub fn save_artifact(dir: &Path, catalog: &Catalog) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let artifact = CatalogArtifact {
        model: None,
        generated_at: Utc::now(),
        tracks: catalog.tracks.clone(),
    };
    let path = dir.join(CATALOG_FILE);
    fs::write(&path, serde_json::to_string_pretty(&artifact)?)?;
    Ok(path)
}

/// Load the artifact written by a previous build.
pub fn load_artifact(dir: &Path) -> Result<CatalogArtifact> {
    let path = dir.join(CATALOG_FILE);
    if !path.exists() {
        return Err(StoreError::MissingArtifact(path));
    }
    let contents = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write the catalog as a delimited text table for inspection and
/// portability.
pub fn write_csv(dir: &Path, catalog: &Catalog) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(CSV_FILE);

    let mut out = String::new();
    out.push_str("id,name,artist,album,artwork_url,preview_url,mood_key,mood_label,language\n");
    for t in &catalog.tracks {
        let fields = [
            t.id.as_str(),
            t.name.as_str(),
            t.artist.as_str(),
            t.album.as_str(),
            t.artwork_url.as_str(),
            t.preview_url.as_deref().unwrap_or(""),
            t.mood_key.as_str(),
            t.mood_label.as_str(),
            t.language.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    fs::write(&path, out)?;
    Ok(path)
}

/// Quote a field when it contains a delimiter, quote or newline.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
