use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moodbox::builder::{self, BuildOptions};
use moodbox::catalog::{Catalog, LabeledTrack};
use moodbox::config::AppConfig;
use moodbox::itunes::ItunesClient;
use moodbox::liked::LikedList;
use moodbox::moods::{BASE_LANGUAGE, LANGUAGES, MoodRegistry};
use moodbox::search::TrackSearch;
use moodbox::store;
use moodbox::video::{self, VideoLookup};

#[derive(Parser)]
#[command(name = "moodbox", version, about = "Mood-tagged music catalog builder and recommender")]
struct Cli {
    /// Directory for the catalog artifact and liked list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the mood catalog from the iTunes Search API
    Build {
        /// Results requested per search call (overrides config)
        #[arg(long)]
        limit: Option<usize>,

        /// Languages to build (repeatable; defaults to the full supported list)
        #[arg(long = "lang")]
        languages: Vec<String>,
    },

    /// Recommend tracks for a mood from the built catalog
    Recommend {
        /// Mood emoji or label (e.g. 😢 or "sad")
        mood: String,

        /// Language to recommend in
        #[arg(short, long, default_value = BASE_LANGUAGE)]
        lang: String,

        /// Number of tracks
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// List the mood table
    Moods,

    /// Search iTunes directly (the query is language-suffixed unless English)
    Search {
        /// Free-text query
        query: Vec<String>,

        #[arg(short, long, default_value = BASE_LANGUAGE)]
        lang: String,

        /// Number of results
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Manage the liked-tracks list
    Liked {
        #[command(subcommand)]
        action: LikedAction,
    },

    /// Resolve a query to a playable video URL
    Video {
        /// Free-text query (e.g. track name plus artist)
        query: Vec<String>,
    },

    /// Show catalog statistics
    Stats,
}

#[derive(Subcommand)]
enum LikedAction {
    /// List liked tracks
    List,
    /// Like a track by catalog id
    Add { track_id: String },
    /// Remove a track by id
    Remove { track_id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();

    // Mood registry: builtin table plus custom moods from the config
    let registry = MoodRegistry::new(&config.custom_moods);

    // Resolve data directory: CLI > config > XDG default
    let data_dir = cli
        .data_dir
        .or(config.data_dir.clone())
        .unwrap_or_else(moodbox::config::default_data_dir);
    log::info!("Data directory: {}", data_dir.display());

    match cli.command {
        Commands::Build { limit, languages } => {
            let opts = BuildOptions {
                result_limit: limit.unwrap_or(config.search.result_limit),
                rate_limit_ms: config.search.rate_limit_ms,
            };
            let languages: Vec<String> = if languages.is_empty() {
                LANGUAGES.iter().map(|l| l.to_string()).collect()
            } else {
                languages
            };

            let client = ItunesClient::new(config.search.timeout_secs);
            println!("Building catalog from the iTunes Search API...");
            let outcome = builder::build_catalog(&client, &registry, &languages, &opts);
            let stats = &outcome.stats;

            if outcome.catalog.is_empty() {
                anyhow::bail!(
                    "no tracks fetched ({} searches, {} failed) — check internet connectivity",
                    stats.searches,
                    stats.fetch_errors
                );
            }

            let artifact_path = store::save_artifact(&data_dir, &outcome.catalog)
                .context("Failed to write catalog artifact")?;
            let csv_path = store::write_csv(&data_dir, &outcome.catalog)
                .context("Failed to write CSV export")?;

            println!(
                "Build complete: {} tracks ({} candidates, {} filtered, {} duplicates, {} failed searches)",
                outcome.catalog.len(),
                stats.candidates,
                stats.rejected_global + stats.rejected_mood,
                stats.duplicates,
                stats.fetch_errors
            );
            println!("Artifact: {}", artifact_path.display());
            println!("CSV:      {}", csv_path.display());
        }

        Commands::Recommend { mood, lang, count } => {
            let mood = registry
                .find(&mood)
                .with_context(|| format!("unknown mood \"{mood}\" (see `moodbox moods`)"))?;
            let catalog = load_catalog(&data_dir)?;
            let picks = catalog.recommend(&mood.key, &lang, count);

            if picks.is_empty() {
                println!("No {lang} tracks for {} {}.", mood.key, mood.label);
                return Ok(());
            }

            println!("{} {} — {} tracks ({})", mood.key, mood.label, picks.len(), lang);
            println!();
            print_track_table(&picks);
        }

        Commands::Moods => {
            println!("{:<4} {:<12} negative keywords", "key", "label");
            println!("{}", "-".repeat(60));
            for m in registry.moods() {
                println!("{:<4} {:<12} {}", m.key, m.label, m.negative.join(", "));
            }
        }

        Commands::Search { query, lang, limit } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("empty search query");
            }
            let full_query = if lang == BASE_LANGUAGE {
                query.clone()
            } else {
                format!("{query} {lang}")
            };

            let client = ItunesClient::new(config.search.timeout_secs);
            let results = client.search(&full_query, limit).context("Search failed")?;

            if results.is_empty() {
                println!("No results for \"{query}\".");
                return Ok(());
            }

            println!("{:<12} {:<30} {:<22} album", "id", "name", "artist");
            println!("{}", "-".repeat(90));
            for c in &results {
                println!(
                    "{:<12} {:<30} {:<22} {}",
                    c.id,
                    truncate(&c.name, 30),
                    truncate(&c.artist, 22),
                    truncate(&c.album, 24)
                );
            }
        }

        Commands::Liked { action } => {
            let mut liked = LikedList::load(&data_dir).context("Failed to read liked list")?;
            match action {
                LikedAction::List => {
                    if liked.tracks().is_empty() {
                        println!("No liked tracks yet.");
                        return Ok(());
                    }
                    let rows: Vec<&LabeledTrack> = liked.tracks().iter().collect();
                    print_track_table(&rows);
                }
                LikedAction::Add { track_id } => {
                    let catalog = load_catalog(&data_dir)?;
                    let track = catalog
                        .find(&track_id)
                        .with_context(|| format!("track {track_id} is not in the catalog"))?;
                    if liked.add(track.clone()).context("Failed to write liked list")? {
                        println!("Liked: {} — {}", track.name, track.artist);
                    } else {
                        println!("Already liked: {} — {}", track.name, track.artist);
                    }
                }
                LikedAction::Remove { track_id } => {
                    if liked.remove(&track_id).context("Failed to write liked list")? {
                        println!("Removed {track_id}.");
                    } else {
                        println!("{track_id} is not in the liked list.");
                    }
                }
            }
        }

        Commands::Video { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("empty video query");
            }
            let lookup = VideoLookup::new(&config.video.api_base, config.search.timeout_secs);
            match lookup.find_video_id(&query).context("Video lookup failed")? {
                Some(id) => println!("{}", video::watch_url(&id)),
                None => println!("No video found for \"{query}\"."),
            }
        }

        Commands::Stats => {
            let catalog = load_catalog(&data_dir)?;
            println!("{} tracks total", catalog.len());
            println!();
            println!("{:<12} {:<10} {:>6}", "mood", "language", "count");
            println!("{}", "-".repeat(30));
            for (label, lang, count) in catalog.mood_language_counts() {
                println!("{:<12} {:<10} {:>6}", label, lang, count);
            }
        }
    }

    Ok(())
}

fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    let artifact = store::load_artifact(data_dir).context("Failed to load catalog artifact")?;
    log::info!("Catalog generated at {}", artifact.generated_at);
    Ok(artifact.into_catalog())
}

fn print_track_table(tracks: &[&LabeledTrack]) {
    println!("{:<12} {:<30} {:<20} {:<4} language", "id", "name", "artist", "mood");
    println!("{}", "-".repeat(80));
    for t in tracks {
        println!(
            "{:<12} {:<30} {:<20} {:<4} {}",
            t.id,
            truncate(&t.name, 30),
            truncate(&t.artist, 20),
            t.mood_key,
            t.language
        );
    }
}

/// Char-safe truncation for table cells (track names mix scripts and emoji).
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}
