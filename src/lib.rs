pub mod builder;
pub mod catalog;
pub mod config;
pub mod itunes;
pub mod liked;
pub mod moods;
pub mod search;
pub mod store;
pub mod terms;
pub mod video;

/// Application name for XDG paths
pub const APP_NAME: &str = "moodbox";
