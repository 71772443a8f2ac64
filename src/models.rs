use std::time::Duration;

use comfy_table::{Table, presets::ASCII_FULL_CONDENSED};

/// A performer credited on a track. Only the display name is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

/// A track as read from the source service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: String,
    pub duration: Duration,
}

impl Track {
    /// Artist names joined for display, e.g. `"Daft Punk, Pharrell Williams"`.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A playlist snapshot. Track order is the playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Human readable report: header lines followed by a table of tracks.
    pub fn format_cli(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL_CONDENSED)
            .set_header(vec!["Name", "Artists", "Album", "Duration"]);
        for track in &self.tracks {
            table.add_row(vec![
                track.name.clone(),
                track.artist_names(),
                track.album.clone(),
                format_track_duration(track.duration),
            ]);
        }

        format!(
            "{}\n{}\n\n{} Songs\n{}",
            self.name,
            self.description,
            self.tracks.len(),
            table,
        )
    }
}

/// Formats a duration at second precision, e.g. `3m 20s`.
pub fn format_track_duration(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}
