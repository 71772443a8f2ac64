use std::time::Duration;

use color_eyre::eyre::Result;

use crate::models::{Artist, Playlist, Track};
use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifySource};

/// Reads source playlists and normalizes them into the service-agnostic model.
pub struct PlaylistService<S: SpotifySource> {
    source: S,
}

impl<S: SpotifySource> PlaylistService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, playlist_id: &str) -> Result<Playlist> {
        let playlist = self.source.playlist(playlist_id).await?;
        tracing::info!(
            "Fetched Spotify playlist '{}' ({}) with {} tracks",
            playlist.name,
            playlist.id,
            playlist.tracks.len()
        );
        Ok(playlist_from_spotify(playlist))
    }
}

pub fn playlist_from_spotify(playlist: SpotifyApiPlaylist) -> Playlist {
    Playlist {
        name: playlist.name,
        description: playlist.description.unwrap_or_default(),
        tracks: playlist.tracks.into_iter().map(track_from_spotify).collect(),
    }
}

pub fn track_from_spotify(track: SpotifyApiTrack) -> Track {
    Track {
        name: track.name,
        artists: track
            .artists
            .into_iter()
            .map(|name| Artist { name })
            .collect(),
        album: track.album_name,
        duration: Duration::from_millis(track.duration_ms),
    }
}
