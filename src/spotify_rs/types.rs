#![allow(dead_code)]
use serde::Deserialize;

/// Spotify client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Full playlist object from `GET /v1/playlists/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tracks: SpotifyPlaylistTracksPage,
}

/// A page of playlist entries. `next` is the absolute URL of the following page.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistTracksPage {
    pub items: Vec<SpotifyPlaylistItem>,
    pub next: Option<String>,
    #[serde(default)]
    pub total: u32,
}

/// `track` is null for entries Spotify can no longer resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    /// Absent for local files.
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub id: Option<String>,
    pub name: String,
}
