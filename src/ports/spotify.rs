use color_eyre::eyre::Result;

/// Decoupled representation of a Spotify playlist from the API.
#[derive(Debug, Clone)]
pub struct SpotifyApiPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tracks: Vec<SpotifyApiTrack>,
}

/// Decoupled representation of a Spotify track from the API.
#[derive(Debug, Clone)]
pub struct SpotifyApiTrack {
    pub name: String,
    pub duration_ms: u64,
    pub artists: Vec<String>,
    pub album_name: String,
}

/// Port trait wrapping the Spotify API capabilities used by business logic.
///
/// Implementations live in `services::spotify::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifySource: Send + Sync {
    async fn playlist(&self, playlist_id: &str) -> Result<SpotifyApiPlaylist>;
}
