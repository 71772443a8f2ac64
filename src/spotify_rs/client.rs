use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use url::Url;

use crate::spotify_rs::types::{SpotifyPlaylist, SpotifyPlaylistTracksPage, SpotifyTrack};

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com";

/// Spotify Web API client
pub struct SpotifyClient {
    access_token: String,
    api_url: Url,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(client: reqwest::Client, api_url: Url, access_token: String) -> Self {
        Self {
            access_token,
            api_url,
            client,
        }
    }

    /// Get a playlist with every track, following the `next` links of the
    /// embedded track page. Entries without a track are dropped.
    pub async fn get_playlist(
        &self,
        playlist_id: &str,
    ) -> Result<(SpotifyPlaylist, Vec<SpotifyTrack>)> {
        let url = self
            .api_url
            .join(&format!("v1/playlists/{}", playlist_id))
            .wrap_err("Failed to build Spotify playlist URL")?;

        let playlist: SpotifyPlaylist = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()
            .wrap_err_with(|| format!("Failed to get Spotify playlist {}", playlist_id))?
            .json()
            .await
            .wrap_err("Failed to deserialize Spotify playlist response")?;

        let mut all_tracks = Vec::new();
        let mut page = playlist.tracks.clone();
        loop {
            all_tracks.extend(page.items.into_iter().filter_map(|item| item.track));

            let Some(next_url) = page.next else {
                break;
            };
            page = self
                .client
                .get(&next_url)
                .bearer_auth(&self.access_token)
                .timeout(Duration::from_secs(10))
                .send()
                .await?
                .error_for_status()
                .wrap_err_with(|| format!("Failed to get Spotify playlist page {}", next_url))?
                .json::<SpotifyPlaylistTracksPage>()
                .await
                .wrap_err("Failed to deserialize Spotify playlist tracks page")?;
        }

        Ok((playlist, all_tracks))
    }
}
