use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use url::Url;

use crate::ports::spotify::{SpotifyApiPlaylist, SpotifyApiTrack, SpotifySource};
use crate::spotify_rs::auth::request_client_credentials_token;
use crate::spotify_rs::client::SpotifyClient;
use crate::spotify_rs::types::SpotifyTrack;

#[derive(Debug, Clone)]
pub struct SpotifyApiCredentials {
    client_id: String,
    client_secret: String,
}

impl SpotifyApiCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// Reads playlists with an app-only token. A fresh token is requested per
/// playlist since a run reads a single playlist.
pub struct SpotifyHttpAdapter {
    client: Client,
    credentials: SpotifyApiCredentials,
    api_url: Url,
    token_url: String,
}

impl SpotifyHttpAdapter {
    pub fn new(credentials: SpotifyApiCredentials, api_url: Url, token_url: String) -> Self {
        Self {
            client: Client::new(),
            credentials,
            api_url,
            token_url,
        }
    }
}

impl From<SpotifyTrack> for SpotifyApiTrack {
    fn from(track: SpotifyTrack) -> Self {
        Self {
            name: track.name,
            duration_ms: track.duration_ms,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album_name: track.album.name,
        }
    }
}

#[async_trait::async_trait]
impl SpotifySource for SpotifyHttpAdapter {
    async fn playlist(&self, playlist_id: &str) -> Result<SpotifyApiPlaylist> {
        let token = request_client_credentials_token(
            &self.client,
            &self.token_url,
            self.credentials.client_id(),
            self.credentials.client_secret(),
        )
        .await
        .wrap_err("Couldn't get Spotify token")?;

        let client = SpotifyClient::new(
            self.client.clone(),
            self.api_url.clone(),
            token.access_token,
        );
        let (playlist, tracks) = client
            .get_playlist(playlist_id)
            .await
            .wrap_err_with(|| format!("Couldn't get Spotify playlist {}", playlist_id))?;

        Ok(SpotifyApiPlaylist {
            id: playlist.id,
            name: playlist.name,
            description: playlist.description,
            tracks: tracks.into_iter().map(SpotifyApiTrack::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_playlist_authenticates_then_fetches() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", "/api/token")
            .with_body(
                r#"{"access_token": "app-token", "token_type": "Bearer", "expires_in": 3600}"#,
            )
            .expect(1)
            .create_async()
            .await;
        let playlist = server
            .mock("GET", "/v1/playlists/abc")
            .match_header("authorization", "Bearer app-token")
            .with_body(
                r#"{"id": "abc", "name": "Focus", "description": "Deep work",
                    "tracks": {"items": [{"track": {"id": "t1", "name": "Weightless",
                        "artists": [{"id": "a1", "name": "Marconi Union"}],
                        "album": {"id": "al1", "name": "Weightless"}, "duration_ms": 480000}}],
                    "next": null, "total": 1}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let adapter = SpotifyHttpAdapter::new(
            SpotifyApiCredentials::new("id".to_string(), "secret".to_string()),
            Url::parse(&server.url()).unwrap(),
            format!("{}/api/token", server.url()),
        );
        let result = adapter.playlist("abc").await.unwrap();

        assert_eq!(result.name, "Focus");
        assert_eq!(result.description.as_deref(), Some("Deep work"));
        assert_eq!(result.tracks.len(), 1);
        assert_eq!(result.tracks[0].artists, vec!["Marconi Union".to_string()]);
        assert_eq!(result.tracks[0].album_name, "Weightless");
        token.assert_async().await;
        playlist.assert_async().await;
    }

    #[tokio::test]
    async fn test_playlist_fails_when_grant_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token")
            .with_status(401)
            .create_async()
            .await;
        let playlist = server
            .mock("GET", "/v1/playlists/abc")
            .expect(0)
            .create_async()
            .await;

        let adapter = SpotifyHttpAdapter::new(
            SpotifyApiCredentials::new("id".to_string(), "bad".to_string()),
            Url::parse(&server.url()).unwrap(),
            format!("{}/api/token", server.url()),
        );
        let err = adapter.playlist("abc").await.unwrap_err();

        assert!(err.to_string().contains("Couldn't get Spotify token"));
        playlist.assert_async().await;
    }
}
