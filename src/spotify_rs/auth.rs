use color_eyre::Result;
use reqwest::StatusCode;

use crate::spotify_rs::types::SpotifyTokenResponse;

pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Debug, thiserror::Error)]
pub enum ClientCredentialsError {
    #[error("Spotify rejected the client credentials ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
}

/// Requests an app-only access token with the client-credentials grant.
/// https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
pub async fn request_client_credentials_token(
    client: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<SpotifyTokenResponse, ClientCredentialsError> {
    let response = client
        .post(token_url)
        // Serializes to x-www-form-urlencoded, as required by spotify
        .form(&[("grant_type", "client_credentials")])
        .basic_auth(client_id, Some(client_secret))
        .send()
        .await
        .map_err(ClientCredentialsError::FailedToSendRequest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientCredentialsError::Rejected {
            status,
            reason: response
                .text()
                .await
                .unwrap_or("Failed to get error text".to_string()),
        });
    }

    response
        .json::<SpotifyTokenResponse>()
        .await
        .map_err(ClientCredentialsError::FailedToParseResponse)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    #[tokio::test]
    async fn test_request_token_sends_basic_auth_and_grant() {
        let mut server = mockito::Server::new_async().await;
        // base64("id:secret")
        let mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", "Basic aWQ6c2VjcmV0")
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "client_credentials".into(),
            ))
            .with_body(r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#)
            .create_async()
            .await;

        let token = request_client_credentials_token(
            &reqwest::Client::new(),
            &format!("{}/api/token", server.url()),
            "id",
            "secret",
        )
        .await
        .unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3600);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_token_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_client"}"#)
            .create_async()
            .await;

        let err = request_client_credentials_token(
            &reqwest::Client::new(),
            &format!("{}/api/token", server.url()),
            "id",
            "wrong",
        )
        .await
        .unwrap_err();

        match err {
            ClientCredentialsError::Rejected { status, reason } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(reason.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
