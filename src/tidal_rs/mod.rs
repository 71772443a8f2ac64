use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

pub mod folders;
pub mod playlist_items;
pub mod types;

pub const TIDAL_BASE_URL: &str = "https://listen.tidal.com";

/// Maximum number of items requested per listing page.
pub const PAGE_SIZE: u32 = 50;

/// Parameters the Tidal web player attaches to every request.
const CLIENT_QUERY: [(&str, &str); 3] = [
    ("countryCode", "US"),
    ("locale", "en_US"),
    ("deviceType", "BROWSER"),
];

#[derive(Debug, thiserror::Error)]
pub enum TidalApiError {
    #[error("Invalid Tidal URL for {path}: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to send {method} {endpoint}: {source}")]
    FailedToSendRequest {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Tidal returned {status} for {method} {endpoint}: {body}")]
    Status {
        method: Method,
        endpoint: String,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to parse response from {method} {endpoint}: {source}")]
    FailedToParseResponse {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected item in response from {endpoint}: {source}")]
    InvalidItem {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tidal web API client authenticated with a bearer token.
///
/// Docs are unofficial; the endpoints are the ones used by listen.tidal.com.
#[derive(Debug, Clone)]
pub struct TidalApi {
    client: Client,
    base_url: Url,
    bearer_token: String,
}

impl TidalApi {
    pub fn new(client: Client, base_url: Url, bearer_token: String) -> Self {
        Self {
            client,
            base_url,
            bearer_token,
        }
    }

    fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TidalApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|source| TidalApiError::InvalidUrl {
                path: path.to_string(),
                source,
            })?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().copied())
            .extend_pairs(CLIENT_QUERY);
        Ok(url)
    }

    /// Sends a request and decodes the JSON body. Any status >= 400 is an error.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TidalApiError> {
        let url = self.endpoint_url(path, query)?;
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method.clone(), url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|source| TidalApiError::FailedToSendRequest {
                method: method.clone(),
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(TidalApiError::Status {
                method,
                endpoint: path.to_string(),
                status,
                body: response
                    .text()
                    .await
                    .unwrap_or("Failed to get error text".to_string()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| TidalApiError::FailedToParseResponse {
                method,
                endpoint: path.to_string(),
                source,
            })
    }
}
