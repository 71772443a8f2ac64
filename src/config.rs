use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use serde::Deserialize;
use url::Url;

use crate::services::spotify::client::SpotifyApiCredentials;
use crate::spotify_rs::auth::SPOTIFY_TOKEN_URL;
use crate::spotify_rs::client::SPOTIFY_API_URL;
use crate::tidal_rs::TIDAL_BASE_URL;

pub const DEFAULT_TIDAL_FOLDER: &str = "spotify";

/// Optional settings file. Every key may also come from the command line or
/// the environment, which take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub tidal_bearer_token: Option<String>,
    pub tidal_folder: Option<String>,
    pub tidal_base_url: Option<String>,
    pub spotify_api_base_url: Option<String>,
    pub spotify_token_url: Option<String>,
}

impl FileConfig {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        let config: FileConfig = toml::from_str(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("playlist-transfer").join("config.toml"))
    }

    /// Load the default config file, or empty settings if there is none.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Loads variables from a `.env` file into the environment. `None` searches
/// the current directory and its parents. A missing file is not an error.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match loaded {
        Err(e) if !e.not_found() => Err(e).wrap_err("Failed to load .env"),
        _ => Ok(()),
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub tidal_bearer_token: Option<String>,
    pub tidal_folder: Option<String>,
}

/// Everything a transfer run needs, passed explicitly to the API adapters.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub spotify_credentials: SpotifyApiCredentials,
    pub spotify_api_url: Url,
    pub spotify_token_url: String,
    pub tidal_bearer_token: String,
    pub tidal_base_url: Url,
    /// Destination folder name. `"root"` selects the collection root.
    pub tidal_folder: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(cli: Option<String>, file: Option<String>, env_name: &str) -> Result<String> {
    non_empty(cli)
        .or(non_empty(file))
        .ok_or_eyre(format!("{} is not set", env_name))
}

fn parse_url(value: Option<String>, default: &str, key: &str) -> Result<Url> {
    let value = non_empty(value).unwrap_or_else(|| default.to_string());
    Url::parse(&value).wrap_err(format!("Invalid {}: {}", key, value))
}

impl TransferConfig {
    pub fn resolve(overrides: ConfigOverrides, file: FileConfig) -> Result<Self> {
        let client_id = required(
            overrides.spotify_client_id,
            file.spotify_client_id,
            "SPOTIFY_ID",
        )?;
        let client_secret = required(
            overrides.spotify_client_secret,
            file.spotify_client_secret,
            "SPOTIFY_SECRET",
        )?;
        let tidal_bearer_token = required(
            overrides.tidal_bearer_token,
            file.tidal_bearer_token,
            "TIDAL_BEARER_TOKEN",
        )?;
        let tidal_folder = non_empty(overrides.tidal_folder)
            .or(non_empty(file.tidal_folder))
            .unwrap_or_else(|| DEFAULT_TIDAL_FOLDER.to_string());

        Ok(Self {
            spotify_credentials: SpotifyApiCredentials::new(client_id, client_secret),
            spotify_api_url: parse_url(
                file.spotify_api_base_url,
                SPOTIFY_API_URL,
                "spotify_api_base_url",
            )?,
            spotify_token_url: non_empty(file.spotify_token_url)
                .unwrap_or_else(|| SPOTIFY_TOKEN_URL.to_string()),
            tidal_bearer_token,
            tidal_base_url: parse_url(file.tidal_base_url, TIDAL_BASE_URL, "tidal_base_url")?,
            tidal_folder,
        })
    }
}
