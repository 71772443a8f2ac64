mod config;
mod logging;
mod models;
mod ports;
mod services;
mod spotify_rs;
mod tidal_rs;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};

use crate::{
    config::{ConfigOverrides, FileConfig, TransferConfig, load_env_file},
    logging::init_tracing,
    services::{
        spotify::client::SpotifyHttpAdapter, tidal::client::TidalHttpAdapter,
        transfer::TransferService,
    },
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The Spotify playlist id to transfer
    #[arg(default_value = "37i9dQZF1DX8Uebhn9wzrS")]
    playlist_id: String,

    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_TRANSFER_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `playlist_transfer=debug`
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Spotify app client id
    #[arg(long, env = "SPOTIFY_ID", hide_env_values = true)]
    spotify_id: Option<String>,

    /// Spotify app client secret
    #[arg(long, env = "SPOTIFY_SECRET", hide_env_values = true)]
    spotify_secret: Option<String>,

    /// Bearer token of a logged-in listen.tidal.com session
    #[arg(long, env = "TIDAL_BEARER_TOKEN", hide_env_values = true)]
    tidal_token: Option<String>,

    /// Tidal folder to put the playlist in ("root" for the top level, default "spotify")
    #[arg(long, env = "TIDAL_TRANSFER_FOLDER")]
    tidal_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    load_env_file(None)?;

    let args = Args::parse();
    init_tracing(&args.log_level)?;

    tracing::debug!("Loading configuration");
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path),
        None => FileConfig::load(),
    }
    .wrap_err("Failed to load playlist-transfer config")?;

    let config = TransferConfig::resolve(
        ConfigOverrides {
            spotify_client_id: args.spotify_id,
            spotify_client_secret: args.spotify_secret,
            tidal_bearer_token: args.tidal_token,
            tidal_folder: args.tidal_folder,
        },
        file_config,
    )?;

    let service = TransferService::new(
        SpotifyHttpAdapter::new(
            config.spotify_credentials,
            config.spotify_api_url,
            config.spotify_token_url,
        ),
        TidalHttpAdapter::new(config.tidal_base_url, config.tidal_bearer_token),
        config.tidal_folder,
    );

    let (playlist, report) = service.run(&args.playlist_id).await?;
    println!("{}", playlist.format_cli());
    println!("{}", report.format_summary());

    Ok(())
}
