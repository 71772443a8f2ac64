use color_eyre::eyre::Result;
use reqwest::Client;
use url::Url;

use crate::ports::tidal::TidalClient;
use crate::tidal_rs::TidalApi;
use crate::tidal_rs::types::{TidalItem, TidalTrack};

pub struct TidalHttpAdapter {
    api: TidalApi,
}

impl TidalHttpAdapter {
    pub fn new(base_url: Url, bearer_token: String) -> Self {
        Self {
            api: TidalApi::new(Client::new(), base_url, bearer_token),
        }
    }
}

#[async_trait::async_trait]
impl TidalClient for TidalHttpAdapter {
    async fn folder_items(&self, folder_id: &str) -> Result<Vec<TidalItem>> {
        Ok(self.api.get_folder_items(folder_id).await?)
    }

    async fn create_folder(&self, name: &str) -> Result<TidalItem> {
        Ok(self.api.create_folder(name).await?)
    }

    async fn create_playlist(&self, folder_id: &str, name: &str) -> Result<TidalItem> {
        Ok(self.api.create_playlist(folder_id, name).await?)
    }

    async fn playlist_tracks(&self, playlist_uuid: &str) -> Result<Vec<TidalTrack>> {
        Ok(self.api.get_playlist_tracks(playlist_uuid).await?)
    }
}
