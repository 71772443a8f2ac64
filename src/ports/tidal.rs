use color_eyre::eyre::Result;

use crate::tidal_rs::types::{TidalItem, TidalTrack};

/// Port trait wrapping the Tidal collection API used by business logic.
///
/// Implementations live in `services::tidal::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TidalClient: Send + Sync {
    /// Every child of the folder, across all pages.
    async fn folder_items(&self, folder_id: &str) -> Result<Vec<TidalItem>>;

    async fn create_folder(&self, name: &str) -> Result<TidalItem>;

    async fn create_playlist(&self, folder_id: &str, name: &str) -> Result<TidalItem>;

    /// Every track of the playlist, across all pages.
    async fn playlist_tracks(&self, playlist_uuid: &str) -> Result<Vec<TidalTrack>>;
}
