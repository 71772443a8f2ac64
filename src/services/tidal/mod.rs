pub mod client;

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use tracing::instrument;

use crate::ports::tidal::TidalClient;
use crate::tidal_rs::types::{ROOT_FOLDER_ID, TidalItem, TidalTrack};

/// First item whose name equals `name` exactly.
pub fn find_by_name<'a>(items: &'a [TidalItem], name: &str) -> Option<&'a TidalItem> {
    items.iter().find(|item| item.name == name)
}

fn pick_by_name<'a>(items: &'a [TidalItem], name: &str) -> Option<&'a TidalItem> {
    let matches = items.iter().filter(|item| item.name == name).count();
    if matches > 1 {
        tracing::warn!(
            "Found {} items named '{}', using the first one",
            matches,
            name
        );
    }
    find_by_name(items, name)
}

/// Find-or-create resolution of folders and playlists in the Tidal collection.
///
/// Creation is not idempotent on the Tidal side, so every create is preceded
/// by a listing of the parent scope.
pub struct TidalResolver<C: TidalClient> {
    client: C,
}

impl<C: TidalClient> TidalResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Lists the children of `parent`, or of the root folder when `None`.
    pub async fn list_children(&self, parent: Option<&TidalItem>) -> Result<Vec<TidalItem>> {
        let folder_id = match parent {
            Some(folder) => folder
                .folder_id()
                .ok_or_eyre(format!("Folder '{}' has no id", folder.name))?,
            None => ROOT_FOLDER_ID,
        };

        self.client
            .folder_items(folder_id)
            .await
            .wrap_err_with(|| format!("Could not get Tidal folder {}", folder_id))
    }

    #[instrument(skip(self))]
    pub async fn find_or_create_folder(&self, name: &str) -> Result<TidalItem> {
        if name == ROOT_FOLDER_ID {
            tracing::info!("Using root folder");
            return Ok(TidalItem::root());
        }

        let folders: Vec<TidalItem> = self
            .list_children(None)
            .await?
            .into_iter()
            .filter(TidalItem::is_folder)
            .collect();

        let folder = match pick_by_name(&folders, name) {
            Some(folder) => folder.clone(),
            None => {
                tracing::info!("Could not find folder {}, creating a new folder", name);
                self.client
                    .create_folder(name)
                    .await
                    .wrap_err("Failed to create folder")?
            }
        };

        let id = folder.folder_id().ok_or_eyre("Failed to find a folder")?;
        tracing::info!("Using folder {} ({})", folder.name, id);
        Ok(folder)
    }

    #[instrument(skip(self, folder), fields(folder = %folder.name))]
    pub async fn find_or_create_playlist(
        &self,
        folder: &TidalItem,
        name: &str,
    ) -> Result<TidalItem> {
        let playlists: Vec<TidalItem> = self
            .list_children(Some(folder))
            .await?
            .into_iter()
            .filter(TidalItem::is_playlist)
            .collect();

        let playlist = match pick_by_name(&playlists, name) {
            Some(playlist) => playlist.clone(),
            None => {
                tracing::info!("Could not find playlist {}, creating a new playlist", name);
                let folder_id = folder
                    .folder_id()
                    .ok_or_eyre(format!("Folder '{}' has no id", folder.name))?;
                self.client
                    .create_playlist(folder_id, name)
                    .await
                    .wrap_err("Failed to create playlist")?
            }
        };

        let uuid = playlist
            .playlist_uuid()
            .ok_or_eyre("Failed to find a playlist")?;
        tracing::info!("Using playlist {} ({})", playlist.name, uuid);
        Ok(playlist)
    }

    /// Every track currently in `playlist`.
    pub async fn list_tracks(&self, playlist: &TidalItem) -> Result<Vec<TidalTrack>> {
        let uuid = playlist
            .playlist_uuid()
            .ok_or_eyre(format!("Playlist '{}' has no uuid", playlist.name))?;

        self.client
            .playlist_tracks(uuid)
            .await
            .wrap_err_with(|| format!("Could not get tracks of Tidal playlist {}", uuid))
    }
}
