use reqwest::Method;

use super::types::{TidalPlaylistItemsPage, TidalTrack};
use super::{PAGE_SIZE, TidalApi, TidalApiError};

impl TidalApi {
    pub async fn get_playlist_items_page(
        &self,
        playlist_uuid: &str,
        offset: u32,
    ) -> Result<TidalPlaylistItemsPage, TidalApiError> {
        let path = format!("/v1/playlists/{}/items", playlist_uuid);
        let offset = offset.to_string();
        let limit = PAGE_SIZE.to_string();
        let query = [("offset", offset.as_str()), ("limit", limit.as_str())];

        self.send(Method::GET, &path, &query).await
    }

    /// Fetches every track in the playlist, page by page. Videos are skipped.
    pub async fn get_playlist_tracks(
        &self,
        playlist_uuid: &str,
    ) -> Result<Vec<TidalTrack>, TidalApiError> {
        let mut tracks = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.get_playlist_items_page(playlist_uuid, offset).await?;
            let fetched = page.items.len() as u32;

            for entry in page.items {
                if entry.entry_type != "track" {
                    tracing::debug!(
                        "Skipping {} entry in playlist {}",
                        entry.entry_type,
                        playlist_uuid
                    );
                    continue;
                }
                let track = serde_json::from_value::<TidalTrack>(entry.item).map_err(|source| {
                    TidalApiError::InvalidItem {
                        endpoint: format!("/v1/playlists/{}/items", playlist_uuid),
                        source,
                    }
                })?;
                tracks.push(track);
            }

            offset += fetched;
            let exhausted = match page.total_number_of_items {
                Some(total) => offset >= total,
                None => fetched < PAGE_SIZE,
            };
            if fetched == 0 || exhausted {
                break;
            }
        }

        Ok(tracks)
    }
}
