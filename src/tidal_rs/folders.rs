use reqwest::Method;

use super::types::{ROOT_FOLDER_ID, TidalFolderPage, TidalItem};
use super::{PAGE_SIZE, TidalApi, TidalApiError};

const FOLDERS_PATH: &str = "/v2/my-collection/playlists/folders";
const CREATE_FOLDER_PATH: &str = "/v2/my-collection/playlists/folders/create-folder";
const CREATE_PLAYLIST_PATH: &str = "/v2/my-collection/playlists/folders/create-playlist";

impl TidalApi {
    /// Fetches one page of the children of `folder_id`.
    pub async fn get_folder_page(
        &self,
        folder_id: &str,
        cursor: Option<&str>,
    ) -> Result<TidalFolderPage, TidalApiError> {
        let limit = PAGE_SIZE.to_string();
        let mut query = vec![
            ("folderId", folder_id),
            ("includeOnly", ""),
            ("offset", "0"),
            ("limit", limit.as_str()),
            ("order", "DATE"),
            ("orderDirection", "DESC"),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        self.send(Method::GET, FOLDERS_PATH, &query).await
    }

    /// Fetches every child of `folder_id`, following the listing cursor.
    pub async fn get_folder_items(&self, folder_id: &str) -> Result<Vec<TidalItem>, TidalApiError> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.get_folder_page(folder_id, cursor.as_deref()).await?;
            let fetched = page.items.len();
            items.extend(page.items);

            let next = page.cursor.filter(|c| !c.is_empty());
            if next.is_some() && next == cursor {
                tracing::warn!(
                    "Folder {} listing returned the same cursor twice, stopping",
                    folder_id
                );
                break;
            }
            cursor = next;
            if fetched == 0 || cursor.is_none() {
                break;
            }
        }

        tracing::debug!("Folder {} has {} items", folder_id, items.len());
        Ok(items)
    }

    /// Creates a folder directly under the root folder.
    pub async fn create_folder(&self, name: &str) -> Result<TidalItem, TidalApiError> {
        let query = [("folderId", ROOT_FOLDER_ID), ("name", name), ("trns", "")];
        self.send(Method::PUT, CREATE_FOLDER_PATH, &query).await
    }

    /// Creates a private, empty playlist inside `folder_id`.
    pub async fn create_playlist(
        &self,
        folder_id: &str,
        name: &str,
    ) -> Result<TidalItem, TidalApiError> {
        let query = [
            ("description", ""),
            ("folderId", folder_id),
            ("isPublic", "false"),
            ("name", name),
        ];
        self.send(Method::PUT, CREATE_PLAYLIST_PATH, &query).await
    }
}
