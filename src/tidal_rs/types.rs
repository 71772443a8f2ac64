#![allow(dead_code)]
use serde::{Deserialize, Deserializer};

/// Identifier Tidal uses for the top of the "My Collection" folder tree.
pub const ROOT_FOLDER_ID: &str = "root";

/* ---------- Folder tree ---------- */

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum TidalItemKind {
    Folder,
    Playlist,
    #[default]
    Unknown,
    Other(String),
}

impl From<String> for TidalItemKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FOLDER" => Self::Folder,
            "PLAYLIST" => Self::Playlist,
            _ => Self::Other(value),
        }
    }
}

/// A folder or playlist entry in the collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalItem {
    #[serde(default)]
    pub item_type: TidalItemKind,
    pub name: String,
    #[serde(default)]
    pub data: TidalItemData,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TidalItemData {
    /// Folder id, used as `folderId` when listing or creating children.
    #[serde(default)]
    pub id: Option<String>,
    /// Playlist uuid, used when listing playlist items.
    #[serde(default)]
    pub uuid: Option<String>,
}

impl TidalItem {
    /// The implicit root folder. It is never returned by a listing.
    pub fn root() -> Self {
        Self {
            item_type: TidalItemKind::Folder,
            name: ROOT_FOLDER_ID.to_string(),
            data: TidalItemData {
                id: Some(ROOT_FOLDER_ID.to_string()),
                uuid: None,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        self.item_type == TidalItemKind::Folder
    }

    pub fn is_playlist(&self) -> bool {
        self.item_type == TidalItemKind::Playlist
    }

    pub fn folder_id(&self) -> Option<&str> {
        self.data.id.as_deref()
    }

    pub fn playlist_uuid(&self) -> Option<&str> {
        self.data.uuid.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalFolderPage {
    #[serde(default)]
    pub items: Vec<TidalItem>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/* ---------- Playlist items ---------- */

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TidalTrack {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    /// Seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub artists: Vec<TidalArtist>,
    #[serde(default)]
    pub album: Option<TidalAlbum>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TidalArtist {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub artist_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TidalAlbum {
    pub id: u64,
    pub title: String,
}

/// One entry of a playlist. `item` is a track or a video depending on `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct TidalPlaylistEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub item: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalPlaylistItemsPage {
    /// Absent on some responses, in which case a short page ends the listing.
    #[serde(default)]
    pub total_number_of_items: Option<u32>,
    #[serde(default)]
    pub items: Vec<TidalPlaylistEntry>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kinds() {
        let items: Vec<TidalItem> = serde_json::from_str(
            r#"[
                {"itemType": "FOLDER", "name": "spotify", "data": {"id": "f-1"}},
                {"itemType": "PLAYLIST", "name": "Chill", "data": {"uuid": "p-1"}},
                {"itemType": "MIX", "name": "Daily"},
                {"name": "bare"}
            ]"#,
        )
        .unwrap();

        assert!(items[0].is_folder());
        assert_eq!(items[0].folder_id(), Some("f-1"));
        assert!(items[1].is_playlist());
        assert_eq!(items[1].playlist_uuid(), Some("p-1"));
        assert_eq!(items[2].item_type, TidalItemKind::Other("MIX".to_string()));
        assert_eq!(items[3].item_type, TidalItemKind::Unknown);
        assert_eq!(items[3].data, TidalItemData::default());
    }

    #[test]
    fn test_root_item() {
        let root = TidalItem::root();
        assert!(root.is_folder());
        assert_eq!(root.name, "root");
        assert_eq!(root.folder_id(), Some("root"));
    }

    #[test]
    fn test_track_numeric_id() {
        let track: TidalTrack = serde_json::from_str(
            r#"{
                "id": 77646175,
                "title": "Intro",
                "duration": 128,
                "artists": [{"id": 3346, "name": "The xx", "type": "MAIN"}],
                "album": {"id": 77646173, "title": "xx"}
            }"#,
        )
        .unwrap();

        assert_eq!(track.id, "77646175");
        assert_eq!(track.duration, 128);
        assert_eq!(track.artists[0].artist_type.as_deref(), Some("MAIN"));
        assert_eq!(track.album.unwrap().title, "xx");
    }
}
