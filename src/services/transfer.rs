use std::fmt::Write as _;

use color_eyre::eyre::{Result, WrapErr};
use tracing::instrument;

use crate::models::{Playlist, Track};
use crate::ports::spotify::SpotifySource;
use crate::ports::tidal::TidalClient;
use crate::services::matching::{TrackResolution, resolve_track};
use crate::services::playlist::PlaylistService;
use crate::services::tidal::TidalResolver;
use crate::tidal_rs::types::TidalItem;

#[derive(Debug, Clone)]
pub struct TrackOutcome {
    pub source: Track,
    pub resolution: TrackResolution,
}

/// Result of reproducing one source playlist on Tidal.
#[derive(Debug, Clone)]
pub struct TransferReport {
    pub folder: TidalItem,
    pub playlist: TidalItem,
    pub tracks: Vec<TrackOutcome>,
}

impl TransferReport {
    pub fn present_count(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| matches!(t.resolution, TrackResolution::Present(_)))
            .count()
    }

    pub fn missing_count(&self) -> usize {
        self.tracks.len() - self.present_count()
    }

    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Folder: {} ({})",
            self.folder.name,
            self.folder.folder_id().unwrap_or("-")
        );
        let _ = writeln!(
            out,
            "Playlist: {} ({})",
            self.playlist.name,
            self.playlist.playlist_uuid().unwrap_or("-")
        );
        let _ = writeln!(out);

        for outcome in &self.tracks {
            let track = &outcome.source;
            let _ = match &outcome.resolution {
                TrackResolution::Present(found) => writeln!(
                    out,
                    "[found]   {} - {} (tidal {})",
                    track.name,
                    track.artist_names(),
                    found.id
                ),
                TrackResolution::Missing => {
                    writeln!(out, "[missing] {} - {}", track.name, track.artist_names())
                }
            };
        }

        let _ = write!(
            out,
            "\n{} found, {} missing",
            self.present_count(),
            self.missing_count()
        );
        out
    }
}

/// Runs fetch, folder resolution, playlist resolution, and per-track
/// resolution in that order. The first error aborts the run.
pub struct TransferService<S: SpotifySource, T: TidalClient> {
    playlists: PlaylistService<S>,
    resolver: TidalResolver<T>,
    folder_name: String,
}

impl<S: SpotifySource, T: TidalClient> TransferService<S, T> {
    pub fn new(source: S, tidal: T, folder_name: String) -> Self {
        Self {
            playlists: PlaylistService::new(source),
            resolver: TidalResolver::new(tidal),
            folder_name,
        }
    }

    /// Fetches the source playlist and reproduces it on Tidal.
    #[instrument(skip(self))]
    pub async fn run(&self, playlist_id: &str) -> Result<(Playlist, TransferReport)> {
        let playlist = self.fetch_playlist(playlist_id).await?;
        let report = self.sync(&playlist).await?;
        Ok((playlist, report))
    }

    #[instrument(skip(self))]
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<Playlist> {
        self.playlists
            .fetch(playlist_id)
            .await
            .wrap_err_with(|| format!("Failed to fetch source playlist {}", playlist_id))
    }

    #[instrument(skip(self, playlist), fields(playlist = %playlist.name))]
    pub async fn sync(&self, playlist: &Playlist) -> Result<TransferReport> {
        let folder = self
            .resolver
            .find_or_create_folder(&self.folder_name)
            .await?;
        let destination = self
            .resolver
            .find_or_create_playlist(&folder, &playlist.name)
            .await?;

        let existing = self.resolver.list_tracks(&destination).await?;
        tracing::info!(
            "Tidal playlist {} has {} tracks",
            destination.name,
            existing.len()
        );

        let tracks = playlist
            .tracks
            .iter()
            .map(|track| {
                let resolution = resolve_track(track, &existing);
                if resolution == TrackResolution::Missing {
                    tracing::debug!("No Tidal match for '{}'", track.name);
                }
                TrackOutcome {
                    source: track.clone(),
                    resolution,
                }
            })
            .collect::<Vec<_>>();

        let report = TransferReport {
            folder,
            playlist: destination,
            tracks,
        };
        tracing::info!(
            "Transfer of '{}' complete: {} found, {} missing",
            playlist.name,
            report.present_count(),
            report.missing_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::ports::spotify::{MockSpotifySource, SpotifyApiPlaylist, SpotifyApiTrack};
    use crate::ports::tidal::MockTidalClient;
    use crate::tidal_rs::types::{TidalArtist, TidalItemData, TidalItemKind, TidalTrack};

    fn api_track(name: &str, artist: &str, duration_ms: u64) -> SpotifyApiTrack {
        SpotifyApiTrack {
            name: name.to_string(),
            duration_ms,
            artists: vec![artist.to_string()],
            album_name: "Album".to_string(),
        }
    }

    fn source_with_three_tracks() -> MockSpotifySource {
        let mut source = MockSpotifySource::new();
        source.expect_playlist().returning(|id| {
            Ok(SpotifyApiPlaylist {
                id: id.to_string(),
                name: "Chill Hits".to_string(),
                description: Some("Kick back".to_string()),
                tracks: vec![
                    api_track("One", "A", 100_000),
                    api_track("Two", "B", 200_000),
                    api_track("Three", "C", 300_000),
                ],
            })
        });
        source
    }

    fn item(kind: TidalItemKind, name: &str, id: Option<&str>, uuid: Option<&str>) -> TidalItem {
        TidalItem {
            item_type: kind,
            name: name.to_string(),
            data: TidalItemData {
                id: id.map(str::to_string),
                uuid: uuid.map(str::to_string),
            },
        }
    }

    fn tidal_track(id: &str, title: &str, artist: &str, secs: u32) -> TidalTrack {
        TidalTrack {
            id: id.to_string(),
            title: title.to_string(),
            duration: secs,
            artists: vec![TidalArtist {
                id: 1,
                name: artist.to_string(),
                artist_type: None,
            }],
            album: None,
        }
    }

    #[tokio::test]
    async fn test_run_existing_folder_and_playlist() {
        let mut tidal = MockTidalClient::new();
        let mut seq = Sequence::new();
        tidal
            .expect_folder_items()
            .withf(|id| id == "root")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![item(
                    TidalItemKind::Folder,
                    "spotify",
                    Some("f-1"),
                    None,
                )])
            });
        tidal
            .expect_folder_items()
            .withf(|id| id == "f-1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![item(
                    TidalItemKind::Playlist,
                    "Chill Hits",
                    None,
                    Some("p-1"),
                )])
            });
        tidal
            .expect_playlist_tracks()
            .withf(|uuid| uuid == "p-1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![
                    tidal_track("11", "One", "A", 100),
                    tidal_track("33", "Three", "C", 299),
                ])
            });
        tidal.expect_create_folder().times(0);
        tidal.expect_create_playlist().times(0);

        let service =
            TransferService::new(source_with_three_tracks(), tidal, "spotify".to_string());
        let (playlist, report) = service.run("pl").await.unwrap();

        assert_eq!(playlist.tracks.len(), 3);
        assert_eq!(report.folder.folder_id(), Some("f-1"));
        assert_eq!(report.playlist.playlist_uuid(), Some("p-1"));
        assert_eq!(report.present_count(), 2);
        assert_eq!(report.missing_count(), 1);
        assert_eq!(report.tracks[1].source.name, "Two");
        assert_eq!(report.tracks[1].resolution, TrackResolution::Missing);

        let summary = report.format_summary();
        assert!(summary.contains("Folder: spotify (f-1)"));
        assert!(summary.contains("[found]   One - A (tidal 11)"));
        assert!(summary.contains("[missing] Two - B"));
        assert!(summary.ends_with("2 found, 1 missing"));
    }

    #[tokio::test]
    async fn test_run_creates_missing_folder_and_playlist() {
        let mut tidal = MockTidalClient::new();
        tidal.expect_folder_items().times(2).returning(|_| Ok(vec![]));
        tidal
            .expect_create_folder()
            .withf(|name| name == "transfers")
            .times(1)
            .returning(|name| Ok(item(TidalItemKind::Folder, name, Some("f-9"), None)));
        tidal
            .expect_create_playlist()
            .withf(|folder_id, name| folder_id == "f-9" && name == "Chill Hits")
            .times(1)
            .returning(|_, name| Ok(item(TidalItemKind::Playlist, name, None, Some("p-9"))));
        tidal
            .expect_playlist_tracks()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service =
            TransferService::new(source_with_three_tracks(), tidal, "transfers".to_string());
        let (_, report) = service.run("pl").await.unwrap();

        assert_eq!(report.present_count(), 0);
        assert_eq!(report.missing_count(), 3);
    }

    #[tokio::test]
    async fn test_run_root_folder_lists_root_for_playlist() {
        let mut tidal = MockTidalClient::new();
        tidal
            .expect_folder_items()
            .withf(|id| id == "root")
            .times(1)
            .returning(|_| Ok(vec![]));
        tidal
            .expect_create_playlist()
            .withf(|folder_id, _| folder_id == "root")
            .times(1)
            .returning(|_, name| Ok(item(TidalItemKind::Playlist, name, None, Some("p-1"))));
        tidal.expect_playlist_tracks().returning(|_| Ok(vec![]));

        let service = TransferService::new(source_with_three_tracks(), tidal, "root".to_string());
        let (_, report) = service.run("pl").await.unwrap();

        assert_eq!(report.folder, TidalItem::root());
    }

    #[tokio::test]
    async fn test_run_stops_at_first_error() {
        let mut source = MockSpotifySource::new();
        source
            .expect_playlist()
            .returning(|_| Err(color_eyre::eyre::eyre!("Couldn't get Spotify token")));
        // No Tidal expectations: any call would panic.
        let service = TransferService::new(source, MockTidalClient::new(), "spotify".to_string());

        let err = service.run("pl").await.unwrap_err();

        assert!(err.to_string().contains("Failed to fetch source playlist pl"));
    }

    #[tokio::test]
    async fn test_sync_propagates_track_listing_error() {
        let mut tidal = MockTidalClient::new();
        tidal.expect_folder_items().returning(|folder_id| {
            Ok(match folder_id {
                "root" => vec![item(TidalItemKind::Folder, "spotify", Some("f-1"), None)],
                _ => vec![item(TidalItemKind::Playlist, "Chill Hits", None, Some("p-1"))],
            })
        });
        tidal
            .expect_playlist_tracks()
            .returning(|_| Err(color_eyre::eyre::eyre!("Tidal returned 404 Not Found")));

        let service =
            TransferService::new(source_with_three_tracks(), tidal, "spotify".to_string());
        let playlist = service.fetch_playlist("pl").await.unwrap();
        let err = service.sync(&playlist).await.unwrap_err();

        assert!(err.to_string().contains("Could not get tracks of Tidal playlist p-1"));
    }
}
