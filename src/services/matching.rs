use std::collections::HashSet;

use unaccent::unaccent;

use crate::models::Track;
use crate::tidal_rs::types::TidalTrack;

/// Largest duration difference, in seconds, still treated as the same recording.
const DURATION_TOLERANCE_SECS: u64 = 2;

/// Outcome of looking up one source track among the destination tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackResolution {
    Present(TidalTrack),
    Missing,
}

fn normalize(s: &str) -> String {
    unaccent(s)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exact match on normalized title, at least one shared artist, and a
/// duration within [`DURATION_TOLERANCE_SECS`].
pub fn is_same_track(source: &Track, candidate: &TidalTrack) -> bool {
    if normalize(&source.name) != normalize(&candidate.title) {
        return false;
    }

    let source_artists: HashSet<String> =
        source.artists.iter().map(|a| normalize(&a.name)).collect();
    let shares_artist = candidate
        .artists
        .iter()
        .any(|a| source_artists.contains(&normalize(&a.name)));
    if !shares_artist {
        return false;
    }

    let source_secs = source.duration.as_secs_f64().round() as u64;
    source_secs.abs_diff(u64::from(candidate.duration)) <= DURATION_TOLERANCE_SECS
}

pub fn resolve_track(source: &Track, candidates: &[TidalTrack]) -> TrackResolution {
    candidates
        .iter()
        .find(|candidate| is_same_track(source, candidate))
        .cloned()
        .map_or(TrackResolution::Missing, TrackResolution::Present)
}
