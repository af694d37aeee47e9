//! Library snapshots
//!
//! A snapshot is one JSON document exported from the event store, catalog
//! and download subsystem. Every section is optional.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::{Album, Artist, PlaybackEvent, Song, SongArtistMap};
use crate::download::{DownloadState, DownloadedSong};
use crate::error::SnapshotError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySnapshot {
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub events: Vec<PlaybackEvent>,
    pub song_artist_maps: Vec<SongArtistMap>,
    pub download_states: Vec<DownloadState>,
    pub downloaded_songs: Vec<DownloadedSong>,
}

impl LibrarySnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Split into keyed catalog lookups plus the raw event log
    pub fn into_catalog(self) -> Catalog {
        Catalog {
            songs: index_by(self.songs, |s| &s.id),
            artists: index_by(self.artists, |a| &a.id),
            albums: index_by(self.albums, |a| &a.id),
            song_artist_maps: self.song_artist_maps,
            events: self.events,
            download_states: index_by(self.download_states, |d| &d.song_id),
            downloaded_songs: self.downloaded_songs,
        }
    }
}

/// Keyed view of a snapshot, in the shape the core functions take
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub songs: HashMap<String, Song>,
    pub artists: HashMap<String, Artist>,
    pub albums: HashMap<String, Album>,
    pub song_artist_maps: Vec<SongArtistMap>,
    pub events: Vec<PlaybackEvent>,
    pub download_states: HashMap<String, DownloadState>,
    pub downloaded_songs: Vec<DownloadedSong>,
}

/// Later duplicates replace earlier ones
fn index_by<T>(items: Vec<T>, key: impl Fn(&T) -> &String) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.insert(key(&item).clone(), item);
    }
    map
}
