//! Reduce per-song download states to one answer for a group of songs
//!
//! Three rules live here and they are intentionally not the same:
//! - collection menus pick a single bulk action (download / cancel / remove)
//! - multi-selection bars classify "all done", "all in flight or done", or not
//! - library selection treats any pending song, paused included, as downloading

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::download::types::{
    DownloadState, DownloadStatus, DownloadedSong, downloaded_ids, status_of,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionDownloadAction {
    Download,
    Cancel,
    Remove,
}

/// Labels shown next to each collection action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionLabels {
    pub download: String,
    pub downloading: String,
    pub remove: String,
}

impl Default for ActionLabels {
    fn default() -> Self {
        ActionLabels {
            download: "Download".to_string(),
            downloading: "Downloading".to_string(),
            remove: "Remove download".to_string(),
        }
    }
}

impl ActionLabels {
    pub fn for_action(&self, action: CollectionDownloadAction) -> &str {
        match action {
            CollectionDownloadAction::Download => &self.download,
            CollectionDownloadAction::Cancel => &self.downloading,
            CollectionDownloadAction::Remove => &self.remove,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionDownloadMenu {
    pub label: String,
    pub action: CollectionDownloadAction,
}

impl CollectionDownloadMenu {
    fn new(labels: &ActionLabels, action: CollectionDownloadAction) -> Self {
        CollectionDownloadMenu {
            label: labels.for_action(action).to_string(),
            action,
        }
    }
}

/// Bulk download action for an album or playlist, with default labels
pub fn resolve_collection_action<S: AsRef<str>>(
    song_ids: &[S],
    download_states: &HashMap<String, DownloadState>,
    downloaded_songs: &[DownloadedSong],
    show_when_empty: bool,
) -> Option<CollectionDownloadMenu> {
    resolve_collection_action_with_labels(
        &ActionLabels::default(),
        song_ids,
        download_states,
        downloaded_songs,
        show_when_empty,
    )
}

/// Bulk download action for a collection.
///
/// An empty collection yields `Download` only when `show_when_empty` is set.
/// Otherwise "all downloaded" beats "any queued or downloading", which beats
/// the default `Download`.
pub fn resolve_collection_action_with_labels<S: AsRef<str>>(
    labels: &ActionLabels,
    song_ids: &[S],
    download_states: &HashMap<String, DownloadState>,
    downloaded_songs: &[DownloadedSong],
    show_when_empty: bool,
) -> Option<CollectionDownloadMenu> {
    if song_ids.is_empty() {
        return show_when_empty
            .then(|| CollectionDownloadMenu::new(labels, CollectionDownloadAction::Download));
    }

    let downloaded = downloaded_ids(downloaded_songs);
    let all_downloaded = song_ids.iter().all(|id| downloaded.contains(id.as_ref()));
    let any_active = song_ids.iter().any(|id| {
        status_of(download_states, id.as_ref()).is_some_and(DownloadStatus::is_in_progress)
    });

    let action = if all_downloaded {
        CollectionDownloadAction::Remove
    } else if any_active {
        CollectionDownloadAction::Cancel
    } else {
        CollectionDownloadAction::Download
    };
    Some(CollectionDownloadMenu::new(labels, action))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    None,
    Completed,
    Downloading,
    NotDownloaded,
}

/// Classify an ad-hoc multi-selection.
///
/// A `Completed` status that has not reached the downloaded set yet counts
/// as in flight.
pub fn classify_selection<S: AsRef<str>>(
    selected_ids: &[S],
    download_states: &HashMap<String, DownloadState>,
    downloaded_songs: &[DownloadedSong],
) -> SelectionState {
    if selected_ids.is_empty() {
        return SelectionState::None;
    }

    let downloaded = downloaded_ids(downloaded_songs);
    if selected_ids.iter().all(|id| downloaded.contains(id.as_ref())) {
        return SelectionState::Completed;
    }

    let all_in_flight_or_done = selected_ids.iter().all(|id| {
        let id = id.as_ref();
        downloaded.contains(id)
            || matches!(
                status_of(download_states, id),
                Some(
                    DownloadStatus::Queued
                        | DownloadStatus::Downloading
                        | DownloadStatus::Completed
                )
            )
    });

    if all_in_flight_or_done {
        SelectionState::Downloading
    } else {
        SelectionState::NotDownloaded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibrarySelectionState {
    Downloaded,
    Downloading,
    NotDownloaded,
}

/// Library-screen selection state: any pending song marks the whole
/// selection as downloading
pub fn resolve_library_selection_state<S: AsRef<str>>(
    song_ids: &[S],
    download_states: &HashMap<String, DownloadState>,
    downloaded_songs: &[DownloadedSong],
) -> LibrarySelectionState {
    if song_ids.is_empty() {
        return LibrarySelectionState::NotDownloaded;
    }

    let downloaded = downloaded_ids(downloaded_songs);
    if song_ids.iter().all(|id| downloaded.contains(id.as_ref())) {
        return LibrarySelectionState::Downloaded;
    }

    let any_pending = song_ids.iter().any(|id| {
        status_of(download_states, id.as_ref()).is_some_and(DownloadStatus::is_pending)
    });

    if any_pending {
        LibrarySelectionState::Downloading
    } else {
        LibrarySelectionState::NotDownloaded
    }
}
