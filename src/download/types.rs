//! Download data model
//!
//! `DownloadState` is the live record the download subsystem keeps per song;
//! `DownloadedSong` is the persisted on-disk result. A song can have either,
//! both, or neither.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Queued,
    Downloading,
    Paused,
    Failed,
    Cancelled,
    Completed,
}

impl DownloadStatus {
    /// Queued or transferring
    pub fn is_in_progress(self) -> bool {
        matches!(self, DownloadStatus::Queued | DownloadStatus::Downloading)
    }

    /// Still owned by the download queue, including paused entries
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            DownloadStatus::Queued | DownloadStatus::Downloading | DownloadStatus::Paused
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadState {
    pub song_id: String,
    pub status: DownloadStatus,
    #[serde(default)]
    pub downloaded_bytes: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

const MIB: f64 = 1024.0 * 1024.0;

impl DownloadState {
    pub fn new(song_id: impl Into<String>, status: DownloadStatus) -> Self {
        DownloadState {
            song_id: song_id.into(),
            status,
            downloaded_bytes: 0,
            total_bytes: 0,
            title: String::new(),
            artist: String::new(),
            thumbnail_url: None,
            error_message: None,
        }
    }

    /// Fraction complete in `[0, 1]`; zero while the size is unknown
    pub fn progress(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.downloaded_bytes as f64 / self.total_bytes as f64).clamp(0.0, 1.0)
    }

    pub fn status_text(&self) -> String {
        match self.status {
            DownloadStatus::Queued => "Queued...".to_string(),
            DownloadStatus::Downloading => {
                let done = self.downloaded_bytes as f64 / MIB;
                if self.total_bytes > 0 {
                    format!(
                        "{:.1} / {:.1} MB ({:.0}%)",
                        done,
                        self.total_bytes as f64 / MIB,
                        self.progress() * 100.0
                    )
                } else {
                    format!("{done:.1} MB downloaded")
                }
            }
            DownloadStatus::Paused => "Paused".to_string(),
            DownloadStatus::Failed => match &self.error_message {
                Some(msg) => format!("Failed: {msg}"),
                None => "Failed".to_string(),
            },
            DownloadStatus::Cancelled => "Cancelled".to_string(),
            DownloadStatus::Completed => "Completed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedSong {
    pub song_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub file_size: u64,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u32,
}

impl DownloadedSong {
    pub fn new(song_id: impl Into<String>) -> Self {
        DownloadedSong {
            song_id: song_id.into(),
            title: String::new(),
            artist: String::new(),
            thumbnail_url: None,
            file_size: 0,
            duration: 0,
        }
    }
}

pub(crate) fn downloaded_ids(downloaded: &[DownloadedSong]) -> HashSet<&str> {
    downloaded.iter().map(|d| d.song_id.as_str()).collect()
}

pub(crate) fn status_of(
    states: &HashMap<String, DownloadState>,
    song_id: &str,
) -> Option<DownloadStatus> {
    states.get(song_id).map(|s| s.status)
}

/// Pending and failed downloads, as listed on the downloads screen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadOverview<'a> {
    pub active: Vec<&'a DownloadState>,
    pub failed: Vec<&'a DownloadState>,
    pub active_downloaded_bytes: u64,
    pub active_total_bytes: u64,
}

impl<'a> DownloadOverview<'a> {
    pub fn from_states(states: &'a HashMap<String, DownloadState>) -> Self {
        let mut overview = DownloadOverview::default();
        for state in states.values() {
            if state.status.is_pending() {
                overview.active_downloaded_bytes = overview
                    .active_downloaded_bytes
                    .saturating_add(state.downloaded_bytes);
                overview.active_total_bytes =
                    overview.active_total_bytes.saturating_add(state.total_bytes);
                overview.active.push(state);
            } else if state.status == DownloadStatus::Failed {
                overview.failed.push(state);
            }
        }
        overview.active.sort_by(|a, b| a.song_id.cmp(&b.song_id));
        overview.failed.sort_by(|a, b| a.song_id.cmp(&b.song_id));
        overview
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.failed.is_empty()
    }
}
