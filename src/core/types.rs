//! Core data types shared by the history grouper and the stats aggregator
//!
//! Catalog entities are snapshots handed in by the caller; nothing here is
//! mutated after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded play of a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    pub song_id: String,
    /// UTC instant the play was recorded
    pub timestamp: DateTime<Utc>,
    /// Milliseconds actually listened
    #[serde(default)]
    pub play_time_ms: u64,
}

impl PlaybackEvent {
    pub fn new(song_id: impl Into<String>, timestamp: DateTime<Utc>, play_time_ms: u64) -> Self {
        PlaybackEvent {
            song_id: song_id.into(),
            timestamp,
            play_time_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Song {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Song {
            id: id.into(),
            title: title.into(),
            artist_name: None,
            album_id: None,
            album_name: None,
            duration: None,
            thumbnail_url: None,
        }
    }

    pub fn with_artist(mut self, artist_name: impl Into<String>) -> Self {
        self.artist_name = Some(artist_name.into());
        self
    }

    pub fn with_album(mut self, album_id: impl Into<String>) -> Self {
        self.album_id = Some(album_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Artist {
            id: id.into(),
            name: name.into(),
            thumbnail_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Album {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Album {
            id: id.into(),
            title: title.into(),
            year: None,
            thumbnail_url: None,
        }
    }
}

/// Song-to-artist credit; `position == 0` is the primary artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtistMap {
    pub song_id: String,
    pub artist_id: String,
    #[serde(default)]
    pub position: u32,
}

impl SongArtistMap {
    pub fn new(song_id: impl Into<String>, artist_id: impl Into<String>, position: u32) -> Self {
        SongArtistMap {
            song_id: song_id.into(),
            artist_id: artist_id.into(),
            position,
        }
    }
}

/// Play count and listening time accumulated for one key
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTotals {
    pub play_count: u64,
    pub time_listened_ms: u64,
}

impl PlayTotals {
    pub fn add_play(&mut self, play_time_ms: u64) {
        self.play_count += 1;
        self.time_listened_ms = self.time_listened_ms.saturating_add(play_time_ms);
    }

    pub fn add(&mut self, other: &PlayTotals) {
        self.play_count += other.play_count;
        self.time_listened_ms = self.time_listened_ms.saturating_add(other.time_listened_ms);
    }
}

/// Half-open stats window `(from, to]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl StatsWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        StatsWindow { from, to }
    }

    /// Excludes `from`, includes `to`
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp > self.from && timestamp <= self.to
    }
}

/// One ranked stats row for a song, artist or album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow<E> {
    pub entity: E,
    pub play_count: u64,
    pub time_listened_ms: u64,
}

pub type SongStats = StatsRow<Song>;
pub type ArtistStats = StatsRow<Artist>;
pub type AlbumStats = StatsRow<Album>;

/// Aggregation result with diagnostics for dropped events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport<E> {
    pub rows: Vec<StatsRow<E>>,
    /// In-window events that contributed to a row
    pub valid: u64,
    /// In-window events dropped because a lookup failed
    pub skipped: u64,
}

impl<E> StatsReport<E> {
    pub fn total(&self) -> PlayTotals {
        let mut totals = PlayTotals::default();
        for row in &self.rows {
            totals.add(&PlayTotals {
                play_count: row.play_count,
                time_listened_ms: row.time_listened_ms,
            });
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    // --- PlayTotals ---

    #[test]
    fn play_totals_default_all_zero() {
        let t = PlayTotals::default();
        assert_eq!(t.play_count, 0);
        assert_eq!(t.time_listened_ms, 0);
    }

    #[test]
    fn play_totals_add_play_counts_once_per_event() {
        let mut t = PlayTotals::default();
        t.add_play(1_000);
        t.add_play(0);
        assert_eq!(t.play_count, 2);
        assert_eq!(t.time_listened_ms, 1_000);
    }

    #[test]
    fn play_totals_add_accumulates() {
        let mut a = PlayTotals {
            play_count: 1,
            time_listened_ms: 10,
        };
        a.add(&PlayTotals {
            play_count: 3,
            time_listened_ms: 20,
        });
        assert_eq!(a.play_count, 4);
        assert_eq!(a.time_listened_ms, 30);
    }

    #[test]
    fn play_totals_saturate_instead_of_overflowing() {
        let mut t = PlayTotals {
            play_count: 0,
            time_listened_ms: u64::MAX - 1,
        };
        t.add_play(10);
        assert_eq!(t.time_listened_ms, u64::MAX);
    }

    // --- StatsWindow ---

    #[test]
    fn window_excludes_start() {
        let w = StatsWindow::new(at(50), at(250));
        assert!(!w.contains(at(50)));
        assert!(w.contains(at(51)));
    }

    #[test]
    fn window_includes_end() {
        let w = StatsWindow::new(at(50), at(250));
        assert!(w.contains(at(250)));
        assert!(!w.contains(at(251)));
    }

    #[test]
    fn empty_window_contains_nothing() {
        let w = StatsWindow::new(at(100), at(100));
        assert!(!w.contains(at(100)));
    }

    // --- serde ---

    #[test]
    fn song_deserializes_with_optional_fields_missing() {
        let song: Song = serde_json::from_str(r#"{"id":"s1","title":"One"}"#).unwrap();
        assert_eq!(song, Song::new("s1", "One"));
    }

    #[test]
    fn event_deserializes_rfc3339_timestamp() {
        let event: PlaybackEvent = serde_json::from_str(
            r#"{"song_id":"s1","timestamp":"2024-06-10T08:30:00Z","play_time_ms":1200}"#,
        )
        .unwrap();
        assert_eq!(event.song_id, "s1");
        assert_eq!(event.play_time_ms, 1200);
        assert_eq!(event.timestamp.timestamp(), 1_718_008_200);
    }

    #[test]
    fn song_artist_map_position_defaults_to_primary() {
        let map: SongArtistMap =
            serde_json::from_str(r#"{"song_id":"s1","artist_id":"a1"}"#).unwrap();
        assert_eq!(map.position, 0);
    }

    #[test]
    fn report_total_sums_rows() {
        let report = StatsReport {
            rows: vec![
                StatsRow {
                    entity: (),
                    play_count: 2,
                    time_listened_ms: 8_000,
                },
                StatsRow {
                    entity: (),
                    play_count: 1,
                    time_listened_ms: 10_000,
                },
            ],
            valid: 3,
            skipped: 0,
        };
        let total = report.total();
        assert_eq!(total.play_count, 3);
        assert_eq!(total.time_listened_ms, 18_000);
    }
}
