//! Core module - listening analytics over immutable library snapshots
//!
//! Nothing here performs I/O or reads the clock; callers pass `now`/`today`.

mod aggregator;
mod history;
mod period;
mod relations;
mod types;

pub use aggregator::{
    album_stats_report, artist_stats_report, compute_album_stats, compute_artist_stats,
    compute_song_stats, song_stats_report,
};
pub use history::{DateBucket, HistoryGroup, HistoryRow, group_history, rows_in};
pub use period::{Period, PeriodMode, RollingWindow, resolve_cutoff, resolve_window};
pub use relations::{artist_ids_for_song, primary_artist_id};
pub use types::{
    Album, AlbumStats, Artist, ArtistStats, PlayTotals, PlaybackEvent, Song, SongArtistMap,
    SongStats, StatsReport, StatsRow, StatsWindow,
};
