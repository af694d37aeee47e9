//! Play statistics per song, artist and album
//!
//! All three views share one pass: filter events to the `(from, to]` window,
//! resolve a grouping key, accumulate count and listening time per key, then
//! rank by listening time. Keys first seen earlier win ties.

use log::debug;
use std::collections::HashMap;

use crate::core::relations::PrimaryArtistIndex;
use crate::core::types::{
    Album, AlbumStats, Artist, ArtistStats, PlayTotals, PlaybackEvent, Song, SongArtistMap,
    SongStats, StatsReport, StatsRow, StatsWindow,
};

/// Per-key totals in first-seen order
#[derive(Debug, Default)]
struct TotalsAccumulator<'a> {
    keys: Vec<&'a str>,
    totals: HashMap<&'a str, PlayTotals>,
}

impl<'a> TotalsAccumulator<'a> {
    fn add(&mut self, key: &'a str, play_time_ms: u64) {
        self.totals
            .entry(key)
            .or_insert_with(|| {
                self.keys.push(key);
                PlayTotals::default()
            })
            .add_play(play_time_ms);
    }

    /// Resolve each key to its entity; unresolved keys are returned as a
    /// dropped play count
    fn into_rows<E>(self, resolve: impl Fn(&str) -> Option<E>) -> (Vec<StatsRow<E>>, u64) {
        let mut rows = Vec::with_capacity(self.keys.len());
        let mut dropped = 0u64;

        for key in self.keys {
            let totals = self.totals.get(key).copied().unwrap_or_default();
            match resolve(key) {
                Some(entity) => rows.push(StatsRow {
                    entity,
                    play_count: totals.play_count,
                    time_listened_ms: totals.time_listened_ms,
                }),
                None => dropped += totals.play_count,
            }
        }

        // sort_by is stable: equal times keep first-seen order
        rows.sort_by(|a, b| b.time_listened_ms.cmp(&a.time_listened_ms));
        (rows, dropped)
    }
}

fn aggregate<'a, E>(
    view: &str,
    events: &'a [PlaybackEvent],
    window: StatsWindow,
    key_of: impl Fn(&'a PlaybackEvent) -> Option<&'a str>,
    resolve: impl Fn(&str) -> Option<E>,
) -> StatsReport<E> {
    let mut acc = TotalsAccumulator::default();
    let mut skipped = 0u64;

    for event in events {
        if !window.contains(event.timestamp) {
            continue;
        }
        match key_of(event) {
            Some(key) => acc.add(key, event.play_time_ms),
            None => skipped += 1,
        }
    }

    let (rows, dropped) = acc.into_rows(resolve);
    skipped += dropped;
    let valid = rows.iter().map(|r| r.play_count).sum();

    if skipped > 0 {
        debug!("{view} stats: dropped {skipped} in-window events with unresolved catalog entries");
    }

    StatsReport {
        rows,
        valid,
        skipped,
    }
}

pub fn song_stats_report<'a>(
    events: &'a [PlaybackEvent],
    songs_by_id: &'a HashMap<String, Song>,
    window: StatsWindow,
) -> StatsReport<Song> {
    aggregate(
        "song",
        events,
        window,
        |event| {
            songs_by_id
                .contains_key(&event.song_id)
                .then_some(event.song_id.as_str())
        },
        |id| songs_by_id.get(id).cloned(),
    )
}

/// Artist stats keyed by each song's primary artist; songs sharing a primary
/// artist pool together
pub fn artist_stats_report<'a>(
    events: &'a [PlaybackEvent],
    songs_by_id: &'a HashMap<String, Song>,
    song_artist_maps: &'a [SongArtistMap],
    artists_by_id: &HashMap<String, Artist>,
    window: StatsWindow,
) -> StatsReport<Artist> {
    let primary = PrimaryArtistIndex::build(song_artist_maps);
    aggregate(
        "artist",
        events,
        window,
        |event| {
            songs_by_id
                .get(&event.song_id)
                .and_then(|song| primary.get(&song.id))
        },
        |id| artists_by_id.get(id).cloned(),
    )
}

pub fn album_stats_report<'a>(
    events: &'a [PlaybackEvent],
    songs_by_id: &'a HashMap<String, Song>,
    albums_by_id: &HashMap<String, Album>,
    window: StatsWindow,
) -> StatsReport<Album> {
    aggregate(
        "album",
        events,
        window,
        |event| {
            songs_by_id
                .get(&event.song_id)
                .and_then(|song| song.album_id.as_deref())
        },
        |id| albums_by_id.get(id).cloned(),
    )
}

/// Songs ranked by listening time within `window`
pub fn compute_song_stats(
    events: &[PlaybackEvent],
    songs_by_id: &HashMap<String, Song>,
    window: StatsWindow,
) -> Vec<SongStats> {
    song_stats_report(events, songs_by_id, window).rows
}

/// Primary artists ranked by listening time within `window`
pub fn compute_artist_stats(
    events: &[PlaybackEvent],
    songs_by_id: &HashMap<String, Song>,
    song_artist_maps: &[SongArtistMap],
    artists_by_id: &HashMap<String, Artist>,
    window: StatsWindow,
) -> Vec<ArtistStats> {
    artist_stats_report(events, songs_by_id, song_artist_maps, artists_by_id, window).rows
}

/// Albums ranked by listening time within `window`
pub fn compute_album_stats(
    events: &[PlaybackEvent],
    songs_by_id: &HashMap<String, Song>,
    albums_by_id: &HashMap<String, Album>,
    window: StatsWindow,
) -> Vec<AlbumStats> {
    album_stats_report(events, songs_by_id, albums_by_id, window).rows
}
