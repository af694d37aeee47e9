//! Listening history grouping
//!
//! Buckets playback events by calendar distance from `today` (UTC dates) and
//! keeps only the most recent play of each song within a bucket.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::core::types::{PlaybackEvent, Song};

/// Calendar-relative history bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "month", rename_all = "snake_case")]
pub enum DateBucket {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    /// Anchored at the first day of the month
    Month(NaiveDate),
}

impl DateBucket {
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        let this_monday = week_start(today);
        let last_monday = this_monday - Duration::days(7);
        match (today - date).num_days() {
            0 => DateBucket::Today,
            1 => DateBucket::Yesterday,
            _ if date >= this_monday => DateBucket::ThisWeek,
            _ if date >= last_monday => DateBucket::LastWeek,
            _ => DateBucket::Month(date.with_day(1).unwrap_or(date)),
        }
    }

    /// Display order: fixed buckets first, then months by days since anchor
    pub fn sort_key(&self, today: NaiveDate) -> i64 {
        match self {
            DateBucket::Today => 0,
            DateBucket::Yesterday => 1,
            DateBucket::ThisWeek => 2,
            DateBucket::LastWeek => 3,
            DateBucket::Month(anchor) => (today - *anchor).num_days(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            DateBucket::Today => "Today".to_string(),
            DateBucket::Yesterday => "Yesterday".to_string(),
            DateBucket::ThisWeek => "This week".to_string(),
            DateBucket::LastWeek => "Last week".to_string(),
            DateBucket::Month(anchor) => anchor.format("%B %Y").to_string(),
        }
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// A history entry: the play and the catalog song it resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryRow<'a> {
    pub event: &'a PlaybackEvent,
    pub song: &'a Song,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryGroup<'a> {
    pub bucket: DateBucket,
    pub rows: Vec<HistoryRow<'a>>,
}

fn matches_query(song: &Song, needle: &str) -> bool {
    song.title.to_lowercase().contains(needle)
        || song
            .artist_name
            .as_deref()
            .is_some_and(|artist| artist.to_lowercase().contains(needle))
}

/// Group events into ordered, per-song-deduplicated history buckets.
///
/// Events whose song is missing from `songs_by_id` are dropped. A blank
/// `query` disables filtering; otherwise the song title or artist name must
/// contain it, ignoring case.
pub fn group_history<'a>(
    events: &'a [PlaybackEvent],
    songs_by_id: &'a HashMap<String, Song>,
    today: NaiveDate,
    query: &str,
) -> Vec<HistoryGroup<'a>> {
    if events.is_empty() {
        return Vec::new();
    }

    let needle = query.trim().to_lowercase();
    let mut orphaned = 0usize;

    let mut rows: Vec<HistoryRow<'a>> = events
        .iter()
        .filter_map(|event| {
            let Some(song) = songs_by_id.get(&event.song_id) else {
                orphaned += 1;
                return None;
            };
            if !needle.is_empty() && !matches_query(song, &needle) {
                return None;
            }
            Some(HistoryRow { event, song })
        })
        .collect();

    if orphaned > 0 {
        debug!("history: dropped {orphaned} events with no catalog song");
    }

    // stable, so equal timestamps keep input order
    rows.sort_by(|a, b| b.event.timestamp.cmp(&a.event.timestamp));

    let mut groups: Vec<HistoryGroup<'a>> = Vec::new();
    let mut group_index: HashMap<DateBucket, usize> = HashMap::new();
    let mut seen: HashSet<(DateBucket, &'a str)> = HashSet::new();

    for row in rows {
        let bucket = DateBucket::classify(row.event.timestamp.date_naive(), today);
        if !seen.insert((bucket, row.song.id.as_str())) {
            continue;
        }
        let idx = *group_index.entry(bucket).or_insert_with(|| {
            groups.push(HistoryGroup {
                bucket,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].rows.push(row);
    }

    groups.sort_by_key(|g| g.bucket.sort_key(today));
    groups
}

/// Rows of one bucket, if present
pub fn rows_in<'g, 'a>(
    groups: &'g [HistoryGroup<'a>],
    bucket: DateBucket,
) -> Option<&'g [HistoryRow<'a>]> {
    groups
        .iter()
        .find(|g| g.bucket == bucket)
        .map(|g| g.rows.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(y: i32, m: u32, day: u32, h: u32) -> DateTime<Utc> {
        d(y, m, day).and_hms_opt(h, 0, 0).unwrap().and_utc()
    }

    fn catalog(songs: &[(&str, &str, &str)]) -> HashMap<String, Song> {
        songs
            .iter()
            .map(|&(id, title, artist)| (id.to_string(), Song::new(id, title).with_artist(artist)))
            .collect()
    }

    fn ids(rows: Option<&[HistoryRow<'_>]>) -> Vec<String> {
        rows.unwrap_or_default()
            .iter()
            .map(|r| r.song.id.clone())
            .collect()
    }

    // --- classify ---

    #[test]
    fn classify_relative_to_monday() {
        let today = d(2024, 6, 10); // Monday
        assert_eq!(DateBucket::classify(d(2024, 6, 10), today), DateBucket::Today);
        assert_eq!(DateBucket::classify(d(2024, 6, 9), today), DateBucket::Yesterday);
        assert_eq!(DateBucket::classify(d(2024, 6, 8), today), DateBucket::LastWeek);
        assert_eq!(DateBucket::classify(d(2024, 6, 3), today), DateBucket::LastWeek);
        assert_eq!(
            DateBucket::classify(d(2024, 6, 2), today),
            DateBucket::Month(d(2024, 6, 1))
        );
        assert_eq!(
            DateBucket::classify(d(2024, 5, 20), today),
            DateBucket::Month(d(2024, 5, 1))
        );
    }

    #[test]
    fn classify_midweek_uses_this_week() {
        let today = d(2026, 2, 11); // Wednesday
        assert_eq!(DateBucket::classify(d(2026, 2, 9), today), DateBucket::ThisWeek);
        assert_eq!(DateBucket::classify(d(2026, 2, 8), today), DateBucket::LastWeek);
        assert_eq!(DateBucket::classify(d(2026, 2, 2), today), DateBucket::LastWeek);
        assert_eq!(
            DateBucket::classify(d(2026, 2, 1), today),
            DateBucket::Month(d(2026, 2, 1))
        );
    }

    #[test]
    fn week_start_cross_year_boundary() {
        // 2025-01-01 is Wednesday, Monday is 2024-12-30
        assert_eq!(week_start(d(2025, 1, 1)), d(2024, 12, 30));
        assert_eq!(week_start(d(2025, 1, 6)), d(2025, 1, 6));
    }

    #[test]
    fn bucket_labels() {
        assert_eq!(DateBucket::Today.label(), "Today");
        assert_eq!(DateBucket::LastWeek.label(), "Last week");
        assert_eq!(DateBucket::Month(d(2024, 5, 1)).label(), "May 2024");
    }

    // --- group_history ---

    #[test]
    fn groups_by_bucket_and_removes_duplicates() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 10), 10),
            PlaybackEvent::new("s1", at(2026, 2, 11, 12), 10),
            PlaybackEvent::new("s2", at(2026, 2, 10, 9), 10),
            PlaybackEvent::new("s3", at(2026, 2, 9, 9), 10),
            PlaybackEvent::new("s4", at(2026, 2, 4, 9), 10),
            PlaybackEvent::new("s5", at(2026, 1, 1, 9), 10),
        ];
        let songs = catalog(&[
            ("s1", "One", "A"),
            ("s2", "Two", "B"),
            ("s3", "Three", "C"),
            ("s4", "Four", "D"),
            ("s5", "Five", "E"),
        ]);

        let groups = group_history(&events, &songs, today, "");

        let buckets: Vec<DateBucket> = groups.iter().map(|g| g.bucket).collect();
        assert_eq!(
            buckets,
            vec![
                DateBucket::Today,
                DateBucket::Yesterday,
                DateBucket::ThisWeek,
                DateBucket::LastWeek,
                DateBucket::Month(d(2026, 1, 1)),
            ]
        );
        assert_eq!(ids(rows_in(&groups, DateBucket::Today)), vec!["s1"]);
        assert_eq!(ids(rows_in(&groups, DateBucket::Yesterday)), vec!["s2"]);
        assert_eq!(ids(rows_in(&groups, DateBucket::ThisWeek)), vec!["s3"]);
        assert_eq!(ids(rows_in(&groups, DateBucket::LastWeek)), vec!["s4"]);
        assert_eq!(
            ids(rows_in(&groups, DateBucket::Month(d(2026, 1, 1)))),
            vec!["s5"]
        );
    }

    #[test]
    fn dedup_keeps_most_recent_play() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 8), 1),
            PlaybackEvent::new("s1", at(2026, 2, 11, 20), 2),
            PlaybackEvent::new("s1", at(2026, 2, 11, 14), 3),
        ];
        let songs = catalog(&[("s1", "One", "A")]);

        let groups = group_history(&events, &songs, today, "");
        let rows = rows_in(&groups, DateBucket::Today).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event.play_time_ms, 2);
    }

    #[test]
    fn same_song_may_appear_in_different_buckets() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 8), 1),
            PlaybackEvent::new("s1", at(2026, 2, 10, 8), 1),
        ];
        let songs = catalog(&[("s1", "One", "A")]);

        let groups = group_history(&events, &songs, today, "");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn rows_sorted_by_recency_within_bucket() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 8), 1),
            PlaybackEvent::new("s2", at(2026, 2, 11, 20), 1),
            PlaybackEvent::new("s3", at(2026, 2, 11, 14), 1),
        ];
        let songs = catalog(&[("s1", "One", "A"), ("s2", "Two", "B"), ("s3", "Three", "C")]);

        let groups = group_history(&events, &songs, today, "");
        assert_eq!(
            ids(rows_in(&groups, DateBucket::Today)),
            vec!["s2", "s3", "s1"]
        );
    }

    #[test]
    fn filters_by_query_case_insensitively() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 10), 10),
            PlaybackEvent::new("s2", at(2026, 2, 11, 11), 10),
        ];
        let songs = catalog(&[("s1", "Hello", "Artist A"), ("s2", "World", "Artist B")]);

        let groups = group_history(&events, &songs, today, "wor");
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(rows_in(&groups, DateBucket::Today)), vec!["s2"]);
    }

    #[test]
    fn query_matches_artist_name() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2026, 2, 11, 10), 10),
            PlaybackEvent::new("s2", at(2026, 2, 11, 11), 10),
        ];
        let songs = catalog(&[("s1", "Hello", "Artist A"), ("s2", "World", "Artist B")]);

        let groups = group_history(&events, &songs, today, "  ARTIST b ");
        assert_eq!(ids(rows_in(&groups, DateBucket::Today)), vec!["s2"]);
    }

    #[test]
    fn blank_query_keeps_everything() {
        let today = d(2026, 2, 11);
        let events = vec![PlaybackEvent::new("s1", at(2026, 2, 11, 10), 10)];
        let songs = catalog(&[("s1", "Hello", "Artist A")]);

        let groups = group_history(&events, &songs, today, "   ");
        assert_eq!(ids(rows_in(&groups, DateBucket::Today)), vec!["s1"]);
    }

    #[test]
    fn orphan_events_are_dropped() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("gone", at(2026, 2, 11, 10), 10),
            PlaybackEvent::new("s1", at(2026, 2, 10, 10), 10),
        ];
        let songs = catalog(&[("s1", "Hello", "Artist A")]);

        let groups = group_history(&events, &songs, today, "");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, DateBucket::Yesterday);
    }

    #[test]
    fn empty_events_yield_no_buckets() {
        let songs = catalog(&[("s1", "Hello", "Artist A")]);
        assert!(group_history(&[], &songs, d(2026, 2, 11), "").is_empty());
    }

    #[test]
    fn month_buckets_most_recent_first() {
        let today = d(2026, 2, 11);
        let events = vec![
            PlaybackEvent::new("s1", at(2025, 11, 3, 10), 10),
            PlaybackEvent::new("s2", at(2026, 1, 15, 10), 10),
            PlaybackEvent::new("s3", at(2025, 12, 24, 10), 10),
        ];
        let songs = catalog(&[("s1", "One", "A"), ("s2", "Two", "B"), ("s3", "Three", "C")]);

        let groups = group_history(&events, &songs, today, "");
        let buckets: Vec<DateBucket> = groups.iter().map(|g| g.bucket).collect();
        assert_eq!(
            buckets,
            vec![
                DateBucket::Month(d(2026, 1, 1)),
                DateBucket::Month(d(2025, 12, 1)),
                DateBucket::Month(d(2025, 11, 1)),
            ]
        );
    }
}
