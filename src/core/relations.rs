//! Song-to-artist credit lookups
//!
//! Credits are ordered by `position`, then by `artist_id` so that duplicated
//! or gapped positions from a bad catalog sync still resolve deterministically.

use std::collections::HashMap;

use crate::core::types::SongArtistMap;

fn credit_order(a: &SongArtistMap, b: &SongArtistMap) -> std::cmp::Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| a.artist_id.cmp(&b.artist_id))
}

/// All artists credited on a song, primary first
pub fn artist_ids_for_song<'a>(song_id: &str, maps: &'a [SongArtistMap]) -> Vec<&'a str> {
    let mut credits: Vec<&SongArtistMap> = maps.iter().filter(|m| m.song_id == song_id).collect();
    credits.sort_by(|a, b| credit_order(a, b));
    credits.into_iter().map(|m| m.artist_id.as_str()).collect()
}

/// Lowest-position artist credited on a song
pub fn primary_artist_id<'a>(song_id: &str, maps: &'a [SongArtistMap]) -> Option<&'a str> {
    maps.iter()
        .filter(|m| m.song_id == song_id)
        .min_by(|a, b| credit_order(a, b))
        .map(|m| m.artist_id.as_str())
}

/// Primary artist per song, built once per aggregation pass
#[derive(Debug, Default)]
pub(crate) struct PrimaryArtistIndex<'a> {
    by_song: HashMap<&'a str, &'a SongArtistMap>,
}

impl<'a> PrimaryArtistIndex<'a> {
    pub(crate) fn build(maps: &'a [SongArtistMap]) -> Self {
        let mut by_song: HashMap<&'a str, &'a SongArtistMap> = HashMap::new();
        for map in maps {
            match by_song.get_mut(map.song_id.as_str()) {
                Some(best) => {
                    if credit_order(map, *best).is_lt() {
                        *best = map;
                    }
                }
                None => {
                    by_song.insert(map.song_id.as_str(), map);
                }
            }
        }
        PrimaryArtistIndex { by_song }
    }

    pub(crate) fn get(&self, song_id: &str) -> Option<&'a str> {
        self.by_song.get(song_id).map(|m| m.artist_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_artist_uses_first_position() {
        let maps = vec![
            SongArtistMap::new("s1", "a2", 1),
            SongArtistMap::new("s1", "a1", 0),
        ];
        assert_eq!(primary_artist_id("s1", &maps), Some("a1"));
    }

    #[test]
    fn primary_artist_missing_returns_none() {
        let maps = vec![SongArtistMap::new("s2", "a1", 0)];
        assert_eq!(primary_artist_id("s1", &maps), None);
    }

    #[test]
    fn primary_artist_falls_back_to_lowest_position_when_zero_missing() {
        let maps = vec![
            SongArtistMap::new("s1", "a3", 3),
            SongArtistMap::new("s1", "a2", 2),
        ];
        assert_eq!(primary_artist_id("s1", &maps), Some("a2"));
    }

    #[test]
    fn duplicate_primary_positions_break_ties_by_artist_id() {
        let maps = vec![
            SongArtistMap::new("s1", "zed", 0),
            SongArtistMap::new("s1", "abe", 0),
        ];
        assert_eq!(primary_artist_id("s1", &maps), Some("abe"));

        let reversed: Vec<_> = maps.into_iter().rev().collect();
        assert_eq!(primary_artist_id("s1", &reversed), Some("abe"));
    }

    #[test]
    fn artist_ids_ordered_by_position() {
        let maps = vec![
            SongArtistMap::new("s1", "a3", 2),
            SongArtistMap::new("s1", "a1", 0),
            SongArtistMap::new("s2", "a9", 0),
            SongArtistMap::new("s1", "a2", 1),
        ];
        assert_eq!(artist_ids_for_song("s1", &maps), vec!["a1", "a2", "a3"]);
        assert!(artist_ids_for_song("s3", &maps).is_empty());
    }

    #[test]
    fn index_agrees_with_linear_lookup() {
        let maps = vec![
            SongArtistMap::new("s1", "a2", 1),
            SongArtistMap::new("s2", "b1", 0),
            SongArtistMap::new("s1", "a1", 0),
            SongArtistMap::new("s1", "a0", 0),
        ];
        let index = PrimaryArtistIndex::build(&maps);
        for song in ["s1", "s2", "s3"] {
            assert_eq!(index.get(song), primary_artist_id(song, &maps));
        }
    }
}
