//! Listening analytics and collection download-state reconciliation.
//!
//! Core modules:
//! - [`core`] - period resolution, history grouping and play statistics
//! - [`download`] - download data model and bulk-action resolution
//!
//! Supporting modules:
//! - [`snapshot`] - JSON library snapshots feeding the core
//! - [`error`] - error types for the snapshot loader and the binary
//!
//! Every function in [`core`] and [`download`] is a pure transform over
//! immutable inputs. The current time is always an explicit argument.
//!
//! ```
//! use chrono::DateTime;
//! use listenstats::core::{PlaybackEvent, Song, StatsWindow, compute_song_stats};
//! use std::collections::HashMap;
//!
//! let at = |ms| DateTime::from_timestamp_millis(ms).unwrap();
//! let songs: HashMap<String, Song> = [Song::new("a", "Alpha"), Song::new("b", "Beta")]
//!     .into_iter()
//!     .map(|s| (s.id.clone(), s))
//!     .collect();
//! let events = vec![
//!     PlaybackEvent::new("a", at(100), 5_000),
//!     PlaybackEvent::new("a", at(200), 3_000),
//!     PlaybackEvent::new("b", at(150), 10_000),
//! ];
//!
//! let rows = compute_song_stats(&events, &songs, StatsWindow::new(at(50), at(250)));
//! assert_eq!(rows[0].entity.id, "b");
//! assert_eq!(rows[1].play_count, 2);
//! ```

pub mod core;
pub mod download;
pub mod error;
pub mod snapshot;
