//! CLI subcommand definitions

use clap::{Args, Subcommand};

use listenstats::core::{Period, PeriodMode};

use super::args::ModeArg;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show listening history grouped by day, week and month
    History {
        /// Keep plays whose title or artist contains this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Date treated as "today" (default: UTC date of --now)
        #[arg(long, value_name = "DATE")]
        today: Option<String>,
    },
    /// Rank songs by listening time
    Songs(PeriodArgs),
    /// Rank artists by listening time
    Artists(PeriodArgs),
    /// Rank albums by listening time
    Albums(PeriodArgs),
    /// Resolve the bulk download action for an album or playlist
    Collection {
        /// Song ids in the collection
        #[arg(value_name = "SONG_ID")]
        ids: Vec<String>,
        /// Still offer "Download" for an empty collection
        #[arg(long)]
        show_when_empty: bool,
    },
    /// Classify the download state of a set of selected songs
    Selection {
        /// Selected song ids
        #[arg(value_name = "SONG_ID")]
        ids: Vec<String>,
        /// Use the library screen's three-way state
        #[arg(long)]
        library: bool,
    },
    /// Show active and failed downloads
    Downloads,
}

impl Commands {
    /// Fill the period mode from config when the flag was not given
    pub(crate) fn apply_default_mode(&mut self, mode: ModeArg) {
        if let Commands::Songs(args) | Commands::Artists(args) | Commands::Albums(args) = self
            && args.mode.is_none()
        {
            args.mode = Some(mode);
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct PeriodArgs {
    /// Period mode (default: weeks)
    #[arg(short, long, value_enum)]
    pub(crate) mode: Option<ModeArg>,

    /// Periods back from now; in continuous mode, the rolling window index
    #[arg(short, long, default_value_t = 0)]
    pub(crate) index: u32,
}

impl PeriodArgs {
    pub(crate) fn period(&self) -> Period {
        let mode = self.mode.map_or(PeriodMode::Weeks, PeriodMode::from);
        Period::new(mode, self.index)
    }
}
