//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigPeriodMode};
use listenstats::core::PeriodMode;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub(crate) enum ModeArg {
    /// Calendar weeks back from today
    Weeks,
    /// Calendar months, anchored on the 1st
    Months,
    /// Calendar years, anchored on January 1st
    Years,
    /// Rolling windows: 1 week, 1/3/6 months, 1 year, all time
    Continuous,
}

impl From<ModeArg> for PeriodMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Weeks => PeriodMode::Weeks,
            ModeArg::Months => PeriodMode::Months,
            ModeArg::Years => PeriodMode::Years,
            ModeArg::Continuous => PeriodMode::Continuous,
        }
    }
}

impl From<ConfigPeriodMode> for ModeArg {
    fn from(mode: ConfigPeriodMode) -> Self {
        match mode {
            ConfigPeriodMode::Weeks => ModeArg::Weeks,
            ConfigPeriodMode::Months => ModeArg::Months,
            ConfigPeriodMode::Years => ModeArg::Years,
            ConfigPeriodMode::Continuous => ModeArg::Continuous,
        }
    }
}

#[derive(Parser)]
#[command(name = "listenstats")]
#[command(about = "Listening history and play statistics from a music library snapshot", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Library snapshot (JSON)
    #[arg(long, global = true, env = "LISTENSTATS_SNAPSHOT", value_name = "PATH")]
    pub(crate) snapshot: Option<String>,

    /// Reference instant (RFC 3339 or YYYY-MM-DD, default: now)
    #[arg(long, global = true, value_name = "INSTANT")]
    pub(crate) now: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Timezone for displaying play times (e.g., "Europe/Madrid", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Maximum rows in stats tables
    #[arg(short = 'n', long, global = true, value_name = "N")]
    pub(crate) limit: Option<usize>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if self.snapshot.is_none() {
            self.snapshot = config.snapshot.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.limit.is_none() {
            self.limit = config.limit;
        }

        if let Some(mode) = config.mode {
            self.command.apply_default_mode(mode.into());
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::PeriodArgs;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["listenstats"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["songs", "--json", "--snapshot", "lib.json", "--limit", "5"]);
        assert!(cli.json);
        assert_eq!(cli.snapshot.as_deref(), Some("lib.json"));
        assert_eq!(cli.limit, Some(5));
    }

    #[test]
    fn no_color_overrides_always() {
        let cli = parse(&["downloads", "--color", "always", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn config_fills_unset_values_only() {
        let config = Config {
            snapshot: Some("from-config.json".to_string()),
            timezone: Some("Asia/Tokyo".to_string()),
            limit: Some(10),
            debug: true,
            ..Config::default()
        };
        let cli = parse(&["history", "--snapshot", "cli.json"]).with_config(&config);
        assert_eq!(cli.snapshot.as_deref(), Some("cli.json"));
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(cli.limit, Some(10));
        assert!(cli.debug);
    }

    #[test]
    fn config_mode_applies_when_flag_absent() {
        let config = Config {
            mode: Some(ConfigPeriodMode::Years),
            ..Config::default()
        };
        let cli = parse(&["artists"]).with_config(&config);
        match cli.command {
            Commands::Artists(PeriodArgs { mode, .. }) => {
                assert_eq!(mode, Some(ModeArg::Years));
            }
            _ => panic!("expected artists command"),
        }
    }

    #[test]
    fn explicit_mode_beats_config() {
        let config = Config {
            mode: Some(ConfigPeriodMode::Years),
            ..Config::default()
        };
        let cli = parse(&["albums", "--mode", "weeks"]).with_config(&config);
        match cli.command {
            Commands::Albums(args) => {
                assert_eq!(args.period(), listenstats::core::Period::Weeks(0))
            }
            _ => panic!("expected albums command"),
        }
    }
}
