//! Stats period resolution
//!
//! Maps a (mode, index) selection to the lower bound of a stats window.
//! Calendar modes step back whole weeks, months or years from `now`; the
//! continuous mode picks one of a fixed list of rolling windows.

use chrono::{DateTime, Datelike, Months, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::StatsWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    Weeks,
    Months,
    Years,
    Continuous,
}

/// Rolling windows offered in continuous mode, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingWindow {
    Week1,
    Month1,
    Month3,
    Month6,
    Year1,
    All,
}

impl RollingWindow {
    pub const ALL: [RollingWindow; 6] = [
        RollingWindow::Week1,
        RollingWindow::Month1,
        RollingWindow::Month3,
        RollingWindow::Month6,
        RollingWindow::Year1,
        RollingWindow::All,
    ];

    /// Out-of-range indices fall back to the first window
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(RollingWindow::Week1)
    }

    pub fn index(self) -> usize {
        match self {
            RollingWindow::Week1 => 0,
            RollingWindow::Month1 => 1,
            RollingWindow::Month3 => 2,
            RollingWindow::Month6 => 3,
            RollingWindow::Year1 => 4,
            RollingWindow::All => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RollingWindow::Week1 => "1 week",
            RollingWindow::Month1 => "1 month",
            RollingWindow::Month3 => "3 months",
            RollingWindow::Month6 => "6 months",
            RollingWindow::Year1 => "1 year",
            RollingWindow::All => "All",
        }
    }

    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let naive = now.naive_utc();
        let shifted = match self {
            RollingWindow::Week1 => sub_weeks(naive, 1),
            RollingWindow::Month1 => sub_months(naive, 1),
            RollingWindow::Month3 => sub_months(naive, 3),
            RollingWindow::Month6 => sub_months(naive, 6),
            RollingWindow::Year1 => sub_months(naive, 12),
            RollingWindow::All => return DateTime::<Utc>::UNIX_EPOCH,
        };
        saturate(shifted)
    }
}

/// A stats period selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "index")]
pub enum Period {
    Weeks(u32),
    Months(u32),
    Years(u32),
    Continuous(RollingWindow),
}

impl Period {
    pub fn new(mode: PeriodMode, index: u32) -> Self {
        match mode {
            PeriodMode::Weeks => Period::Weeks(index),
            PeriodMode::Months => Period::Months(index),
            PeriodMode::Years => Period::Years(index),
            PeriodMode::Continuous => {
                Period::Continuous(RollingWindow::from_index(index as usize))
            }
        }
    }

    pub fn mode(self) -> PeriodMode {
        match self {
            Period::Weeks(_) => PeriodMode::Weeks,
            Period::Months(_) => PeriodMode::Months,
            Period::Years(_) => PeriodMode::Years,
            Period::Continuous(_) => PeriodMode::Continuous,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Period::Weeks(n) | Period::Months(n) | Period::Years(n) => n,
            Period::Continuous(window) => window.index() as u32,
        }
    }

    /// Lower bound of the window; time of day is carried over from `now`
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let naive = now.naive_utc();
        let shifted = match self {
            // one extra day so the cutoff excludes this weekday a week ago
            Period::Weeks(n) => {
                sub_weeks(naive, n).and_then(|d| d.checked_sub_signed(TimeDelta::days(1)))
            }
            Period::Months(n) => naive.with_day(1).and_then(|d| sub_months(d, n)),
            Period::Years(n) => naive
                .with_day(1)
                .and_then(|d| d.with_month(1))
                .and_then(|d| n.checked_mul(12).and_then(|m| sub_months(d, m))),
            Period::Continuous(window) => return window.cutoff(now),
        };
        saturate(shifted)
    }

    /// `(from, to]` for this selection; a non-zero calendar index ends where
    /// the next more recent period begins
    pub fn window(self, now: DateTime<Utc>) -> StatsWindow {
        let from = self.cutoff(now);
        let to = match self {
            Period::Continuous(_) | Period::Weeks(0) | Period::Months(0) | Period::Years(0) => now,
            Period::Weeks(n) => Period::Weeks(n - 1).cutoff(now),
            Period::Months(n) => Period::Months(n - 1).cutoff(now),
            Period::Years(n) => Period::Years(n - 1).cutoff(now),
        };
        StatsWindow::new(from, to)
    }

    pub fn label(self) -> String {
        match self {
            Period::Weeks(0) => "This week".to_string(),
            Period::Months(0) => "This month".to_string(),
            Period::Years(0) => "This year".to_string(),
            Period::Weeks(n) => format!("{n} week(s) ago"),
            Period::Months(n) => format!("{n} month(s) ago"),
            Period::Years(n) => format!("{n} year(s) ago"),
            Period::Continuous(window) => window.label().to_string(),
        }
    }
}

fn sub_weeks(dt: NaiveDateTime, weeks: u32) -> Option<NaiveDateTime> {
    TimeDelta::try_weeks(i64::from(weeks)).and_then(|delta| dt.checked_sub_signed(delta))
}

fn sub_months(dt: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    dt.checked_sub_months(Months::new(months))
}

/// Out-of-range arithmetic means "no lower bound"
fn saturate(shifted: Option<NaiveDateTime>) -> DateTime<Utc> {
    shifted
        .map(|d| d.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Cutoff instant for a (mode, index) selection
pub fn resolve_cutoff(mode: PeriodMode, index: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    Period::new(mode, index).cutoff(now)
}

/// Stats window for a (mode, index) selection
pub fn resolve_window(mode: PeriodMode, index: u32, now: DateTime<Utc>) -> StatsWindow {
    Period::new(mode, index).window(now)
}
