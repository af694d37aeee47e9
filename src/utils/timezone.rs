//! Display timezone for event times
//!
//! Analytics always run on UTC dates; this only changes how a play's time is
//! printed in the history table.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use listenstats::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) enum Timezone {
    #[default]
    Utc,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Utc);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("utc")
            || trimmed.eq_ignore_ascii_case("z")
        {
            return Ok(Timezone::Utc);
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn format(self, utc: DateTime<Utc>, pattern: &str) -> String {
        match self {
            Timezone::Utc => utc.format(pattern).to_string(),
            Timezone::Named(tz) => utc.with_timezone(&tz).format(pattern).to_string(),
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::Named(tz) => tz.name(),
        }
    }
}
