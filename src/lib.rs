//! Client-side core of a small profile app.
//!
//! The pure half turns a birthday into a zodiac sign and a loosely-typed API
//! payload into a [`ProfileRecord`], then formats the record for display.
//! The stateful half ([`Session`], [`ProfileEditor`]) keeps the bearer token in
//! an injected [`TokenStore`] and drives an external [`ProfileApi`], refusing
//! login and registration forms that fail the client-side checks.

mod api;
mod config;
mod consts;
mod format;
mod interests;
mod prelude;
mod profile;
mod session;
mod types;
mod validation;
mod zodiac;

pub use api::{ApiError, Endpoint, ProfileApi, ProfileEditor, SaveMode, unwrap_envelope};
pub use config::ClientConfig;
pub use consts::*;
pub use format::{ProfileSummary, format_age, format_birthday, format_height, format_weight};
pub use interests::Interests;
pub use profile::{Gender, HeightUnit, ProfileRecord, normalize};
pub use session::{
    AuthResponse, LoginRequest, MemoryTokenStore, RegisterRequest, Session, TokenStore, User,
};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};
pub use validation::{
    PasswordChecks, PasswordStrength, RegistrationForm, ValidationError, check_login,
    is_valid_email,
};
pub use zodiac::{SignRange, ZodiacSign, creature_glyph, resolve};

use crate::prelude::*;
use std::str::FromStr;

/// A concrete calendar date with no time or zone attached.
///
/// Birthdays and "today" are both carried as `CalendarDate`, so nothing in
/// the crate depends on the runtime locale or timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{}", year, month, day)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidMonthDay { month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date from already-validated components
    pub const fn new(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Builds a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the first component that is out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Returns the year value as u16
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month value as u8
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day value as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the validated month
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the validated day
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// The (month, day) pair, ignoring the year.
    pub const fn month_day(&self) -> (u8, u8) {
        (self.month.get(), self.day.get())
    }

    /// Whole years elapsed from `self` to `today`, counting a year only once
    /// its anniversary has been reached. Negative when `today` precedes `self`.
    pub fn whole_years_until(&self, today: &Self) -> i32 {
        let years = i32::from(today.year()) - i32::from(self.year());
        if today.month_day() < self.month_day() {
            years - 1
        } else {
            years
        }
    }

    fn parse_component<T: FromStr>(part: &str, whole: &str) -> Result<T, DateError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(whole.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| DateError::InvalidFormat(whole.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses `YYYY-MM-DD`, optionally followed by a `T...` time part which is
    /// dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let date_part = trimmed
            .split_once(TIME_SEPARATOR)
            .map_or(trimmed, |(date, _time)| date);

        let parts: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "Expected YYYY-MM-DD, found {} {} separators in {trimmed}",
                parts.len() - 1,
                DATE_SEPARATOR
            )));
        };

        Self::from_ymd(
            Self::parse_component(year, trimmed)?,
            Self::parse_component(month, trimmed)?,
            Self::parse_component(day, trimmed)?,
        )
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = DateError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_ymd(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
