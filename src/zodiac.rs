use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, Day, Month, prelude::*};

/// Inclusive (month, day) span of one sign, independent of the year.
///
/// A span whose start month is later than its end month wraps the year
/// boundary (Capricorn runs Dec 22 to Jan 19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{:02}-{:02}/{:02}-{:02}",
    start_month,
    start_day,
    end_month,
    end_day
)]
pub struct SignRange {
    start_month: u8,
    start_day: u8,
    end_month: u8,
    end_day: u8,
}

impl SignRange {
    const fn new(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Self {
        Self {
            start_month,
            start_day,
            end_month,
            end_day,
        }
    }

    /// Returns the first (month, day) of the span
    pub const fn start(&self) -> (u8, u8) {
        (self.start_month, self.start_day)
    }

    /// Returns the last (month, day) of the span
    pub const fn end(&self) -> (u8, u8) {
        (self.end_month, self.end_day)
    }

    pub const fn wraps_year(&self) -> bool {
        self.start_month > self.end_month
    }

    /// Every span covers the tail of its start month and the head of the
    /// following month, so checking the two boundary months is enough for
    /// wrapping and non-wrapping spans alike.
    pub const fn contains(&self, month: u8, day: u8) -> bool {
        (month == self.start_month && day >= self.start_day)
            || (month == self.end_month && day <= self.end_day)
    }
}

/// The twelve western zodiac signs, in calendar order starting at Aries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Resolution order. The first sign whose range matches wins.
    pub const ALL: [Self; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// The sign's symbolic animal or figure.
    pub const fn creature(self) -> &'static str {
        match self {
            Self::Aries => "Ram",
            Self::Taurus => "Bull",
            Self::Gemini => "Twins",
            Self::Cancer => "Crab",
            Self::Leo => "Lion",
            Self::Virgo => "Virgin",
            Self::Libra => "Balance",
            Self::Scorpio => "Scorpion",
            Self::Sagittarius => "Archer",
            Self::Capricorn => "Goat",
            Self::Aquarius => "Water Bearer",
            Self::Pisces => "Fish",
        }
    }

    /// Astrological symbol.
    pub const fn glyph(self) -> char {
        match self {
            Self::Aries => '♈',
            Self::Taurus => '♉',
            Self::Gemini => '♊',
            Self::Cancer => '♋',
            Self::Leo => '♌',
            Self::Virgo => '♍',
            Self::Libra => '♎',
            Self::Scorpio => '♏',
            Self::Sagittarius => '♐',
            Self::Capricorn => '♑',
            Self::Aquarius => '♒',
            Self::Pisces => '♓',
        }
    }

    /// Decorative emoji for the creature. Some are multi-codepoint.
    pub const fn creature_glyph(self) -> &'static str {
        match self {
            Self::Aries => "🐏",
            Self::Taurus => "🐂",
            Self::Gemini => "👯",
            Self::Cancer => "🦀",
            Self::Leo => "🦁",
            Self::Virgo => "👸",
            Self::Libra => "⚖️",
            Self::Scorpio => "🦂",
            Self::Sagittarius => "🏹",
            Self::Capricorn => "🐐",
            Self::Aquarius => "🏺",
            Self::Pisces => "🐟",
        }
    }

    /// Glyph and name, e.g. `"♊ Gemini"`.
    pub fn label(self) -> String {
        format!("{} {}", self.glyph(), self.name())
    }

    /// Creature glyph and creature, e.g. `"👯 Twins"`.
    pub fn creature_label(self) -> String {
        format!("{} {}", self.creature_glyph(), self.creature())
    }

    pub const fn range(self) -> SignRange {
        match self {
            Self::Aries => SignRange::new(3, 21, 4, 19),
            Self::Taurus => SignRange::new(4, 20, 5, 20),
            Self::Gemini => SignRange::new(5, 21, 6, 21),
            Self::Cancer => SignRange::new(6, 22, 7, 22),
            Self::Leo => SignRange::new(7, 23, 8, 22),
            Self::Virgo => SignRange::new(8, 23, 9, 22),
            Self::Libra => SignRange::new(9, 23, 10, 23),
            Self::Scorpio => SignRange::new(10, 24, 11, 21),
            Self::Sagittarius => SignRange::new(11, 22, 12, 21),
            Self::Capricorn => SignRange::new(12, 22, 1, 19),
            Self::Aquarius => SignRange::new(1, 20, 2, 18),
            Self::Pisces => SignRange::new(2, 19, 3, 20),
        }
    }

    /// Sign for a raw (month, day) pair. Feb 29 is accepted; pairs that exist
    /// in no year yield `None`.
    pub fn from_month_day(month: u8, day: u8) -> Option<Self> {
        let month = Month::new(month).ok()?;
        let day = Day::in_any_year(day, month).ok()?;
        Self::lookup(month, day)
    }

    /// Sign for a validated date. Always succeeds.
    pub fn for_date(date: &CalendarDate) -> Self {
        // The table partitions every valid (month, day); Capricorn is the
        // fallback only so the signature stays total.
        Self::lookup(date.month_typed(), date.day_typed()).unwrap_or(Self::Capricorn)
    }

    fn lookup(month: Month, day: Day) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|sign| sign.range().contains(month.get(), day.get()))
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    /// Case-insensitive sign name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown zodiac sign: {wanted}"))
    }
}

/// Resolves a raw birthday string. Absent, blank or unparseable input is
/// `None`, which callers render as empty fields.
pub fn resolve(birthday: &str) -> Option<ZodiacSign> {
    match birthday.parse::<CalendarDate>() {
        Ok(date) => Some(ZodiacSign::for_date(&date)),
        Err(err) => {
            tracing::debug!(%err, "birthday not resolvable to a zodiac sign");
            None
        }
    }
}

/// Emoji for a creature name such as `"Water Bearer"`. Unknown names are `None`.
pub fn creature_glyph(creature: &str) -> Option<&'static str> {
    ZodiacSign::ALL
        .into_iter()
        .find(|sign| sign.creature() == creature)
        .map(ZodiacSign::creature_glyph)
}
