//! Calendar date/time as kept by the real-time clock
//!
//! The weekday is never set on its own: it is derived from the date
//! whenever a `DateTime` is built or edited.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::EditConfig;

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Derive the weekday of a Gregorian date (Sakamoto's method)
    ///
    /// Days past the end of a month are accepted and simply continue
    /// counting into the next month.
    pub fn from_date(year: u16, month: u8, day: u8) -> Self {
        const OFFSETS: [u32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

        let month = month.clamp(1, 12);
        let y = if month < 3 {
            u32::from(year).saturating_sub(1)
        } else {
            u32::from(year)
        };
        let index = (y + y / 4 - y / 100 + y / 400 + OFFSETS[(month - 1) as usize] + u32::from(day))
            % 7;

        // 0 = Sunday
        match index {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    /// Day number as used by most RTC chips (Monday = 1 .. Sunday = 7)
    pub fn number_from_monday(&self) -> u8 {
        *self as u8 + 1
    }

    /// Full English name
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// Date/time field that can be edited with the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditField {
    #[default]
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl EditField {
    /// Next field in navigation order, wrapping from Minute back to Year
    pub fn next(self) -> Self {
        match self {
            EditField::Year => EditField::Month,
            EditField::Month => EditField::Day,
            EditField::Day => EditField::Hour,
            EditField::Hour => EditField::Minute,
            EditField::Minute => EditField::Year,
        }
    }

    /// Label shown in the edit indicator
    pub fn label(&self) -> &'static str {
        match self {
            EditField::Year => "Year",
            EditField::Month => "Month",
            EditField::Day => "Day",
            EditField::Hour => "Hour",
            EditField::Minute => "Minute",
        }
    }
}

/// Highest day-of-month reachable by editing, whatever the month
pub const MAX_EDIT_DAY: u8 = 31;

/// Calendar date and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    weekday: Weekday,
}

impl DateTime {
    /// Create a date/time, deriving the weekday from the date
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday: Weekday::from_date(year, month, day),
        }
    }

    /// Derived day of the week
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Check that every field lies in its calendar range
    ///
    /// Day-of-month is checked against 31 only, matching what editing can
    /// produce.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=MAX_EDIT_DAY).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Increment one field by a single unit with wraparound
    ///
    /// - Year cycles through the configured range
    /// - Month 1-12, Day 1-31 (no month-length awareness), Hour 0-23,
    ///   Minute 0-59
    ///
    /// Seconds are reset to zero on every edit; other fields are untouched
    /// (no carry into the next field).
    pub fn increment(&self, field: EditField, edit: &EditConfig) -> Self {
        let mut next = *self;

        match field {
            EditField::Year => {
                next.year = if self.year >= edit.year_max || self.year < edit.year_min {
                    edit.year_min
                } else {
                    self.year + 1
                };
            }
            EditField::Month => next.month = wrap_up(self.month, 1, 12),
            EditField::Day => next.day = wrap_up(self.day, 1, MAX_EDIT_DAY),
            EditField::Hour => next.hour = wrap_up(self.hour, 0, 23),
            EditField::Minute => next.minute = wrap_up(self.minute, 0, 59),
        }

        next.second = 0;
        next.weekday = Weekday::from_date(next.year, next.month, next.day);
        next
    }
}

impl Default for DateTime {
    fn default() -> Self {
        Self::new(EditConfig::DEFAULT_YEAR_MIN, 1, 1, 0, 0, 0)
    }
}

/// Step `value` up by one inside `min..=max`, wrapping to `min`
fn wrap_up(value: u8, min: u8, max: u8) -> u8 {
    if value >= max || value < min {
        min
    } else {
        value + 1
    }
}
