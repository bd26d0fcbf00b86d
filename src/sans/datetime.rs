//! The 7-byte date-time field shared by both message types.

use core::fmt;

use thiserror::Error;
use zerocopy::FromBytes;

/// Width of a date-time field in bytes.
pub const DATE_TIME_LEN: usize = 7;

/// An error validating a date-time field.
///
/// Each variant holds the offending component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Year outside 1582 through 9999.
    #[error("Year out of range ({0}).")]
    Year(u16),
    /// Month outside 1 through 12.
    #[error("Month out of range ({0}).")]
    Month(u8),
    /// Day outside the month.
    #[error("Day out of range ({0}).")]
    Day(u8),
    /// Hour of 24 or more.
    #[error("Hour out of range ({0}).")]
    Hour(u8),
    /// Minute of 60 or more.
    #[error("Minute out of range ({0}).")]
    Minute(u8),
    /// Second of 60 or more.
    #[error("Second out of range ({0}).")]
    Second(u8),
}

/// A validated calendar date and time of day, without zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// Build a date-time from its components, validating each.
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimestampError> {
        if !(1582..=9999).contains(&year) {
            Err(TimestampError::Year(year))?;
        }
        if !(1..=12).contains(&month) {
            Err(TimestampError::Month(month))?;
        }
        if day == 0 || day > days_in_month(year, month) {
            Err(TimestampError::Day(day))?;
        }
        if hour >= 24 {
            Err(TimestampError::Hour(hour))?;
        }
        if minute >= 60 {
            Err(TimestampError::Minute(minute))?;
        }
        if second >= 60 {
            Err(TimestampError::Second(second))?;
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Decode a date-time field: a little-endian year, then month, day, hour,
    /// minute and second as single bytes.
    pub fn decode(r: [u8; DATE_TIME_LEN]) -> Result<Self, TimestampError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct DateTimeField {
            year: [u8; 2],
            month: u8,
            day: u8,
            hour: u8,
            minute: u8,
            second: u8,
        }

        let DateTimeField {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = zerocopy::transmute!(r);

        Self::new(u16::from_le_bytes(year), month, day, hour, minute, second)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

/// Formats as ISO 8601, for example `2021-06-15T10:30:00`.
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
