// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Minutes in one day.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day on a 24-hour clock, stored as minutes since midnight.
///
/// Parsed from and rendered as `HH:MM`. A single-digit hour (`9:30`) is
/// accepted on input and normalized to two digits on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Minutes since midnight (0..1440).
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a `TimeOfDay` from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is not 0-23 or `minutes` is not 0-59.
    pub fn new(hours: u8, minutes: u8) -> Result<Self, DomainError> {
        if hours > 23 || minutes > 59 {
            return Err(DomainError::InvalidTimeFormat(format!(
                "{hours:02}:{minutes:02}"
            )));
        }
        Ok(Self {
            minutes: u16::from(hours) * 60 + u16::from(minutes),
        })
    }

    /// Returns the number of minutes since midnight.
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidTimeFormat(s.to_string());

        let (hours_str, minutes_str) = s.split_once(':').ok_or_else(invalid)?;
        if hours_str.is_empty() || hours_str.len() > 2 || minutes_str.len() != 2 {
            return Err(invalid());
        }

        let hours: u8 = hours_str.parse().map_err(|_| invalid())?;
        let minutes: u8 = minutes_str.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes).map_err(|_| invalid())
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

// Times serialize as their wire form, `"HH:MM"`.

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// A time-of-day range, possibly crossing midnight.
///
/// A range whose end is numerically at or before its start is an overnight
/// range: it is treated as ending on the following day. In particular a
/// zero-length range (`start == end`) spans a full 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// The start of the range.
    pub start: TimeOfDay,
    /// The end of the range.
    pub end: TimeOfDay,
}

impl TimeRange {
    /// Creates a new `TimeRange`.
    #[must_use]
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parses a `TimeRange` from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either boundary is not valid `HH:MM`.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Normalizes the range to `(start, end)` minutes measured from the same
    /// midnight epoch, unfolding overnight ranges past 1440.
    fn normalized(&self) -> (u32, u32) {
        let start = u32::from(self.start.minutes_since_midnight());
        let mut end = u32::from(self.end.minutes_since_midnight());
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }

    /// Reports whether two ranges intersect.
    ///
    /// Half-open interval semantics: ranges that merely touch at a boundary
    /// (`09:00-10:00` and `10:00-11:00`) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let (start1, end1) = self.normalized();
        let (start2, end2) = other.normalized();
        start1 < end2 && start2 < end1
    }

    /// Returns the duration of the range in minutes.
    ///
    /// An overnight range measures through midnight; a zero-length range
    /// measures a full day.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        let (start, end) = self.normalized();
        end - start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
