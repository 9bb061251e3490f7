// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::time_range::{TimeOfDay, TimeRange};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, &time::format_description::well_known::Iso8601::DEFAULT).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The lifecycle status of a schedule.
///
/// Schedules are created as drafts and move one way to published; there is
/// no unpublish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Editable working copy. Shifts are inactive.
    #[default]
    Draft,
    /// Live schedule. Shifts have been activated.
    Published,
}

impl ScheduleStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Returns whether this schedule has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl FromStr for ScheduleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A slot in the client color palette.
///
/// The palette has ten entries; shift types reference one by index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex {
    /// The palette slot (0-9).
    index: u8,
}

impl ColorIndex {
    /// Creates a new `ColorIndex`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is not between 0 and 9 inclusive.
    pub const fn new(index: u8) -> Result<Self, DomainError> {
        if index <= 9 {
            Ok(Self { index })
        } else {
            Err(DomainError::InvalidColorIndex { index })
        }
    }

    /// Returns the palette slot.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.index
    }
}

/// A reusable time-of-day template for shifts (e.g. "Front Desk Morning",
/// 06:00-10:00).
///
/// Shift types are soft-deleted (`is_active = false`) rather than removed,
/// because schedule shifts keep referencing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftType {
    /// The canonical identifier assigned by the database.
    /// `None` indicates the shift type has not been persisted yet.
    pub shift_type_id: Option<i64>,
    /// The display name.
    pub name: String,
    /// The template time range. May cross midnight (overnight shift).
    pub time_range: TimeRange,
    /// The client palette slot.
    pub color_index: ColorIndex,
    /// Whether the shift type is available for new shifts.
    pub is_active: bool,
}

impl ShiftType {
    /// Creates a new `ShiftType` without a persisted identifier.
    #[must_use]
    pub const fn new(name: String, time_range: TimeRange, color_index: ColorIndex) -> Self {
        Self {
            shift_type_id: None,
            name,
            time_range,
            color_index,
            is_active: true,
        }
    }

    /// Creates a `ShiftType` with an existing persisted identifier.
    #[must_use]
    pub const fn with_id(
        shift_type_id: i64,
        name: String,
        time_range: TimeRange,
        color_index: ColorIndex,
        is_active: bool,
    ) -> Self {
        Self {
            shift_type_id: Some(shift_type_id),
            name,
            time_range,
            color_index,
            is_active,
        }
    }
}

/// A named weekly period holding shift slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The canonical identifier assigned by the database.
    /// `None` indicates the schedule has not been persisted yet.
    pub schedule_id: Option<i64>,
    /// The display name.
    pub name: String,
    /// First day covered by the schedule.
    pub start_date: Date,
    /// Last day covered by the schedule (inclusive).
    pub end_date: Date,
    /// Lifecycle status.
    pub status: ScheduleStatus,
    /// The user who created the schedule.
    pub created_by: i64,
}

impl Schedule {
    /// Creates a new draft `Schedule` without a persisted identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_date` precedes `start_date`.
    pub fn new(
        name: String,
        start_date: Date,
        end_date: Date,
        created_by: i64,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            schedule_id: None,
            name,
            start_date,
            end_date,
            status: ScheduleStatus::Draft,
            created_by,
        })
    }

    /// Creates a `Schedule` with an existing persisted identifier.
    #[must_use]
    pub const fn with_id(
        schedule_id: i64,
        name: String,
        start_date: Date,
        end_date: Date,
        status: ScheduleStatus,
        created_by: i64,
    ) -> Self {
        Self {
            schedule_id: Some(schedule_id),
            name,
            start_date,
            end_date,
            status,
            created_by,
        }
    }

    /// Reports whether this schedule's date range intersects another
    /// inclusive date range.
    #[must_use]
    pub fn dates_overlap(&self, start_date: Date, end_date: Date) -> bool {
        self.start_date <= end_date && start_date <= self.end_date
    }
}

/// One concrete shift slot on one date within one schedule.
///
/// `user_id = None` is an open, unassigned slot. `sort_order` is a
/// display-ordering hint within a `(schedule, date)` bucket; duplicates are
/// tolerated. Actual times exist only once the shift has been activated by
/// publishing its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleShift {
    /// The canonical identifier assigned by the database.
    /// `None` indicates the shift has not been persisted yet.
    pub shift_id: Option<i64>,
    /// The owning schedule.
    pub schedule_id: i64,
    /// The shift-type template this slot instantiates.
    pub shift_type_id: i64,
    /// The calendar day of the slot.
    pub date: Date,
    /// The assigned user, if any.
    pub user_id: Option<i64>,
    /// Display order within the `(schedule, date)` bucket.
    pub sort_order: i32,
    /// Whether the owning schedule has been published.
    pub is_active: bool,
    /// Override of the template start time; settable only when active.
    pub actual_start_time: Option<TimeOfDay>,
    /// Override of the template end time; settable only when active.
    pub actual_end_time: Option<TimeOfDay>,
}

impl ScheduleShift {
    /// Creates a new inactive, unassigned `ScheduleShift`.
    ///
    /// # Errors
    ///
    /// Returns an error if `sort_order` is not positive.
    pub fn new(
        schedule_id: i64,
        shift_type_id: i64,
        date: Date,
        sort_order: i32,
    ) -> Result<Self, DomainError> {
        if sort_order < 1 {
            return Err(DomainError::InvalidOrder { order: sort_order });
        }
        Ok(Self {
            shift_id: None,
            schedule_id,
            shift_type_id,
            date,
            user_id: None,
            sort_order,
            is_active: false,
            actual_start_time: None,
            actual_end_time: None,
        })
    }

    /// Validates the activation invariant for actual times.
    ///
    /// # Invariant
    ///
    /// `actual_start_time` or `actual_end_time` set ⇒ `is_active == true`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimesOnInactiveShift` if either actual time is
    /// present while the shift is inactive.
    pub fn validate_actual_times(&self) -> Result<(), DomainError> {
        if !self.is_active && (self.actual_start_time.is_some() || self.actual_end_time.is_some())
        {
            return Err(DomainError::TimesOnInactiveShift {
                shift_id: self.shift_id,
            });
        }
        Ok(())
    }

    /// The effective time range of the shift: actual times when both are
    /// set, otherwise the supplied template range.
    #[must_use]
    pub fn effective_range(&self, template: TimeRange) -> TimeRange {
        match (self.actual_start_time, self.actual_end_time) {
            (Some(start), Some(end)) => TimeRange::new(start, end),
            _ => template,
        }
    }
}
