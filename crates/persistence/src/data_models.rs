// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and changesets bridging the `SQLite` schema and domain types.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{schedule_shifts, schedules, shift_types, users};
use crate::error::PersistenceError;
use rosterd_domain::{
    ColorIndex, Schedule, ScheduleShift, ScheduleStatus, ShiftType, TimeOfDay, TimeRange,
    format_date, parse_date,
};

/// Display fields for a user, as consumed by response enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// A shift that clashes with a candidate assignment, joined with the shift
/// type that defines its time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingShift {
    /// The existing shift the candidate overlaps with.
    pub shift: ScheduleShift,
    /// The existing shift's time template.
    pub shift_type: ShiftType,
}

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            role: row.role,
        }
    }
}

/// Diesel Queryable struct for shift type rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_types)]
pub(crate) struct ShiftTypeRow {
    pub shift_type_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub color_index: i32,
    pub is_active: i32,
    #[allow(dead_code)]
    pub created_at: Option<String>,
    #[allow(dead_code)]
    pub updated_at: Option<String>,
}

impl TryFrom<ShiftTypeRow> for ShiftType {
    type Error = PersistenceError;

    fn try_from(row: ShiftTypeRow) -> Result<Self, Self::Error> {
        let color_raw: u8 = u8::try_from(row.color_index).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "Color index {} out of range",
                row.color_index
            ))
        })?;
        Ok(Self::with_id(
            row.shift_type_id,
            row.name,
            TimeRange::parse(&row.start_time, &row.end_time)?,
            ColorIndex::new(color_raw)?,
            row.is_active != 0,
        ))
    }
}

/// Diesel Insertable struct for new shift types.
#[derive(Insertable)]
#[diesel(table_name = shift_types)]
pub(crate) struct NewShiftTypeRow {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub color_index: i32,
    pub is_active: i32,
}

impl From<&ShiftType> for NewShiftTypeRow {
    fn from(shift_type: &ShiftType) -> Self {
        Self {
            name: shift_type.name.clone(),
            start_time: shift_type.time_range.start.to_string(),
            end_time: shift_type.time_range.end.to_string(),
            color_index: i32::from(shift_type.color_index.value()),
            is_active: i32::from(shift_type.is_active),
        }
    }
}

/// Partial update for a shift type. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = shift_types)]
pub struct ShiftTypeChangeset {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub color_index: Option<i32>,
}

/// Diesel Queryable struct for schedule rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedules)]
pub(crate) struct ScheduleRow {
    pub schedule_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_by: i64,
    #[allow(dead_code)]
    pub created_at: Option<String>,
    #[allow(dead_code)]
    pub updated_at: Option<String>,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = PersistenceError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let status: ScheduleStatus = row.status.parse()?;
        Ok(Self::with_id(
            row.schedule_id,
            row.name,
            parse_date(&row.start_date)?,
            parse_date(&row.end_date)?,
            status,
            row.created_by,
        ))
    }
}

/// Diesel Insertable struct for new schedules.
#[derive(Insertable)]
#[diesel(table_name = schedules)]
pub(crate) struct NewScheduleRow {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_by: i64,
}

impl From<&Schedule> for NewScheduleRow {
    fn from(schedule: &Schedule) -> Self {
        Self {
            name: schedule.name.clone(),
            start_date: format_date(schedule.start_date),
            end_date: format_date(schedule.end_date),
            status: schedule.status.as_str().to_string(),
            created_by: schedule.created_by,
        }
    }
}

/// Partial update for a schedule. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schedules)]
pub struct ScheduleChangeset {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Diesel Queryable struct for schedule shift rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedule_shifts)]
pub(crate) struct ScheduleShiftRow {
    pub shift_id: i64,
    pub schedule_id: i64,
    pub shift_type_id: i64,
    pub date: String,
    pub user_id: Option<i64>,
    pub sort_order: i32,
    pub is_active: i32,
    pub actual_start_time: Option<String>,
    pub actual_end_time: Option<String>,
    #[allow(dead_code)]
    pub created_at: Option<String>,
    #[allow(dead_code)]
    pub updated_at: Option<String>,
}

impl TryFrom<ScheduleShiftRow> for ScheduleShift {
    type Error = PersistenceError;

    fn try_from(row: ScheduleShiftRow) -> Result<Self, Self::Error> {
        let parse_time = |value: &str| -> Result<TimeOfDay, PersistenceError> {
            Ok(value.parse::<TimeOfDay>()?)
        };
        Ok(Self {
            shift_id: Some(row.shift_id),
            schedule_id: row.schedule_id,
            shift_type_id: row.shift_type_id,
            date: parse_date(&row.date)?,
            user_id: row.user_id,
            sort_order: row.sort_order,
            is_active: row.is_active != 0,
            actual_start_time: row.actual_start_time.as_deref().map(parse_time).transpose()?,
            actual_end_time: row.actual_end_time.as_deref().map(parse_time).transpose()?,
        })
    }
}

/// Diesel Insertable struct for new schedule shifts.
#[derive(Insertable)]
#[diesel(table_name = schedule_shifts)]
pub(crate) struct NewScheduleShiftRow {
    pub schedule_id: i64,
    pub shift_type_id: i64,
    pub date: String,
    pub user_id: Option<i64>,
    pub sort_order: i32,
    pub is_active: i32,
}

impl From<&ScheduleShift> for NewScheduleShiftRow {
    fn from(shift: &ScheduleShift) -> Self {
        Self {
            schedule_id: shift.schedule_id,
            shift_type_id: shift.shift_type_id,
            date: format_date(shift.date),
            user_id: shift.user_id,
            sort_order: shift.sort_order,
            is_active: i32::from(shift.is_active),
        }
    }
}

/// Partial update for a schedule shift's assignment fields.
///
/// `user_id` distinguishes "leave untouched" (`None`) from "set to NULL"
/// (`Some(None)`) so an explicit unassignment is expressible.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = schedule_shifts)]
pub struct ShiftAssignmentChangeset {
    pub date: Option<String>,
    pub user_id: Option<Option<i64>>,
    pub sort_order: Option<i32>,
}
