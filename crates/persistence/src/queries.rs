// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over the roster tables.
//!
//! Every function takes an explicit `&mut SqliteConnection` so callers can
//! run it either on the adapter's own connection or on a transaction
//! connection inside a bulk batch. Conflict checks performed inside a
//! transaction therefore observe that transaction's uncommitted writes.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;

use crate::data_models::{
    ConflictingShift, ScheduleRow, ScheduleShiftRow, ShiftTypeRow, UserData, UserRow,
};
use crate::diesel_schema::{schedule_shifts, schedules, shift_types, users};
use crate::error::PersistenceError;
use rosterd_domain::{Schedule, ScheduleShift, ScheduleStatus, ShiftType, TimeRange, format_date};

/// A shift joined with its shift type and (when assigned) the user's
/// display fields.
pub type ShiftDetails = (ScheduleShift, ShiftType, Option<UserData>);

/// Retrieves a schedule by ID.
///
/// # Errors
///
/// Returns `NotFound` if the schedule does not exist.
pub fn get_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Schedule, PersistenceError> {
    let row = schedules::table
        .filter(schedules::schedule_id.eq(schedule_id))
        .select(ScheduleRow::as_select())
        .first::<ScheduleRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound("Schedule not found".to_string()))?;
    Schedule::try_from(row)
}

/// Lists schedules, optionally filtered by status, newest period first.
///
/// # Arguments
///
/// * `status` - Optional status filter
/// * `limit` - Page size
/// * `offset` - Rows to skip
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_schedules(
    conn: &mut SqliteConnection,
    status: Option<ScheduleStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Schedule>, PersistenceError> {
    let mut query = schedules::table
        .select(ScheduleRow::as_select())
        .into_boxed();
    if let Some(status) = status {
        query = query.filter(schedules::status.eq(status.as_str()));
    }
    let rows: Vec<ScheduleRow> = query
        .order(schedules::start_date.desc())
        .limit(limit)
        .offset(offset)
        .load(conn)?;
    rows.into_iter().map(Schedule::try_from).collect()
}

/// Finds a schedule whose date range intersects `[start_date, end_date]`,
/// excluding `exclude_schedule_id` when given.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_overlapping_schedule(
    conn: &mut SqliteConnection,
    start_date: Date,
    end_date: Date,
    exclude_schedule_id: Option<i64>,
) -> Result<Option<Schedule>, PersistenceError> {
    // Inclusive interval intersection on ISO dates; lexicographic order on
    // YYYY-MM-DD text matches calendar order.
    let mut query = schedules::table
        .select(ScheduleRow::as_select())
        .filter(schedules::start_date.le(format_date(end_date)))
        .filter(schedules::end_date.ge(format_date(start_date)))
        .into_boxed();
    if let Some(exclude) = exclude_schedule_id {
        query = query.filter(schedules::schedule_id.ne(exclude));
    }
    let row = query.first::<ScheduleRow>(conn).optional()?;
    row.map(Schedule::try_from).transpose()
}

/// Finds the most recently published schedule other than
/// `exclude_schedule_id`, ordered by end date descending.
///
/// This is the copy-previous source-selection policy: the published
/// schedule with the highest end date, not necessarily the one adjacent to
/// the target.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn latest_published_schedule(
    conn: &mut SqliteConnection,
    exclude_schedule_id: i64,
) -> Result<Option<Schedule>, PersistenceError> {
    let row = schedules::table
        .filter(schedules::status.eq(ScheduleStatus::Published.as_str()))
        .filter(schedules::schedule_id.ne(exclude_schedule_id))
        .order(schedules::end_date.desc())
        .select(ScheduleRow::as_select())
        .first::<ScheduleRow>(conn)
        .optional()?;
    row.map(Schedule::try_from).transpose()
}

/// Retrieves a shift type by ID, active or not.
///
/// Shifts keep referencing soft-deleted types, so template resolution must
/// not filter on `is_active`.
///
/// # Errors
///
/// Returns `NotFound` if the shift type does not exist.
pub fn get_shift_type(
    conn: &mut SqliteConnection,
    shift_type_id: i64,
) -> Result<ShiftType, PersistenceError> {
    let row = shift_types::table
        .filter(shift_types::shift_type_id.eq(shift_type_id))
        .select(ShiftTypeRow::as_select())
        .first::<ShiftTypeRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound("Shift type not found".to_string()))?;
    ShiftType::try_from(row)
}

/// Retrieves an active shift type by ID.
///
/// # Errors
///
/// Returns `NotFound` if the shift type does not exist or is soft-deleted.
pub fn get_active_shift_type(
    conn: &mut SqliteConnection,
    shift_type_id: i64,
) -> Result<ShiftType, PersistenceError> {
    let shift_type = get_shift_type(conn, shift_type_id)?;
    if !shift_type.is_active {
        return Err(PersistenceError::NotFound(
            "Shift type not found".to_string(),
        ));
    }
    Ok(shift_type)
}

/// Lists active shift types sorted by name.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_shift_types(conn: &mut SqliteConnection) -> Result<Vec<ShiftType>, PersistenceError> {
    let rows: Vec<ShiftTypeRow> = shift_types::table
        .filter(shift_types::is_active.eq(1))
        .order(shift_types::name.asc())
        .select(ShiftTypeRow::as_select())
        .load(conn)?;
    rows.into_iter().map(ShiftType::try_from).collect()
}

/// Counts active shifts referencing a shift type.
///
/// Used by the soft-delete guard: a type in use by a published schedule
/// cannot be removed.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_active_shifts_for_type(
    conn: &mut SqliteConnection,
    shift_type_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(schedule_shifts::table
        .filter(schedule_shifts::shift_type_id.eq(shift_type_id))
        .filter(schedule_shifts::is_active.eq(1))
        .count()
        .get_result(conn)?)
}

/// Retrieves a shift by ID, scoped to a schedule.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist under that schedule.
pub fn get_shift(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
) -> Result<ScheduleShift, PersistenceError> {
    let row = schedule_shifts::table
        .filter(schedule_shifts::shift_id.eq(shift_id))
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .select(ScheduleShiftRow::as_select())
        .first::<ScheduleShiftRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound("Schedule shift not found".to_string()))?;
    ScheduleShift::try_from(row)
}

/// Retrieves a shift with its shift type and assigned user's display
/// fields, scoped to a schedule.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist under that schedule.
pub fn get_shift_details(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
) -> Result<ShiftDetails, PersistenceError> {
    let row = schedule_shifts::table
        .inner_join(shift_types::table)
        .left_join(users::table)
        .filter(schedule_shifts::shift_id.eq(shift_id))
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .select((
            ScheduleShiftRow::as_select(),
            ShiftTypeRow::as_select(),
            Option::<UserRow>::as_select(),
        ))
        .first::<(ScheduleShiftRow, ShiftTypeRow, Option<UserRow>)>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound("Schedule shift not found".to_string()))?;
    convert_details(row)
}

/// Lists all shifts of a schedule with details, sorted by date then order.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_shift_details(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Vec<ShiftDetails>, PersistenceError> {
    let rows: Vec<(ScheduleShiftRow, ShiftTypeRow, Option<UserRow>)> = schedule_shifts::table
        .inner_join(shift_types::table)
        .left_join(users::table)
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .order((schedule_shifts::date.asc(), schedule_shifts::sort_order.asc()))
        .select((
            ScheduleShiftRow::as_select(),
            ShiftTypeRow::as_select(),
            Option::<UserRow>::as_select(),
        ))
        .load(conn)?;
    rows.into_iter().map(convert_details).collect()
}

/// Lists `(date, shift_type_id)` pairs for every shift of a schedule.
///
/// This is the minimal projection the copy-previous pattern extraction
/// needs.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_shift_dates_and_types(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Vec<(Date, i64)>, PersistenceError> {
    let rows: Vec<(String, i64)> = schedule_shifts::table
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .select((schedule_shifts::date, schedule_shifts::shift_type_id))
        .load(conn)?;
    rows.into_iter()
        .map(|(date, shift_type_id)| Ok((rosterd_domain::parse_date(&date)?, shift_type_id)))
        .collect()
}

/// Counts the shifts of a schedule on one calendar day.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_shifts_on_date(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    date: Date,
) -> Result<i64, PersistenceError> {
    Ok(schedule_shifts::table
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .filter(schedule_shifts::date.eq(format_date(date)))
        .count()
        .get_result(conn)?)
}

/// Finds every shift of a user on a calendar day whose shift-type time
/// range overlaps `candidate_range`.
///
/// Dates are stored as plain calendar days, so the day bucket is equality
/// on the `date` column. The overlap test runs on the shift-type template
/// range, overnight wraparound included. All matches are returned, not
/// just the first.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_conflicts(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: Date,
    candidate_range: TimeRange,
) -> Result<Vec<ConflictingShift>, PersistenceError> {
    let rows: Vec<(ScheduleShiftRow, ShiftTypeRow)> = schedule_shifts::table
        .inner_join(shift_types::table)
        .filter(schedule_shifts::user_id.eq(user_id))
        .filter(schedule_shifts::date.eq(format_date(date)))
        .select((ScheduleShiftRow::as_select(), ShiftTypeRow::as_select()))
        .load(conn)?;

    let mut conflicts: Vec<ConflictingShift> = Vec::new();
    for (shift_row, type_row) in rows {
        let shift_type = ShiftType::try_from(type_row)?;
        if candidate_range.overlaps(&shift_type.time_range) {
            conflicts.push(ConflictingShift {
                shift: ScheduleShift::try_from(shift_row)?,
                shift_type,
            });
        }
    }
    Ok(conflicts)
}

/// Retrieves a user's display fields.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserData, PersistenceError> {
    let row = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound("User not found".to_string()))?;
    Ok(UserData::from(row))
}

fn convert_details(
    row: (ScheduleShiftRow, ShiftTypeRow, Option<UserRow>),
) -> Result<ShiftDetails, PersistenceError> {
    let (shift_row, type_row, user_row) = row;
    Ok((
        ScheduleShift::try_from(shift_row)?,
        ShiftType::try_from(type_row)?,
        user_row.map(UserData::from),
    ))
}
