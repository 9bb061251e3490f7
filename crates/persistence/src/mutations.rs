// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations on the roster tables.
//!
//! Every function takes an explicit `&mut SqliteConnection`; the bulk
//! coordinator passes its transaction connection so an entire batch commits
//! or rolls back as one unit. All mutations use Diesel DSL, with
//! `CURRENT_TIMESTAMP` raw SQL only for the `updated_at` columns.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{
    NewScheduleRow, NewScheduleShiftRow, NewShiftTypeRow, ScheduleChangeset,
    ShiftAssignmentChangeset, ShiftTypeChangeset,
};
use crate::diesel_schema::{schedule_shifts, schedules, shift_types, users};
use crate::error::PersistenceError;
use crate::queries;
use rosterd_domain::{Schedule, ScheduleShift, ScheduleStatus, ShiftType, TimeOfDay};

/// SQL expression assigning the database clock to a nullable text column.
///
/// This is a justified use of raw SQL as Diesel has no portable
/// `CURRENT_TIMESTAMP` expression for text columns.
fn current_timestamp()
-> diesel::expression::SqlLiteral<diesel::sql_types::Nullable<diesel::sql_types::Text>> {
    diesel::dsl::sql::<diesel::sql_types::Nullable<diesel::sql_types::Text>>("CURRENT_TIMESTAMP")
}

/// Creates a user with the given display fields.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::first_name.eq(first_name),
            users::last_name.eq(last_name),
            users::role.eq(role),
        ))
        .execute(conn)?;
    let user_id: i64 = get_last_insert_rowid(conn)?;
    info!(user_id, "User created");
    Ok(user_id)
}

/// Creates a shift type.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_shift_type(
    conn: &mut SqliteConnection,
    shift_type: &ShiftType,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(shift_types::table)
        .values(NewShiftTypeRow::from(shift_type))
        .execute(conn)?;
    let shift_type_id: i64 = get_last_insert_rowid(conn)?;
    info!(shift_type_id, name = %shift_type.name, "Shift type created");
    Ok(shift_type_id)
}

/// Applies a partial update to an active shift type.
///
/// # Errors
///
/// Returns `NotFound` if the shift type does not exist or is soft-deleted.
pub fn update_shift_type(
    conn: &mut SqliteConnection,
    shift_type_id: i64,
    changes: &ShiftTypeChangeset,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(shift_types::table)
        .filter(shift_types::shift_type_id.eq(shift_type_id))
        .filter(shift_types::is_active.eq(1))
        .set((changes.clone(), shift_types::updated_at.eq(current_timestamp())))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(
            "Shift type not found".to_string(),
        ));
    }
    debug!(shift_type_id, "Shift type updated");
    Ok(())
}

/// Soft-deletes a shift type.
///
/// The caller is responsible for the in-use guard; this only flips the
/// flag.
///
/// # Errors
///
/// Returns `NotFound` if the shift type does not exist or is already
/// soft-deleted.
pub fn soft_delete_shift_type(
    conn: &mut SqliteConnection,
    shift_type_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(shift_types::table)
        .filter(shift_types::shift_type_id.eq(shift_type_id))
        .filter(shift_types::is_active.eq(1))
        .set((
            shift_types::is_active.eq(0),
            shift_types::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(
            "Shift type not found".to_string(),
        ));
    }
    info!(shift_type_id, "Shift type soft-deleted");
    Ok(())
}

/// Creates a schedule.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_schedule(
    conn: &mut SqliteConnection,
    schedule: &Schedule,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(schedules::table)
        .values(NewScheduleRow::from(schedule))
        .execute(conn)?;
    let schedule_id: i64 = get_last_insert_rowid(conn)?;
    info!(schedule_id, name = %schedule.name, "Schedule created");
    Ok(schedule_id)
}

/// Applies a partial update to a schedule's name or date range.
///
/// # Errors
///
/// Returns `NotFound` if the schedule does not exist.
pub fn update_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    changes: &ScheduleChangeset,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .set((changes.clone(), schedules::updated_at.eq(current_timestamp())))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound("Schedule not found".to_string()));
    }
    debug!(schedule_id, "Schedule updated");
    Ok(())
}

/// Deletes a schedule. Its shifts go with it via the cascade constraint.
///
/// # Errors
///
/// Returns `NotFound` if the schedule does not exist.
pub fn delete_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound("Schedule not found".to_string()));
    }
    info!(schedule_id, "Schedule deleted");
    Ok(())
}

/// Sets a schedule's lifecycle status.
///
/// # Errors
///
/// Returns `NotFound` if the schedule does not exist.
pub fn set_schedule_status(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    status: ScheduleStatus,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(schedules::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .set((
            schedules::status.eq(status.as_str()),
            schedules::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound("Schedule not found".to_string()));
    }
    info!(schedule_id, status = %status, "Schedule status changed");
    Ok(())
}

/// Creates a schedule shift.
///
/// # Errors
///
/// Returns an error if the insert fails (including foreign key violations
/// for unknown schedules, shift types, or users).
pub fn create_shift(
    conn: &mut SqliteConnection,
    shift: &ScheduleShift,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(schedule_shifts::table)
        .values(NewScheduleShiftRow::from(shift))
        .execute(conn)?;
    let shift_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        shift_id,
        schedule_id = shift.schedule_id,
        shift_type_id = shift.shift_type_id,
        "Schedule shift created"
    );
    Ok(shift_id)
}

/// Applies a partial update to a shift's assignment fields (date, user,
/// order), scoped to a schedule.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist under that schedule.
pub fn update_shift_assignment(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
    changes: &ShiftAssignmentChangeset,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(schedule_shifts::table)
        .filter(schedule_shifts::shift_id.eq(shift_id))
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .set((
            changes.clone(),
            schedule_shifts::updated_at.eq(current_timestamp()),
        ))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(
            "Schedule shift not found".to_string(),
        ));
    }
    debug!(shift_id, schedule_id, "Shift assignment updated");
    Ok(())
}

/// Overwrites a shift's actual times. Omitted fields are left untouched.
///
/// The activation gate (`is_active` must be set) is the caller's check;
/// this only writes the columns.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist under that schedule.
pub fn update_shift_times(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
    actual_start_time: Option<TimeOfDay>,
    actual_end_time: Option<TimeOfDay>,
) -> Result<(), PersistenceError> {
    #[derive(AsChangeset)]
    #[diesel(table_name = schedule_shifts)]
    struct TimesChangeset {
        actual_start_time: Option<String>,
        actual_end_time: Option<String>,
    }

    let changes = TimesChangeset {
        actual_start_time: actual_start_time.map(|t| t.to_string()),
        actual_end_time: actual_end_time.map(|t| t.to_string()),
    };

    let rows_affected: usize = diesel::update(schedule_shifts::table)
        .filter(schedule_shifts::shift_id.eq(shift_id))
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .set((changes, schedule_shifts::updated_at.eq(current_timestamp())))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(
            "Schedule shift not found".to_string(),
        ));
    }
    debug!(shift_id, schedule_id, "Shift times adjusted");
    Ok(())
}

/// Hard-deletes a shift, scoped to a schedule.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist under that schedule.
pub fn delete_shift(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(schedule_shifts::table)
        .filter(schedule_shifts::shift_id.eq(shift_id))
        .filter(schedule_shifts::schedule_id.eq(schedule_id))
        .execute(conn)?;
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(
            "Schedule shift not found".to_string(),
        ));
    }
    debug!(shift_id, schedule_id, "Schedule shift deleted");
    Ok(())
}

/// Activates every shift of a schedule and copies its shift type's template
/// times into the actual-time columns.
///
/// This is the publish workflow's arm and the only path that flips shifts
/// live. Idempotent: re-running rewrites the same values.
///
/// # Errors
///
/// Returns an error if the database cannot be read or updated.
pub fn activate_shifts(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<usize, PersistenceError> {
    let shifts = queries::list_shift_details(conn, schedule_id)?;
    let count: usize = shifts.len();

    for (shift, shift_type, _) in shifts {
        let Some(shift_id) = shift.shift_id else {
            continue;
        };
        diesel::update(schedule_shifts::table)
            .filter(schedule_shifts::shift_id.eq(shift_id))
            .set((
                schedule_shifts::is_active.eq(1),
                schedule_shifts::actual_start_time
                    .eq(Some(shift_type.time_range.start.to_string())),
                schedule_shifts::actual_end_time.eq(Some(shift_type.time_range.end.to_string())),
                schedule_shifts::updated_at.eq(current_timestamp()),
            ))
            .execute(conn)?;
    }

    info!(schedule_id, count, "Schedule shifts activated");
    Ok(count)
}
