// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-shift operations: create, list, assign, adjust times, remove.

use tracing::debug;

use crate::error::ApiError;
use crate::request_response::{
    ConflictDetail, CreateShiftRequest, ScheduleShiftsResponse, ShiftResponse,
    UpdateShiftRequest, UpdateShiftTimesRequest, shift_response,
};
use crate::validation::{ValidationError, check_order_field, parse_date_field, parse_time_field};
use rosterd_domain::ScheduleShift;
use rosterd_persistence::{ConflictingShift, Persistence, ShiftAssignmentChangeset};

/// Builds the 409 payload for a clashing assignment.
pub(crate) fn conflict_error(conflicts: &[ConflictingShift]) -> ApiError {
    ApiError::ShiftConflict {
        message: String::from("User has conflicting shifts"),
        conflicts: conflicts.iter().map(ConflictDetail::from).collect(),
    }
}

/// Computes the next display order for a `(schedule, date)` bucket:
/// existing count + 1.
pub(crate) fn next_order(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX - 1).saturating_add(1)
}

/// Creates a shift slot in a schedule.
///
/// The new shift starts unassigned and inactive regardless of schedule
/// status. When `order` is omitted it becomes the count of same-day shifts
/// plus one.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule or shift type is absent and
/// `InvalidInput` for malformed fields.
pub fn create_shift(
    persistence: &mut Persistence,
    schedule_id: i64,
    request: &CreateShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    persistence.get_schedule(schedule_id)?;
    persistence.get_shift_type(request.shift_type_id)?;

    let date = parse_date_field("date", &request.date)?;
    let order: i32 = match request.order {
        Some(order) => check_order_field("order", order)?,
        None => next_order(persistence.count_shifts_on_date(schedule_id, date)?),
    };

    let shift = ScheduleShift::new(schedule_id, request.shift_type_id, date, order)
        .map_err(crate::error::translate_domain_error)?;
    let shift_id: i64 = persistence.create_shift(&shift)?;
    debug!(schedule_id, shift_id, "Shift created");

    let details = persistence.get_shift_details(schedule_id, shift_id)?;
    Ok(shift_response(&details))
}

/// Lists a schedule's shifts split into assigned and open slots, each
/// sorted by date then order.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule is absent.
pub fn list_shifts(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<ScheduleShiftsResponse, ApiError> {
    persistence.get_schedule(schedule_id)?;

    let details = persistence.list_shift_details(schedule_id)?;
    let mut shifts: Vec<ShiftResponse> = Vec::new();
    let mut unassigned_shifts: Vec<ShiftResponse> = Vec::new();
    for entry in &details {
        let response = shift_response(entry);
        if response.user.is_some() {
            shifts.push(response);
        } else {
            unassigned_shifts.push(response);
        }
    }

    Ok(ScheduleShiftsResponse {
        shifts,
        unassigned_shifts,
    })
}

/// Updates a shift's assignment and/or display order.
///
/// Assigning a user runs the conflict check against the shift's current
/// date and its shift type's template range; any overlap fails the whole
/// update. An explicit `null` unassigns with no check. `order` updates
/// independently and unconditionally.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift does not belong to the
/// schedule, `ShiftConflict` when the assignment clashes, and
/// `InvalidInput` for malformed fields.
pub fn update_shift(
    persistence: &mut Persistence,
    schedule_id: i64,
    shift_id: i64,
    request: &UpdateShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    let (shift, shift_type, _) = persistence.get_shift_details(schedule_id, shift_id)?;

    let mut changes = ShiftAssignmentChangeset::default();

    if let Some(assignment) = request.user_id {
        match assignment {
            Some(user_id) => {
                let conflicts =
                    persistence.find_conflicts(user_id, shift.date, shift_type.time_range)?;
                if !conflicts.is_empty() {
                    return Err(conflict_error(&conflicts));
                }
                changes.user_id = Some(Some(user_id));
            }
            None => changes.user_id = Some(None),
        }
    }

    if let Some(order) = request.order {
        changes.sort_order = Some(check_order_field("order", order)?);
    }

    persistence.update_shift_assignment(schedule_id, shift_id, &changes)?;

    let details = persistence.get_shift_details(schedule_id, shift_id)?;
    Ok(shift_response(&details))
}

/// Adjusts a shift's actual times.
///
/// Only active (published) shifts may be adjusted. Each provided field
/// overwrites its column; omitted fields are left untouched.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift does not belong to the
/// schedule and `InvalidInput` when the shift is inactive or a time is
/// malformed.
pub fn update_shift_times(
    persistence: &mut Persistence,
    schedule_id: i64,
    shift_id: i64,
    request: &UpdateShiftTimesRequest,
) -> Result<ShiftResponse, ApiError> {
    let shift = persistence.get_shift(schedule_id, shift_id)?;
    if !shift.is_active {
        return Err(ValidationError::ShiftNotActive.into());
    }

    let actual_start_time = request
        .actual_start_time
        .as_deref()
        .map(|value| parse_time_field("actualStartTime", value))
        .transpose()?;
    let actual_end_time = request
        .actual_end_time
        .as_deref()
        .map(|value| parse_time_field("actualEndTime", value))
        .transpose()?;

    persistence.update_shift_times(schedule_id, shift_id, actual_start_time, actual_end_time)?;

    let details = persistence.get_shift_details(schedule_id, shift_id)?;
    Ok(shift_response(&details))
}

/// Hard-deletes a shift.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift does not belong to the
/// schedule.
pub fn remove_shift(
    persistence: &mut Persistence,
    schedule_id: i64,
    shift_id: i64,
) -> Result<(), ApiError> {
    persistence.delete_shift(schedule_id, shift_id)?;
    Ok(())
}
