// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift-type operations.
//!
//! Shift types are soft-deleted: schedule shifts keep referencing them, so
//! deletion only hides the type from new work, and a type still in use by
//! active shifts cannot be removed at all.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CreateShiftTypeRequest, ShiftTypeResponse, UpdateShiftTypeRequest,
};
use crate::validation::parse_time_field;
use rosterd_domain::{ColorIndex, ShiftType, TimeRange};
use rosterd_persistence::{Persistence, ShiftTypeChangeset};

/// Creates a shift type.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed times or an out-of-range color
/// index.
pub fn create_shift_type(
    persistence: &mut Persistence,
    request: &CreateShiftTypeRequest,
) -> Result<ShiftTypeResponse, ApiError> {
    let time_range = TimeRange::new(
        parse_time_field("startTime", &request.start_time)?,
        parse_time_field("endTime", &request.end_time)?,
    );
    let color_index =
        ColorIndex::new(request.color_index.unwrap_or(0)).map_err(translate_domain_error)?;

    let shift_type = ShiftType::new(request.name.clone(), time_range, color_index);
    let shift_type_id: i64 = persistence.create_shift_type(&shift_type)?;

    let created = persistence.get_shift_type(shift_type_id)?;
    Ok(ShiftTypeResponse::from(&created))
}

/// Lists active shift types sorted by name.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_shift_types(
    persistence: &mut Persistence,
) -> Result<Vec<ShiftTypeResponse>, ApiError> {
    let shift_types = persistence.list_shift_types()?;
    Ok(shift_types.iter().map(ShiftTypeResponse::from).collect())
}

/// Retrieves an active shift type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift type is absent or soft-deleted.
pub fn get_shift_type(
    persistence: &mut Persistence,
    shift_type_id: i64,
) -> Result<ShiftTypeResponse, ApiError> {
    let shift_type = persistence.get_active_shift_type(shift_type_id)?;
    Ok(ShiftTypeResponse::from(&shift_type))
}

/// Applies a partial update to an active shift type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the shift type is absent or soft-deleted
/// and `InvalidInput` for malformed fields.
pub fn update_shift_type(
    persistence: &mut Persistence,
    shift_type_id: i64,
    request: &UpdateShiftTypeRequest,
) -> Result<ShiftTypeResponse, ApiError> {
    let color_index: Option<i32> = request
        .color_index
        .map(|raw| ColorIndex::new(raw).map(|color| i32::from(color.value())))
        .transpose()
        .map_err(translate_domain_error)?;

    let changes = ShiftTypeChangeset {
        name: request.name.clone(),
        start_time: request
            .start_time
            .as_deref()
            .map(|value| parse_time_field("startTime", value).map(|t| t.to_string()))
            .transpose()?,
        end_time: request
            .end_time
            .as_deref()
            .map(|value| parse_time_field("endTime", value).map(|t| t.to_string()))
            .transpose()?,
        color_index,
    };

    persistence.update_shift_type(shift_type_id, &changes)?;
    let updated = persistence.get_shift_type(shift_type_id)?;
    Ok(ShiftTypeResponse::from(&updated))
}

/// Soft-deletes a shift type.
///
/// # Errors
///
/// Returns `DomainRuleViolation` while active shifts reference the type
/// and `ResourceNotFound` if it is absent or already soft-deleted.
pub fn delete_shift_type(
    persistence: &mut Persistence,
    shift_type_id: i64,
) -> Result<(), ApiError> {
    let in_use: i64 = persistence.count_active_shifts_for_type(shift_type_id)?;
    if in_use > 0 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("shift_type_in_use"),
            message: String::from("Cannot delete shift type that is used in published schedules"),
        });
    }

    persistence.soft_delete_shift_type(shift_type_id)?;
    Ok(())
}
