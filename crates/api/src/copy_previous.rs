// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The copy-previous-week proposal.

use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{CopyPreviousResponse, ProposedShiftResponse};
use rosterd_domain::{WeekPattern, format_date};
use rosterd_persistence::Persistence;

/// Proposes a week of shifts for `schedule_id` by replicating the weekday
/// pattern of the most recently published schedule.
///
/// Source selection: the published schedule with the highest end date,
/// excluding the target itself. A source without shifts yields an empty
/// proposal rather than an error.
///
/// This is a dry run: nothing is written. The client reviews the proposal
/// and applies it with a separate bulk create.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the target schedule is absent or no
/// published source exists.
pub fn copy_previous(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<CopyPreviousResponse, ApiError> {
    let target = persistence.get_schedule(schedule_id)?;

    let source = persistence
        .latest_published_schedule(schedule_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Published schedule"),
            message: String::from("No published schedule found to copy from"),
        })?;
    let source_id: i64 = source.schedule_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored schedule is missing its identifier"),
    })?;

    let source_shifts = persistence.list_shift_dates_and_types(source_id)?;
    if source_shifts.is_empty() {
        return Ok(CopyPreviousResponse {
            message: String::from("No shifts found in the most recent published schedule"),
            count: 0,
            shifts_to_create: Vec::new(),
            source_schedule_name: source.name,
        });
    }

    let pattern = WeekPattern::from_shifts(source_shifts);
    let proposals = pattern
        .project(target.start_date)
        .map_err(translate_domain_error)?;

    let shifts_to_create: Vec<ProposedShiftResponse> = proposals
        .into_iter()
        .map(|proposal| ProposedShiftResponse {
            shift_type_id: proposal.shift_type_id,
            date: format_date(proposal.date),
            order: proposal.sort_order,
        })
        .collect();
    let count: usize = shifts_to_create.len();

    info!(
        schedule_id,
        source_id, count, "Copy-previous proposal generated"
    );

    Ok(CopyPreviousResponse {
        message: format!(
            "Found {count} shifts to copy from \"{}\" based on shift patterns",
            source.name
        ),
        count,
        shifts_to_create,
        source_schedule_name: source.name,
    })
}
