// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule operations, including the publish workflow.

use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest};
use crate::validation::parse_date_field;
use rosterd_domain::{Schedule, ScheduleStatus};
use rosterd_persistence::{Persistence, ScheduleChangeset, mutations};

/// Creates a draft schedule.
///
/// At most one schedule may claim any given date: a date range that
/// intersects an existing schedule is rejected.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed dates or an inverted range and
/// `DomainRuleViolation` when the range overlaps an existing schedule.
pub fn create_schedule(
    persistence: &mut Persistence,
    request: &CreateScheduleRequest,
) -> Result<ScheduleResponse, ApiError> {
    let start_date = parse_date_field("startDate", &request.start_date)?;
    let end_date = parse_date_field("endDate", &request.end_date)?;

    let schedule = Schedule::new(
        request.name.clone(),
        start_date,
        end_date,
        request.created_by,
    )
    .map_err(translate_domain_error)?;

    if let Some(existing) = persistence.find_overlapping_schedule(start_date, end_date, None)? {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("schedule_date_overlap"),
            message: format!(
                "A schedule already exists for this date range ('{}')",
                existing.name
            ),
        });
    }

    let schedule_id: i64 = persistence.create_schedule(&schedule)?;
    let created = persistence.get_schedule(schedule_id)?;
    Ok(ScheduleResponse::from(&created))
}

/// Lists schedules, newest period first.
///
/// # Arguments
///
/// * `status` - Optional status filter (`draft` or `published`)
/// * `page` - 1-based page number
/// * `limit` - Page size
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown status value.
pub fn list_schedules(
    persistence: &mut Persistence,
    status: Option<&str>,
    page: i64,
    limit: i64,
) -> Result<Vec<ScheduleResponse>, ApiError> {
    let status: Option<ScheduleStatus> = status
        .map(str::parse)
        .transpose()
        .map_err(translate_domain_error)?;

    let page: i64 = page.max(1);
    let limit: i64 = limit.clamp(1, 100);
    let offset: i64 = (page - 1) * limit;

    let schedules = persistence.list_schedules(status, limit, offset)?;
    Ok(schedules.iter().map(ScheduleResponse::from).collect())
}

/// Retrieves a schedule.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule is absent.
pub fn get_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<ScheduleResponse, ApiError> {
    let schedule = persistence.get_schedule(schedule_id)?;
    Ok(ScheduleResponse::from(&schedule))
}

/// Applies a partial update to a schedule's name or date range.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule is absent and
/// `InvalidInput` for malformed dates.
pub fn update_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
    request: &UpdateScheduleRequest,
) -> Result<ScheduleResponse, ApiError> {
    let changes = ScheduleChangeset {
        name: request.name.clone(),
        start_date: request
            .start_date
            .as_deref()
            .map(|value| parse_date_field("startDate", value).map(rosterd_domain::format_date))
            .transpose()?,
        end_date: request
            .end_date
            .as_deref()
            .map(|value| parse_date_field("endDate", value).map(rosterd_domain::format_date))
            .transpose()?,
    };

    persistence.update_schedule(schedule_id, &changes)?;
    let updated = persistence.get_schedule(schedule_id)?;
    Ok(ScheduleResponse::from(&updated))
}

/// Deletes a schedule and its shifts.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule is absent.
pub fn delete_schedule(persistence: &mut Persistence, schedule_id: i64) -> Result<(), ApiError> {
    persistence.delete_schedule(schedule_id)?;
    Ok(())
}

/// Publishes a schedule: flips it to `published` and activates all of its
/// shifts, copying each shift type's template times into the actual-time
/// columns.
///
/// Both steps run in one transaction, so a schedule is never published
/// with inactive shifts. Idempotent: re-publishing rewrites the same
/// values.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule is absent.
pub fn publish_schedule(
    persistence: &mut Persistence,
    schedule_id: i64,
) -> Result<ScheduleResponse, ApiError> {
    let activated: usize = persistence.transaction(|conn| {
        mutations::set_schedule_status(conn, schedule_id, ScheduleStatus::Published)?;
        mutations::activate_shifts(conn, schedule_id)
    })?;

    info!(schedule_id, activated, "Schedule published");

    let published = persistence.get_schedule(schedule_id)?;
    Ok(ScheduleResponse::from(&published))
}
