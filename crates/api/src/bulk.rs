// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bulk-mutation coordinator.
//!
//! A batch of create/update/delete operations against one schedule runs
//! inside one database transaction, in request order. Each operation's
//! outcome is captured individually without aborting the loop; once the
//! whole batch has been attempted, any failure rolls the transaction back
//! and every result is rewritten to failed, so a drag-and-drop edit never
//! half-applies. Failure is reported in the response body, never as an
//! error, because the caller needs the full per-operation breakdown.

use tracing::info;

use crate::error::ApiError;
use crate::request_response::{
    BulkCreateData, BulkOperation, BulkOperationResult, BulkRequest, BulkResponse, BulkUpdateData,
    shift_response,
};
use crate::shifts::{conflict_error, next_order};
use crate::validation::{check_order_field, parse_date_field};
use rosterd_domain::ScheduleShift;
use rosterd_persistence::{
    Persistence, PersistenceError, ShiftAssignmentChangeset, SqliteConnection, mutations, queries,
};

/// The uniform reason written over individually-successful results when
/// the batch aborts.
const ABORT_REASON: &str = "Transaction aborted due to other operation failures";

/// Executes an ordered batch of shift operations atomically.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the schedule itself does not exist; this
/// is checked once before the batch starts. Operation-level failures are
/// captured in the response, not returned as errors.
pub fn execute_bulk(
    persistence: &mut Persistence,
    schedule_id: i64,
    request: &BulkRequest,
) -> Result<BulkResponse, ApiError> {
    persistence.get_schedule(schedule_id)?;

    let total_operations: usize = request.operations.len();
    let mut results: Vec<BulkOperationResult> = Vec::with_capacity(total_operations);
    let mut successful_operations: usize = 0;
    let mut failed_operations: usize = 0;

    let transaction_outcome = persistence.transaction(|conn| {
        for operation in &request.operations {
            let outcome: Result<BulkOperationResult, ApiError> = match operation {
                BulkOperation::Create { data, client_id } => {
                    process_create(conn, schedule_id, data, client_id.clone())
                }
                BulkOperation::Update {
                    id,
                    data,
                    client_id,
                } => process_update(conn, schedule_id, *id, data, client_id.clone()),
                BulkOperation::Delete { id, client_id } => {
                    process_delete(conn, schedule_id, *id, client_id.clone())
                }
            };

            match outcome {
                Ok(result) => {
                    successful_operations += 1;
                    results.push(result);
                }
                Err(error) => {
                    failed_operations += 1;
                    results.push(BulkOperationResult {
                        kind: operation.kind(),
                        success: false,
                        client_id: operation.client_id().map(str::to_string),
                        id: None,
                        data: None,
                        error: Some(error.to_string()),
                    });
                }
            }
        }

        if failed_operations > 0 {
            Err(PersistenceError::BulkAborted { failed_operations })
        } else {
            Ok(())
        }
    });

    if transaction_outcome.is_err() {
        // Nothing persisted; individually-successful results are stale.
        for result in &mut results {
            if result.success {
                result.success = false;
                result.data = None;
                result.error = Some(ABORT_REASON.to_string());
            }
        }
        successful_operations = 0;
        failed_operations = results.len();
    }

    info!(
        schedule_id,
        total_operations,
        successful_operations,
        failed_operations,
        "Bulk batch finished"
    );

    Ok(BulkResponse {
        results,
        total_operations,
        successful_operations,
        failed_operations,
        all_successful: failed_operations == 0,
    })
}

/// Creates a shift inside the batch transaction.
///
/// Unlike the single-shift endpoint, bulk creation may carry an immediate
/// assignment; it is conflict-checked against the transaction's state.
fn process_create(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    data: &BulkCreateData,
    client_id: Option<String>,
) -> Result<BulkOperationResult, ApiError> {
    let shift_type = queries::get_shift_type(conn, data.shift_type_id)?;
    let date = parse_date_field("date", &data.date)?;

    if let Some(user_id) = data.user_id {
        let conflicts = queries::find_conflicts(conn, user_id, date, shift_type.time_range)?;
        if !conflicts.is_empty() {
            return Err(conflict_error(&conflicts));
        }
    }

    let order: i32 = match data.order {
        Some(order) => check_order_field("order", order)?,
        None => next_order(queries::count_shifts_on_date(conn, schedule_id, date)?),
    };

    let mut shift = ScheduleShift::new(schedule_id, data.shift_type_id, date, order)
        .map_err(crate::error::translate_domain_error)?;
    shift.user_id = data.user_id;

    let shift_id: i64 = mutations::create_shift(conn, &shift)?;
    let details = queries::get_shift_details(conn, schedule_id, shift_id)?;

    Ok(BulkOperationResult {
        kind: crate::request_response::BulkOperationKind::Create,
        success: true,
        client_id,
        id: Some(shift_id),
        data: Some(shift_response(&details)),
        error: None,
    })
}

/// Updates a shift inside the batch transaction.
///
/// May move the shift's date; an assignment in the same operation is
/// conflict-checked against the target date, not the original one.
fn process_update(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
    data: &BulkUpdateData,
    client_id: Option<String>,
) -> Result<BulkOperationResult, ApiError> {
    let (shift, shift_type, _) = queries::get_shift_details(conn, schedule_id, shift_id)?;

    let mut changes = ShiftAssignmentChangeset::default();

    let target_date = match data.date.as_deref() {
        Some(value) => {
            let date = parse_date_field("date", value)?;
            changes.date = Some(rosterd_domain::format_date(date));
            date
        }
        None => shift.date,
    };

    if let Some(assignment) = data.user_id {
        match assignment {
            Some(user_id) => {
                let conflicts =
                    queries::find_conflicts(conn, user_id, target_date, shift_type.time_range)?;
                if !conflicts.is_empty() {
                    return Err(conflict_error(&conflicts));
                }
                changes.user_id = Some(Some(user_id));
            }
            None => changes.user_id = Some(None),
        }
    }

    if let Some(order) = data.order {
        changes.sort_order = Some(check_order_field("order", order)?);
    }

    mutations::update_shift_assignment(conn, schedule_id, shift_id, &changes)?;
    let details = queries::get_shift_details(conn, schedule_id, shift_id)?;

    Ok(BulkOperationResult {
        kind: crate::request_response::BulkOperationKind::Update,
        success: true,
        client_id,
        id: Some(shift_id),
        data: Some(shift_response(&details)),
        error: None,
    })
}

/// Deletes a shift inside the batch transaction.
fn process_delete(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    shift_id: i64,
    client_id: Option<String>,
) -> Result<BulkOperationResult, ApiError> {
    mutations::delete_shift(conn, schedule_id, shift_id)?;

    Ok(BulkOperationResult {
        kind: crate::request_response::BulkOperationKind::Delete,
        success: true,
        client_id,
        id: Some(shift_id),
        data: None,
        error: None,
    })
}
