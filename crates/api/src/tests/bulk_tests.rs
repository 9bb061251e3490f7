// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk coordinator tests: ordering, per-operation results, and the
//! all-or-nothing commit rule.

use super::helpers::{new_persistence, seed_schedule, seed_shift_type, seed_user};
use crate::{
    ApiError, BulkCreateData, BulkOperation, BulkRequest, BulkUpdateData, create_shift,
    execute_bulk, list_shifts, CreateShiftRequest, UpdateShiftRequest, update_shift,
};

fn bulk_create(shift_type_id: i64, date: &str, client_id: &str) -> BulkOperation {
    BulkOperation::Create {
        data: BulkCreateData {
            shift_type_id,
            date: date.to_string(),
            order: None,
            user_id: None,
        },
        client_id: Some(client_id.to_string()),
    }
}

#[test]
fn test_bulk_fails_fast_when_schedule_is_missing() {
    let mut persistence = new_persistence();
    let result = execute_bulk(
        &mut persistence,
        999,
        &BulkRequest {
            operations: Vec::new(),
        },
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_successful_batch_commits_and_echoes_client_ids() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![
                bulk_create(type_id, "2026-03-03", "c-1"),
                bulk_create(type_id, "2026-03-03", "c-2"),
            ],
        },
    )
    .expect("bulk");

    assert!(response.all_successful);
    assert_eq!(response.total_operations, 2);
    assert_eq!(response.successful_operations, 2);
    assert_eq!(response.failed_operations, 0);
    assert_eq!(response.results[0].client_id.as_deref(), Some("c-1"));
    assert_eq!(response.results[1].client_id.as_deref(), Some("c-2"));

    // Orders were computed inside the transaction against its own writes.
    let orders: Vec<i32> = response
        .results
        .iter()
        .map(|r| r.data.as_ref().expect("shift data").order)
        .collect();
    assert_eq!(orders, vec![1, 2]);

    let listing = list_shifts(&mut persistence, schedule_id).expect("list");
    assert_eq!(listing.unassigned_shifts.len(), 2);
}

#[test]
fn test_failed_operation_aborts_the_whole_batch() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![
                bulk_create(type_id, "2026-03-03", "c-1"),
                // Nonexistent shift type: this operation fails.
                bulk_create(999, "2026-03-03", "c-2"),
                bulk_create(type_id, "2026-03-04", "c-3"),
            ],
        },
    )
    .expect("bulk");

    assert!(!response.all_successful);
    assert_eq!(response.total_operations, 3);
    assert_eq!(response.successful_operations, 0);
    assert_eq!(response.failed_operations, 3);

    // Every result is failed; the individually-fine ones carry the abort
    // reason, the broken one keeps its own error.
    assert!(response.results.iter().all(|r| !r.success));
    assert!(
        response.results[0]
            .error
            .as_deref()
            .expect("error message")
            .contains("aborted")
    );
    assert!(
        response.results[1]
            .error
            .as_deref()
            .expect("error message")
            .contains("Shift type not found")
    );

    // Nothing persisted.
    let listing = list_shifts(&mut persistence, schedule_id).expect("list");
    assert!(listing.shifts.is_empty());
    assert!(listing.unassigned_shifts.is_empty());
}

#[test]
fn test_operations_run_in_request_order() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let seeded = create_shift(
        &mut persistence,
        schedule_id,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-03-03".to_string(),
            order: None,
        },
    )
    .expect("seed shift");

    // Delete then re-create on the same day: the create runs after the
    // delete, so its computed order restarts at 1.
    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![
                BulkOperation::Delete {
                    id: seeded.id,
                    client_id: None,
                },
                bulk_create(type_id, "2026-03-03", "recreate"),
            ],
        },
    )
    .expect("bulk");

    assert!(response.all_successful);
    let recreated = response.results[1].data.as_ref().expect("shift data");
    assert_eq!(recreated.order, 1);
}

#[test]
fn test_bulk_create_with_assignment_checks_conflicts_in_session() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let day_type = seed_shift_type(&mut persistence, "Day", "09:00", "17:00");
    let evening_type = seed_shift_type(&mut persistence, "Evening", "16:00", "20:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![
                BulkOperation::Create {
                    data: BulkCreateData {
                        shift_type_id: day_type,
                        date: "2026-03-03".to_string(),
                        order: None,
                        user_id: Some(user_id),
                    },
                    client_id: None,
                },
                // Overlaps the uncommitted assignment above; the check
                // must see it through the shared session.
                BulkOperation::Create {
                    data: BulkCreateData {
                        shift_type_id: evening_type,
                        date: "2026-03-03".to_string(),
                        order: None,
                        user_id: Some(user_id),
                    },
                    client_id: None,
                },
            ],
        },
    )
    .expect("bulk");

    assert!(!response.all_successful);
    assert!(
        response.results[1]
            .error
            .as_deref()
            .expect("error message")
            .contains("conflicting shifts")
    );

    let listing = list_shifts(&mut persistence, schedule_id).expect("list");
    assert!(listing.shifts.is_empty());
}

#[test]
fn test_bulk_update_conflict_check_follows_moved_date() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let day_type = seed_shift_type(&mut persistence, "Day", "09:00", "17:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    // Existing assignment on the 4th.
    let existing = create_shift(
        &mut persistence,
        schedule_id,
        &CreateShiftRequest {
            shift_type_id: day_type,
            date: "2026-03-04".to_string(),
            order: None,
        },
    )
    .expect("create");
    update_shift(
        &mut persistence,
        schedule_id,
        existing.id,
        &UpdateShiftRequest {
            user_id: Some(Some(user_id)),
            order: None,
        },
    )
    .expect("assign");

    // Unassigned shift on the 3rd.
    let movable = create_shift(
        &mut persistence,
        schedule_id,
        &CreateShiftRequest {
            shift_type_id: day_type,
            date: "2026-03-03".to_string(),
            order: None,
        },
    )
    .expect("create");

    // Moving it to the 4th and assigning the same user must clash there.
    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![BulkOperation::Update {
                id: movable.id,
                data: BulkUpdateData {
                    date: Some("2026-03-04".to_string()),
                    user_id: Some(Some(user_id)),
                    order: None,
                },
                client_id: None,
            }],
        },
    )
    .expect("bulk");

    assert!(!response.all_successful);

    // The same move to a free day succeeds.
    let response = execute_bulk(
        &mut persistence,
        schedule_id,
        &BulkRequest {
            operations: vec![BulkOperation::Update {
                id: movable.id,
                data: BulkUpdateData {
                    date: Some("2026-03-05".to_string()),
                    user_id: Some(Some(user_id)),
                    order: None,
                },
                client_id: None,
            }],
        },
    )
    .expect("bulk");
    assert!(response.all_successful);
    let moved = response.results[0].data.as_ref().expect("shift data");
    assert_eq!(moved.date, "2026-03-05");
    assert_eq!(moved.user.as_ref().map(|u| u.id), Some(user_id));
}

#[test]
fn test_unknown_operation_type_is_a_deserialization_error() {
    let payload = serde_json::json!({
        "operations": [
            { "type": "upsert", "data": { "shiftTypeId": 1, "date": "2026-03-03" } }
        ]
    });
    let parsed: Result<BulkRequest, _> = serde_json::from_value(payload);
    assert!(parsed.is_err());
}
