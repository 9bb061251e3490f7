// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Copy-previous proposal tests.

use super::helpers::{new_persistence, seed_schedule, seed_shift_type, seed_user};
use crate::{
    ApiError, BulkCreateData, BulkOperation, BulkRequest, CreateShiftRequest, copy_previous,
    create_shift, execute_bulk, list_shifts, publish_schedule,
};

#[test]
fn test_requires_target_and_published_source() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");

    let missing_target = copy_previous(&mut persistence, 999);
    assert!(matches!(
        missing_target,
        Err(ApiError::ResourceNotFound { .. })
    ));

    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    let no_source = copy_previous(&mut persistence, target);
    assert!(matches!(no_source, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_draft_schedules_are_not_source_candidates() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    let draft = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    create_shift(
        &mut persistence,
        draft,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-02-23".to_string(),
            order: None,
        },
    )
    .expect("create");

    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    let result = copy_previous(&mut persistence, target);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_single_monday_shift_proposes_target_monday() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    // Source week (Mon 2026-02-23 .. Sun 2026-03-01) with one Monday shift.
    let source = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    create_shift(
        &mut persistence,
        source,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-02-23".to_string(),
            order: None,
        },
    )
    .expect("create");
    publish_schedule(&mut persistence, source).expect("publish");

    // Target week starts Monday 2026-03-02.
    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let proposal = copy_previous(&mut persistence, target).expect("proposal");
    assert_eq!(proposal.count, 1);
    assert_eq!(proposal.source_schedule_name, "Week 9");
    assert_eq!(proposal.shifts_to_create.len(), 1);
    assert_eq!(proposal.shifts_to_create[0].shift_type_id, type_id);
    assert_eq!(proposal.shifts_to_create[0].date, "2026-03-02");
    assert_eq!(proposal.shifts_to_create[0].order, 1);
}

#[test]
fn test_proposal_is_a_dry_run() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    let source = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    create_shift(
        &mut persistence,
        source,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-02-24".to_string(),
            order: None,
        },
    )
    .expect("create");
    publish_schedule(&mut persistence, source).expect("publish");

    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let before = list_shifts(&mut persistence, target).expect("list");
    let proposal = copy_previous(&mut persistence, target).expect("proposal");
    assert_eq!(proposal.count, 1);
    let after = list_shifts(&mut persistence, target).expect("list");

    assert_eq!(before.shifts, after.shifts);
    assert_eq!(before.unassigned_shifts, after.unassigned_shifts);
    assert!(after.unassigned_shifts.is_empty());
}

#[test]
fn test_empty_source_returns_zero_count() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");

    let source = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    publish_schedule(&mut persistence, source).expect("publish");
    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let proposal = copy_previous(&mut persistence, target).expect("proposal");
    assert_eq!(proposal.count, 0);
    assert!(proposal.shifts_to_create.is_empty());
    assert_eq!(proposal.source_schedule_name, "Week 9");
}

#[test]
fn test_source_is_most_recent_published_by_end_date() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    let older = seed_schedule(&mut persistence, "Week 8", "2026-02-16", "2026-02-22", user_id);
    create_shift(
        &mut persistence,
        older,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-02-16".to_string(),
            order: None,
        },
    )
    .expect("create");
    publish_schedule(&mut persistence, older).expect("publish");

    let newer = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    publish_schedule(&mut persistence, newer).expect("publish");

    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    // Week 9 has the highest end date even though it is empty; the
    // proposal comes from it, not from the shift-bearing Week 8.
    let proposal = copy_previous(&mut persistence, target).expect("proposal");
    assert_eq!(proposal.source_schedule_name, "Week 9");
    assert_eq!(proposal.count, 0);
}

#[test]
fn test_proposal_round_trips_through_bulk_create() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    let source = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    for date in ["2026-02-23", "2026-02-23", "2026-02-25"] {
        create_shift(
            &mut persistence,
            source,
            &CreateShiftRequest {
                shift_type_id: type_id,
                date: date.to_string(),
                order: None,
            },
        )
        .expect("create");
    }
    publish_schedule(&mut persistence, source).expect("publish");

    let target =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    let proposal = copy_previous(&mut persistence, target).expect("proposal");
    assert_eq!(proposal.count, 3);

    // Apply the proposal the way the client does: one bulk create batch.
    let operations: Vec<BulkOperation> = proposal
        .shifts_to_create
        .iter()
        .map(|p| BulkOperation::Create {
            data: BulkCreateData {
                shift_type_id: p.shift_type_id,
                date: p.date.clone(),
                order: Some(p.order),
                user_id: None,
            },
            client_id: None,
        })
        .collect();
    let response = execute_bulk(&mut persistence, target, &BulkRequest { operations })
        .expect("bulk");
    assert!(response.all_successful);

    let listing = list_shifts(&mut persistence, target).expect("list");
    assert_eq!(listing.unassigned_shifts.len(), 3);
}
