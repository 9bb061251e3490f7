// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule and shift-type operation tests.

use super::helpers::{new_persistence, seed_schedule, seed_shift_type, seed_user};
use crate::{
    ApiError, CreateScheduleRequest, CreateShiftRequest, CreateShiftTypeRequest,
    UpdateScheduleRequest, create_schedule, create_shift, create_shift_type, delete_shift_type,
    get_shift_type, list_schedules, list_shifts, publish_schedule, update_schedule,
};

fn schedule_request(name: &str, start: &str, end: &str, created_by: i64) -> CreateScheduleRequest {
    CreateScheduleRequest {
        name: name.to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        created_by,
    }
}

#[test]
fn test_create_schedule_rejects_overlapping_range() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");

    create_schedule(
        &mut persistence,
        &schedule_request("Week 10", "2026-03-02", "2026-03-08", user_id),
    )
    .expect("create");

    // Sharing even one day is a clash.
    let overlapping = create_schedule(
        &mut persistence,
        &schedule_request("Week 10b", "2026-03-08", "2026-03-14", user_id),
    );
    assert!(matches!(
        overlapping,
        Err(ApiError::DomainRuleViolation { .. })
    ));

    // A disjoint week is fine.
    create_schedule(
        &mut persistence,
        &schedule_request("Week 11", "2026-03-09", "2026-03-15", user_id),
    )
    .expect("create disjoint");
}

#[test]
fn test_create_schedule_rejects_inverted_range() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");

    let inverted = create_schedule(
        &mut persistence,
        &schedule_request("Week 10", "2026-03-08", "2026-03-02", user_id),
    );
    assert!(matches!(inverted, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_list_schedules_filters_and_validates_status() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let published =
        seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    publish_schedule(&mut persistence, published).expect("publish");

    let drafts = list_schedules(&mut persistence, Some("draft"), 1, 10).expect("list");
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Week 10");

    let bogus = list_schedules(&mut persistence, Some("archived"), 1, 10);
    assert!(matches!(bogus, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_publish_activates_all_shifts_and_is_idempotent() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Night", "22:00", "04:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    for date in ["2026-03-02", "2026-03-03"] {
        create_shift(
            &mut persistence,
            schedule_id,
            &CreateShiftRequest {
                shift_type_id: type_id,
                date: date.to_string(),
                order: None,
            },
        )
        .expect("create");
    }

    let published = publish_schedule(&mut persistence, schedule_id).expect("publish");
    assert_eq!(published.status, "published");

    let listing = list_shifts(&mut persistence, schedule_id).expect("list");
    let first_pass: Vec<_> = listing.unassigned_shifts.clone();
    assert_eq!(first_pass.len(), 2);
    for shift in &first_pass {
        assert!(shift.is_active);
        assert_eq!(shift.actual_start_time.as_deref(), Some("22:00"));
        assert_eq!(shift.actual_end_time.as_deref(), Some("04:00"));
    }

    // Publishing again rewrites the same state.
    publish_schedule(&mut persistence, schedule_id).expect("republish");
    let listing = list_shifts(&mut persistence, schedule_id).expect("list");
    assert_eq!(listing.unassigned_shifts, first_pass);
}

#[test]
fn test_publish_missing_schedule_is_not_found() {
    let mut persistence = new_persistence();
    let result = publish_schedule(&mut persistence, 999);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_schedule_is_partial() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let updated = update_schedule(
        &mut persistence,
        schedule_id,
        &UpdateScheduleRequest {
            name: Some("Week 10 (final)".to_string()),
            ..Default::default()
        },
    )
    .expect("update");
    assert_eq!(updated.name, "Week 10 (final)");
    assert_eq!(updated.start_date, "2026-03-02");
}

#[test]
fn test_shift_type_create_validates_times_and_color() {
    let mut persistence = new_persistence();

    let bad_time = create_shift_type(
        &mut persistence,
        &CreateShiftTypeRequest {
            name: "Broken".to_string(),
            start_time: "26:00".to_string(),
            end_time: "10:00".to_string(),
            color_index: None,
        },
    );
    assert!(matches!(bad_time, Err(ApiError::InvalidInput { .. })));

    let bad_color = create_shift_type(
        &mut persistence,
        &CreateShiftTypeRequest {
            name: "Broken".to_string(),
            start_time: "06:00".to_string(),
            end_time: "10:00".to_string(),
            color_index: Some(12),
        },
    );
    assert!(matches!(bad_color, Err(ApiError::InvalidInput { .. })));

    let created = create_shift_type(
        &mut persistence,
        &CreateShiftTypeRequest {
            name: "Morning".to_string(),
            start_time: "06:00".to_string(),
            end_time: "10:00".to_string(),
            color_index: Some(3),
        },
    )
    .expect("create");
    assert_eq!(created.color_index, 3);
    assert!(created.is_active);
}

#[test]
fn test_shift_type_delete_guard_and_soft_delete() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence, "Alex", "Moreau");
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    let schedule_id =
        seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    create_shift(
        &mut persistence,
        schedule_id,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-03-03".to_string(),
            order: None,
        },
    )
    .expect("create");

    // Draft shifts are inactive, so deletion is still allowed.
    delete_shift_type(&mut persistence, type_id).expect("delete unused");

    // Re-create the situation with a published schedule.
    let type_id = seed_shift_type(&mut persistence, "Evening", "16:00", "20:00");
    let other_schedule =
        seed_schedule(&mut persistence, "Week 11", "2026-03-09", "2026-03-15", user_id);
    create_shift(
        &mut persistence,
        other_schedule,
        &CreateShiftRequest {
            shift_type_id: type_id,
            date: "2026-03-10".to_string(),
            order: None,
        },
    )
    .expect("create");
    publish_schedule(&mut persistence, other_schedule).expect("publish");

    let guarded = delete_shift_type(&mut persistence, type_id);
    assert!(matches!(guarded, Err(ApiError::DomainRuleViolation { .. })));

    // The type is still retrievable after the refused delete.
    let still_there = get_shift_type(&mut persistence, type_id).expect("get");
    assert!(still_there.is_active);
}
