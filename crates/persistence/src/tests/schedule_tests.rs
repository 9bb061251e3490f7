// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule and shift-type persistence tests.

use super::helpers::{date, new_persistence, seed_schedule, seed_shift, seed_shift_type, seed_user};
use crate::{PersistenceError, ScheduleChangeset, ShiftTypeChangeset, mutations};
use rosterd_domain::ScheduleStatus;

#[test]
fn test_schedule_round_trip() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let schedule_id = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let schedule = persistence.get_schedule(schedule_id).expect("get schedule");
    assert_eq!(schedule.schedule_id, Some(schedule_id));
    assert_eq!(schedule.name, "Week 10");
    assert_eq!(schedule.start_date, date("2026-03-02"));
    assert_eq!(schedule.end_date, date("2026-03-08"));
    assert_eq!(schedule.status, ScheduleStatus::Draft);
    assert_eq!(schedule.created_by, user_id);
}

#[test]
fn test_find_overlapping_schedule_matches_inclusive_ranges() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let schedule_id = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    let touching = persistence
        .find_overlapping_schedule(date("2026-03-08"), date("2026-03-14"), None)
        .expect("query");
    assert!(touching.is_some());

    let disjoint = persistence
        .find_overlapping_schedule(date("2026-03-09"), date("2026-03-15"), None)
        .expect("query");
    assert!(disjoint.is_none());

    let excluding_self = persistence
        .find_overlapping_schedule(date("2026-03-02"), date("2026-03-08"), Some(schedule_id))
        .expect("query");
    assert!(excluding_self.is_none());
}

#[test]
fn test_latest_published_schedule_picks_highest_end_date() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let older = seed_schedule(&mut persistence, "Week 8", "2026-02-16", "2026-02-22", user_id);
    let newer = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    let target = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    // Nothing published yet.
    let none = persistence
        .latest_published_schedule(target)
        .expect("query");
    assert!(none.is_none());

    persistence
        .transaction(|conn| mutations::set_schedule_status(conn, older, ScheduleStatus::Published))
        .expect("publish older");
    persistence
        .transaction(|conn| mutations::set_schedule_status(conn, newer, ScheduleStatus::Published))
        .expect("publish newer");

    let source = persistence
        .latest_published_schedule(target)
        .expect("query")
        .expect("a published source");
    assert_eq!(source.schedule_id, Some(newer));

    // The target itself is excluded even when published.
    persistence
        .transaction(|conn| mutations::set_schedule_status(conn, target, ScheduleStatus::Published))
        .expect("publish target");
    let source = persistence
        .latest_published_schedule(target)
        .expect("query")
        .expect("a published source");
    assert_eq!(source.schedule_id, Some(newer));
}

#[test]
fn test_list_schedules_filters_by_status() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let draft = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    let published = seed_schedule(&mut persistence, "Week 9", "2026-02-23", "2026-03-01", user_id);
    persistence
        .transaction(|conn| {
            mutations::set_schedule_status(conn, published, ScheduleStatus::Published)
        })
        .expect("publish");

    let drafts = persistence
        .list_schedules(Some(ScheduleStatus::Draft), 10, 0)
        .expect("list drafts");
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].schedule_id, Some(draft));

    let all = persistence.list_schedules(None, 10, 0).expect("list all");
    assert_eq!(all.len(), 2);
    // Newest period first.
    assert_eq!(all[0].schedule_id, Some(draft));
}

#[test]
fn test_delete_schedule_cascades_to_shifts() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    let schedule_id = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);
    let shift_id = seed_shift(&mut persistence, schedule_id, type_id, "2026-03-03", 1);

    persistence.delete_schedule(schedule_id).expect("delete");

    assert!(matches!(
        persistence.get_schedule(schedule_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.get_shift(schedule_id, shift_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_schedule_update_is_partial() {
    let mut persistence = new_persistence();
    let user_id = seed_user(&mut persistence);
    let schedule_id = seed_schedule(&mut persistence, "Week 10", "2026-03-02", "2026-03-08", user_id);

    persistence
        .update_schedule(
            schedule_id,
            &ScheduleChangeset {
                name: Some("Week 10 (revised)".to_string()),
                ..Default::default()
            },
        )
        .expect("update");

    let schedule = persistence.get_schedule(schedule_id).expect("get");
    assert_eq!(schedule.name, "Week 10 (revised)");
    assert_eq!(schedule.start_date, date("2026-03-02"));
}

#[test]
fn test_soft_deleted_shift_type_remains_resolvable() {
    let mut persistence = new_persistence();
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");

    persistence
        .soft_delete_shift_type(type_id)
        .expect("soft delete");

    // Gone from the active listing and the active lookup.
    let listed = persistence.list_shift_types().expect("list");
    assert!(listed.is_empty());
    assert!(matches!(
        persistence.get_active_shift_type(type_id),
        Err(PersistenceError::NotFound(_))
    ));

    // Still resolvable for shifts that reference it.
    let shift_type = persistence.get_shift_type(type_id).expect("get any");
    assert!(!shift_type.is_active);
}

#[test]
fn test_shift_type_update_rejects_soft_deleted() {
    let mut persistence = new_persistence();
    let type_id = seed_shift_type(&mut persistence, "Morning", "06:00", "10:00");
    persistence
        .soft_delete_shift_type(type_id)
        .expect("soft delete");

    let result = persistence.update_shift_type(
        type_id,
        &ShiftTypeChangeset {
            name: Some("Early".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
