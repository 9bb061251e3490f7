// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for persistence tests.

use crate::Persistence;
use rosterd_domain::{ColorIndex, Schedule, ScheduleShift, ShiftType, TimeRange, parse_date};
use time::Date;

pub(crate) fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory persistence")
}

pub(crate) fn date(value: &str) -> Date {
    parse_date(value).expect("valid date")
}

pub(crate) fn seed_user(persistence: &mut Persistence) -> i64 {
    persistence
        .create_user("Alex", "Moreau", "employee")
        .expect("create user")
}

pub(crate) fn seed_shift_type(
    persistence: &mut Persistence,
    name: &str,
    start: &str,
    end: &str,
) -> i64 {
    let shift_type = ShiftType::new(
        name.to_string(),
        TimeRange::parse(start, end).expect("valid range"),
        ColorIndex::new(1).expect("valid color"),
    );
    persistence
        .create_shift_type(&shift_type)
        .expect("create shift type")
}

pub(crate) fn seed_schedule(
    persistence: &mut Persistence,
    name: &str,
    start: &str,
    end: &str,
    created_by: i64,
) -> i64 {
    let schedule = Schedule::new(name.to_string(), date(start), date(end), created_by)
        .expect("valid schedule");
    persistence
        .create_schedule(&schedule)
        .expect("create schedule")
}

pub(crate) fn seed_shift(
    persistence: &mut Persistence,
    schedule_id: i64,
    shift_type_id: i64,
    day: &str,
    sort_order: i32,
) -> i64 {
    let shift =
        ScheduleShift::new(schedule_id, shift_type_id, date(day), sort_order).expect("valid shift");
    persistence.create_shift(&shift).expect("create shift")
}
