// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for operation tests.

use rosterd_domain::{ColorIndex, Schedule, ShiftType, TimeRange, parse_date};
use rosterd_persistence::Persistence;

pub(crate) fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory persistence")
}

pub(crate) fn seed_user(persistence: &mut Persistence, first: &str, last: &str) -> i64 {
    persistence
        .create_user(first, last, "employee")
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
        ColorIndex::new(2).expect("valid color"),
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
    let schedule = Schedule::new(
        name.to_string(),
        parse_date(start).expect("valid date"),
        parse_date(end).expect("valid date"),
        created_by,
    )
    .expect("valid schedule");
    persistence
        .create_schedule(&schedule)
        .expect("create schedule")
}
