// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekday pattern extraction and replication.
//!
//! The copy-previous-week feature reduces a source schedule's shifts to a
//! frequency table keyed by `(weekday, shift type)` and projects that table
//! onto the seven days of a target week. Projection is a pure computation;
//! persisting the proposed shifts is the caller's decision.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, Duration};

/// One proposed shift slot produced by projecting a [`WeekPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedShift {
    /// The shift-type template to instantiate.
    pub shift_type_id: i64,
    /// The target calendar day.
    pub date: Date,
    /// Display order, 1-based and reset per shift type per day.
    pub sort_order: i32,
}

/// A per-weekday, per-shift-type frequency table.
///
/// Weekdays are numbered 0-6 from Sunday, matching the stored convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPattern {
    /// Occurrence counts keyed by `(weekday, shift_type_id)`.
    counts: BTreeMap<(u8, i64), u32>,
}

impl WeekPattern {
    /// Builds a pattern from `(date, shift_type_id)` pairs.
    #[must_use]
    pub fn from_shifts<I>(shifts: I) -> Self
    where
        I: IntoIterator<Item = (Date, i64)>,
    {
        let mut counts: BTreeMap<(u8, i64), u32> = BTreeMap::new();
        for (date, shift_type_id) in shifts {
            let weekday: u8 = date.weekday().number_days_from_sunday();
            *counts.entry((weekday, shift_type_id)).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Returns whether the pattern contains no shifts at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Projects the pattern onto the week starting at `week_start`.
    ///
    /// For each of the seven days, every `(shift_type, count)` entry for
    /// that day's weekday emits `count` proposals ordered 1..=count.
    /// Enumeration is deterministic: days in calendar order, shift types in
    /// ascending id order within a day.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows while enumerating the
    /// target week.
    pub fn project(&self, week_start: Date) -> Result<Vec<ProposedShift>, DomainError> {
        let mut proposals: Vec<ProposedShift> = Vec::new();

        for day_offset in 0..7_i64 {
            let date: Date = week_start
                .checked_add(Duration::days(day_offset))
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: "enumerating the target week".to_string(),
                })?;
            let weekday: u8 = date.weekday().number_days_from_sunday();

            for (&(_, shift_type_id), &count) in self
                .counts
                .range((weekday, i64::MIN)..=(weekday, i64::MAX))
            {
                for slot in 1..=count {
                    proposals.push(ProposedShift {
                        shift_type_id,
                        date,
                        sort_order: i32::try_from(slot).unwrap_or(i32::MAX),
                    });
                }
            }
        }

        Ok(proposals)
    }
}
