// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the rosterd staff-scheduling backend.
//!
//! This crate provides `SQLite` persistence for users, shift types,
//! schedules, and schedule shifts. It is built on Diesel with embedded
//! migrations.
//!
//! ## Shape
//!
//! - [`Persistence`] owns the connection and exposes the operations the
//!   service layer needs for single-statement work.
//! - The [`queries`] and [`mutations`] modules are public free functions
//!   over `&mut SqliteConnection`. Multi-statement units (the bulk
//!   coordinator, the publish workflow) open a transaction via
//!   [`Persistence::transaction`] and thread the transaction connection
//!   through those functions, so every read and write inside the unit is
//!   session-scoped and observes the unit's own uncommitted writes.
//!
//! ## Testing
//!
//! In-memory databases are namespaced by an atomic counter, so parallel
//! tests get deterministic isolation without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use std::path::Path;

// Re-exported so callers can thread transaction connections through the
// `queries`/`mutations` functions without depending on Diesel directly.
pub use diesel::SqliteConnection;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

use rosterd_domain::{Schedule, ScheduleShift, ScheduleStatus, ShiftType, TimeOfDay, TimeRange};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ConflictingShift, ScheduleChangeset, ShiftAssignmentChangeset, ShiftTypeChangeset, UserData,
};
pub use error::PersistenceError;
pub use queries::ShiftDetails;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the roster tables.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_roster_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Runs `f` inside one database transaction.
    ///
    /// The closure receives the transaction connection; pass it to the
    /// [`queries`]/[`mutations`] free functions so every statement of a
    /// multi-step unit shares the session. Returning `Err` rolls the whole
    /// unit back; the connection is released on every exit path.
    ///
    /// # Errors
    ///
    /// Returns the closure's error after rollback, or a database error if
    /// the transaction itself cannot be managed.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    {
        self.conn.transaction(f)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user with the given display fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(
        &mut self,
        first_name: &str,
        last_name: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, first_name, last_name, role)
    }

    /// Retrieves a user's display fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn get_user(&mut self, user_id: i64) -> Result<UserData, PersistenceError> {
        queries::get_user(&mut self.conn, user_id)
    }

    // ========================================================================
    // Shift types
    // ========================================================================

    /// Creates a shift type.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift_type(&mut self, shift_type: &ShiftType) -> Result<i64, PersistenceError> {
        mutations::create_shift_type(&mut self.conn, shift_type)
    }

    /// Retrieves a shift type by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift type does not exist.
    pub fn get_shift_type(&mut self, shift_type_id: i64) -> Result<ShiftType, PersistenceError> {
        queries::get_shift_type(&mut self.conn, shift_type_id)
    }

    /// Retrieves an active shift type by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift type does not exist or is
    /// soft-deleted.
    pub fn get_active_shift_type(
        &mut self,
        shift_type_id: i64,
    ) -> Result<ShiftType, PersistenceError> {
        queries::get_active_shift_type(&mut self.conn, shift_type_id)
    }

    /// Lists active shift types sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_shift_types(&mut self) -> Result<Vec<ShiftType>, PersistenceError> {
        queries::list_shift_types(&mut self.conn)
    }

    /// Applies a partial update to an active shift type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift type does not exist or is
    /// soft-deleted.
    pub fn update_shift_type(
        &mut self,
        shift_type_id: i64,
        changes: &ShiftTypeChangeset,
    ) -> Result<(), PersistenceError> {
        mutations::update_shift_type(&mut self.conn, shift_type_id, changes)
    }

    /// Soft-deletes a shift type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift type does not exist or is already
    /// soft-deleted.
    pub fn soft_delete_shift_type(&mut self, shift_type_id: i64) -> Result<(), PersistenceError> {
        mutations::soft_delete_shift_type(&mut self.conn, shift_type_id)
    }

    /// Counts active shifts referencing a shift type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_active_shifts_for_type(
        &mut self,
        shift_type_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::count_active_shifts_for_type(&mut self.conn, shift_type_id)
    }

    // ========================================================================
    // Schedules
    // ========================================================================

    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_schedule(&mut self, schedule: &Schedule) -> Result<i64, PersistenceError> {
        mutations::create_schedule(&mut self.conn, schedule)
    }

    /// Retrieves a schedule by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the schedule does not exist.
    pub fn get_schedule(&mut self, schedule_id: i64) -> Result<Schedule, PersistenceError> {
        queries::get_schedule(&mut self.conn, schedule_id)
    }

    /// Lists schedules, optionally filtered by status, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_schedules(
        &mut self,
        status: Option<ScheduleStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Schedule>, PersistenceError> {
        queries::list_schedules(&mut self.conn, status, limit, offset)
    }

    /// Finds a schedule whose date range intersects the given inclusive
    /// range, excluding `exclude_schedule_id` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn find_overlapping_schedule(
        &mut self,
        start_date: Date,
        end_date: Date,
        exclude_schedule_id: Option<i64>,
    ) -> Result<Option<Schedule>, PersistenceError> {
        queries::find_overlapping_schedule(&mut self.conn, start_date, end_date, exclude_schedule_id)
    }

    /// Finds the most recently published schedule other than the given one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn latest_published_schedule(
        &mut self,
        exclude_schedule_id: i64,
    ) -> Result<Option<Schedule>, PersistenceError> {
        queries::latest_published_schedule(&mut self.conn, exclude_schedule_id)
    }

    /// Applies a partial update to a schedule's name or date range.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the schedule does not exist.
    pub fn update_schedule(
        &mut self,
        schedule_id: i64,
        changes: &ScheduleChangeset,
    ) -> Result<(), PersistenceError> {
        mutations::update_schedule(&mut self.conn, schedule_id, changes)
    }

    /// Deletes a schedule and, via the cascade constraint, its shifts.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the schedule does not exist.
    pub fn delete_schedule(&mut self, schedule_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_schedule(&mut self.conn, schedule_id)
    }

    // ========================================================================
    // Schedule shifts
    // ========================================================================

    /// Creates a schedule shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift(&mut self, shift: &ScheduleShift) -> Result<i64, PersistenceError> {
        mutations::create_shift(&mut self.conn, shift)
    }

    /// Retrieves a shift by ID, scoped to a schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist under that schedule.
    pub fn get_shift(
        &mut self,
        schedule_id: i64,
        shift_id: i64,
    ) -> Result<ScheduleShift, PersistenceError> {
        queries::get_shift(&mut self.conn, schedule_id, shift_id)
    }

    /// Retrieves a shift with its shift type and assigned user's display
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist under that schedule.
    pub fn get_shift_details(
        &mut self,
        schedule_id: i64,
        shift_id: i64,
    ) -> Result<ShiftDetails, PersistenceError> {
        queries::get_shift_details(&mut self.conn, schedule_id, shift_id)
    }

    /// Lists all shifts of a schedule with details, sorted by date then
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_shift_details(
        &mut self,
        schedule_id: i64,
    ) -> Result<Vec<ShiftDetails>, PersistenceError> {
        queries::list_shift_details(&mut self.conn, schedule_id)
    }

    /// Lists `(date, shift_type_id)` pairs for every shift of a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn list_shift_dates_and_types(
        &mut self,
        schedule_id: i64,
    ) -> Result<Vec<(Date, i64)>, PersistenceError> {
        queries::list_shift_dates_and_types(&mut self.conn, schedule_id)
    }

    /// Counts the shifts of a schedule on one calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn count_shifts_on_date(
        &mut self,
        schedule_id: i64,
        date: Date,
    ) -> Result<i64, PersistenceError> {
        queries::count_shifts_on_date(&mut self.conn, schedule_id, date)
    }

    /// Finds every shift of a user on a calendar day whose time range
    /// overlaps the candidate range.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn find_conflicts(
        &mut self,
        user_id: i64,
        date: Date,
        candidate_range: TimeRange,
    ) -> Result<Vec<ConflictingShift>, PersistenceError> {
        queries::find_conflicts(&mut self.conn, user_id, date, candidate_range)
    }

    /// Applies a partial update to a shift's assignment fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist under that schedule.
    pub fn update_shift_assignment(
        &mut self,
        schedule_id: i64,
        shift_id: i64,
        changes: &ShiftAssignmentChangeset,
    ) -> Result<(), PersistenceError> {
        mutations::update_shift_assignment(&mut self.conn, schedule_id, shift_id, changes)
    }

    /// Overwrites a shift's actual times. Omitted fields are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist under that schedule.
    pub fn update_shift_times(
        &mut self,
        schedule_id: i64,
        shift_id: i64,
        actual_start_time: Option<TimeOfDay>,
        actual_end_time: Option<TimeOfDay>,
    ) -> Result<(), PersistenceError> {
        mutations::update_shift_times(
            &mut self.conn,
            schedule_id,
            shift_id,
            actual_start_time,
            actual_end_time,
        )
    }

    /// Hard-deletes a shift, scoped to a schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist under that schedule.
    pub fn delete_shift(&mut self, schedule_id: i64, shift_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_shift(&mut self.conn, schedule_id, shift_id)
    }
}
