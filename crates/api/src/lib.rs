// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation layer for the rosterd staff-scheduling backend.
//!
//! Each HTTP endpoint maps to one function in this crate taking a
//! `&mut Persistence` plus a request value and returning a response value
//! or an [`ApiError`]. The transport layer stays thin: routing, JSON
//! (de)serialization, and status-code mapping only.
//!
//! Multi-statement operations (the bulk coordinator and the publish
//! workflow) open a single transaction and thread its connection through
//! the persistence free functions, so their reads observe their own
//! uncommitted writes and the whole unit commits or rolls back atomically.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod bulk;
mod copy_previous;
mod error;
mod request_response;
mod schedules;
mod shift_types;
mod shifts;
mod validation;

#[cfg(test)]
mod tests;

pub use bulk::execute_bulk;
pub use copy_previous::copy_previous;
pub use error::{ApiError, translate_domain_error};
pub use request_response::{
    BulkCreateData, BulkOperation, BulkOperationKind, BulkOperationResult, BulkRequest,
    BulkResponse, BulkUpdateData, ConflictDetail, CopyPreviousResponse, CreateScheduleRequest,
    CreateShiftRequest, CreateShiftTypeRequest, ProposedShiftResponse, ScheduleResponse,
    ScheduleShiftsResponse, ShiftResponse, ShiftTypeResponse, UpdateScheduleRequest,
    UpdateShiftRequest, UpdateShiftTimesRequest, UpdateShiftTypeRequest, UserSummaryResponse,
};
pub use schedules::{
    create_schedule, delete_schedule, get_schedule, list_schedules, publish_schedule,
    update_schedule,
};
pub use shift_types::{
    create_shift_type, delete_shift_type, get_shift_type, list_shift_types, update_shift_type,
};
pub use shifts::{create_shift, list_shifts, remove_shift, update_shift, update_shift_times};
pub use validation::ValidationError;
