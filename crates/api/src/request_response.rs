// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire request and response types.
//!
//! Field names follow the camelCase JSON contract of the HTTP surface.
//! Dates travel as `YYYY-MM-DD` strings and times as `HH:MM`; parsing into
//! domain values happens in the operation functions so malformed payloads
//! fail with field-level messages.

use serde::{Deserialize, Deserializer, Serialize};

use rosterd_domain::{Schedule, ShiftType, format_date};
use rosterd_persistence::{ConflictingShift, ShiftDetails, UserData};

/// Deserializer distinguishing an absent field from an explicit `null`.
///
/// Used for assignment updates: absent `userId` leaves the assignment
/// untouched, explicit `null` unassigns.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Shift requests
// ============================================================================

/// Request body for creating a shift slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftRequest {
    /// The shift-type template to instantiate.
    pub shift_type_id: i64,
    /// The calendar day (`YYYY-MM-DD`).
    pub date: String,
    /// Optional explicit display order; computed when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Request body for updating a shift's assignment or order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftRequest {
    /// Absent: leave assignment untouched. `null`: unassign.
    /// Non-null: assign, subject to the conflict check.
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Option<i64>>,
    /// New display order, updated unconditionally when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Request body for adjusting a shift's actual times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftTimesRequest {
    /// New actual start time (`HH:MM`); omitted fields are left untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<String>,
    /// New actual end time (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<String>,
}

// ============================================================================
// Bulk operations
// ============================================================================

/// Payload of a bulk create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateData {
    /// The shift-type template to instantiate.
    pub shift_type_id: i64,
    /// The calendar day (`YYYY-MM-DD`).
    pub date: String,
    /// Optional explicit display order; computed when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Optional immediate assignment, subject to the conflict check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Payload of a bulk update operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateData {
    /// New calendar day; the conflict check follows the new date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Absent: leave assignment untouched. `null`: unassign.
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Option<i64>>,
    /// New display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// One operation of a bulk batch.
///
/// The tag is closed: an unsupported `type` fails at deserialization
/// rather than at dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum BulkOperation {
    /// Create a shift slot.
    Create {
        /// The creation payload.
        data: BulkCreateData,
        /// Optional client-side ID echoed back in the result.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
    },
    /// Update an existing shift.
    Update {
        /// The shift to update.
        id: i64,
        /// The update payload.
        data: BulkUpdateData,
        /// Optional client-side ID echoed back in the result.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
    },
    /// Delete an existing shift.
    Delete {
        /// The shift to delete.
        id: i64,
        /// Optional client-side ID echoed back in the result.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
    },
}

impl BulkOperation {
    /// The operation's kind, for result reporting.
    #[must_use]
    pub const fn kind(&self) -> BulkOperationKind {
        match self {
            Self::Create { .. } => BulkOperationKind::Create,
            Self::Update { .. } => BulkOperationKind::Update,
            Self::Delete { .. } => BulkOperationKind::Delete,
        }
    }

    /// The operation's client-side tracking ID, if any.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        match self {
            Self::Create { client_id, .. }
            | Self::Update { client_id, .. }
            | Self::Delete { client_id, .. } => client_id.as_deref(),
        }
    }
}

/// The kind of a bulk operation, echoed in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperationKind {
    /// A create operation.
    Create,
    /// An update operation.
    Update,
    /// A delete operation.
    Delete,
}

/// Request body for a bulk batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    /// The operations, processed in the given order.
    pub operations: Vec<BulkOperation>,
}

/// The outcome of one bulk operation.
///
/// A `success: true` entry does not imply persisted state unless the whole
/// batch reports `allSuccessful`; an aborted batch rewrites every entry to
/// failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationResult {
    /// The operation kind.
    #[serde(rename = "type")]
    pub kind: BulkOperationKind,
    /// Whether the operation succeeded.
    pub success: bool,
    /// The client-side tracking ID, echoed when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// The affected shift's ID, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The resulting shift for successful create/update operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ShiftResponse>,
    /// The error message for failed operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for a bulk batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    /// Per-operation outcomes, in request order.
    pub results: Vec<BulkOperationResult>,
    /// Total number of operations processed.
    pub total_operations: usize,
    /// Number of successful operations.
    pub successful_operations: usize,
    /// Number of failed operations.
    pub failed_operations: usize,
    /// Whether the batch committed.
    pub all_successful: bool,
}

// ============================================================================
// Schedule and shift-type requests
// ============================================================================

/// Request body for creating a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// The display name.
    pub name: String,
    /// First day covered (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day covered, inclusive (`YYYY-MM-DD`).
    pub end_date: String,
    /// The creating user. Authentication is the transport's concern; the
    /// resolved user ID arrives here.
    pub created_by: i64,
}

/// Request body for updating a schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New first day (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// New last day (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Request body for creating a shift type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShiftTypeRequest {
    /// The display name.
    pub name: String,
    /// Template start time (`HH:MM`).
    pub start_time: String,
    /// Template end time (`HH:MM`); numerically before the start for
    /// overnight shifts.
    pub end_time: String,
    /// Client palette slot (0-9); defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u8>,
}

/// Request body for updating a shift type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftTypeRequest {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New template start time (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// New template end time (`HH:MM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// New palette slot (0-9).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u8>,
}

// ============================================================================
// Responses
// ============================================================================

/// A shift type as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTypeResponse {
    /// The shift type's ID.
    pub id: i64,
    /// The display name.
    pub name: String,
    /// Template start time (`HH:MM`).
    pub start_time: String,
    /// Template end time (`HH:MM`).
    pub end_time: String,
    /// Client palette slot.
    pub color_index: u8,
    /// Whether the type is available for new shifts.
    pub is_active: bool,
}

impl From<&ShiftType> for ShiftTypeResponse {
    fn from(shift_type: &ShiftType) -> Self {
        Self {
            id: shift_type.shift_type_id.unwrap_or_default(),
            name: shift_type.name.clone(),
            start_time: shift_type.time_range.start.to_string(),
            end_time: shift_type.time_range.end.to_string(),
            color_index: shift_type.color_index.value(),
            is_active: shift_type.is_active,
        }
    }
}

/// Assigned-user display fields as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    /// The user's ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role label.
    pub role: String,
}

impl From<&UserData> for UserSummaryResponse {
    fn from(user: &UserData) -> Self {
        Self {
            id: user.user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// A schedule shift as rendered on the wire, with its shift type and
/// assigned user resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResponse {
    /// The shift's ID.
    pub id: i64,
    /// The owning schedule's ID.
    pub schedule_id: i64,
    /// The resolved shift type.
    pub shift_type: ShiftTypeResponse,
    /// The calendar day (`YYYY-MM-DD`).
    pub date: String,
    /// The assigned user, if any.
    pub user: Option<UserSummaryResponse>,
    /// Display order within the day.
    pub order: i32,
    /// Whether the shift is live.
    pub is_active: bool,
    /// Actual start-time override (`HH:MM`), if set.
    pub actual_start_time: Option<String>,
    /// Actual end-time override (`HH:MM`), if set.
    pub actual_end_time: Option<String>,
}

/// Builds a [`ShiftResponse`] from a resolved shift row.
#[must_use]
pub(crate) fn shift_response(details: &ShiftDetails) -> ShiftResponse {
    let (shift, shift_type, user) = details;
    ShiftResponse {
        id: shift.shift_id.unwrap_or_default(),
        schedule_id: shift.schedule_id,
        shift_type: ShiftTypeResponse::from(shift_type),
        date: format_date(shift.date),
        user: user.as_ref().map(UserSummaryResponse::from),
        order: shift.sort_order,
        is_active: shift.is_active,
        actual_start_time: shift.actual_start_time.map(|t| t.to_string()),
        actual_end_time: shift.actual_end_time.map(|t| t.to_string()),
    }
}

/// Response body for listing a schedule's shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleShiftsResponse {
    /// Shifts with an assignee, sorted by date then order.
    pub shifts: Vec<ShiftResponse>,
    /// Open slots, sorted by date then order.
    pub unassigned_shifts: Vec<ShiftResponse>,
}

/// One conflicting shift in a 409 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetail {
    /// The conflicting shift's ID.
    pub id: i64,
    /// The conflicting shift's type.
    pub shift_type: ShiftTypeResponse,
    /// The conflicting shift's day (`YYYY-MM-DD`).
    pub date: String,
}

impl From<&ConflictingShift> for ConflictDetail {
    fn from(conflicting: &ConflictingShift) -> Self {
        Self {
            id: conflicting.shift.shift_id.unwrap_or_default(),
            shift_type: ShiftTypeResponse::from(&conflicting.shift_type),
            date: format_date(conflicting.shift.date),
        }
    }
}

/// One proposed shift in a copy-previous response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedShiftResponse {
    /// The shift-type template to instantiate.
    pub shift_type_id: i64,
    /// The target day (`YYYY-MM-DD`).
    pub date: String,
    /// Display order, reset per shift type per day.
    pub order: i32,
}

/// Response body for the copy-previous proposal.
///
/// A dry run: nothing is persisted; the client applies the proposal with a
/// separate bulk create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPreviousResponse {
    /// A human-readable summary.
    pub message: String,
    /// Number of proposed shifts.
    pub count: usize,
    /// The proposed shifts.
    pub shifts_to_create: Vec<ProposedShiftResponse>,
    /// The display name of the schedule the pattern was taken from.
    pub source_schedule_name: String,
}

/// A schedule as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// The schedule's ID.
    pub id: i64,
    /// The display name.
    pub name: String,
    /// First day covered (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day covered, inclusive (`YYYY-MM-DD`).
    pub end_date: String,
    /// Lifecycle status (`draft` or `published`).
    pub status: String,
    /// The creating user's ID.
    pub created_by: i64,
}

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.schedule_id.unwrap_or_default(),
            name: schedule.name.clone(),
            start_date: format_date(schedule.start_date),
            end_date: format_date(schedule.end_date),
            status: schedule.status.as_str().to_string(),
            created_by: schedule.created_by,
        }
    }
}
