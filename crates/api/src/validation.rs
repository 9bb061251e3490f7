// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request field validation.
//!
//! Wire values arrive as strings and loose integers; these helpers parse
//! them into domain values and name the offending field when they cannot.

use thiserror::Error;
use time::Date;

use rosterd_domain::{TimeOfDay, parse_date};

/// Validation failures for request payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A date field is not a valid `YYYY-MM-DD` calendar date.
    #[error("Field '{field}' must be a calendar date (YYYY-MM-DD): {value}")]
    InvalidDate {
        /// The offending field name.
        field: String,
        /// The value that failed to parse.
        value: String,
    },
    /// A time field is not valid `HH:MM`.
    #[error("Field '{field}' must be a time of day (HH:MM): {value}")]
    InvalidTime {
        /// The offending field name.
        field: String,
        /// The value that failed to parse.
        value: String,
    },
    /// An order field is zero or negative.
    #[error("Field '{field}' must be a positive integer, got {value}")]
    NonPositiveOrder {
        /// The offending field name.
        field: String,
        /// The value that was given.
        value: i32,
    },
    /// Actual times were adjusted on a shift that is not active.
    #[error("Can only adjust times on published schedule shifts")]
    ShiftNotActive,
}

impl ValidationError {
    /// The field this validation error is about, for client display.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidDate { field, .. }
            | Self::InvalidTime { field, .. }
            | Self::NonPositiveOrder { field, .. } => field,
            Self::ShiftNotActive => "isActive",
        }
    }
}

/// Parses a wire date field.
///
/// # Errors
///
/// Returns a validation error naming the field if the value is not a valid
/// calendar date.
pub(crate) fn parse_date_field(field: &str, value: &str) -> Result<Date, ValidationError> {
    parse_date(value).map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses a wire time-of-day field.
///
/// # Errors
///
/// Returns a validation error naming the field if the value is not valid
/// `HH:MM`.
pub(crate) fn parse_time_field(field: &str, value: &str) -> Result<TimeOfDay, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Checks that an order field is positive.
///
/// # Errors
///
/// Returns a validation error naming the field if the value is zero or
/// negative.
pub(crate) fn check_order_field(field: &str, value: i32) -> Result<i32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::NonPositiveOrder {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}
