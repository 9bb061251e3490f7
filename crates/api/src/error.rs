// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the operation layer.

use crate::request_response::ConflictDetail;
use crate::validation::ValidationError;
use rosterd_domain::DomainError;
use rosterd_persistence::PersistenceError;

/// Operation-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract; inner errors are translated explicitly and never leaked.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Assigning the user would overlap one of their existing shifts.
    ShiftConflict {
        /// A human-readable summary.
        message: String,
        /// The shifts the candidate assignment clashes with.
        conflicts: Vec<ConflictDetail>,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ShiftConflict { message, conflicts } => {
                write!(f, "{message} ({} conflicting shifts)", conflicts.len())
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// The translation is explicit so domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimeFormat(value) => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("'{value}' is not a valid HH:MM time"),
        },
        DomainError::InvalidColorIndex { index } => ApiError::InvalidInput {
            field: String::from("colorIndex"),
            message: format!("Invalid color index: {index}. Must be between 0 and 9"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid schedule status: {value}"),
        },
        DomainError::InvalidOrder { order } => ApiError::InvalidInput {
            field: String::from("order"),
            message: format!("Invalid order: {order}. Must be a positive integer"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::InvalidDateRange {
            start_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("endDate"),
            message: format!("End date {end_date} precedes start date {start_date}"),
        },
        DomainError::TimesOnInactiveShift { .. } => ApiError::InvalidInput {
            field: String::from("isActive"),
            message: String::from("Can only adjust times on published schedule shifts"),
        },
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => {
                let resource_type: String = message
                    .strip_suffix(" not found")
                    .unwrap_or("Resource")
                    .to_string();
                Self::ResourceNotFound {
                    resource_type,
                    message,
                }
            }
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
