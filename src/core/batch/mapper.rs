//! Row validation and mapping
//!
//! Turns a [`RawRow`] into a typed [`IdentityOperation`]. Errors are scoped
//! to the row; the caller records them as a failed outcome and moves on.

use super::loader::RawRow;
use crate::core::types::{
    CreateIdentity, DeleteIdentity, Email, IdentityOperation, OperationKind,
};
use std::fmt;
use thiserror::Error;

/// Canonical column names. Matching is exact and case-sensitive.
pub mod columns {
    pub const USERNAME: &str = "username";
    pub const GIVEN_NAME: &str = "givenname";
    pub const FAMILY_NAME: &str = "familyname";
    pub const GROUP_NAME: &str = "groupname";
    pub const EMAIL: &str = "email";
    pub const EMAIL_TYPE: &str = "emailtype";
    pub const PRIMARY: &str = "primary";
}

const PRIMARY_TRUE: &str = "TRUE";
const PRIMARY_FALSE: &str = "FALSE";

/// Why a row was rejected before reaching the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// Required column absent or blank. `found` names a column that differs
    /// only by case, which is reported but never used.
    MissingField {
        column: &'static str,
        found: Option<String>,
    },
    /// `primary` holds something other than `TRUE` or `FALSE`
    InvalidPrimaryFlag { value: String },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::MissingField {
                column,
                found: None,
            } => write!(f, "required field '{}' is missing or blank", column),
            ValidationReason::MissingField {
                column,
                found: Some(found),
            } => write!(
                f,
                "required field '{}' is missing or blank (found column '{}'; column names are case-sensitive)",
                column, found
            ),
            ValidationReason::InvalidPrimaryFlag { value } => write!(
                f,
                "email provided but primary is {:?}, expected exactly \"{}\" or \"{}\"",
                value, PRIMARY_TRUE, PRIMARY_FALSE
            ),
        }
    }
}

/// A row that could not be mapped to an operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {}: {}", .row_index + 1, .reason)]
pub struct RowValidationError {
    pub row_index: usize,
    pub reason: ValidationReason,
}

/// Map a raw row to the operation requested by the batch kind.
pub fn map_row(row: &RawRow, kind: OperationKind) -> Result<IdentityOperation, RowValidationError> {
    match kind {
        OperationKind::Create => map_create(row).map(IdentityOperation::Create),
        OperationKind::Delete => map_delete(row).map(IdentityOperation::Delete),
    }
}

/// Validate a create row. Display name is derived, never read from the file;
/// email and group are independent and both optional.
pub fn map_create(row: &RawRow) -> Result<CreateIdentity, RowValidationError> {
    let username = required(row, columns::USERNAME)?;
    let given_name = required(row, columns::GIVEN_NAME)?;
    let family_name = required(row, columns::FAMILY_NAME)?;

    let mut identity = CreateIdentity::new(username, given_name, family_name);

    if let Some(value) = row.non_blank(columns::EMAIL) {
        let primary = parse_primary(row)?;
        identity = identity.with_email(Email {
            value: value.to_string(),
            email_type: row.non_blank(columns::EMAIL_TYPE).map(str::to_string),
            primary,
        });
    }

    if let Some(group_name) = row.non_blank(columns::GROUP_NAME) {
        identity = identity.with_group(group_name);
    }

    Ok(identity)
}

pub fn map_delete(row: &RawRow) -> Result<DeleteIdentity, RowValidationError> {
    required(row, columns::USERNAME).map(DeleteIdentity::new)
}

fn required<'a>(row: &'a RawRow, column: &'static str) -> Result<&'a str, RowValidationError> {
    row.non_blank(column).ok_or_else(|| RowValidationError {
        row_index: row.index(),
        reason: ValidationReason::MissingField {
            column,
            found: case_variant(row, column),
        },
    })
}

fn parse_primary(row: &RawRow) -> Result<bool, RowValidationError> {
    match row.get(columns::PRIMARY) {
        Some(PRIMARY_TRUE) => Ok(true),
        Some(PRIMARY_FALSE) => Ok(false),
        Some(other) if !other.trim().is_empty() => Err(RowValidationError {
            row_index: row.index(),
            reason: ValidationReason::InvalidPrimaryFlag {
                value: other.to_string(),
            },
        }),
        _ => Err(RowValidationError {
            row_index: row.index(),
            reason: ValidationReason::MissingField {
                column: columns::PRIMARY,
                found: case_variant(row, columns::PRIMARY),
            },
        }),
    }
}

fn case_variant(row: &RawRow, column: &str) -> Option<String> {
    row.columns()
        .find(|name| *name != column && name.eq_ignore_ascii_case(column))
        .map(str::to_string)
}
