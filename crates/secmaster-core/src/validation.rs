//! Validation utilities.

use crate::SecMasterError;

/// Maximum identifier length accepted by MySQL.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Common validation functions.
pub mod rules {
    /// Returns `true` when the value is absent or empty after trimming.
    #[must_use]
    pub fn is_blank(value: Option<&str>) -> bool {
        value.map_or(true, |v| v.trim().is_empty())
    }
}

/// Validates a table or column name before it is interpolated into SQL.
///
/// Only ASCII letters, digits and underscores are accepted, and the name may
/// not start with a digit.
pub fn validate_sql_identifier(kind: &str, name: &str) -> Result<(), SecMasterError> {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN {
        return Err(SecMasterError::validation(format!(
            "{} name must be 1..={} characters, got {:?}",
            kind, MAX_IDENTIFIER_LEN, name
        )));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(SecMasterError::validation(format!(
            "{} name must not start with a digit: {:?}",
            kind, name
        )));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SecMasterError::validation(format!(
            "{} name contains illegal characters: {:?}",
            kind, name
        )));
    }

    Ok(())
}
