//! Repository utilities.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error};

/// Simple error info wrapper for database errors.
#[derive(Debug)]
pub struct DbErrorInfo(pub String);

impl DatabaseErrorInformation for DbErrorInfo {
    fn message(&self) -> &str {
        &self.0
    }
    fn details(&self) -> Option<&str> {
        None
    }
    fn hint(&self) -> Option<&str> {
        None
    }
    fn table_name(&self) -> Option<&str> {
        None
    }
    fn column_name(&self) -> Option<&str> {
        None
    }
    fn constraint_name(&self) -> Option<&str> {
        None
    }
    fn statement_position(&self) -> Option<i32> {
        None
    }
}

/// Convert any displayable error to a diesel error with proper message.
pub fn to_diesel_error(e: impl std::fmt::Display) -> Error {
    Error::DatabaseError(DatabaseErrorKind::Unknown, Box::new(DbErrorInfo(e.to_string())))
}

/// Whether `e` is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &Error) -> bool {
    matches!(e, Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_diesel_error_keeps_message() {
        let err = to_diesel_error("unable to open database file");
        assert_eq!(err.to_string(), "unable to open database file");
        assert!(!is_unique_violation(&err));
    }
}
