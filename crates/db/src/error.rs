//! Mapping from sqlx errors to the store-agnostic [`StoreError`].

use qanda_core::error::StoreError;

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign-key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for check-constraint violations.
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error.
///
/// - Unique violations map to `Conflict`.
/// - Foreign-key and check violations map to `Constraint`.
/// - Decode failures map to `MalformedRow`.
/// - Everything else maps to `Backend`.
pub fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    StoreError::Conflict(format!("duplicate value violates {constraint}"))
                }
                Some(FOREIGN_KEY_VIOLATION) | Some(CHECK_VIOLATION) => {
                    StoreError::Constraint(format!("{constraint}: {}", db_err.message()))
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    StoreError::Backend(err.to_string())
                }
            }
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::MalformedRow(err.to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            StoreError::Backend(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decode_failures_are_malformed_rows() {
        let err = sqlx::Error::ColumnNotFound("vote".into());
        assert_matches!(classify(err), StoreError::MalformedRow(_));
    }

    #[test]
    fn pool_failures_are_backend_errors() {
        assert_matches!(classify(sqlx::Error::PoolTimedOut), StoreError::Backend(_));
    }
}
