//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers map `DomainError` to `AppError` via `From`.
//! Detail strings are sanitized: raw driver messages stay in the log.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// True when the message names the users.email unique constraint, in either
/// Postgres ("users_email_key") or SQLite ("UNIQUE constraint failed:
/// users.email") spelling.
fn is_unique_email_violation(msg: &str) -> bool {
    msg.contains("users_email_key") || msg.contains("UNIQUE constraint failed: users.email")
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let sea_orm::DbErr::RecordNotFound(_) = &e {
        return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
    }

    if is_unique_email_violation(&error_msg) {
        warn!(trace_id = %trace_id, "Unique email constraint violation");
        return DomainError::conflict(ConflictKind::UniqueEmail, "Email already exists");
    }

    // Any other unique violation (Postgres SQLSTATE 23505 / SQLite message)
    if mentions_sqlstate(&error_msg, "23505") || error_msg.contains("UNIQUE constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    // Foreign key violation (e.g. creating a post for a deleted user)
    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("ForeignKey".into()),
            "Referenced record does not exist",
        );
    }

    if error_msg.contains("pool timed out") || error_msg.contains("PoolTimedOut") {
        warn!(trace_id = %trace_id, "Database pool timed out");
        return DomainError::infra(InfraErrorKind::Timeout, "Database pool timed out");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unmapped database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database error")
}
