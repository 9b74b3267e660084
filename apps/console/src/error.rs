//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  kala-console products update 3 --patch '{"price": -1}'                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Not logged in?     ─── UNAUTHORIZED ──────────────┐            │  │
//! │  │  Bad patch JSON?    ─── VALIDATION_ERROR ──────────┤            │  │
//! │  │  Validation Error?  ─── ValidationError ───────────┤            │  │
//! │  │  Unknown id?        ─── CoreError::*NotFound ──────┼── ApiError │  │
//! │  │  Storage failure?   ─── DbError ───────────────────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stderr: [VALIDATION_ERROR] price must not be negative                 │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::config::ConfigError;
use kala_core::{CoreError, ValidationError};
use kala_db::DbError;
use serde::Serialize;

/// Error returned from console commands.
///
/// ## Serialization
/// With `--json`, a failing command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// Admin command without an admin session
    Unauthorized,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error for an admin-only command.
    pub fn unauthorized() -> Self {
        ApiError::new(
            ErrorCode::Unauthorized,
            "Admin login required (run `login` first)",
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization { key, message } => {
                tracing::error!(key = %key, "Record serialization failed: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Stored record could not be written")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InquiryNotFound(id) => ApiError::not_found("Inquiry", &id),
            e @ CoreError::InsufficientStock { .. } => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(message) => ApiError::validation(message),
            other => ApiError::internal(other.to_string()),
        }
    }
}

/// Patch/form JSON that fails to parse, including unknown fields.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid JSON input: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for console commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_value(ApiError::unauthorized()).unwrap();
        assert_eq!(json["code"], "UNAUTHORIZED");
        assert_eq!(
            serde_json::to_value(ErrorCode::ValidationError).unwrap(),
            ErrorCode::ValidationError.as_str()
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::ProductNotFound("42".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 42");

        let err: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
