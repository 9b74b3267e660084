//! # Error Types
//!
//! Domain-specific error types for kala-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kala-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule failures                           │
//! │  └── ValidationError  - Admin/contact form input failures              │
//! │                                                                         │
//! │  kala-db errors (separate crate)                                       │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Console output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing records are not errors at this level: store lookups return
//! `Option` and mutations on an unknown id are no-ops.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by the console's use of the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found (console lookups only).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Inquiry cannot be found (console lookups only).
    #[error("Inquiry not found: {0}")]
    InquiryNotFound(String),

    /// Requested order quantity exceeds what is in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Detail page stepper (qty: 6)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Festive Silk Dress", available: 5, requested: 6 }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the form checks in [`crate::validation`] before a store is
/// touched. Stores themselves never validate.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. malformed email, bad JSON patch).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
