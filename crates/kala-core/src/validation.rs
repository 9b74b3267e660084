//! # Validation Module
//!
//! Form-level checks for the admin product form and the contact form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization                                              │
//! │  ├── Field types, camelCase keys                                       │
//! │  └── Patches reject unknown keys                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Console command                                              │
//! │  └── THIS MODULE: name/price/stock/category/email/rating rules         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── No checks. Stores accept whatever the command layer passes.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kala_core::validation::{parse_list, validate_price};
//!
//! assert!(validate_price(2499).is_ok());
//! assert_eq!(parse_list(" S, M ,,L "), vec!["S", "M", "L"]);
//! ```

use crate::error::ValidationError;
use crate::types::{NewInquiry, NewProduct, ProductPatch, Review};
use crate::CATEGORIES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// Product Form
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price in whole rupees. Zero is allowed.
///
/// ## Example
/// ```rust
/// use kala_core::validation::validate_price;
///
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-1).is_err());
/// ```
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

/// Validates that a category is one of the fixed labels.
///
/// Matching is exact; the `All` sentinel is a view filter, not a category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        })
    }
}

/// Validates a review's rating (1-5 stars).
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }
    Ok(())
}

fn validate_reviews(reviews: &[Review]) -> ValidationResult<()> {
    reviews.iter().try_for_each(|r| validate_rating(r.rating))
}

/// Runs every product-form rule over a new product.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    validate_category(&product.category)?;
    validate_reviews(&product.reviews)
}

/// Runs the product-form rules over the fields a patch supplies.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    if let Some(category) = &patch.category {
        validate_category(category)?;
    }
    if let Some(reviews) = &patch.reviews {
        validate_reviews(reviews)?;
    }
    Ok(())
}

/// Splits comma-separated form input (sizes, colours, image URLs).
///
/// Entries are trimmed and empty entries dropped.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// Contact Form
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Shape check only: one `@`, non-empty local part, dotted domain, no spaces.
///
/// ## Example
/// ```rust
/// use kala_core::validation::validate_email;
///
/// assert!(validate_email("info@drikkala.com").is_ok());
/// assert!(validate_email("info@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    require("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must contain a single @ after a name"));
    }

    let dotted: Vec<&str> = domain.split('.').collect();
    if dotted.len() < 2 || dotted.iter().any(|part| part.is_empty()) {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a contact submission: name, email and message are required.
pub fn validate_new_inquiry(inquiry: &NewInquiry) -> ValidationResult<()> {
    require("name", &inquiry.name)?;
    validate_email(&inquiry.email)?;
    require("message", &inquiry.message)
}

// =============================================================================
// Order Form
// =============================================================================

/// Order quantity must be at least 1.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
