//! # kala-core: Pure Domain Logic for Drik Kala
//!
//! Record types, partial-update patches, form validation and the derived
//! views the storefront and admin pages are built from. Nothing in this
//! crate touches storage, the network or the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drik Kala Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Admin console (apps/console)                   │   │
//! │  │    products ─ reviews ─ inquiries ─ settings ─ order links      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kala-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ settings  │  │   views   │  │   order   │  │   │
//! │  │   │  Product  │  │  Website  │  │  ratings  │  │  message  │  │   │
//! │  │   │  Inquiry  │  │  Settings │  │  carousel │  │  wa.me    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kala-db (Persistence Layer)                    │   │
//! │  │        SQLite key-value records + the four stores               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Review, Inquiry and their patches
//! - [`settings`] - WebsiteSettings defaults, patch, theme tokens
//! - [`views`] - Ratings, stock flags, categories, carousel, dashboard
//! - [`order`] - WhatsApp order messages and deep links
//! - [`validation`] - Admin/contact form rules
//! - [`seed`] - Launch catalog
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kala_core::seed::initial_products;
//! use kala_core::views::{average_rating, is_low_stock};
//! use kala_core::DEFAULT_LOW_STOCK_THRESHOLD;
//!
//! let catalog = initial_products();
//! let dress = &catalog[2];
//!
//! assert_eq!(average_rating(dress), 0.0);
//! assert!(!is_low_stock(dress, DEFAULT_LOW_STOCK_THRESHOLD)); // stock 5
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod order;
pub mod seed;
pub mod settings;
pub mod types;
pub mod validation;
pub mod views;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use order::OrderRequest;
pub use settings::{BusinessHours, SettingsPatch, WebsiteSettings};
pub use types::*;
pub use views::{CategoryFilter, DashboardStats, StockLevel};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The fixed product categories, in display order.
pub const CATEGORIES: [&str; 4] = [
    "Kurtis & Dresses",
    "Co-ord Sets",
    "Festive Wear",
    "Handcrafted Pieces",
];

/// Collections page sentinel meaning "no category filter".
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// Products with fewer units than this are flagged "Low Stock".
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Admin credentials. A local equality check, not a security boundary.
pub const ADMIN_USERNAME: &str = "admin_drik";
pub const ADMIN_PASSWORD: &str = "drik@123";

/// Order destination when settings carry no usable number.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "919479988471";

/// Hero carousel auto-advance interval.
pub const CAROUSEL_INTERVAL_SECS: u64 = 5;

/// Number of featured products shown in the hero carousel.
pub const HERO_SLIDE_LIMIT: usize = 3;
