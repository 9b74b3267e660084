//! # Commands Module
//!
//! Everything the console can do, as plain async functions over
//! [`AppState`](crate::state::AppState). The CLI in [`crate::cli`] only
//! parses arguments, calls one of these and prints the result.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Catalog views, product CRUD
//! ├── review.rs     ◄─── Review listing
//! ├── inquiry.rs    ◄─── Contact form, inquiry inbox
//! ├── settings.rs   ◄─── Website settings, theme tokens
//! ├── session.rs    ◄─── Admin login/logout
//! ├── order.rs      ◄─── WhatsApp order and enquiry links
//! ├── dashboard.rs  ◄─── Summary cards
//! └── config.rs     ◄─── Effective console configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ kala-console --json products list --category "Festive Wear"         │
//! │         │                                                               │
//! │         │ (clap)                                                        │
//! │         ▼                                                               │
//! │  commands::product::list_products(                                      │
//! │      &state,                  ◄── Built once in run()                  │
//! │      &CategoryFilter,         ◄── From arguments                       │
//! │  ) -> Vec<ProductView>                                                  │
//! │         │                                                               │
//! │         │ (serde_json / text table)                                     │
//! │         ▼                                                               │
//! │  stdout                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access
//! Storefront reads, the contact form and order links are public. Anything
//! that changes the catalog or settings, or reads inquiries and reviews,
//! calls `AppState::require_admin` first.

pub mod config;
pub mod dashboard;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod settings;
