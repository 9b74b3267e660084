//! # Repository Module
//!
//! SQL access lives here and nowhere else. Stores in [`crate::store`] work
//! only through these repositories.
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Keyed JSON records in `kv_store`

pub mod kv;
