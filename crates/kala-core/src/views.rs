//! # Derived Views
//!
//! Pure computations over store contents, consumed by the presentation
//! layer: ratings, stock flags, category grouping, the hero carousel and the
//! admin dashboard cards.
//!
//! ## Where Each Helper Shows Up
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ Page                 │ Helpers                                      │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ Home (hero)          │ hero_slides, next_slide, prev_slide          │
//! │ Collections          │ CategoryFilter, is_low_stock                 │
//! │ Product detail       │ average_rating, rounded_stars                │
//! │ Admin products       │ stock_level, partition_by_category           │
//! │ Admin dashboard      │ DashboardStats                               │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;
use crate::{ALL_CATEGORIES_LABEL, CATEGORIES, HERO_SLIDE_LIMIT};

// =============================================================================
// Ratings
// =============================================================================

/// Arithmetic mean of review ratings, 0 when there are none.
///
/// ## Example
/// ```rust
/// use kala_core::views::average_rating;
/// # use kala_core::seed::initial_products;
///
/// let kurti = &initial_products()[0]; // ratings 5 and 4
/// assert_eq!(average_rating(kurti), 4.5);
/// ```
pub fn average_rating(product: &Product) -> f64 {
    if product.reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = product.reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(total) / product.reviews.len() as f64
}

/// Number of filled stars: the average rounded half-up.
pub fn rounded_stars(product: &Product) -> u8 {
    // Ratings are u8, so the average always fits.
    (average_rating(product) + 0.5).floor() as u8
}

// =============================================================================
// Stock
// =============================================================================

/// `stock < threshold`. The storefront threshold is
/// [`crate::DEFAULT_LOW_STOCK_THRESHOLD`].
pub fn is_low_stock(product: &Product, threshold: i64) -> bool {
    product.stock < threshold
}

/// Admin colour coding for the stock column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum StockLevel {
    /// Zero (or negative) stock: red.
    OutOfStock,
    /// Below threshold: orange.
    Low,
    /// Green.
    InStock,
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockLevel::OutOfStock => write!(f, "out of stock"),
            StockLevel::Low => write!(f, "low"),
            StockLevel::InStock => write!(f, "in stock"),
        }
    }
}

pub fn stock_level(product: &Product, threshold: i64) -> StockLevel {
    if product.stock <= 0 {
        StockLevel::OutOfStock
    } else if is_low_stock(product, threshold) {
        StockLevel::Low
    } else {
        StockLevel::InStock
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Groups products by category label.
///
/// The fixed labels come first in their fixed order (empty groups kept), then
/// any unknown labels in order of first appearance. Products keep their
/// relative order inside each group.
pub fn partition_by_category(products: &[Product]) -> Vec<(String, Vec<Product>)> {
    let mut groups: Vec<(String, Vec<Product>)> = CATEGORIES
        .iter()
        .map(|label| (label.to_string(), Vec::new()))
        .collect();

    for product in products {
        match groups.iter_mut().find(|(label, _)| *label == product.category) {
            Some((_, members)) => members.push(product.clone()),
            None => groups.push((product.category.clone(), vec![product.clone()])),
        }
    }

    groups
}

/// Collections page category selector, including the `All` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        match self {
            CategoryFilter::All => products.to_vec(),
            CategoryFilter::Category(label) => products
                .iter()
                .filter(|p| p.category == *label)
                .cloned()
                .collect(),
        }
    }

    /// The selector's choices: `All` followed by the fixed categories.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(CATEGORIES.iter().map(|c| CategoryFilter::Category(c.to_string())))
            .collect()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", ALL_CATEGORIES_LABEL),
            CategoryFilter::Category(label) => write!(f, "{}", label),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `All` (any case) selects everything; anything else is an exact label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_CATEGORIES_LABEL) {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Category(s.to_string()))
        }
    }
}

// =============================================================================
// Hero Carousel
// =============================================================================

/// First [`HERO_SLIDE_LIMIT`] featured products.
pub fn hero_slides(featured: &[Product]) -> Vec<Product> {
    featured.iter().take(HERO_SLIDE_LIMIT).cloned().collect()
}

/// Advance with wrap-around. An empty carousel stays at 0.
pub fn next_slide(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

/// Step back with wrap-around. An empty carousel stays at 0.
pub fn prev_slide(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current % len + len - 1) % len
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Admin dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub featured_products: usize,
    pub total_reviews: usize,
    pub new_inquiries: usize,
}

impl DashboardStats {
    /// `new_inquiries` comes from the inquiry store's running count.
    pub fn compute(products: &[Product], new_inquiries: usize) -> Self {
        DashboardStats {
            total_products: products.len(),
            featured_products: products.iter().filter(|p| p.featured).count(),
            total_reviews: products.iter().map(|p| p.reviews.len()).sum(),
            new_inquiries,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
