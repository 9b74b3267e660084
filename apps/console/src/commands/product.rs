//! # Product Commands
//!
//! Storefront catalog views and admin product management.
//!
//! ## Admin Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  kala-console products update 3 --patch '{"stock": 0}'                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  require_admin ──── logged out? ──► UNAUTHORIZED                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductPatch (deny_unknown_fields) ──► validate_product_patch         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::update ─── Ok(None) ──► NOT_FOUND                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductView (rating, stars, stock level)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store treats an unknown id as a silent no-op; the console reports it
//! as `NOT_FOUND` so a typo on the command line is visible.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::AppState;
use kala_core::validation::{validate_new_product, validate_product_patch};
use kala_core::views::{
    average_rating, hero_slides, is_low_stock, next_slide, partition_by_category, prev_slide,
    rounded_stars, stock_level,
};
use kala_core::{
    CategoryFilter, CoreError, NewProduct, Product, ProductPatch, StockLevel,
    CAROUSEL_INTERVAL_SECS,
};

/// Product row for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub cover_image: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub featured: bool,
    pub stock: i64,
    pub stock_level: StockLevel,
    /// 0 when there are no reviews.
    pub average_rating: f64,
    /// Filled stars out of five.
    pub stars: u8,
    pub review_count: usize,
}

impl ProductView {
    pub fn new(product: &Product, low_stock_threshold: i64) -> Self {
        ProductView {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            cover_image: product.cover_image().map(str::to_string),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            featured: product.featured,
            stock: product.stock,
            stock_level: stock_level(product, low_stock_threshold),
            average_rating: average_rating(product),
            stars: rounded_stars(product),
            review_count: product.reviews.len(),
        }
    }
}

/// One category section of the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub products: Vec<ProductView>,
}

/// One entry of the collections page category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChoice {
    pub label: String,
    pub count: usize,
}

/// Home page hero carousel with its wrap-around neighbours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroCarousel {
    pub slides: Vec<ProductView>,
    pub current: usize,
    pub next: usize,
    pub previous: usize,
    /// Auto-advance period.
    pub interval_secs: u64,
}

fn views<'a>(products: impl IntoIterator<Item = &'a Product>, threshold: i64) -> Vec<ProductView> {
    products
        .into_iter()
        .map(|p| ProductView::new(p, threshold))
        .collect()
}

// =============================================================================
// Storefront Reads
// =============================================================================

/// Lists the catalog through the collections page filter.
pub async fn list_products(state: &AppState, filter: &CategoryFilter) -> Vec<ProductView> {
    debug!(filter = %filter, "list_products command");
    let catalog = state.catalog.lock().await;
    let threshold = state.config().low_stock_threshold;

    views(&filter.apply(catalog.list()), threshold)
}

/// The collections page selector: `All` and each category, with counts.
pub async fn category_choices(state: &AppState) -> Vec<CategoryChoice> {
    let catalog = state.catalog.lock().await;

    CategoryFilter::choices()
        .into_iter()
        .map(|filter| {
            let count = match &filter {
                CategoryFilter::All => catalog.list().len(),
                CategoryFilter::Category(label) => catalog.by_category(label).len(),
            };
            CategoryChoice {
                label: filter.to_string(),
                count,
            }
        })
        .collect()
}

/// Gets the full product record.
///
/// ## Returns
/// The product, or `NOT_FOUND`.
pub async fn get_product(state: &AppState, id: &str) -> ApiResult<Product> {
    debug!(id = %id, "get_product command");
    state
        .catalog
        .lock()
        .await
        .by_id(id)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
}

pub async fn featured_products(state: &AppState) -> Vec<ProductView> {
    let catalog = state.catalog.lock().await;
    views(catalog.featured(), state.config().low_stock_threshold)
}

/// Home page carousel: the first featured products, positioned at `current`.
pub async fn hero_carousel(state: &AppState, current: usize) -> HeroCarousel {
    let catalog = state.catalog.lock().await;
    let featured: Vec<Product> = catalog.featured().into_iter().cloned().collect();
    let slides = views(&hero_slides(&featured), state.config().low_stock_threshold);

    let len = slides.len();
    let current = if len == 0 { 0 } else { current % len };

    HeroCarousel {
        current,
        next: next_slide(current, len),
        previous: prev_slide(current, len),
        interval_secs: CAROUSEL_INTERVAL_SECS,
        slides,
    }
}

/// Home page category sections in the fixed category order.
pub async fn products_by_category(state: &AppState) -> Vec<CategoryGroup> {
    let catalog = state.catalog.lock().await;
    let threshold = state.config().low_stock_threshold;

    partition_by_category(catalog.list())
        .into_iter()
        .map(|(category, products)| CategoryGroup {
            category,
            products: views(&products, threshold),
        })
        .collect()
}

/// Products below the low-stock threshold, for restocking.
pub async fn low_stock_products(state: &AppState) -> ApiResult<Vec<ProductView>> {
    state.require_admin().await?;
    let catalog = state.catalog.lock().await;
    let threshold = state.config().low_stock_threshold;

    Ok(views(
        catalog.list().iter().filter(|p| is_low_stock(p, threshold)),
        threshold,
    ))
}

// =============================================================================
// Admin Mutations
// =============================================================================

/// Adds a product from the admin form.
///
/// ## Arguments
/// * `data` - Form contents; validated before the store sees it
///
/// ## Returns
/// The stored product with its generated id.
pub async fn add_product(state: &AppState, data: NewProduct) -> ApiResult<Product> {
    state.require_admin().await?;
    validate_new_product(&data)?;

    let product = state.catalog.lock().await.add(data).await?;
    info!(id = %product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Applies a partial update to one product.
pub async fn update_product(state: &AppState, id: &str, patch: ProductPatch) -> ApiResult<Product> {
    state.require_admin().await?;
    validate_product_patch(&patch)?;

    state
        .catalog
        .lock()
        .await
        .update(id, patch)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
}

/// Deletes a product together with its reviews.
pub async fn remove_product(state: &AppState, id: &str) -> ApiResult<()> {
    state.require_admin().await?;

    if state.catalog.lock().await.remove(id).await? {
        Ok(())
    } else {
        Err(CoreError::ProductNotFound(id.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kala_core::Review;

    fn product(reviews: &[u8], stock: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Silk Saree".to_string(),
            price: 4999,
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            category: "Festive Wear".to_string(),
            sizes: vec![],
            colors: vec![],
            description: String::new(),
            reviews: reviews
                .iter()
                .enumerate()
                .map(|(i, r)| Review {
                    id: i.to_string(),
                    name: "Guest".to_string(),
                    rating: *r,
                    comment: String::new(),
                    date: "2024-01-15".to_string(),
                })
                .collect(),
            featured: false,
            stock,
        }
    }

    #[test]
    fn test_product_view_derived_fields() {
        let view = ProductView::new(&product(&[5, 4], 3), 5);
        assert_eq!(view.average_rating, 4.5);
        assert_eq!(view.stars, 5);
        assert_eq!(view.review_count, 2);
        assert_eq!(view.stock_level, StockLevel::Low);
        assert_eq!(view.cover_image.as_deref(), Some("a.jpg"));

        let view = ProductView::new(&product(&[], 0), 5);
        assert_eq!(view.average_rating, 0.0);
        assert_eq!(view.stock_level, StockLevel::OutOfStock);
    }

    #[test]
    fn test_product_view_serializes_camel_case() {
        let json = serde_json::to_value(ProductView::new(&product(&[], 9), 5)).unwrap();
        assert_eq!(json["stockLevel"], "InStock");
        assert_eq!(json["averageRating"], 0.0);
        assert!(json.get("coverImage").is_some());
    }
}
