//! # Catalog Store
//!
//! Ordered product collection with embedded reviews.
//!
//! ## Operations
//! ```text
//! ┌──────────────────────┬───────────────────────────────┬────────────┐
//! │ Operation            │ Effect                        │ Persists?  │
//! ├──────────────────────┼───────────────────────────────┼────────────┤
//! │ list / by_category   │ read, insertion order         │ no         │
//! │ featured / by_id     │ read                          │ no         │
//! │ add                  │ fresh id, append              │ yes        │
//! │ update (known id)    │ merge patch fields            │ yes        │
//! │ update (unknown id)  │ nothing                       │ no         │
//! │ remove (known id)    │ drop product + its reviews    │ yes        │
//! │ remove (unknown id)  │ nothing                       │ no         │
//! └──────────────────────┴───────────────────────────────┴────────────┘
//! ```
//!
//! A catalog that has never been persisted starts from the launch seed.
//! Once written, even an empty list is kept as-is.

use kala_core::seed::initial_products;
use kala_core::{NewProduct, Product, ProductPatch, Review};
use tracing::{debug, info};

use super::{generate_unique_id, load_collection, PRODUCTS_KEY};
use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Product catalog with write-through persistence.
#[derive(Debug)]
pub struct CatalogStore {
    kv: KvRepository,
    products: Vec<Product>,
}

impl CatalogStore {
    /// Restores the catalog, or the seed catalog if none was ever stored.
    pub async fn load(kv: KvRepository) -> DbResult<Self> {
        let products = load_collection(&kv, PRODUCTS_KEY, initial_products).await?;
        debug!(count = products.len(), "Catalog loaded");
        Ok(CatalogStore { kv, products })
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Products whose category equals `category` exactly.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// Looks up a product. Absent is a normal outcome.
    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Appends a product under a fresh unique id.
    ///
    /// ## Returns
    /// The stored product, including its generated id.
    pub async fn add(&mut self, data: NewProduct) -> DbResult<Product> {
        let id = generate_unique_id(|candidate| self.by_id(candidate).is_some());
        let product = Product::from_new(id, data);

        info!(id = %product.id, name = %product.name, "Adding product");
        self.products.push(product.clone());
        self.persist().await?;
        Ok(product)
    }

    /// Merges `patch` into the product with `id`.
    ///
    /// ## Returns
    /// * `Ok(Some(product))` - Updated product
    /// * `Ok(None)` - No such product; nothing changed or written
    pub async fn update(&mut self, id: &str, patch: ProductPatch) -> DbResult<Option<Product>> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!(id = %id, "Update for unknown product ignored");
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(product.clone()));
        }

        debug!(id = %id, "Updating product");
        patch.apply_to(product);
        let updated = product.clone();
        self.persist().await?;
        Ok(Some(updated))
    }

    /// Removes the product with `id` and its reviews.
    ///
    /// ## Returns
    /// `true` if a product was removed, `false` if none matched.
    pub async fn remove(&mut self, id: &str) -> DbResult<bool> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() == before {
            debug!(id = %id, "Remove for unknown product ignored");
            return Ok(false);
        }

        info!(id = %id, "Removed product");
        self.persist().await?;
        Ok(true)
    }

    /// Every review in the catalog with the product it belongs to, in
    /// catalog order.
    pub fn reviews(&self) -> Vec<(&Product, &Review)> {
        self.products
            .iter()
            .flat_map(|p| p.reviews.iter().map(move |r| (p, r)))
            .collect()
    }

    async fn persist(&self) -> DbResult<()> {
        self.kv.put_json(PRODUCTS_KEY, &self.products).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backup_key;
    use crate::{Database, DbConfig};
    use proptest::prelude::*;
    use std::collections::HashSet;

    async fn store() -> (Database, CatalogStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = CatalogStore::load(db.kv()).await.unwrap();
        (db, store)
    }

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 1500,
            images: vec![],
            category: category.to_string(),
            sizes: vec!["M".to_string()],
            colors: vec!["Ivory".to_string()],
            description: "Test piece".to_string(),
            reviews: vec![],
            featured: false,
            stock: 3,
        }
    }

    #[tokio::test]
    async fn test_fresh_catalog_is_seeded() {
        let (_db, store) = store().await;
        assert_eq!(store.list(), initial_products().as_slice());
        assert_eq!(store.featured().len(), 3);
        assert_eq!(store.reviews().len(), 4);
    }

    #[tokio::test]
    async fn test_by_category_keeps_order() {
        let (_db, mut store) = store().await;
        store
            .add(new_product("Zari Lehenga", "Festive Wear"))
            .await
            .unwrap();

        let names: Vec<&str> = store
            .by_category("Festive Wear")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Festive Silk Dress", "Zari Lehenga"]);
        assert!(store.by_category("festive wear").is_empty());
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let (db, mut store) = store().await;
        let added = store
            .add(new_product("Indigo Co-ord", "Co-ord Sets"))
            .await
            .unwrap();

        assert_eq!(store.list().last(), Some(&added));
        assert_eq!(store.by_id(&added.id), Some(&added));

        let reloaded = CatalogStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.list(), store.list());
    }

    #[tokio::test]
    async fn test_update_merges_only_named_fields() {
        let (_db, mut store) = store().await;
        let before = store.by_id("3").cloned().unwrap();

        let updated = store
            .update(
                "3",
                ProductPatch {
                    stock: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.stock, 2);
        assert_eq!(Product { stock: 5, ..updated }, before);
    }

    #[tokio::test]
    async fn test_unknown_id_is_noop() {
        let (db, mut store) = store().await;
        let before = store.list().to_vec();

        let patch = ProductPatch {
            price: Some(1),
            ..Default::default()
        };
        assert_eq!(store.update("missing", patch).await.unwrap(), None);
        assert!(!store.remove("missing").await.unwrap());

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(db.kv().get(PRODUCTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_drops_product_and_reviews() {
        let (db, mut store) = store().await;
        assert!(store.remove("1").await.unwrap());

        assert!(store.by_id("1").is_none());
        assert_eq!(store.reviews().len(), 2);
        assert!(store.reviews().iter().all(|(p, _)| p.id != "1"));

        let reloaded = CatalogStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.list().len(), 3);
    }

    #[tokio::test]
    async fn test_emptied_catalog_stays_empty() {
        let (db, mut store) = store().await;
        for id in ["1", "2", "3", "4"] {
            store.remove(id).await.unwrap();
        }

        let reloaded = CatalogStore::load(db.kv()).await.unwrap();
        assert!(reloaded.list().is_empty());
    }

    #[tokio::test]
    async fn test_reviews_pairs_product() {
        let (_db, store) = store().await;
        let pairs: Vec<(&str, &str)> = store
            .reviews()
            .into_iter()
            .map(|(p, r)| (p.id.as_str(), r.id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "1"), ("1", "2"), ("2", "3"), ("4", "4")]);
    }

    #[tokio::test]
    async fn test_corrupt_catalog_falls_back_to_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(PRODUCTS_KEY, r#"{"id": 1}"#).await.unwrap();

        let store = CatalogStore::load(db.kv()).await.unwrap();
        assert_eq!(store.list(), initial_products().as_slice());
        assert_eq!(
            db.kv().get(&backup_key(PRODUCTS_KEY)).await.unwrap().as_deref(),
            Some(r#"{"id": 1}"#)
        );
    }

    #[tokio::test]
    async fn test_one_bad_product_does_not_cost_the_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let raw = r#"[
            {"id": "a", "name": "Kept A", "price": 999, "images": [],
             "category": "Festive Wear", "sizes": [], "colors": [],
             "description": "", "stock": 3},
            {"id": "b", "name": "Cleared price", "price": null, "images": [],
             "category": "Festive Wear", "sizes": [], "colors": [],
             "description": "", "stock": null},
            {"id": "c", "name": "Broken", "price": "lots"}
        ]"#;
        db.kv().put(PRODUCTS_KEY, raw).await.unwrap();

        let mut store = CatalogStore::load(db.kv()).await.unwrap();
        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Kept A", "Cleared price"]);
        assert_eq!(store.by_id("b").unwrap().price, 0);
        assert_eq!(
            db.kv().get(&backup_key(PRODUCTS_KEY)).await.unwrap().as_deref(),
            Some(raw)
        );

        // A later write keeps the survivors.
        assert!(store.remove("b").await.unwrap());
        let reloaded = CatalogStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.list()[0].name, "Kept A");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_ids_unique_after_adds(count in 1usize..25) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (_db, mut store) = store().await;
                for i in 0..count {
                    store
                        .add(new_product(&format!("Piece {}", i), "Handcrafted Pieces"))
                        .await
                        .unwrap();
                }

                let ids: HashSet<&str> = store.list().iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids.len(), store.list().len());
            });
        }
    }
}
