//! Restart behaviour: everything written through a store is visible after the
//! database file is closed and reopened.

use kala_core::{InquiryStatus, NewInquiry, NewProduct, ProductPatch, SettingsPatch};
use kala_db::store::PRODUCTS_KEY;
use kala_db::{AdminSession, CatalogStore, Database, DbConfig, InquiryStore, SettingsStore};

async fn open(path: &std::path::Path) -> Database {
    Database::new(DbConfig::new(path)).await.unwrap()
}

#[tokio::test]
async fn test_all_stores_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drik-kala.db");

    let (product_id, inquiry_id) = {
        let db = open(&path).await;

        let mut settings = SettingsStore::load(db.kv()).await.unwrap();
        settings
            .update(SettingsPatch {
                home_hero_title: Some("Festive Edit".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let mut catalog = CatalogStore::load(db.kv()).await.unwrap();
        let added = catalog
            .add(NewProduct {
                name: "Chanderi Kurta".to_string(),
                price: 2899,
                images: vec![],
                category: "Kurtis & Dresses".to_string(),
                sizes: vec!["M".to_string(), "L".to_string()],
                colors: vec!["Saffron".to_string()],
                description: "Light chanderi weave".to_string(),
                reviews: vec![],
                featured: true,
                stock: 7,
            })
            .await
            .unwrap();
        catalog
            .update(
                "2",
                ProductPatch {
                    featured: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let mut inquiries = InquiryStore::load(db.kv()).await.unwrap();
        let inquiry = inquiries
            .add(NewInquiry {
                name: "Priya Sharma".to_string(),
                email: "priya@example.com".to_string(),
                phone: Some("+91 90000 11111".to_string()),
                subject: None,
                message: "When is the next drop?".to_string(),
            })
            .await
            .unwrap();
        inquiries.mark_seen(&inquiry.id).await.unwrap();

        let mut session = AdminSession::load(db.kv()).await.unwrap();
        session.login("admin_drik", "drik@123").await.unwrap();

        db.close().await;
        (added.id, inquiry.id)
    };

    let db = open(&path).await;

    let settings = SettingsStore::load(db.kv()).await.unwrap();
    assert_eq!(settings.get().home_hero_title, "Festive Edit");

    let catalog = CatalogStore::load(db.kv()).await.unwrap();
    assert_eq!(catalog.list().len(), 5);
    assert_eq!(catalog.by_id(&product_id).unwrap().name, "Chanderi Kurta");
    assert!(!catalog.by_id("2").unwrap().featured);

    let inquiries = InquiryStore::load(db.kv()).await.unwrap();
    let restored = inquiries.by_id(&inquiry_id).unwrap();
    assert_eq!(restored.status, InquiryStatus::Seen);
    assert_eq!(restored.phone.as_deref(), Some("+91 90000 11111"));

    let session = AdminSession::load(db.kv()).await.unwrap();
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_browser_export_loads() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("import.db")).await;

    // Shape written by the web storefront's local storage.
    let exported = r#"[{
        "id": "1716200000000",
        "name": "Block Print Dupatta",
        "price": 999,
        "images": ["https://example.com/dupatta.jpg"],
        "category": "Handcrafted Pieces",
        "sizes": ["Free"],
        "colors": ["Indigo"],
        "description": "Hand block printed",
        "reviews": [{"id": "r9", "name": "Isha", "rating": 5, "comment": "Lovely", "date": "2024-05-20"}],
        "featured": false,
        "stock": 0
    }]"#;
    db.kv().put(PRODUCTS_KEY, exported).await.unwrap();

    let catalog = CatalogStore::load(db.kv()).await.unwrap();
    assert_eq!(catalog.list().len(), 1);
    assert_eq!(catalog.list()[0].reviews[0].rating, 5);
    assert_eq!(catalog.list()[0].stock, 0);
}
