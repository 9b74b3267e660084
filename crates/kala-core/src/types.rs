//! # Domain Types
//!
//! Record types shared by the stores and the console.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                         ┌─────────────────┐       │
//! │  │    Product      │ 1 ─────────────────── * │     Review      │       │
//! │  │  ─────────────  │   (embedded, owned)     │  ─────────────  │       │
//! │  │  id             │                         │  id (per prod.) │       │
//! │  │  name, price    │                         │  name, rating   │       │
//! │  │  category       │                         │  comment, date  │       │
//! │  │  featured, stock│                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Inquiry      │   │  InquiryStatus  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id, timestamp  │   │  New ──► Seen   │  (one direction only)       │
//! │  │  name, email    │   └─────────────────┘                             │
//! │  │  phone?/subject?│                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Records serialize with camelCase keys. This is the same JSON the web
//! storefront keeps in local storage, so exported browser data loads as-is.
//!
//! ## Patches
//! Partial updates are explicit patch structs over a closed field set.
//! Unknown keys are rejected at deserialization time (`deny_unknown_fields`)
//! and `id` is never patchable.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Review
// =============================================================================

/// A customer rating embedded in its product.
///
/// `id` is only unique within the parent product's review list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    /// Author name.
    pub name: String,
    /// Expected 1-5; not enforced by the catalog.
    pub rating: u8,
    pub comment: String,
    /// Free-form date string (`2024-01-15` in seed data).
    pub date: String,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the catalog, stable for the record's lifetime.
    pub id: String,

    pub name: String,

    /// Price in whole rupees (no minor unit). A stored `null` reads as 0.
    #[serde(deserialize_with = "null_as_zero::deserialize")]
    pub price: i64,

    /// Image locators, first one is the cover image.
    pub images: Vec<String>,

    /// One of [`crate::CATEGORIES`] in practice.
    pub category: String,

    pub sizes: Vec<String>,

    pub colors: Vec<String>,

    pub description: String,

    #[serde(default)]
    pub reviews: Vec<Review>,

    #[serde(default)]
    pub featured: bool,

    #[serde(deserialize_with = "null_as_zero::deserialize")]
    pub stock: i64,
}

impl Product {
    /// Builds a stored product from admin form data and a fresh id.
    pub fn from_new(id: impl Into<String>, data: NewProduct) -> Self {
        Product {
            id: id.into(),
            name: data.name,
            price: data.price,
            images: data.images,
            category: data.category,
            sizes: data.sizes,
            colors: data.colors,
            description: data.description,
            reviews: data.reviews,
            featured: data.featured,
            stock: data.stock,
        }
    }

    /// Cover image, if the product has any images.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Product data without an identifier (the admin "add product" form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub stock: i64,
}

/// Partial product update. `None` leaves the field untouched.
///
/// ```rust
/// use kala_core::{Product, ProductPatch};
///
/// let patch: ProductPatch = serde_json::from_str(r#"{"price": 1999}"#).unwrap();
/// assert_eq!(patch.price, Some(1999));
///
/// // Unknown keys and the id are rejected
/// assert!(serde_json::from_str::<ProductPatch>(r#"{"id": "9"}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// Merges the supplied fields into `product`. Lists are replaced whole.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = self.colors {
            product.colors = colors;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(reviews) = self.reviews {
            product.reviews = reviews;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }

    /// True when the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }
}

// =============================================================================
// Inquiry Status
// =============================================================================

/// Two-state inquiry lifecycle. Only `New -> Seen` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InquiryStatus {
    #[default]
    New,
    Seen,
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryStatus::New => write!(f, "New"),
            InquiryStatus::Seen => write!(f, "Seen"),
        }
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(InquiryStatus::New),
            "seen" => Ok(InquiryStatus::Seen),
            _ => Err(crate::ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["New".to_string(), "Seen".to_string()],
            }),
        }
    }
}

// =============================================================================
// Inquiry
// =============================================================================

/// A customer contact submission.
///
/// The contact form captures a subject, older submissions carry a phone
/// number; both are optional so either shape loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    /// Submission time, millisecond precision.
    #[serde(with = "iso_millis")]
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: InquiryStatus,
}

impl Inquiry {
    /// Builds a stored inquiry from form data. Status always starts as `New`.
    pub fn from_new(id: impl Into<String>, data: NewInquiry, timestamp: DateTime<Utc>) -> Self {
        Inquiry {
            id: id.into(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            subject: data.subject,
            message: data.message,
            timestamp: truncate_to_millis(timestamp),
            status: InquiryStatus::New,
        }
    }

    /// Timestamp as stored: `2024-01-15T10:30:00.000Z`.
    pub fn timestamp_string(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    pub fn is_new(&self) -> bool {
        self.status == InquiryStatus::New
    }
}

/// Contact-form data without id, timestamp or status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Admin-side inquiry filter. Both criteria are optional and AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryFilter {
    pub status: Option<InquiryStatus>,
    /// Matched against the stored timestamp string, e.g. `2024-01-15`.
    pub date_prefix: Option<String>,
}

impl InquiryFilter {
    pub fn status(status: InquiryStatus) -> Self {
        InquiryFilter {
            status: Some(status),
            date_prefix: None,
        }
    }

    pub fn with_date_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.date_prefix = Some(prefix.into());
        self
    }

    pub fn matches(&self, inquiry: &Inquiry) -> bool {
        let status_ok = self.status.map_or(true, |s| inquiry.status == s);
        let date_ok = match self.date_prefix.as_deref() {
            None | Some("") => true,
            Some(prefix) => inquiry.timestamp_string().starts_with(prefix),
        };
        status_ok && date_ok
    }
}

// =============================================================================
// Timestamp Format
// =============================================================================

/// Renders a timestamp the way stored inquiries carry it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops sub-millisecond precision so a timestamp survives a store round-trip.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    use chrono::SubsecRound;
    ts.trunc_subsecs(3)
}

/// Browser records carry `null` where a cleared number input was saved.
mod null_as_zero {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
    }
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Elegant Floral Kurti".to_string(),
            price: 2499,
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            category: "Kurtis & Dresses".to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Navy Blue".to_string()],
            description: "Handcrafted".to_string(),
            reviews: vec![],
            featured: true,
            stock: 15,
        }
    }

    #[test]
    fn test_patch_changes_only_named_fields() {
        let mut product = sample_product();
        let before = product.clone();

        let patch = ProductPatch {
            price: Some(1999),
            ..Default::default()
        };
        patch.apply_to(&mut product);

        assert_eq!(product.price, 1999);
        assert_eq!(
            Product {
                price: before.price,
                ..product
            },
            before
        );
    }

    #[test]
    fn test_patch_rejects_unknown_and_id_fields() {
        assert!(serde_json::from_str::<ProductPatch>(r#"{"color": "red"}"#).is_err());
        assert!(serde_json::from_str::<ProductPatch>(r#"{"id": "2"}"#).is_err());
        let ok: ProductPatch = serde_json::from_str(r#"{"featured": false}"#).unwrap();
        assert_eq!(ok.featured, Some(false));
        assert!(ProductPatch::default().is_empty());
        assert!(!ok.is_empty());
    }

    #[test]
    fn test_product_json_uses_browser_shape() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["price"], 2499);
        assert_eq!(json["category"], "Kurtis & Dresses");
        assert!(json["reviews"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_cleared_number_inputs_load_as_zero() {
        let raw = r#"{
            "id": "9", "name": "Draft", "price": null, "images": [],
            "category": "Festive Wear", "sizes": [], "colors": [],
            "description": "", "stock": null
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.price, 0);
        assert_eq!(product.stock, 0);

        let missing = r#"{"id": "9", "name": "Draft", "images": [], "category": "x",
            "sizes": [], "colors": [], "description": "", "stock": 1}"#;
        assert!(serde_json::from_str::<Product>(missing).is_err());
    }

    #[test]
    fn test_inquiry_status_parsing() {
        assert_eq!("new".parse::<InquiryStatus>().unwrap(), InquiryStatus::New);
        assert_eq!("Seen".parse::<InquiryStatus>().unwrap(), InquiryStatus::Seen);
        assert!("archived".parse::<InquiryStatus>().is_err());
        assert_eq!(InquiryStatus::default(), InquiryStatus::New);
    }

    #[test]
    fn test_inquiry_timestamp_is_iso_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let inquiry = Inquiry::from_new(
            "i-1",
            NewInquiry {
                name: "Priya".to_string(),
                email: "priya@example.com".to_string(),
                phone: None,
                subject: Some("Sizing".to_string()),
                message: "Do you have XL?".to_string(),
            },
            ts,
        );

        let json = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00.000Z");
        assert_eq!(json["status"], "New");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_inquiry_loads_legacy_phone_shape() {
        let raw = r#"{
            "id": "1705312200000",
            "name": "Anjali",
            "email": "anjali@example.com",
            "phone": "+91 90000 00000",
            "message": "Hello",
            "timestamp": "2024-01-15T10:30:00.000Z",
            "status": "Seen"
        }"#;
        let inquiry: Inquiry = serde_json::from_str(raw).unwrap();
        assert_eq!(inquiry.phone.as_deref(), Some("+91 90000 00000"));
        assert_eq!(inquiry.subject, None);
        assert_eq!(inquiry.status, InquiryStatus::Seen);
    }

    #[test]
    fn test_filter_combines_status_and_date() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut inquiry = Inquiry::from_new(
            "i-1",
            NewInquiry {
                name: "Kavya".to_string(),
                email: "kavya@example.com".to_string(),
                phone: None,
                subject: None,
                message: "Hi".to_string(),
            },
            ts,
        );

        assert!(InquiryFilter::default().matches(&inquiry));
        assert!(InquiryFilter::status(InquiryStatus::New)
            .with_date_prefix("2024-01-15")
            .matches(&inquiry));
        assert!(!InquiryFilter::status(InquiryStatus::New)
            .with_date_prefix("2024-01-16")
            .matches(&inquiry));

        inquiry.status = InquiryStatus::Seen;
        assert!(!InquiryFilter::status(InquiryStatus::New).matches(&inquiry));
    }
}
