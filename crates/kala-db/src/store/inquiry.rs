//! # Inquiry Store
//!
//! Customer contact submissions, newest last.
//!
//! ## Status Lifecycle
//! ```text
//!   add() ──► New ──mark_seen()──► Seen
//!                                   │
//!                      mark_seen() again: no-op
//! ```

use chrono::{DateTime, Utc};
use kala_core::{Inquiry, InquiryFilter, InquiryStatus, NewInquiry};
use tracing::{debug, info};

use super::{generate_unique_id, load_collection, INQUIRIES_KEY};
use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Inquiry collection with write-through persistence.
#[derive(Debug)]
pub struct InquiryStore {
    kv: KvRepository,
    inquiries: Vec<Inquiry>,
}

impl InquiryStore {
    /// Restores stored inquiries, or an empty list.
    pub async fn load(kv: KvRepository) -> DbResult<Self> {
        let inquiries = load_collection(&kv, INQUIRIES_KEY, Vec::new).await?;
        debug!(count = inquiries.len(), "Inquiries loaded");
        Ok(InquiryStore { kv, inquiries })
    }

    pub fn list(&self) -> &[Inquiry] {
        &self.inquiries
    }

    /// Inquiries matching `filter`; an empty filter returns everything.
    pub fn filtered(&self, filter: &InquiryFilter) -> Vec<&Inquiry> {
        self.inquiries.iter().filter(|i| filter.matches(i)).collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Inquiry> {
        self.inquiries.iter().find(|i| i.id == id)
    }

    /// Records a submission stamped with the current time.
    pub async fn add(&mut self, data: NewInquiry) -> DbResult<Inquiry> {
        self.add_at(data, Utc::now()).await
    }

    /// Records a submission with an explicit timestamp (imports, seeding).
    pub async fn add_at(
        &mut self,
        data: NewInquiry,
        timestamp: DateTime<Utc>,
    ) -> DbResult<Inquiry> {
        let id = generate_unique_id(|candidate| self.by_id(candidate).is_some());
        let inquiry = Inquiry::from_new(id, data, timestamp);

        info!(id = %inquiry.id, email = %inquiry.email, "New inquiry");
        self.inquiries.push(inquiry.clone());
        self.persist().await?;
        Ok(inquiry)
    }

    /// Moves the inquiry to `Seen`.
    ///
    /// ## Returns
    /// `true` if the status changed. Unknown ids and already-seen inquiries
    /// return `false` without a write.
    pub async fn mark_seen(&mut self, id: &str) -> DbResult<bool> {
        let Some(inquiry) = self.inquiries.iter_mut().find(|i| i.id == id) else {
            debug!(id = %id, "mark_seen for unknown inquiry ignored");
            return Ok(false);
        };

        if inquiry.status == InquiryStatus::Seen {
            return Ok(false);
        }

        inquiry.status = InquiryStatus::Seen;
        debug!(id = %id, "Inquiry marked seen");
        self.persist().await?;
        Ok(true)
    }

    /// Deletes the inquiry with `id`; `false` if none matched.
    pub async fn remove(&mut self, id: &str) -> DbResult<bool> {
        let before = self.inquiries.len();
        self.inquiries.retain(|i| i.id != id);

        if self.inquiries.len() == before {
            debug!(id = %id, "Remove for unknown inquiry ignored");
            return Ok(false);
        }

        info!(id = %id, "Removed inquiry");
        self.persist().await?;
        Ok(true)
    }

    /// Number of inquiries still `New`.
    pub fn new_count(&self) -> usize {
        self.inquiries.iter().filter(|i| i.is_new()).count()
    }

    async fn persist(&self) -> DbResult<()> {
        self.kv.put_json(INQUIRIES_KEY, &self.inquiries).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::TimeZone;
    use proptest::prelude::*;
    use std::collections::HashSet;

    async fn store() -> (Database, InquiryStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = InquiryStore::load(db.kv()).await.unwrap();
        (db, store)
    }

    fn submission(name: &str) -> NewInquiry {
        NewInquiry {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            subject: Some("Sizing".to_string()),
            message: "Is the kurti available in XL?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let (_db, store) = store().await;
        assert!(store.list().is_empty());
        assert_eq!(store.new_count(), 0);
    }

    #[tokio::test]
    async fn test_new_inquiry_then_seen() {
        let (_db, mut store) = store().await;
        let inquiry = store.add(submission("Priya")).await.unwrap();
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert_eq!(store.new_count(), 1);

        assert!(store.mark_seen(&inquiry.id).await.unwrap());
        assert!(!store.mark_seen(&inquiry.id).await.unwrap());

        let seen = store.filtered(&InquiryFilter::status(InquiryStatus::Seen));
        let new = store.filtered(&InquiryFilter::status(InquiryStatus::New));
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, inquiry.id);
        assert!(new.is_empty());
        assert_eq!(store.new_count(), 0);
    }

    #[tokio::test]
    async fn test_filter_by_date_prefix() {
        let (_db, mut store) = store().await;
        let jan15 = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let jan16 = Utc.with_ymd_and_hms(2024, 1, 16, 9, 0, 0).unwrap();
        store.add_at(submission("Anjali"), jan15).await.unwrap();
        store.add_at(submission("Sneha"), jan16).await.unwrap();

        let filter = InquiryFilter::default().with_date_prefix("2024-01-15");
        let names: Vec<&str> = store
            .filtered(&filter)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Anjali"]);

        assert_eq!(store.filtered(&InquiryFilter::default()).len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_noop() {
        let (db, mut store) = store().await;
        assert!(!store.mark_seen("missing").await.unwrap());
        assert!(!store.remove("missing").await.unwrap());
        assert_eq!(db.kv().get(INQUIRIES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_id_leaves_inbox_unchanged() {
        let (db, mut store) = store().await;
        let first = store.add(submission("Meera")).await.unwrap();
        store.add(submission("Ritika")).await.unwrap();
        store.mark_seen(&first.id).await.unwrap();

        let before = store.list().to_vec();
        let stored_before = db.kv().get(INQUIRIES_KEY).await.unwrap();

        assert!(!store.mark_seen("missing").await.unwrap());
        assert!(!store.remove("missing").await.unwrap());

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(db.kv().get(INQUIRIES_KEY).await.unwrap(), stored_before);
    }

    #[tokio::test]
    async fn test_round_trip_through_storage() {
        let (db, mut store) = store().await;
        let first = store.add(submission("Kavya")).await.unwrap();
        store.add(submission("Riya")).await.unwrap();
        store.mark_seen(&first.id).await.unwrap();

        let reloaded = InquiryStore::load(db.kv()).await.unwrap();
        assert_eq!(reloaded.list(), store.list());

        let mut reloaded = reloaded;
        assert!(reloaded.remove(&first.id).await.unwrap());
        assert_eq!(reloaded.list().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_inquiries_fall_back_to_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().put(INQUIRIES_KEY, "[{").await.unwrap();

        let store = InquiryStore::load(db.kv()).await.unwrap();
        assert!(store.list().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_ids_unique_after_adds(count in 1usize..25) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (_db, mut store) = store().await;
                for i in 0..count {
                    store.add(submission(&format!("Guest{}", i))).await.unwrap();
                }

                let ids: HashSet<&str> = store.list().iter().map(|i| i.id.as_str()).collect();
                assert_eq!(ids.len(), count);
                assert_eq!(store.new_count(), count);
            });
        }
    }
}
