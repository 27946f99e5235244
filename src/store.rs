//! OfferStore - Main API for host interop, designed for UniFFI export.
//!
//! The store owns the authoritative, deduplicated, ordered offer list: user
//! posts read from the persistence adapter, followed by the built-in seed
//! offers, first occurrence winning on id collisions.
//!
//! Concurrency Model:
//! - load/append/reset serialize on one tokio Mutex around the persisted
//!   list, so two mutating calls can never race on the stored payload.
//! - toggle_expanded is synchronous and only touches the in-memory view
//!   snapshot (parking_lot Mutex), safe to call re-entrantly.
//! - No cancellation: a caller may drop a future, but an in-flight write on
//!   the adapter still completes and persists.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::interface::{Offer, OfferDraft, SkillSwapError};
use crate::models::{generate_user_id, validate_draft, StoredOffer};
use crate::seed_data::seed_offers;
use crate::storage::KeyValueStorage;

/// The single storage key holding the persisted offer list, kept from the
/// original app so existing installs pick up their posts.
pub const STORAGE_KEY: &str = "skillsData";

/// Merge persisted offers (already in feed shape) ahead of the seed set,
/// keeping the first occurrence of every id.
fn merge_offers(persisted: &[StoredOffer], seeds: Vec<Offer>) -> Vec<Offer> {
    let mut seen: HashSet<String> = HashSet::with_capacity(persisted.len() + seeds.len());
    let mut merged = Vec::with_capacity(persisted.len() + seeds.len());

    // Persisted posts come first, so they win every id collision with seeds.
    for offer in persisted.iter().map(StoredOffer::to_offer).chain(seeds) {
        if seen.insert(offer.id.clone()) {
            merged.push(offer);
        }
    }
    merged
}

/// Offer feed store backed by a pluggable key-value adapter.
#[derive(uniffi::Object)]
pub struct OfferStore {
    storage: Arc<dyn KeyValueStorage>,
    /// Canonical user-created list. The tokio Mutex doubles as the
    /// single-flight queue for load/append/reset.
    persisted: tokio::sync::Mutex<Vec<StoredOffer>>,
    /// Last merged snapshot handed to the UI; toggle_expanded mutates this.
    view: parking_lot::Mutex<Vec<Offer>>,
}

// Internal implementation (not exported via FFI)
impl OfferStore {
    fn refresh_view(&self, persisted: &[StoredOffer]) -> Vec<Offer> {
        let merged = merge_offers(persisted, seed_offers());
        *self.view.lock() = merged.clone();
        merged
    }

    /// Parse the stored payload; a malformed payload counts as a read fault.
    fn parse_payload(payload: &str) -> Option<Vec<StoredOffer>> {
        match serde_json::from_str::<Vec<StoredOffer>>(payload) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(error = %e, "stored offer payload is malformed, falling back to seed data");
                None
            }
        }
    }
}

#[uniffi::export]
impl OfferStore {
    /// Create a store over the given persistence adapter. The store starts in
    /// the seed-only state until the first `load` completes.
    #[uniffi::constructor]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            persisted: tokio::sync::Mutex::new(Vec::new()),
            view: parking_lot::Mutex::new(seed_offers()),
        }
    }

    /// Load the merged feed: persisted posts first, then seeds, deduplicated
    /// by id. Read faults and malformed payloads fall back to the seed-only
    /// view - the seed set is always available, so `load` never fails.
    pub async fn load(&self) -> Vec<Offer> {
        let mut persisted = self.persisted.lock().await;

        *persisted = match self.storage.get(STORAGE_KEY.to_string()).await {
            Ok(Some(payload)) => Self::parse_payload(&payload).unwrap_or_default(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "storage read failed, falling back to seed data");
                Vec::new()
            }
        };

        self.refresh_view(&persisted)
    }

    /// Validate and persist a new offer, prepending it to the user posts.
    ///
    /// The in-memory list is committed only after the adapter write lands, so
    /// a write fault leaves no partial state behind.
    pub async fn append(&self, draft: OfferDraft) -> Result<Vec<Offer>, SkillSwapError> {
        validate_draft(&draft)?;

        let mut persisted = self.persisted.lock().await;

        let id = generate_user_id(&persisted);
        let record = StoredOffer::from_draft(&draft, id);

        let mut updated = Vec::with_capacity(persisted.len() + 1);
        updated.push(record);
        updated.extend(persisted.iter().cloned());

        let payload = serde_json::to_string(&updated)
            .map_err(|e| SkillSwapError::StorageWrite(e.to_string()))?;
        self.storage.set(STORAGE_KEY.to_string(), payload).await?;

        *persisted = updated;
        debug!(count = persisted.len(), "appended offer");

        Ok(self.refresh_view(&persisted))
    }

    /// Flip the detail-visibility flag on the offer with the given id in the
    /// current view. Unknown ids are a no-op. Never touches the adapter: the
    /// flag is transient UI state and resets to false on the next `load`.
    pub fn toggle_expanded(&self, id: String) -> Vec<Offer> {
        let mut view = self.view.lock();
        if let Some(offer) = view.iter_mut().find(|offer| offer.id == id) {
            offer.expanded = !offer.expanded;
        }
        view.clone()
    }

    /// Clear all persisted posts and return to the seed-only feed. On a
    /// write fault the in-memory state is left unchanged.
    pub async fn reset(&self) -> Result<Vec<Offer>, SkillSwapError> {
        let mut persisted = self.persisted.lock().await;

        self.storage.remove(STORAGE_KEY.to_string()).await?;

        persisted.clear();
        debug!("cleared persisted offers");

        Ok(self.refresh_view(&persisted))
    }
}
