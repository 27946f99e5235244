//! SkillSwap FFI Interface Definition
//!
//! This file defines the public interface exposed to the host app via UniFFI.
//! It acts as the source of truth for shared types.

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Closed category set for user-created offers.
///
/// Seed offers are not bound to this set: their category is an open string
/// (`Offer::category`), so legacy labels like "Gaming" stay intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum OfferCategory {
    Programming,
    Music,
    Art,
    Fitness,
    Languages,
    Other,
}

impl OfferCategory {
    pub const ALL: &'static [OfferCategory] = &[
        OfferCategory::Programming,
        OfferCategory::Music,
        OfferCategory::Art,
        OfferCategory::Fitness,
        OfferCategory::Languages,
        OfferCategory::Other,
    ];

    /// Display label, also the string stored in `Offer::category`.
    pub fn label(&self) -> &'static str {
        match self {
            OfferCategory::Programming => "Programming",
            OfferCategory::Music => "Music",
            OfferCategory::Art => "Art",
            OfferCategory::Fitness => "Fitness",
            OfferCategory::Languages => "Languages",
            OfferCategory::Other => "Other",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A skill offer as rendered by the feed.
///
/// `expanded` is transient UI state (detail visibility). It is never persisted
/// and resets to false on every fresh load.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Offer {
    pub id: String,
    pub author: String,
    /// Human-readable relative time, set at creation and never recomputed.
    pub created_label: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub expanded: bool,
}

/// User input for a new offer, as collected by the create-post screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct OfferDraft {
    pub category: String,
    pub title: String,
    pub description: String,
    pub author: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR TYPE
// ═══════════════════════════════════════════════════════════════════════════════

/// Error type for SkillSwap store operations.
///
/// Storage read faults never appear here: `OfferStore::load` recovers from
/// them locally by falling back to the seed-only view.
#[derive(Debug, Error, uniffi::Error)]
pub enum SkillSwapError {
    /// Bad user input. No state changed; the message names the field.
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The storage adapter could not persist the change. In-memory state was
    /// rolled back to the last known-good view.
    #[error("Storage write failed: {0}")]
    StorageWrite(String),
}

impl From<crate::storage::StorageError> for SkillSwapError {
    fn from(e: crate::storage::StorageError) -> Self {
        SkillSwapError::StorageWrite(e.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FREE FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Category labels for the create-post picker, in display order.
#[uniffi::export]
pub fn offer_categories() -> Vec<String> {
    OfferCategory::ALL
        .iter()
        .map(|c| c.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_cover_the_closed_set() {
        let labels = offer_categories();
        assert_eq!(
            labels,
            vec!["Programming", "Music", "Art", "Fitness", "Languages", "Other"]
        );
    }

    #[test]
    fn validation_error_message_names_the_field() {
        let err = SkillSwapError::Validation("title must not be empty".to_string());
        assert!(err.to_string().contains("title"));
    }
}
