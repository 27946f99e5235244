//! Internal data models for the persisted offer list.
//!
//! `StoredOffer` is the storage-side shape of an offer: the payload under the
//! storage key is a JSON array of these, camelCase to match the original
//! AsyncStorage payload. The transient `expanded` flag is deliberately absent
//! here - it resets on every fresh load.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::interface::{Offer, OfferDraft, SkillSwapError};

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Id prefixes partition the seed and user id spaces, so a user post can
/// never collide with a seed offer by construction.
pub const SEED_ID_PREFIX: &str = "seed-";
pub const USER_ID_PREFIX: &str = "user-";

/// Label shown on a freshly created offer. Never recomputed afterwards.
pub const CREATED_JUST_NOW: &str = "Just now";

/// Persisted representation of a user-created offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOffer {
    pub id: String,
    pub author: String,
    pub created_label: String,
    pub category: String,
    pub title: String,
    pub description: String,
}

impl StoredOffer {
    /// Build the persisted record for a validated draft.
    pub fn from_draft(draft: &OfferDraft, id: String) -> Self {
        Self {
            id,
            author: draft.author.clone(),
            created_label: CREATED_JUST_NOW.to_string(),
            category: draft.category.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
        }
    }

    /// Convert to the feed representation. `expanded` always starts false.
    pub fn to_offer(&self) -> Offer {
        Offer {
            id: self.id.clone(),
            author: self.author.clone(),
            created_label: self.created_label.clone(),
            category: self.category.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            expanded: false,
        }
    }
}

/// Validate a create-post draft against the field constraints.
///
/// Checks run in field order (title, description, category) and report the
/// first violation; nothing is mutated on failure.
pub fn validate_draft(draft: &OfferDraft) -> Result<(), SkillSwapError> {
    if draft.title.trim().is_empty() {
        return Err(SkillSwapError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    if draft.title.chars().count() > MAX_TITLE_CHARS {
        return Err(SkillSwapError::Validation(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    if draft.description.trim().is_empty() {
        return Err(SkillSwapError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if draft.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(SkillSwapError::Validation(format!(
            "description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    if draft.category.trim().is_empty() {
        return Err(SkillSwapError::Validation(
            "category must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Generate a fresh time-derived user id that does not collide with any id in
/// the current persisted set. Millisecond timestamps make collisions rare;
/// the bump loop makes them impossible.
pub fn generate_user_id(existing: &[StoredOffer]) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{USER_ID_PREFIX}{millis}");
        if !existing.iter().any(|offer| offer.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> OfferDraft {
        OfferDraft {
            category: "Music".to_string(),
            title: "Guitar".to_string(),
            description: "Basic chords".to_string(),
            author: "A".to_string(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        let err = validate_draft(&d).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn title_length_boundary() {
        let mut d = draft();
        d.title = "a".repeat(MAX_TITLE_CHARS);
        assert!(validate_draft(&d).is_ok());

        d.title = "a".repeat(MAX_TITLE_CHARS + 1);
        let err = validate_draft(&d).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn description_length_boundary() {
        let mut d = draft();
        d.description = "a".repeat(MAX_DESCRIPTION_CHARS);
        assert!(validate_draft(&d).is_ok());

        d.description = "a".repeat(MAX_DESCRIPTION_CHARS + 1);
        let err = validate_draft(&d).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let mut d = draft();
        // 60 multi-byte characters stay within the title limit.
        d.title = "é".repeat(MAX_TITLE_CHARS);
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut d = draft();
        d.category = String::new();
        let err = validate_draft(&d).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn stored_offer_serializes_camel_case() {
        let offer = StoredOffer::from_draft(&draft(), "user-1700000000000".to_string());
        let json = serde_json::to_string(&offer).unwrap();
        assert!(json.contains("\"createdLabel\":\"Just now\""));
        assert!(json.contains("\"id\":\"user-1700000000000\""));

        let back: StoredOffer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, offer);
    }

    #[test]
    fn to_offer_starts_collapsed() {
        let offer = StoredOffer::from_draft(&draft(), "user-1".to_string());
        assert!(!offer.to_offer().expanded);
    }

    #[test]
    fn generated_user_id_is_namespaced() {
        let id = generate_user_id(&[]);
        assert!(id.starts_with(USER_ID_PREFIX));
    }

    #[test]
    fn generated_user_id_bumps_past_collisions() {
        let millis = Utc::now().timestamp_millis();
        // Occupy a window of ids around "now" so the generator must bump.
        let existing: Vec<StoredOffer> = (0..50)
            .map(|i| StoredOffer::from_draft(&draft(), format!("{USER_ID_PREFIX}{}", millis + i)))
            .collect();
        let id = generate_user_id(&existing);
        assert!(existing.iter().all(|offer| offer.id != id));
    }
}
