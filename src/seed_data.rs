//! Built-in seed offers: the fixed posts always present in the feed
//! regardless of persisted state.

use crate::interface::Offer;

pub struct SeedOffer {
    pub id: &'static str,
    pub author: &'static str,
    pub created_label: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Seed ids live in their own `seed-` namespace so user posts can never
/// shadow them by accident. Seed categories are open strings and may fall
/// outside the closed `OfferCategory` set.
pub const SEED_OFFERS: &[SeedOffer] = &[
    SeedOffer {
        id: "seed-1",
        author: "Muhammad Rameez",
        created_label: "2 hours ago",
        category: "Gaming",
        title: "PUBG Master",
        description: "Offering lessons to improve your skills in PUBG Mobile. Learn advanced strategies, map awareness, and pro-level shooting techniques. From beginner to master in a few sessions.",
    },
    SeedOffer {
        id: "seed-2",
        author: "Abdul Basit",
        created_label: "1 day ago",
        category: "Web Development",
        title: "Web Developer - Frontend and Backend",
        description: "Professional web developer with 10+ years experience offering lessons for all skill levels. Learn frontend and backend development from scratch.",
    },
    SeedOffer {
        id: "seed-3",
        author: "Muhammad Ali",
        created_label: "3 days ago",
        category: "Cybersecurity",
        title: "Ethical Hacking",
        description: "Learn the fundamentals of cybersecurity and ethical hacking. Protect your own systems by understanding how hackers think and operate. This course is for security enthusiasts and professionals.",
    },
    SeedOffer {
        id: "seed-4",
        author: "Fatima",
        created_label: "4 days ago",
        category: "Languages",
        title: "French Conversation",
        description: "Improve your French conversational skills with native speaker. We will focus on speaking practice, vocabulary building, and pronunciation in a relaxed environment.",
    },
];

/// Materialize the seed set as feed offers, in seed order, all collapsed.
pub fn seed_offers() -> Vec<Offer> {
    SEED_OFFERS
        .iter()
        .map(|seed| Offer {
            id: seed.id.to_string(),
            author: seed.author.to_string(),
            created_label: seed.created_label.to_string(),
            category: seed.category.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            expanded: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_namespaced() {
        let mut seen = std::collections::HashSet::new();
        for seed in SEED_OFFERS {
            assert!(seed.id.starts_with(crate::models::SEED_ID_PREFIX));
            assert!(seen.insert(seed.id), "duplicate seed id {}", seed.id);
        }
    }

    #[test]
    fn seed_offers_start_collapsed_in_seed_order() {
        let offers = seed_offers();
        assert_eq!(offers.len(), SEED_OFFERS.len());
        for (offer, seed) in offers.iter().zip(SEED_OFFERS) {
            assert_eq!(offer.id, seed.id);
            assert!(!offer.expanded);
        }
    }
}
