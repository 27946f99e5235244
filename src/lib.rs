//! SkillSwap Core - Rust business logic for the SkillSwap skill-sharing app
//!
//! This library owns the canonical offer feed for the SkillSwap app: it merges
//! the built-in seed offers with user-created posts persisted in the host's
//! key-value storage, deduplicates by id, and hands ordered snapshots to the
//! UI layer.
//!
//! Types are exported via UniFFI proc-macros (#[derive(uniffi::Record/Enum)]).
//! The host app supplies its platform key-value store by implementing the
//! `KeyValueStorage` trait on the foreign side.

pub mod interface;
mod models;
pub mod seed_data;
pub mod storage;
mod store;

pub use interface::*;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{OfferStore, STORAGE_KEY};

uniffi::setup_scaffolding!("skillswap_core");
