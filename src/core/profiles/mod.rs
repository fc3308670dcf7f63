pub mod profile_models;
pub mod profile_service;
pub mod profile_store;

pub use profile_models::{BlockGameStats, BonusCounters, MessageCounters, UserProfile};
pub use profile_service::{LevelUp, MessageOutcome, ProgressionError, ProgressionService};
pub use profile_store::{ProfileStore, ProfileStoreError};
