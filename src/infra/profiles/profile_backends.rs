// Implementations of the profile store port.

pub mod cache_store;
pub mod in_memory;

// Re-export for convenience
pub use cache_store::{CacheProfileStore, PROFILE_PROVIDER};
pub use in_memory::InMemoryProfileStore;
