// Storage port for user profiles.
//
// The core defines WHAT it needs, not HOW it's stored. Production wires the
// cache-backed store from infra; tests use the in-memory one.

use async_trait::async_trait;
use thiserror::Error;

use super::profile_models::UserProfile;

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load a user's profile in a guild, or `None` if they have none yet.
    async fn load(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<UserProfile>, ProfileStoreError>;

    /// Persist a profile, overwriting any previous version.
    async fn save(
        &self,
        guild_id: &str,
        user_id: &str,
        profile: &UserProfile,
    ) -> Result<(), ProfileStoreError>;

    /// Ids of every user with a stored profile in a guild.
    async fn list_users(&self, guild_id: &str) -> Result<Vec<String>, ProfileStoreError>;
}
