// Profile storage on top of the guild data cache.
//
// Profiles live under the `profiles` provider, one record per user:
// `<root>/<guildId>/profiles/<userId>.json`. Going through the cache keeps
// the index and the files in lockstep, so moderator lookups see the same
// data the progression service does.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::guild_data::{DirectoryScanner, GuildDataCache};
use crate::core::profiles::{ProfileStore, ProfileStoreError, UserProfile};

/// Provider id the progression data is filed under.
pub const PROFILE_PROVIDER: &str = "profiles";

pub struct CacheProfileStore<S: DirectoryScanner> {
    cache: Arc<GuildDataCache<S>>,
}

impl<S: DirectoryScanner> CacheProfileStore<S> {
    pub fn new(cache: Arc<GuildDataCache<S>>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<S: DirectoryScanner> ProfileStore for CacheProfileStore<S> {
    async fn load(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<UserProfile>, ProfileStoreError> {
        let value = self
            .cache
            .read_record(guild_id, PROFILE_PROVIDER, user_id)
            .await
            .map_err(|e| ProfileStoreError::Storage(e.to_string()))?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ProfileStoreError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        guild_id: &str,
        user_id: &str,
        profile: &UserProfile,
    ) -> Result<(), ProfileStoreError> {
        self.cache
            .write_record(guild_id, PROFILE_PROVIDER, user_id, profile)
            .await
            .map_err(|e| ProfileStoreError::Storage(e.to_string()))
    }

    async fn list_users(&self, guild_id: &str) -> Result<Vec<String>, ProfileStoreError> {
        let mut users: Vec<String> = self
            .cache
            .get_data_ids(guild_id, PROFILE_PROVIDER)
            .await
            .map(|entries| entries.into_keys().collect())
            .unwrap_or_default();
        users.sort();
        Ok(users)
    }
}
