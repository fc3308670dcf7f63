// In-memory implementation of the profile store.
//
// Used by the core progression tests; also handy for running the services
// without a data directory. DashMap keeps it safe across async tasks
// without an explicit lock.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::core::profiles::{ProfileStore, ProfileStoreError, UserProfile};

/// Composite key: profiles are per user *and* per guild.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
struct GuildUserKey {
    guild_id: String,
    user_id: String,
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    data: DashMap<GuildUserKey, UserProfile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> Result<Option<UserProfile>, ProfileStoreError> {
        let key = GuildUserKey {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        };
        Ok(self.data.get(&key).map(|entry| entry.clone()))
    }

    async fn save(
        &self,
        guild_id: &str,
        user_id: &str,
        profile: &UserProfile,
    ) -> Result<(), ProfileStoreError> {
        let key = GuildUserKey {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        };
        self.data.insert(key, profile.clone());
        Ok(())
    }

    async fn list_users(&self, guild_id: &str) -> Result<Vec<String>, ProfileStoreError> {
        let mut users: Vec<String> = self
            .data
            .iter()
            .filter(|entry| entry.key().guild_id == guild_id)
            .map(|entry| entry.key().user_id.clone())
            .collect();
        users.sort();
        Ok(users)
    }
}
