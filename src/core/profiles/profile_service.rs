// Business logic for user progression.
//
// Every counted message is worth 1 experience, 1 coin and `bpm` mined
// blocks. Levels follow a triangular progression: the total experience
// required to finish level `n` is the sum 1+2+...+n scaled by 5, so each
// level costs 5 more experience than the one before it.

use chrono::Utc;
use thiserror::Error;

use super::profile_models::UserProfile;
use super::profile_store::{ProfileStore, ProfileStoreError};

/// Experience granted per counted message.
const EXP_PER_MESSAGE: u64 = 1;
/// Coins granted per counted message.
const COINS_PER_MESSAGE: u64 = 1;
/// Every this many levels, blocks-per-message grows by one.
const BPM_LEVEL_STEP: u32 = 10;

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("Store error: {0}")]
    Store(#[from] ProfileStoreError),
}

/// Emitted when a processed message pushes a user over a level threshold.
/// The bot's announcement layer turns this into a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    /// True when the new level granted an extra block-per-message.
    pub bpm_increased: bool,
}

/// Result of processing one message: the updated profile plus the level-up
/// event, if any.
#[derive(Debug, Clone)]
pub struct MessageOutcome {
    pub profile: UserProfile,
    pub level_up: Option<LevelUp>,
}

pub struct ProgressionService<S: ProfileStore> {
    store: S,
}

impl<S: ProfileStore> ProgressionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Total experience needed to climb from level `from` to level `to`.
    ///
    /// Triangular sum of the per-level costs, scaled by 5. Pure math, no
    /// side effects.
    pub fn exp_between(from: u32, to: u32) -> u64 {
        if to <= from {
            return 0;
        }
        let from = from as u64;
        let to = to as u64;
        ((from + to - 1) * (to - from) / 2) * 5
    }

    /// Experience threshold at which `level` is left behind.
    pub fn exp_for_level_up(level: u32) -> u64 {
        Self::exp_between(1, level + 1)
    }

    /// Experience still missing before the profile's next level.
    pub fn exp_to_next_level(profile: &UserProfile) -> u64 {
        Self::exp_for_level_up(profile.level).saturating_sub(profile.experience)
    }

    /// Get a user's profile, or a fresh one if they have none yet.
    /// The fresh profile is not persisted until something changes it.
    pub async fn get_profile(
        &self,
        guild_id: &str,
        user_id: &str,
        username: &str,
    ) -> Result<UserProfile, ProgressionError> {
        Ok(self
            .store
            .load(guild_id, user_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(username)))
    }

    /// Award a counted message to a user and persist the result.
    pub async fn process_message(
        &self,
        guild_id: &str,
        user_id: &str,
        username: &str,
    ) -> Result<MessageOutcome, ProgressionError> {
        let mut profile = self.get_profile(guild_id, user_id, username).await?;

        profile.experience += EXP_PER_MESSAGE;
        profile.coins += COINS_PER_MESSAGE;
        profile.blockgame.blocks += profile.blockgame.bpm;
        profile.messages.created += 1;
        profile.last_message_at = Some(Utc::now());

        let level_up = if profile.experience >= Self::exp_for_level_up(profile.level) {
            let old_level = profile.level;
            profile.level += 1;

            let bpm_increased = profile.level % BPM_LEVEL_STEP == 0;
            if bpm_increased {
                profile.blockgame.bpm += 1;
            }

            tracing::debug!(
                guild_id,
                user_id,
                old_level,
                new_level = profile.level,
                "User leveled up"
            );
            Some(LevelUp {
                old_level,
                new_level: profile.level,
                bpm_increased,
            })
        } else {
            None
        };

        self.store.save(guild_id, user_id, &profile).await?;
        Ok(MessageOutcome { profile, level_up })
    }

    /// Ids of every user with progression data in a guild.
    pub async fn list_users(&self, guild_id: &str) -> Result<Vec<String>, ProgressionError> {
        Ok(self.store.list_users(guild_id).await?)
    }
}

// ============================================================================
// TESTS
// ============================================================================
