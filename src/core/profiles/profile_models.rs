use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's progression data within one guild.
///
/// Users can be in multiple guilds and progress separately in each one, so
/// profiles are always stored per (guild, user) pair. The struct is the
/// record payload persisted through the guild data cache; serde defaults
/// keep old record files loadable when fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub username: String,
    pub level: u32,
    pub experience: u64,
    pub coins: u64,
    pub blockgame: BlockGameStats,
    pub messages: MessageCounters,
    pub warns: u32,
    pub last_message_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockGameStats {
    /// Total blocks mined.
    pub blocks: u64,
    /// Blocks mined per message ("blocks per message"); grows every 10th level.
    pub bpm: u64,
    /// Pickaxe level; bonus rolls only happen once this is above zero.
    pub picklevel: u32,
    pub bonuses: BonusCounters,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusCounters {
    pub simple: u64,
    pub extra: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCounters {
    pub created: u64,
    pub deleted: u64,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: String::new(),
            level: 1,
            experience: 0,
            coins: 0,
            blockgame: BlockGameStats::default(),
            messages: MessageCounters::default(),
            warns: 0,
            last_message_at: None,
        }
    }
}
