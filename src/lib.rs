// Data layer for a guild progression bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (filesystem, in-memory)
//
// The chat-platform gateway, command dispatch and message formatting live in
// the consuming bot process; this crate only exposes the services they call:
// the guild data cache, the user progression service and the block-game
// bonus rolls.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub use crate::core::blockgame::{BonusGame, BonusKind};
pub use crate::core::guild_data::{CacheError, GuildDataCache, ScanSummary};
pub use crate::core::profiles::{ProgressionService, UserProfile};
pub use crate::infra::guild_data::WalkdirScanner;
pub use crate::infra::profiles::CacheProfileStore;
