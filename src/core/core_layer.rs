// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "guild_data/mod.rs"]
pub mod guild_data;

#[path = "profiles/mod.rs"]
pub mod profiles;

#[path = "blockgame/bonus_service.rs"]
pub mod blockgame;
