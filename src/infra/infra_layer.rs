// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "guild_data/scanner.rs"]
pub mod guild_data;

#[path = "profiles/profile_backends.rs"]
pub mod profiles;
