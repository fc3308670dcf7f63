pub mod cache_models;
pub mod guild_data_cache;

pub use cache_models::{CacheIndex, DataIndex, ProviderIndex, RecordKey, DATA_EXTENSION};
pub use guild_data_cache::{CacheError, DirectoryScanner, GuildDataCache, ScanError, ScanSummary};
