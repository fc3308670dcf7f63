// Progression and bonus-game flows persisted through the guild data cache.

use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use guild_data_bot::core::guild_data::GuildDataCache;
use guild_data_bot::infra::profiles::PROFILE_PROVIDER;
use guild_data_bot::{BonusGame, CacheProfileStore, ProgressionService, WalkdirScanner};

type Cache = Arc<GuildDataCache<WalkdirScanner>>;

async fn make_service(root: &std::path::Path) -> Result<(Cache, ProgressionService<CacheProfileStore<WalkdirScanner>>)> {
    let cache = Arc::new(GuildDataCache::new(root, WalkdirScanner));
    cache.build_index().await?;
    let service = ProgressionService::new(CacheProfileStore::new(Arc::clone(&cache)));
    Ok((cache, service))
}

#[tokio::test]
async fn profiles_land_under_the_profiles_provider() -> Result<()> {
    let dir = TempDir::new()?;
    let (cache, service) = make_service(dir.path()).await?;

    service.process_message("G1", "42", "miner").await?;

    assert!(dir.path().join("G1/profiles/42.json").is_file());
    let data_ids = cache.get_data_ids("G1", PROFILE_PROVIDER).await.unwrap();
    assert!(data_ids.contains_key("42"));
    assert_eq!(service.list_users("G1").await?, vec!["42"]);
    Ok(())
}

#[tokio::test]
async fn a_restarted_cache_serves_previous_profiles() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let (_cache, service) = make_service(dir.path()).await?;
        for _ in 0..5 {
            service.process_message("G1", "42", "miner").await?;
        }
    }

    // Fresh instance over the same root, index rebuilt from disk
    let (_cache, service) = make_service(dir.path()).await?;
    let profile = service.get_profile("G1", "42", "miner").await?;
    assert_eq!(profile.level, 2);
    assert_eq!(profile.experience, 5);
    assert_eq!(profile.coins, 5);
    Ok(())
}

#[tokio::test]
async fn bonus_rolls_persist_through_the_store() -> Result<()> {
    use guild_data_bot::core::profiles::ProfileStore;

    let dir = TempDir::new()?;
    let (cache, service) = make_service(dir.path()).await?;

    // Give the user a pickaxe, then run a guaranteed-drop game
    let mut profile = service.process_message("G1", "42", "miner").await?.profile;
    profile.blockgame.picklevel = 1;

    let game = BonusGame::new(1.0, 0.0);
    assert!(game.roll_for_message(&mut profile).is_some());

    // Persist the rolled profile the way the bot's event handler would
    let store = CacheProfileStore::new(Arc::clone(&cache));
    store.save("G1", "42", &profile).await?;

    let loaded = store.load("G1", "42").await?.expect("profile should round-trip");
    assert_eq!(loaded.blockgame.bonuses.simple, 1);
    assert_eq!(loaded.blockgame.picklevel, 1);
    Ok(())
}

#[tokio::test]
async fn moderator_lookup_sees_the_raw_record() -> Result<()> {
    let dir = TempDir::new()?;
    let (cache, service) = make_service(dir.path()).await?;

    service.process_message("G1", "42", "miner").await?;

    // The moderator-facing cache command reads the same JSON the store wrote
    let record = cache
        .read_record("G1", PROFILE_PROVIDER, "42")
        .await?
        .expect("record should exist");
    assert_eq!(record["username"], "miner");
    assert_eq!(record["experience"], 1);
    Ok(())
}
