//! `troupe status` — Show configuration and ledger summary.

use std::sync::Arc;
use troupe_config::AppConfig;
use troupe_core::record::RecordStore;
use troupe_store::JsonFileStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🎵 Troupe Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Base URL:     {}", config.base_url);
    println!("  Model:        {}", config.model);
    println!("  Temperature:  {}", config.temperature);
    println!("  Max iters:    {}", config.max_iterations);
    println!("  Ledger:       {}", config.store_path);
    println!("  Music dir:    {}", config.music_dir);
    println!("  Synth URL:    {}", config.synth_url);
    println!(
        "  API key:      {}",
        if config.api_key.is_some() { "configured" } else { "missing" }
    );

    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(&config.store_path));
    let customers = store.all().await?;
    println!("  Customers:    {}", customers.len());

    // Check config file existence
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — defaults in use");
    }

    Ok(())
}
