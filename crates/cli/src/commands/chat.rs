//! `troupe chat` — Interactive or single-message chat mode.

use std::io::{BufRead, Write};
use std::sync::Arc;
use troupe_agent::Supervisor;
use troupe_config::AppConfig;
use troupe_store::JsonFileStore;
use troupe_tools::synth::HttpSynthClient;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    TROUPE_API_KEY = 'sk-...'   (generic)");
        eprintln!("    OPENAI_API_KEY = 'sk-...'   (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let client = troupe_providers::build_from_config(&config);
    let synth = Arc::new(HttpSynthClient::new(&config.synth_url));
    let store = Arc::new(JsonFileStore::new(&config.store_path));

    let supervisor = Supervisor::new(
        client,
        synth,
        store,
        &config.music_dir,
        config.max_iterations,
    );

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let response = supervisor.handle(&msg).await;
        eprint!("\r              \r");
        println!("{response}");
    } else {
        // Interactive mode
        println!();
        println!("  ╔══════════════════════════════════════════════╗");
        println!("  ║        Troupe — Interactive Mode             ║");
        println!("  ╚══════════════════════════════════════════════╝");
        println!();
        println!("  Model:     {}", config.model);
        println!("  Agents:    Music Producer, Finance Manager, Marketing Manager");
        println!("  Ledger:    {}", config.store_path);
        println!("  Music dir: {}", config.music_dir);
        println!();
        println!("  Type your message and press Enter.");
        println!("  Type 'exit' or Ctrl+C to quit.");
        println!();

        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            print!("  You > ");
            std::io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") {
                break;
            }

            eprint!("  ...");
            let response = supervisor.handle(input).await;
            eprint!("\r     \r");
            println!();
            for out in response.lines() {
                println!("  Assistant > {out}");
            }
            println!();
        }

        println!();
        println!("  Goodbye! 👋");
        println!();
    }

    Ok(())
}
