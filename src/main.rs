//! Wizlib console.
//!
//! Reads commands from stdin, one per line, and runs them against the
//! MongoDB-backed raid repository and an in-memory kiosk session.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wizlib::config::Config;
use wizlib::console::{Command, Session};
use wizlib::database::Database;
use wizlib::kiosk::{KioskCache, KioskManager};
use wizlib::raid::{CachedRaidRepository, MongoRaidRepository, RaidService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wizlib=info,mongodb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting wizlib console...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    info!("Database connected");

    let raids = RaidService::new(CachedRaidRepository::new(
        MongoRaidRepository::new(&db),
        config.raid_cache.clone(),
    ));
    let kiosk = KioskCache::new(
        KioskManager::new(&config.kiosk_id, &config.kiosk_title),
        config.kiosk_cache.clone(),
    );
    info!("Kiosk session {} ({})", config.kiosk_id, config.kiosk_title);

    let session = Session::new(raids, kiosk);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("error: {e}");
                        continue;
                    }
                };

                if command == Command::Quit {
                    break;
                }

                match session.execute(command).await {
                    Ok(output) => println!("{output}"),
                    Err(e) => {
                        warn!("Command failed: {}", e);
                        println!("error: {e}");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!("Console closed");
    Ok(())
}
