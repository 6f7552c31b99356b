//! Encounter tracker binary.
//!
//! Runs one command against the persisted encounter and prints the result:
//!
//! ```bash
//! encounter add goblin
//! encounter join pc-aria
//! encounter roll
//! encounter start
//! encounter next
//! ```
//!
//! Configuration comes from the environment (see [`RuntimeConfig::from_env`]),
//! optionally loaded from a `.env` file.
mod bootstrap;
mod command;
mod render;

use anyhow::{Context, Result};
use encounter_runtime::{RuntimeConfig, logging};

use command::Command;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir(), config.session_id())
        .context("failed to set up logging")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    tracing::info!("Session: {}", config.session_id());
    tracing::info!("Persistence: {}", config.enable_persistence);

    let session = bootstrap::open_session(&config)?;
    let output = command.run(&session)?;
    print!("{output}");
    Ok(())
}
