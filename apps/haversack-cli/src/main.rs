//! # Haversack CLI
//!
//! Command-line front end over the inventory rules engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          haversack (binary)                             │
//! │                                                                         │
//! │  argv ──► Invocation::parse ──► commands::run ──► stdout               │
//! │                                      │                                  │
//! │                    ┌─────────────────┼─────────────────┐                │
//! │                    ▼                 ▼                 ▼                │
//! │             store (JSON)     haversack-config   haversack-core          │
//! │             character file   rules.toml         rules engine           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! haversack init brom.json
//! haversack summary brom.json
//! haversack transfer brom.json <item-id> pack <storage-id>
//! RUST_LOG=debug haversack --rules ./tomb.toml wealth brom.json
//! ```

mod commands;
mod store;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use haversack_config::RulesetConfig;

use crate::commands::Invocation;

fn main() -> Result<()> {
    init_tracing();

    let invocation = Invocation::parse(std::env::args().skip(1))?;
    debug!(?invocation, "Parsed command line");

    let config = RulesetConfig::load_or_default(invocation.rules_path.clone());
    let rules = config.rule_tables();

    let output = commands::run(&invocation.command, &rules)?;
    println!("{}", output);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=haversack_core=trace` - Trace the rules engine only
/// - Default: INFO, DEBUG for haversack crates
///
/// Logs go to stderr so command output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,haversack=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
