use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{info, warn};

use freecell::{init_tracing, load_dotenv, resolve_seed, EngineConfig, GameEngine, Intent};

fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    let config = EngineConfig::from_env();
    let mut engine = GameEngine::new(resolve_seed(config.game_number));
    info!(game_id = %engine.id(), seed = engine.seed(), "freecell ready, reading intents from stdin");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    serde_json::to_writer(&mut out, &engine.snapshot(&config.suit_symbols))?;
    writeln!(out)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read intent from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let intent: Intent = match serde_json::from_str(&line) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, input = %line, "skipping malformed intent");
                continue;
            }
        };

        if let Err(e) = engine.apply(intent) {
            warn!(game_id = %engine.id(), ?intent, error = %e, "intent rejected");
        }

        serde_json::to_writer(&mut out, &engine.snapshot(&config.suit_symbols))?;
        writeln!(out)?;
        out.flush()?;
    }

    info!(
        game_id = %engine.id(),
        moves = engine.move_count(),
        won = engine.is_won(),
        "input closed, exiting"
    );
    Ok(())
}
