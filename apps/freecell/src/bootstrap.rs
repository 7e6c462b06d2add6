use std::env;
use std::sync::OnceLock;

use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::game_management::cards::SuitSymbols;

static DOTENV_INIT: OnceLock<()> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Load environment variables from .env file exactly once
pub fn load_dotenv() {
    DOTENV_INIT.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Initialize tracing exactly once
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,freecell=info"));

        let is_production =
            env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

        // Logs go to stderr; stdout carries the snapshots
        if is_production {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    });
}

/// Settings read from the environment at start-up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// `FREECELL_GAME`: game number to deal first, random when unset
    pub game_number: Option<u32>,
    /// `FREECELL_SUITS`: four characters for spades, hearts, clubs, diamonds
    pub suit_symbols: SuitSymbols,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_values(env::var("FREECELL_GAME").ok(), env::var("FREECELL_SUITS").ok())
    }

    /// Build the config from raw values; bad values fall back to defaults
    pub fn from_values(game: Option<String>, suits: Option<String>) -> Self {
        let game_number = game.and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!(value = %raw, "FREECELL_GAME is not a game number, dealing a random game");
                None
            }
        });

        let suit_symbols = suits
            .and_then(|raw| {
                let parsed = SuitSymbols::parse(&raw);
                if parsed.is_none() {
                    warn!(value = %raw, "FREECELL_SUITS needs four distinct characters, using defaults");
                }
                parsed
            })
            .unwrap_or_default();

        EngineConfig {
            game_number,
            suit_symbols,
        }
    }
}

/// Pick the game number to deal: the requested one, or a random one for
/// `None` and 0
pub fn resolve_seed(requested: Option<u32>) -> u32 {
    match requested {
        Some(seed) if seed != 0 => seed,
        _ => {
            let seed = rand::thread_rng().gen_range(1..=u32::MAX);
            info!(seed, "picked random game number");
            seed
        }
    }
}
