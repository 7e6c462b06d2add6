pub mod bootstrap;
pub mod dto;
pub mod game_management;
pub mod test_support;

pub use bootstrap::{init_tracing, load_dotenv, resolve_seed, EngineConfig};
pub use dto::game_snapshot::GameSnapshot;
pub use dto::intent_request::Intent;
pub use game_management::{Board, Card, GameEngine, IllegalMove, MoveError, Selection, SuitSymbols};
