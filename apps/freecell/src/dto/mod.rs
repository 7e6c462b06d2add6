pub mod game_snapshot;
pub mod intent_request;
