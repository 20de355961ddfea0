mod board;
mod client;
mod models;
mod server;
mod store;
mod validate;

pub use board::{ScoreBoard, ScoreEvent};
pub use client::{ClientError, ScoreApi, ScoreClient};
pub use models::{sort_scores, NewScore, ScoreRecord};
pub use server::{make_app, serve};
pub use store::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
pub use validate::{name_length, parse_level_param, parse_score_body, validate_score, ScorePayloadError, MAX_NAME_LENGTH};
