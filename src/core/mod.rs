mod catalog;
mod consts;
mod level;
mod model_helpers;
mod models;
mod session;
mod update;

pub use catalog::{CatalogError, LevelCatalog, BUILTIN_LEVELS};
pub use consts::*;
pub use level::{parse_level, LevelFormatError};
pub use models::{
    BlockReason, Cell, Direction, GameChangeType, GameState, GameUpdate, Level, MoveOutcome,
    SessionState, Vec2,
};
pub use session::GameSession;
pub use update::step;
