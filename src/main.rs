// Sokoban with a shared high score board.
// `sokoban` plays in the terminal; `sokoban serve` runs the score service.
// Controls: W/A/S/D or arrow keys, R reset, M projection, N/P level, Q quit.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target,
// '+' player on target, '-' floor, '_' outside floor.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use sokoban_arcade::app::{run_interactive, App};
use sokoban_arcade::config::{Cli, Command, PlayConfig, ServeConfig};
use sokoban_arcade::console_interface::{cleanup_terminal, setup_terminal};
use sokoban_arcade::core::LevelCatalog;
use sokoban_arcade::logging;
use sokoban_arcade::progress::Progress;
use sokoban_arcade::scores::{serve, JsonFileStore, MemoryStore, ScoreBoard, ScoreClient, ScoreStore};
use sokoban_arcade::storage::LocalStorage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Serve(config)) => run_server(config),
        Some(Command::Play) | None => run_game(cli.play),
    }
}

fn run_server(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_stderr();
    let store: Arc<dyn ScoreStore> = match &config.scores_file {
        Some(path) => Arc::new(JsonFileStore::open(path)?),
        None => {
            info!("no scores file given, keeping scores in memory");
            Arc::new(MemoryStore::new())
        }
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config.addr, store))?;
    Ok(())
}

fn run_game(config: PlayConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_file(&config.log_path())?;

    let catalog = match &config.levels {
        Some(path) => LevelCatalog::parse(&std::fs::read_to_string(path)?),
        None => LevelCatalog::builtin(),
    };
    let progress = Progress::load(LocalStorage::open(config.storage_path()));
    let board = ScoreBoard::new(Arc::new(ScoreClient::new(&config.server)?));
    let mut app = App::new(catalog, progress, board, config.mode)?;
    info!(server = %config.server, levels = ?config.levels, "starting game");

    let mut terminal = setup_terminal()?;
    let result = run_interactive(&mut terminal, &mut app);
    cleanup_terminal()?;
    result
}
