use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::projection::ProjectionMode;

#[derive(Parser, Debug)]
#[command(name = "sokoban", about = "Sokoban with a shared high score board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub play: PlayConfig,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal (the default)
    Play,
    /// Run the high score service
    Serve(ServeConfig),
}

#[derive(Args, Debug, Clone)]
pub struct PlayConfig {
    /// Level catalog, levels separated by a blank line. Defaults to the built-in set.
    #[arg(long, global = true)]
    pub levels: Option<PathBuf>,

    /// Base URL of the score service
    #[arg(long, global = true, env = "SOKOBAN_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Where progress and the log file are kept
    #[arg(long, global = true, env = "SOKOBAN_DATA_DIR", default_value = ".sokoban")]
    pub data_dir: PathBuf,

    /// Initial projection: flat, inclined or isometric
    #[arg(long, global = true, default_value_t = ProjectionMode::Flat)]
    pub mode: ProjectionMode,
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    #[arg(long, env = "SOKOBAN_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// JSON file holding the score collection; scores stay in memory without it
    #[arg(long, env = "SOKOBAN_SCORES_FILE")]
    pub scores_file: Option<PathBuf>,
}

impl PlayConfig {
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("sokoban.log")
    }
}
