use tracing::debug;

use crate::core::{step, Direction, GameState, GameUpdate, Level, MoveOutcome, SessionState, Vec2};

/// One play-through of a level. Replaced, never reset in place.
#[derive(Clone, Debug)]
pub struct GameSession {
    level: Level,
    state: GameState,
    moves: u32,
    won: bool,
    level_idx: usize,
}

impl GameSession {
    pub fn new(level: Level, level_idx: usize) -> Self {
        let state = level.initial_state();
        GameSession {
            level,
            state,
            moves: 0,
            won: false,
            level_idx,
        }
    }

    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.won {
            return MoveOutcome::Ignored;
        }

        match step(&self.level, &self.state, direction) {
            GameUpdate::Blocked(reason) => {
                debug!(?direction, %reason, "move rejected");
                MoveOutcome::Rejected(reason)
            }
            GameUpdate::NextState(new_state, change) => {
                self.state = new_state;
                self.moves += 1;
                self.won = self.state.is_won(&self.level);
                debug!(?direction, ?change, moves = self.moves, won = self.won, "move accepted");
                MoveOutcome::Moved { change, won: self.won }
            }
        }
    }

    pub fn status(&self) -> SessionState {
        if self.won {
            SessionState::Won
        } else {
            SessionState::Playing
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn level_idx(&self) -> usize {
        self.level_idx
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> Vec2 {
        self.state.player
    }

    pub fn boxes(&self) -> &[Vec2] {
        &self.state.boxes
    }
}
