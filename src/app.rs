use std::io;
use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::console_interface::{handle_input, render_game, ConsoleInput};
use crate::core::{
    CatalogError, Direction, GameSession, LevelCatalog, MoveOutcome, INPUT_DEBOUNCE,
    TRANSITION_TIME,
};
use crate::input::InputThrottle;
use crate::models::GameRenderState;
use crate::progress::Progress;
use crate::projection::ProjectionMode;
use crate::render::RenderContext;
use crate::scores::{name_length, NewScore, ScoreBoard, ScoreEvent, ScoreRecord, MAX_NAME_LENGTH};

/// The single active game view: one session plus everything shown around it.
pub struct App {
    catalog: LevelCatalog,
    progress: Progress,
    board: ScoreBoard,
    session: GameSession,
    view: RenderContext,
    throttle: InputThrottle,
    scores: Vec<ScoreRecord>,
    submitted: bool,
    name_input: Option<String>,
    status: Option<String>,
    transition_started: Option<Instant>,
}

impl App {
    /// Opens the furthest unlocked level.
    pub fn new(
        catalog: LevelCatalog,
        progress: Progress,
        board: ScoreBoard,
        mode: ProjectionMode,
    ) -> Result<Self, CatalogError> {
        let start = progress.unlocked().min(catalog.len().saturating_sub(1));
        let session = GameSession::new(catalog.level(start)?, start);
        let view = RenderContext::new(mode, &session);
        board.request_level(start);
        Ok(App {
            catalog,
            progress,
            board,
            session,
            view,
            throttle: InputThrottle::new(INPUT_DEBOUNCE),
            scores: Vec::new(),
            submitted: false,
            name_input: None,
            status: None,
            transition_started: None,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn view(&self) -> &RenderContext {
        &self.view
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn scores(&self) -> &[ScoreRecord] {
        &self.scores
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_typing(&self) -> bool {
        self.name_input.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.session.is_won() && !self.submitted
    }

    pub fn render_state(&self) -> GameRenderState<'_> {
        GameRenderState {
            session: &self.session,
            view: &self.view,
            level_count: self.catalog.len(),
            unlocked: self.progress.unlocked(),
            scores: &self.scores,
            name_input: self.name_input.as_deref(),
            can_submit: self.can_submit(),
            status: self.status.as_deref(),
        }
    }

    /// Applies one input. Returns false when the player quits.
    pub fn handle(&mut self, input: ConsoleInput, now: Instant) -> bool {
        match input {
            ConsoleInput::Quit => return false,
            ConsoleInput::Move(direction) => self.move_player(direction, now),
            ConsoleInput::Reset => self.reset(),
            ConsoleInput::CycleMode => self.set_mode(self.view.mode().next()),
            ConsoleInput::NextLevel => self.select_level(self.session.level_idx() + 1),
            ConsoleInput::PreviousLevel => {
                if let Some(idx) = self.session.level_idx().checked_sub(1) {
                    self.select_level(idx);
                }
            }
            ConsoleInput::BeginNameEntry => self.begin_name_entry(),
            ConsoleInput::Text(c) => {
                if let Some(name) = &mut self.name_input {
                    if name_length(name) + c.len_utf16() <= MAX_NAME_LENGTH {
                        name.push(c);
                    }
                }
            }
            ConsoleInput::Backspace => {
                if let Some(name) = &mut self.name_input {
                    name.pop();
                }
            }
            ConsoleInput::Confirm => self.confirm_name(),
            ConsoleInput::Cancel => self.name_input = None,
            ConsoleInput::Timeout | ConsoleInput::Unknown => {}
        }
        true
    }

    pub fn move_player(&mut self, direction: Direction, now: Instant) {
        if !self.throttle.accept(now) {
            return;
        }
        match self.session.move_player(direction) {
            MoveOutcome::Ignored => {}
            MoveOutcome::Rejected(reason) => self.status = Some(reason.to_string()),
            MoveOutcome::Moved { change, won } => {
                self.view.sync(&self.session, change, direction);
                self.status = None;
                if self.view.has_pending_transitions() {
                    self.transition_started = Some(now);
                }
                if won {
                    self.on_win();
                }
            }
        }
    }

    fn on_win(&mut self) {
        let level_idx = self.session.level_idx();
        info!(level = level_idx, moves = self.session.moves(), "level won");
        let mut status = format!("Solved in {} moves!", self.session.moves());
        if self.progress.record_win(level_idx) && level_idx + 1 < self.catalog.len() {
            status.push_str(&format!(" Level {} unlocked.", level_idx + 2));
        }
        self.status = Some(status);
    }

    /// Starts a fresh session if `level_idx` exists and is unlocked.
    pub fn select_level(&mut self, level_idx: usize) {
        if level_idx >= self.catalog.len() {
            return;
        }
        if !self.progress.is_unlocked(level_idx) {
            self.status = Some(format!("Level {} is locked", level_idx + 1));
            return;
        }
        self.start_session(level_idx);
    }

    pub fn reset(&mut self) {
        self.start_session(self.session.level_idx());
    }

    fn start_session(&mut self, level_idx: usize) {
        let level = match self.catalog.level(level_idx) {
            Ok(level) => level,
            Err(err) => {
                warn!(%err, "cannot load level");
                self.status = Some(err.to_string());
                return;
            }
        };
        self.session = GameSession::new(level, level_idx);
        self.view = RenderContext::new(self.view.mode(), &self.session);
        self.scores.clear();
        self.submitted = false;
        self.name_input = None;
        self.status = None;
        self.transition_started = None;
        self.board.request_level(level_idx);
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        self.view.set_mode(mode, &self.session);
        self.transition_started = None;
    }

    pub fn begin_name_entry(&mut self) {
        if self.can_submit() {
            self.name_input = Some(String::new());
        }
    }

    pub fn confirm_name(&mut self) {
        let Some(name) = self.name_input.as_deref() else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            self.status = Some("Enter a name first".to_string());
            return;
        }
        if !self.can_submit() {
            self.name_input = None;
            return;
        }
        let level_idx = self.session.level_idx();
        self.board.submit(NewScore::from_run(name, self.session.moves(), level_idx), level_idx);
        self.submitted = true;
        self.name_input = None;
        self.status = Some("Sending score...".to_string());
    }

    /// Ends finished move transitions and takes in score results.
    pub fn tick(&mut self, now: Instant) {
        if let Some(started) = self.transition_started {
            if now.saturating_duration_since(started) >= TRANSITION_TIME {
                self.view.complete_transitions();
                self.transition_started = None;
            }
        }
        for event in self.board.poll() {
            self.apply_score_event(event);
        }
    }

    fn apply_score_event(&mut self, event: ScoreEvent) {
        let current = self.session.level_idx();
        match event {
            ScoreEvent::Loaded { level, scores } if level == current => self.scores = scores,
            ScoreEvent::Submitted { level, .. } if level == current => {
                self.status = Some("Score submitted".to_string());
            }
            // Already logged by the board; gameplay carries on.
            _ => {}
        }
    }
}

pub fn run_interactive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        render_game(terminal, &app.render_state())?;

        let input = handle_input(app.is_typing())?;
        if !app.handle(input, Instant::now()) {
            break;
        }
    }
    Ok(())
}
