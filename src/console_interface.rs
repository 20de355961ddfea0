use crate::core::Cell::{FloorInside, FloorOutside, Target, Wall};
use crate::core::{Direction, GameState, Level, Vec2};
use crate::models::GameRenderState;
use crate::render::Glyph;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::canvas::Canvas,
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const SIDEBAR_WIDTH: u16 = 34;
const SCORES_SHOWN: usize = 10;

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn glyph_span(glyph: Glyph) -> Span<'static> {
    let (ch, color) = match glyph {
        Glyph::Terrain(Wall) => ('#', Color::Gray),
        Glyph::Terrain(Target) => ('.', Color::Red),
        Glyph::Terrain(FloorInside) => (' ', Color::Reset),
        Glyph::Terrain(FloorOutside) => ('"', Color::Green),
        Glyph::Player => ('@', Color::Yellow),
        Glyph::Box { on_target: false } => ('$', Color::LightBlue),
        Glyph::Box { on_target: true } => ('*', Color::LightGreen),
    };
    Span::styled(ch.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = state.view.draw_list(state.session);
    let (width, height) = state.view.extent();
    let title = format!(
        "Sokoban - Level {} ({})",
        state.session.level_idx() + 1,
        state.view.mode()
    );

    terminal.draw(|f| {
        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());
        let columns = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
            .split(rows[0]);

        // Playfield, painted back to front so stacking order decides overlaps
        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(title.as_str()))
            .x_bounds([0.0, width.max(1) as f64])
            .y_bounds([0.0, height.max(1) as f64])
            .paint(|ctx| {
                for item in &items {
                    let x = (item.left + item.width / 2) as f64;
                    let y = (height - (item.top + item.height / 2)) as f64;
                    ctx.print(x, y, glyph_span(item.glyph));
                }
            });
        f.render_widget(canvas, columns[0]);

        let sidebar = Paragraph::new(sidebar_lines(state))
            .block(Block::default().borders(Borders::ALL).title("High scores"))
            .style(Style::default().fg(Color::White));
        f.render_widget(sidebar, columns[1]);

        let instruction_paragraph = Paragraph::new(instructions(state))
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, rows[1]);
    })?;
    Ok(())
}

fn sidebar_lines(state: &GameRenderState) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("Moves: {}", state.session.moves())),
        Line::from(format!(
            "Level: {}/{} (unlocked {})",
            state.session.level_idx() + 1,
            state.level_count,
            (state.unlocked + 1).min(state.level_count)
        )),
        Line::from(""),
    ];
    if state.scores.is_empty() {
        lines.push(Line::from("No scores yet"));
    }
    for (rank, score) in state.scores.iter().take(SCORES_SHOWN).enumerate() {
        lines.push(Line::from(format!("{:>2}. {:<20} {:>5}", rank + 1, score.name, score.score)));
    }
    if let Some(name) = state.name_input {
        lines.push(Line::from(""));
        lines.push(Line::styled(format!("Name: {name}_"), Style::default().fg(Color::Yellow)));
    }
    lines
}

fn instructions(state: &GameRenderState) -> String {
    let instructions = if state.name_input.is_some() {
        "Type your name, Enter to send, Esc to cancel"
    } else if state.can_submit {
        "You Win! Enter to submit your score | N/P level, R reset, M mode, Q quit"
    } else if state.session.is_won() {
        "You Win! N/P level, R reset, M mode, Q quit"
    } else {
        "WASD/Arrows move | R reset | M mode | N/P level | Q quit"
    };

    if let Some(status) = state.status {
        format!("{} | {}", instructions, status)
    } else {
        instructions.to_string()
    }
}

/// Renders level terrain with the entities of `game` on top, using level symbols.
pub fn render_game_to_string(level: &Level, game: &GameState) -> String {
    let mut result = String::new();
    for (y, row) in level.grid.iter().enumerate() {
        for (x, c) in row.iter().enumerate() {
            let pos = Vec2::new(x as i32, y as i32);
            let has_player = pos == game.player;
            let has_box = game.has_box_at(pos);
            let ch = match c {
                Wall => '#',
                Target => if has_player { '+' } else if has_box { '*' } else { '.' },
                FloorInside | FloorOutside if has_player => '@',
                FloorInside | FloorOutside if has_box => '$',
                FloorInside => '-',
                FloorOutside => '_',
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleInput {
    Move(Direction),
    Reset,
    CycleMode,
    NextLevel,
    PreviousLevel,
    BeginNameEntry,
    Text(char),
    Backspace,
    Confirm,
    Cancel,
    Quit,
    Timeout,
    Unknown,
}

/// While `typing` a name, keys are text and never reach the game.
pub fn map_key(code: KeyCode, typing: bool) -> ConsoleInput {
    if typing {
        return match code {
            KeyCode::Enter => ConsoleInput::Confirm,
            KeyCode::Esc => ConsoleInput::Cancel,
            KeyCode::Backspace => ConsoleInput::Backspace,
            KeyCode::Char(c) => ConsoleInput::Text(c),
            _ => ConsoleInput::Unknown,
        };
    }
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => ConsoleInput::Move(Direction::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => ConsoleInput::Move(Direction::Down),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => ConsoleInput::Move(Direction::Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => ConsoleInput::Move(Direction::Right),
        KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Reset,
        KeyCode::Char('m') | KeyCode::Char('M') => ConsoleInput::CycleMode,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::PageDown => ConsoleInput::NextLevel,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::PageUp => ConsoleInput::PreviousLevel,
        KeyCode::Enter => ConsoleInput::BeginNameEntry,
        _ => ConsoleInput::Unknown,
    }
}

pub fn handle_input(typing: bool) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(map_key(code, typing));
        }
    }
    Ok(ConsoleInput::Timeout)
}
