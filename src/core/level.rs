use crate::core::Cell::{FloorInside, FloorOutside, Target, Wall};
use crate::core::{Cell, Level, Vec2};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelFormatError {
    #[error("Found multiple players")]
    MultiplePlayers,
    #[error("No player found")]
    NoPlayer,
    #[error("Discovered unknown level character {0:?} at row {1}, column {2}")]
    UnknownSymbol(char, usize, usize),
}

enum Occupant {
    Player,
    Box,
}

fn decode(ch: char) -> Option<(Option<Occupant>, Cell)> {
    Some(match ch {
        '@' => (Some(Occupant::Player), FloorInside),
        '+' => (Some(Occupant::Player), Target),
        '$' => (Some(Occupant::Box), FloorInside),
        '*' => (Some(Occupant::Box), Target),
        '#' => (None, Wall),
        '.' => (None, Target),
        '-' => (None, FloorInside),
        '_' => (None, FloorOutside),
        _ => return None,
    })
}

/// Parses one level. Rows keep their own length; nothing is padded.
pub fn parse_level(s: &str) -> Result<Level, LevelFormatError> {
    let mut grid: Vec<Vec<Cell>> = Vec::new();
    let mut player: Option<Vec2> = None;
    let mut boxes: Vec<Vec2> = Vec::new();

    for (i, line) in s.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut row = Vec::with_capacity(line.len());
        for (j, ch) in line.chars().enumerate() {
            let Some((occupant, terrain)) = decode(ch) else {
                return Err(LevelFormatError::UnknownSymbol(ch, i, j));
            };
            let pos = Vec2::new(j as i32, i as i32);
            match occupant {
                Some(Occupant::Player) => {
                    if player.is_some() {
                        return Err(LevelFormatError::MultiplePlayers);
                    }
                    player = Some(pos);
                }
                Some(Occupant::Box) => boxes.push(pos),
                None => {}
            }
            row.push(terrain);
        }
        grid.push(row);
    }

    let player = player.ok_or(LevelFormatError::NoPlayer)?;
    Ok(Level { grid, player, boxes })
}
