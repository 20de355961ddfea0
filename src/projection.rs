//! Maps logical grid positions to pixel-space placements.
//!
//! Three projections are supported. `Flat` is a plain square grid,
//! `Inclined` uses taller tiles overlapping the row above, and `Isometric`
//! rotates the grid by 45 degrees and squashes it vertically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Vec2};

pub const FLAT_TILE: i32 = 48;
pub const INCLINED_TILE_WIDTH: i32 = 48;
pub const INCLINED_TILE_HEIGHT: i32 = 84;
/// Inclined rows overlap by this many pixels.
pub const INCLINED_OVERLAP: i32 = 6;
pub const ISOMETRIC_TILE: i32 = 84;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    #[default]
    Flat,
    Inclined,
    Isometric,
}

impl ProjectionMode {
    pub fn all() -> [ProjectionMode; 3] {
        [ProjectionMode::Flat, ProjectionMode::Inclined, ProjectionMode::Isometric]
    }

    pub fn next(self) -> ProjectionMode {
        match self {
            ProjectionMode::Flat => ProjectionMode::Inclined,
            ProjectionMode::Inclined => ProjectionMode::Isometric,
            ProjectionMode::Isometric => ProjectionMode::Flat,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Flat => "flat",
            ProjectionMode::Inclined => "inclined",
            ProjectionMode::Isometric => "isometric",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectionMode::all()
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown projection mode '{s}'"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stacking {
    /// Pure grid; nothing overlaps.
    None,
    Immediate(i32),
    /// Apply once the move transition has finished.
    Deferred(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub stacking: Stacking,
}

pub fn project(
    grid_height: i32,
    pos: Vec2,
    mode: ProjectionMode,
    last_move: Option<Direction>,
) -> Projection {
    match mode {
        ProjectionMode::Flat => Projection {
            left: pos.x * FLAT_TILE,
            top: pos.y * FLAT_TILE,
            width: FLAT_TILE,
            height: FLAT_TILE,
            stacking: Stacking::None,
        },
        ProjectionMode::Inclined => {
            let z = pos.y;
            let deferred = last_move == Some(Direction::Up);
            Projection {
                left: pos.x * INCLINED_TILE_WIDTH,
                top: pos.y * (INCLINED_TILE_WIDTH - INCLINED_OVERLAP),
                width: INCLINED_TILE_WIDTH,
                height: INCLINED_TILE_HEIGHT,
                stacking: if deferred { Stacking::Deferred(z) } else { Stacking::Immediate(z) },
            }
        }
        ProjectionMode::Isometric => {
            let half = ISOMETRIC_TILE / 2;
            let quarter = ISOMETRIC_TILE / 4;
            let z = pos.x + pos.y;
            let deferred = matches!(last_move, Some(Direction::Up) | Some(Direction::Left));
            Projection {
                left: (pos.x - pos.y) * half + grid_height * half,
                top: (pos.x + pos.y) * quarter,
                width: ISOMETRIC_TILE,
                height: ISOMETRIC_TILE,
                stacking: if deferred { Stacking::Deferred(z) } else { Stacking::Immediate(z) },
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flat_is_a_plain_grid() {
        let p = project(5, Vec2::new(3, 2), ProjectionMode::Flat, Some(Direction::Up));
        assert_eq!(
            p,
            Projection { left: 144, top: 96, width: 48, height: 48, stacking: Stacking::None }
        );
    }

    #[test]
    fn inclined_rows_overlap() {
        let p = project(5, Vec2::new(2, 3), ProjectionMode::Inclined, None);
        assert_eq!((p.left, p.top, p.width, p.height), (96, 126, 48, 84));
        assert_eq!(p.stacking, Stacking::Immediate(3));
    }

    #[test]
    fn inclined_defers_stacking_only_when_moving_up() {
        let pos = Vec2::new(1, 1);
        for dir in [Direction::Down, Direction::Left, Direction::Right] {
            let p = project(3, pos, ProjectionMode::Inclined, Some(dir));
            assert_eq!(p.stacking, Stacking::Immediate(1), "{dir:?}");
        }
        let p = project(3, pos, ProjectionMode::Inclined, Some(Direction::Up));
        assert_eq!(p.stacking, Stacking::Deferred(1));
    }

    #[test]
    fn isometric_is_centred_on_grid_height() {
        let p = project(4, Vec2::new(1, 3), ProjectionMode::Isometric, Some(Direction::Down));
        assert_eq!(p.left, (1 - 3) * 42 + 4 * 42);
        assert_eq!(p.top, (1 + 3) * 21);
        assert_eq!((p.width, p.height), (84, 84));
        assert_eq!(p.stacking, Stacking::Immediate(4));
    }

    #[test]
    fn isometric_defers_stacking_for_up_and_left() {
        let pos = Vec2::new(2, 2);
        let deferred: Vec<_> = Direction::all()
            .into_iter()
            .filter(|&dir| {
                matches!(
                    project(6, pos, ProjectionMode::Isometric, Some(dir)).stacking,
                    Stacking::Deferred(4)
                )
            })
            .collect();
        assert_eq!(deferred, vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Isometric".parse(), Ok(ProjectionMode::Isometric));
        assert!("cavalier".parse::<ProjectionMode>().is_err());
        assert_eq!(ProjectionMode::Isometric.next(), ProjectionMode::Flat);
    }
}
