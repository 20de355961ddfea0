use std::ops::{Add, Mul};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Target,
    FloorInside,
    FloorOutside,
}

/// Grid position, `x` is the column and `y` is the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Mul<i32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: i32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Static terrain plus the starting positions of every entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub grid: Vec<Vec<Cell>>,
    pub player: Vec2,
    pub boxes: Vec<Vec2>,
}

/// Positions of the movable entities. Box order is stable: index `i` always
/// refers to the same box.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub player: Vec2,
    pub boxes: Vec<Vec2>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameUpdate {
    NextState(GameState, GameChangeType),
    Blocked(BlockReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove { box_index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockReason {
    Wall,
    BoxBlocked,
    OutOfBounds,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::Wall => write!(f, "Cannot walk into a wall"),
            BlockReason::BoxBlocked => write!(f, "Cannot push block"),
            BlockReason::OutOfBounds => write!(f, "Cannot push block out of bounds"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The session was already won; nothing changed.
    Ignored,
    Rejected(BlockReason),
    /// `won` is true only for the move that completed the level.
    Moved { change: GameChangeType, won: bool },
}
