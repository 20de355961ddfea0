use crate::core::{Cell, Direction, GameState, Level, Vec2};

impl Level {
    /// Terrain at `pos`, or `None` when the position falls outside the
    /// defined rows/columns. Rows may be ragged.
    pub fn terrain_at(&self, pos: Vec2) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.grid.get(pos.y as usize)?.get(pos.x as usize).copied()
    }

    pub fn height(&self) -> i32 {
        self.grid.len() as i32
    }

    /// Length of the longest row.
    pub fn width(&self) -> i32 {
        self.grid.iter().map(|row| row.len()).max().unwrap_or(0) as i32
    }

    pub fn initial_state(&self) -> GameState {
        GameState {
            player: self.player,
            boxes: self.boxes.clone(),
        }
    }

    pub fn count_boxes_on_goals(&self, boxes: &[Vec2]) -> usize {
        boxes
            .iter()
            .filter(|&&b| self.terrain_at(b) == Some(Cell::Target))
            .count()
    }
}

impl GameState {
    /// Every box sits on target terrain. Vacuously true without boxes.
    pub fn is_won(&self, level: &Level) -> bool {
        level.count_boxes_on_goals(&self.boxes) == self.boxes.len()
    }

    pub fn index_of_box_at(&self, position: Vec2) -> Option<usize> {
        self.boxes.iter().position(|&b| b == position)
    }

    pub fn has_box_at(&self, position: Vec2) -> bool {
        self.index_of_box_at(position).is_some()
    }
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { x: 0, y: -1 },
            Direction::Down => Vec2 { x: 0, y: 1 },
            Direction::Left => Vec2 { x: -1, y: 0 },
            Direction::Right => Vec2 { x: 1, y: 0 },
        }
    }
}
