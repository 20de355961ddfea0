use crate::core::Cell::Wall;
use crate::core::{BlockReason, Direction, GameChangeType, GameState, GameUpdate, Level};

pub fn step(level: &Level, game: &GameState, direction: Direction) -> GameUpdate {
    let dir = direction.delta();
    let target = game.player + dir;
    let box_target = game.player + dir * 2;

    let mut new_state = game.clone();

    let change = if let Some(box_index) = game.index_of_box_at(target) {
        if game.has_box_at(box_target) {
            return GameUpdate::Blocked(BlockReason::BoxBlocked);
        }
        match level.terrain_at(box_target) {
            None => return GameUpdate::Blocked(BlockReason::OutOfBounds),
            Some(Wall) => return GameUpdate::Blocked(BlockReason::BoxBlocked),
            Some(_) => {}
        }
        new_state.boxes[box_index] = box_target;
        GameChangeType::PlayerAndBoxMove { box_index }
    } else {
        // Cells outside the grid are walkable; only an explicit wall stops the player.
        if level.terrain_at(target) == Some(Wall) {
            return GameUpdate::Blocked(BlockReason::Wall);
        }
        GameChangeType::PlayerMove
    };

    new_state.player = target;
    GameUpdate::NextState(new_state, change)
}
