//! Presentation state for the active game view.
//!
//! The game session never sees any of this. Terrain tiles and entity sprites
//! live here in collections parallel to the session's entities: sprite
//! `boxes[i]` always shows box `i`.

use crate::core::{Cell, Direction, GameChangeType, GameSession, Vec2};
use crate::projection::{project, Projection, ProjectionMode, Stacking};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Terrain(Cell),
    Player,
    Box { on_target: bool },
}

/// Visual handle of one movable entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sprite {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i32,
    /// Stacking order waiting for the move transition to end.
    pub pending_z: Option<i32>,
}

impl Sprite {
    fn placed(projection: Projection) -> Self {
        let mut sprite = Sprite::default();
        sprite.place(projection);
        sprite
    }

    fn place(&mut self, projection: Projection) {
        self.left = projection.left;
        self.top = projection.top;
        self.width = projection.width;
        self.height = projection.height;
        match projection.stacking {
            Stacking::None => {
                self.z_index = 0;
                self.pending_z = None;
            }
            Stacking::Immediate(z) => {
                self.z_index = z;
                self.pending_z = None;
            }
            Stacking::Deferred(z) => self.pending_z = Some(z),
        }
    }

    fn complete_transition(&mut self) -> bool {
        match self.pending_z.take() {
            Some(z) => {
                self.z_index = z;
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub cell: Cell,
    pub pos: Vec2,
    pub sprite: Sprite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawItem {
    pub glyph: Glyph,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub z_index: i32,
}

pub struct RenderContext {
    mode: ProjectionMode,
    grid_height: i32,
    tiles: Vec<Tile>,
    player: Sprite,
    boxes: Vec<Sprite>,
}

impl RenderContext {
    pub fn new(mode: ProjectionMode, session: &GameSession) -> Self {
        let mut context = RenderContext {
            mode,
            grid_height: 0,
            tiles: Vec::new(),
            player: Sprite::default(),
            boxes: Vec::new(),
        };
        context.rebuild(session);
        context
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Switches projection and redraws everything from logical positions.
    pub fn set_mode(&mut self, mode: ProjectionMode, session: &GameSession) {
        self.mode = mode;
        self.rebuild(session);
    }

    /// Throws away every tile and sprite and builds them again.
    pub fn rebuild(&mut self, session: &GameSession) {
        let level = session.level();
        let mode = self.mode;
        let height = level.height();
        self.grid_height = height;
        self.tiles = level
            .grid
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().map(move |(x, &cell)| (Vec2::new(x as i32, y as i32), cell))
            })
            .map(|(pos, cell)| Tile {
                cell,
                pos,
                sprite: Sprite::placed(project(height, pos, mode, None)),
            })
            .collect();
        self.player = Sprite::placed(project(height, session.player(), mode, None));
        self.boxes = session
            .boxes()
            .iter()
            .map(|&b| Sprite::placed(project(height, b, mode, None)))
            .collect();
    }

    /// Re-places entities after an accepted move. Sprites that moved carry
    /// the direction, so their stacking order may be deferred.
    pub fn sync(&mut self, session: &GameSession, change: GameChangeType, direction: Direction) {
        let (mode, height) = (self.mode, self.grid_height);
        self.player.place(project(height, session.player(), mode, Some(direction)));
        if let GameChangeType::PlayerAndBoxMove { box_index } = change {
            if let (Some(sprite), Some(&pos)) = (self.boxes.get_mut(box_index), session.boxes().get(box_index)) {
                sprite.place(project(height, pos, mode, Some(direction)));
            }
        }
    }

    /// The transition-end hook: applies every pending stacking order.
    /// Returns true when anything changed.
    pub fn complete_transitions(&mut self) -> bool {
        let mut changed = self.player.complete_transition();
        for sprite in &mut self.boxes {
            changed |= sprite.complete_transition();
        }
        changed
    }

    pub fn has_pending_transitions(&self) -> bool {
        self.player.pending_z.is_some() || self.boxes.iter().any(|b| b.pending_z.is_some())
    }

    pub fn player_sprite(&self) -> &Sprite {
        &self.player
    }

    pub fn box_sprites(&self) -> &[Sprite] {
        &self.boxes
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Pixel extent covering every tile and sprite.
    pub fn extent(&self) -> (i32, i32) {
        self.tiles
            .iter()
            .map(|t| &t.sprite)
            .chain(std::iter::once(&self.player))
            .chain(self.boxes.iter())
            .fold((0, 0), |(w, h), s| (w.max(s.left + s.width), h.max(s.top + s.height)))
    }

    /// Everything to paint, back to front. Terrain goes under entities that
    /// share its stacking order.
    pub fn draw_list(&self, session: &GameSession) -> Vec<DrawItem> {
        let level = session.level();
        let mut items: Vec<(u8, DrawItem)> = Vec::with_capacity(self.tiles.len() + self.boxes.len() + 1);
        items.extend(
            self.tiles
                .iter()
                .map(|t| (0, draw_item(Glyph::Terrain(t.cell), &t.sprite))),
        );
        items.extend(self.boxes.iter().zip(session.boxes()).map(|(sprite, &pos)| {
            let on_target = level.terrain_at(pos) == Some(Cell::Target);
            (1, draw_item(Glyph::Box { on_target }, sprite))
        }));
        items.push((1, draw_item(Glyph::Player, &self.player)));
        items.sort_by_key(|(layer, item)| (item.z_index, *layer));
        items.into_iter().map(|(_, item)| item).collect()
    }
}

fn draw_item(glyph: Glyph, sprite: &Sprite) -> DrawItem {
    DrawItem {
        glyph,
        left: sprite.left,
        top: sprite.top,
        width: sprite.width,
        height: sprite.height,
        z_index: sprite.z_index,
    }
}
