//! The background tile layer and its per-tile dirty tracking.

use glam::IVec2;

use crate::animation::GraphicId;
use crate::game::events::{PaletteId, RenderSink, TileUpdate};
use crate::map::{Maze, PelletKind};

/// Background graphics.
pub mod graphic {
    use crate::animation::GraphicId;

    pub const EMPTY: GraphicId = 0x00;
    pub const WALL: GraphicId = 0x01;
    pub const PELLET: GraphicId = 0x10;
    pub const POWER_PELLET: GraphicId = 0x14;
}

/// Background and sprite palettes.
pub mod palette {
    use crate::game::events::PaletteId;

    pub const MAZE: PaletteId = 0x10;
    pub const PELLET: PaletteId = 0x1E;
    pub const PACMAN: PaletteId = 0x09;
    pub const GHOSTS: [PaletteId; 4] = [0x01, 0x03, 0x05, 0x07];
    pub const FRIGHTENED: PaletteId = 0x11;
    pub const FLASHING: PaletteId = 0x12;
    pub const EYES: PaletteId = 0x19;
    pub const FRUIT: PaletteId = 0x14;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub graphic: GraphicId,
    pub palette: PaletteId,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        graphic: graphic::EMPTY,
        palette: palette::MAZE,
    };

    pub const fn new(graphic: GraphicId, palette: PaletteId) -> Self {
        Self { graphic, palette }
    }
}

/// Row-major tile storage. Every change marks its tile dirty until the next commit.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    dirty: Vec<bool>,
    dirty_count: usize,
}

impl TileGrid {
    /// An empty grid; nothing is dirty.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::EMPTY; len],
            dirty: vec![false; len],
            dirty_count: 0,
        }
    }

    /// Walls and pellets of `maze`, with every non-empty tile dirty.
    pub fn from_maze(maze: &Maze) -> Self {
        let mut grid = Self::new(maze.width(), maze.height());
        grid.load_maze(maze);
        grid
    }

    /// Redraws the grid from `maze`.
    pub fn load_maze(&mut self, maze: &Maze) {
        for row in 0..self.height {
            for column in 0..self.width {
                let tile = IVec2::new(column as i32, row as i32);
                let graphic = if maze.is_wall_tile(tile) { graphic::WALL } else { graphic::EMPTY };
                self.set(row, column, Tile::new(graphic, palette::MAZE));
            }
        }
        for (tile, kind) in maze.pellets() {
            let graphic = match kind {
                PelletKind::Pellet => graphic::PELLET,
                PelletKind::PowerPellet => graphic::POWER_PELLET,
            };
            self.set(tile.y as u32, tile.x as u32, Tile::new(graphic, palette::PELLET));
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        (row < self.height && column < self.width).then(|| (row * self.width + column) as usize)
    }

    pub fn get(&self, row: u32, column: u32) -> Option<Tile> {
        self.index(row, column).map(|index| self.tiles[index])
    }

    /// Stores `tile`, marking it dirty if it differs. Out-of-range writes are ignored.
    pub fn set(&mut self, row: u32, column: u32, tile: Tile) {
        let Some(index) = self.index(row, column) else {
            return;
        };
        if self.tiles[index] == tile {
            return;
        }
        self.tiles[index] = tile;
        if !self.dirty[index] {
            self.dirty[index] = true;
            self.dirty_count += 1;
        }
    }

    pub fn is_dirty(&self, row: u32, column: u32) -> bool {
        self.index(row, column).is_some_and(|index| self.dirty[index])
    }

    pub fn any_dirty(&self) -> bool {
        self.dirty_count > 0
    }

    /// Emits an update for every dirty tile in row-major order and clears the flags.
    /// Returns the number of updates sent.
    pub fn commit(&mut self, sink: &mut dyn RenderSink) -> usize {
        if self.dirty_count == 0 {
            return 0;
        }

        let mut sent = 0;
        for (index, dirty) in self.dirty.iter_mut().enumerate() {
            if !*dirty {
                continue;
            }
            *dirty = false;
            let tile = self.tiles[index];
            sink.tile(TileUpdate {
                row: index as u32 / self.width,
                column: index as u32 % self.width,
                graphic: tile.graphic,
                palette: tile.palette,
            });
            sent += 1;
        }
        self.dirty_count = 0;
        sent
    }
}
