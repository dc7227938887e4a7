//! This module defines the maze and provides functions for querying it.
//!
//! A [`Maze`] is built once per level (through [`builder::MazeBuilder`] or
//! [`parser::parse_layout`]) and its geometry is immutable afterwards. Pellets are the
//! only mutable part: the scene removes them as they are eaten and restores them on a
//! new level.

pub mod builder;
pub mod parser;

use std::collections::HashSet;

use crate::geometry::{self, Rect, TilePosition, Vector2};
use crate::ghost::Personality;

pub use builder::MazeBuilder;

/// The kind of pellet removed from a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PelletKind {
    Pellet,
    PowerPellet,
}

/// Static maze geometry plus the pellets still on the board.
#[derive(Debug, Clone)]
pub struct Maze {
    width: u32,
    height: u32,
    walls: Vec<Rect>,
    pellets: HashSet<TilePosition>,
    power_pellets: HashSet<TilePosition>,
    initial_pellets: HashSet<TilePosition>,
    initial_power_pellets: HashSet<TilePosition>,
    ghost_spawns: [Vector2; 4],
    favorite_tiles: [TilePosition; 4],
    limited_intersections: HashSet<TilePosition>,
    tunnel_starts: HashSet<TilePosition>,
    player_start: Vector2,
}

impl Maze {
    /// Builds the maze from an ASCII layout using the standard spawn and target tables.
    pub fn from_layout(rows: &[&str]) -> crate::error::GameResult<Maze> {
        parser::parse_layout(rows)
    }

    /// Width of the board, in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the board, in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    pub fn in_bounds(&self, tile: TilePosition) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    /// Whether the center of `tile` lies inside a wall.
    pub fn is_wall_tile(&self, tile: TilePosition) -> bool {
        let center = geometry::tile_center(tile);
        self.walls.iter().any(|wall| wall.contains_point(center))
    }

    /// Whether the rectangle covering `tile` overlaps any wall.
    ///
    /// Tiles outside the board never hit a wall; tunnels rely on that.
    pub fn tile_blocked(&self, tile: TilePosition) -> bool {
        let rect = Rect::from_tile(tile);
        self.walls.iter().any(|wall| wall.intersects(&rect))
    }

    /// Whether `rect` overlaps any wall.
    pub fn rect_blocked(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|wall| wall.intersects(rect))
    }

    pub fn has_pellet(&self, tile: TilePosition) -> bool {
        self.pellets.contains(&tile)
    }

    pub fn has_power_pellet(&self, tile: TilePosition) -> bool {
        self.power_pellets.contains(&tile)
    }

    /// Removes whatever pellet sits on `tile`, reporting its kind.
    pub fn remove_pellet(&mut self, tile: TilePosition) -> Option<PelletKind> {
        if self.pellets.remove(&tile) {
            Some(PelletKind::Pellet)
        } else if self.power_pellets.remove(&tile) {
            Some(PelletKind::PowerPellet)
        } else {
            None
        }
    }

    /// Pellets and power pellets still on the board.
    pub fn pellets_remaining(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    /// Every remaining pellet with its kind, in no particular order.
    pub fn pellets(&self) -> impl Iterator<Item = (TilePosition, PelletKind)> + '_ {
        self.pellets
            .iter()
            .map(|&tile| (tile, PelletKind::Pellet))
            .chain(self.power_pellets.iter().map(|&tile| (tile, PelletKind::PowerPellet)))
    }

    /// Puts every pellet from the original level data back.
    pub fn restore_pellets(&mut self) {
        self.pellets = self.initial_pellets.clone();
        self.power_pellets = self.initial_power_pellets.clone();
    }

    pub fn is_limited_intersection(&self, tile: TilePosition) -> bool {
        self.limited_intersections.contains(&tile)
    }

    pub fn is_tunnel(&self, tile: TilePosition) -> bool {
        self.tunnel_starts.contains(&tile)
    }

    pub fn spawn(&self, personality: Personality) -> Vector2 {
        self.ghost_spawns[personality.index()]
    }

    pub fn favorite_tile(&self, personality: Personality) -> TilePosition {
        self.favorite_tiles[personality.index()]
    }

    pub fn player_start(&self) -> Vector2 {
        self.player_start
    }

    /// Pixel center of the Chaser's spawn tile.
    pub fn ghost_house_entrance(&self) -> Vector2 {
        geometry::tile_center(self.ghost_house_entrance_tile())
    }

    pub fn ghost_house_entrance_tile(&self) -> TilePosition {
        geometry::tile_of(self.spawn(Personality::Chaser))
    }

    /// Pixel width of the board.
    pub fn pixel_width(&self) -> f64 {
        self.width as f64 * crate::constants::TILE_SIZE
    }
}
