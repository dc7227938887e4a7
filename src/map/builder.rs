//! Maze construction and load-time validation.

use std::collections::HashSet;

use tracing::debug;

use crate::error::MazeError;
use crate::geometry::{self, Rect, TilePosition, Vector2};
use crate::ghost::Personality;
use crate::map::Maze;

/// Collects level data and validates it into a [`Maze`].
///
/// Every personality needs exactly one spawn and one favorite tile; anything else
/// fails the whole load.
pub struct MazeBuilder {
    width: u32,
    height: u32,
    walls: Vec<Rect>,
    pellets: HashSet<TilePosition>,
    power_pellets: HashSet<TilePosition>,
    spawns: micromap::Map<Personality, Vector2, 4>,
    favorites: micromap::Map<Personality, TilePosition, 4>,
    limited_intersections: HashSet<TilePosition>,
    tunnel_starts: HashSet<TilePosition>,
    player_start: Option<Vector2>,
    /// First duplicate seen; reported by `build`.
    duplicate: Option<MazeError>,
}

impl MazeBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
            pellets: HashSet::new(),
            power_pellets: HashSet::new(),
            spawns: micromap::Map::new(),
            favorites: micromap::Map::new(),
            limited_intersections: HashSet::new(),
            tunnel_starts: HashSet::new(),
            player_start: None,
            duplicate: None,
        }
    }

    pub fn wall(mut self, rect: Rect) -> Self {
        self.walls.push(rect);
        self
    }

    pub fn wall_tile(self, tile: TilePosition) -> Self {
        self.wall(Rect::from_tile(tile))
    }

    pub fn pellet(mut self, tile: TilePosition) -> Self {
        self.pellets.insert(tile);
        self
    }

    pub fn power_pellet(mut self, tile: TilePosition) -> Self {
        self.power_pellets.insert(tile);
        self
    }

    pub fn spawn(mut self, personality: Personality, position: Vector2) -> Self {
        if self.spawns.contains_key(&personality) {
            self.record_duplicate(MazeError::DuplicateSpawn(personality));
        } else {
            self.spawns.insert(personality, position);
        }
        self
    }

    /// Spawns `personality` centered on `tile`.
    pub fn spawn_tile(self, personality: Personality, tile: TilePosition) -> Self {
        self.spawn(personality, geometry::tile_center(tile))
    }

    pub fn favorite_tile(mut self, personality: Personality, tile: TilePosition) -> Self {
        if self.favorites.contains_key(&personality) {
            self.record_duplicate(MazeError::DuplicateFavoriteTile(personality));
        } else {
            self.favorites.insert(personality, tile);
        }
        self
    }

    fn record_duplicate(&mut self, error: MazeError) {
        if self.duplicate.is_none() {
            self.duplicate = Some(error);
        }
    }

    pub fn limited_intersection(mut self, tile: TilePosition) -> Self {
        self.limited_intersections.insert(tile);
        self
    }

    pub fn tunnel(mut self, tile: TilePosition) -> Self {
        self.tunnel_starts.insert(tile);
        self
    }

    pub fn player_start(mut self, position: Vector2) -> Self {
        self.player_start = Some(position);
        self
    }

    /// Validates the collected data.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: zero-sized board, a duplicate entry, a personality
    /// without spawn or favorite tile, or a missing player start.
    pub fn build(self) -> Result<Maze, MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(duplicate) = self.duplicate {
            return Err(duplicate);
        }

        let mut ghost_spawns = [Vector2::ZERO; 4];
        let mut favorite_tiles = [TilePosition::ZERO; 4];
        for personality in Personality::ALL {
            ghost_spawns[personality.index()] =
                *self.spawns.get(&personality).ok_or(MazeError::MissingSpawn(personality))?;
            favorite_tiles[personality.index()] = *self
                .favorites
                .get(&personality)
                .ok_or(MazeError::MissingFavoriteTile(personality))?;
        }
        let player_start = self.player_start.ok_or(MazeError::MissingPlayerStart)?;

        debug!(
            width = self.width,
            height = self.height,
            walls = self.walls.len(),
            pellets = self.pellets.len(),
            power_pellets = self.power_pellets.len(),
            "Maze built"
        );

        Ok(Maze {
            width: self.width,
            height: self.height,
            walls: self.walls,
            initial_pellets: self.pellets.clone(),
            initial_power_pellets: self.power_pellets.clone(),
            pellets: self.pellets,
            power_pellets: self.power_pellets,
            ghost_spawns,
            favorite_tiles,
            limited_intersections: self.limited_intersections,
            tunnel_starts: self.tunnel_starts,
            player_start,
        })
    }
}
