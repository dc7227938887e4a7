//! Pixel/tile coordinate helpers.
//!
//! Positions are pixel-space [`Vector2`] values; tiles are integer [`TilePosition`]s
//! derived by flooring against [`TILE_SIZE`].

use glam::{DVec2, IVec2};

use crate::constants::TILE_SIZE;

/// A pixel-space position or velocity.
pub type Vector2 = DVec2;
/// A tile-grid coordinate. May go negative or past the board edge (tunnels, scatter targets).
pub type TilePosition = IVec2;

/// The tile containing `position`.
pub fn tile_of(position: Vector2) -> TilePosition {
    (position / TILE_SIZE).floor().as_ivec2()
}

/// Top-left pixel of `tile`.
pub fn tile_origin(tile: TilePosition) -> Vector2 {
    tile.as_dvec2() * TILE_SIZE
}

/// Center pixel of `tile`.
pub fn tile_center(tile: TilePosition) -> Vector2 {
    tile_origin(tile) + DVec2::splat(TILE_SIZE / 2.0)
}

/// Rounds each component to the nearest multiple of the tile size.
pub fn round_to_tile(position: Vector2) -> Vector2 {
    (position / TILE_SIZE).round() * TILE_SIZE
}

/// Straight-line distance between two tiles, in tiles.
pub fn tile_distance(a: TilePosition, b: TilePosition) -> f64 {
    (a - b).as_dvec2().length()
}

/// Clamps `value` into `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vector2,
    pub max: Vector2,
}

impl Rect {
    pub fn new(min: Vector2, max: Vector2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vector2, size: Vector2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// The pixel rectangle covering a single tile.
    pub fn from_tile(tile: TilePosition) -> Self {
        let origin = tile_origin(tile);
        Self::new(origin, origin + DVec2::splat(TILE_SIZE))
    }

    /// The pixel rectangle covering `width` tiles starting at `tile` and extending right.
    pub fn from_tile_run(tile: TilePosition, width: u32) -> Self {
        let origin = tile_origin(tile);
        Self::new(origin, origin + DVec2::new(TILE_SIZE * width as f64, TILE_SIZE))
    }

    pub fn size(&self) -> Vector2 {
        self.max - self.min
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x && self.min.y < other.max.y && other.min.y < self.max.y
    }

    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    pub fn translated(&self, offset: Vector2) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
