//! The four ghost personalities and their per-personality rules.
//!
//! Each personality is a closed variant; destination, release gating and dot limits are
//! resolved through exhaustive matches so adding a variant forces every rule to be revisited.

use strum_macros::Display;

use crate::direction::Direction;
use crate::geometry::TilePosition;
use crate::map::Maze;

/// The four classic ghost behavior profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Personality {
    /// Pursues the target's exact tile.
    Chaser,
    /// Aims four tiles ahead of the target.
    Ambusher,
    /// Reflects a point two tiles ahead of the target through the Chaser.
    Fickle,
    /// Never pursues; always heads for its favorite tile.
    Stalker,
}

/// The mode a destination is computed for. Frightened and warping ghosts never
/// recompute towards a destination, so only these three matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targeting {
    Scatter,
    Chase,
    Respawn,
}

/// Live positions a destination may depend on, passed explicitly each decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuit {
    /// Tile of the pursued target (Pac-Man).
    pub target_tile: TilePosition,
    /// Facing of the pursued target.
    pub target_facing: Direction,
    /// Tile of the Chaser ghost, used by the Fickle reflection.
    pub chaser_tile: TilePosition,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Chaser,
        Personality::Ambusher,
        Personality::Fickle,
        Personality::Stalker,
    ];

    /// Index into per-personality tables, in declaration order.
    pub fn index(self) -> usize {
        match self {
            Personality::Chaser => 0,
            Personality::Ambusher => 1,
            Personality::Fickle => 2,
            Personality::Stalker => 3,
        }
    }

    /// The tile this personality steers toward.
    pub fn destination(self, targeting: Targeting, pursuit: &Pursuit, maze: &Maze) -> TilePosition {
        match targeting {
            Targeting::Respawn => maze.ghost_house_entrance_tile(),
            Targeting::Scatter => maze.favorite_tile(self),
            Targeting::Chase => match self {
                Personality::Chaser => pursuit.target_tile,
                Personality::Ambusher => project_ahead(pursuit.target_tile, pursuit.target_facing, 4),
                Personality::Fickle => {
                    let pivot = project_ahead(pursuit.target_tile, pursuit.target_facing, 2);
                    pivot * 2 - pursuit.chaser_tile
                }
                Personality::Stalker => maze.favorite_tile(self),
            },
        }
    }

    /// Whether the global pellet counter has reached this ghost's release threshold.
    pub fn global_pellet_release_reached(self, count: u32) -> bool {
        match self {
            Personality::Chaser => true,
            Personality::Ambusher => count >= 7,
            Personality::Fickle => count >= 17,
            Personality::Stalker => false,
        }
    }

    /// Personal pellet count required before this ghost may leave the house on `level_number`.
    pub fn normal_dot_limit(self, level_number: u32) -> u32 {
        match self {
            Personality::Chaser | Personality::Ambusher => 0,
            Personality::Fickle => match level_number {
                0 => 30,
                _ => 0,
            },
            Personality::Stalker => match level_number {
                0 => 60,
                1 => 50,
                _ => 0,
            },
        }
    }

    /// Seed for this personality's frightened-wandering generator.
    pub fn rng_seed(self) -> u64 {
        0x5EED_0000 + self.index() as u64
    }
}

/// Projects `tile` by `distance` tiles along `facing`.
///
/// Facing up also shifts left by the same distance, matching the arcade overflow bug.
pub fn project_ahead(tile: TilePosition, facing: Direction, distance: i32) -> TilePosition {
    let mut projected = tile + facing.as_ivec2() * distance;
    if facing == Direction::Up {
        projected.x -= distance;
    }
    projected
}
