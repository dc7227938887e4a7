//! Direction arbitration for ghosts.
//!
//! Candidates are always enumerated in [`Direction::DIRECTIONS`] order and compared with a
//! strict `<`, so among equally distant candidates the earliest one wins.

use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::direction::Direction;
use crate::geometry::{self, TilePosition};
use crate::map::Maze;

/// Directions a ghost on `tile` facing `facing` may take next, in canonical order.
///
/// Never contains the reverse of `facing`. Upward turns are dropped on limited
/// intersections unless the ghost is frightened.
pub fn candidate_directions(tile: TilePosition, facing: Direction, frightened: bool, maze: &Maze) -> SmallVec<[Direction; 4]> {
    let reverse = facing.opposite();
    let limited = !frightened && maze.is_limited_intersection(tile);

    Direction::DIRECTIONS
        .into_iter()
        .filter(|&direction| direction != reverse)
        .filter(|&direction| !(limited && direction == Direction::Up))
        .filter(|&direction| !maze.tile_blocked(tile + direction.as_ivec2()))
        .collect()
}

/// Picks the candidate whose next tile is closest to `destination`.
///
/// With no candidates (a dead end) the current facing is kept.
pub fn choose_new_direction(
    tile: TilePosition,
    facing: Direction,
    frightened: bool,
    maze: &Maze,
    destination: TilePosition,
) -> Direction {
    let mut best: Option<(Direction, f64)> = None;
    for direction in candidate_directions(tile, facing, frightened, maze) {
        let distance = geometry::tile_distance(tile + direction.as_ivec2(), destination);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((direction, distance)),
        }
    }

    match best {
        Some((direction, distance)) => {
            trace!(?tile, ?destination, ?direction, distance, "Ghost chose direction");
            direction
        }
        None => {
            trace!(?tile, ?facing, "Ghost at dead end, keeping facing");
            facing
        }
    }
}

/// Picks uniformly among the candidates, keeping the current facing at a dead end.
pub fn choose_frightened_direction<R: Rng + ?Sized>(tile: TilePosition, facing: Direction, maze: &Maze, rng: &mut R) -> Direction {
    let candidates = candidate_directions(tile, facing, true, maze);
    candidates.as_slice().choose(rng).copied().unwrap_or(facing)
}

/// Reversal-preferred direction change used on mode transitions.
///
/// Takes the reverse of `facing` if open, otherwise the first open direction in
/// canonical order, otherwise keeps `facing`.
pub fn change_direction(tile: TilePosition, facing: Direction, maze: &Maze) -> Direction {
    let reverse = facing.opposite();
    if !maze.tile_blocked(tile + reverse.as_ivec2()) {
        return reverse;
    }
    Direction::DIRECTIONS
        .into_iter()
        .find(|&direction| !maze.tile_blocked(tile + direction.as_ivec2()))
        .unwrap_or(facing)
}
