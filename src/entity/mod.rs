//! Moving game objects and grid-aligned movement.
//!
//! Positions are object centers in pixel space. Movement along a corridor is done in
//! sub-steps that stop on every half-tile mark, so callers get a chance to react at
//! each tile edge and tile center no matter how large the frame delta is.

pub mod pacman;

use glam::DVec2;

use crate::constants::TILE_SIZE;
use crate::direction::Direction;
use crate::geometry::{self, Rect, TilePosition, Vector2};
use crate::map::Maze;

/// Upper bound on sub-steps processed per update; guards against degenerate budgets.
pub const MAX_WAYPOINTS: usize = 64;

/// The mark reached by [`GameObject::step_towards_waypoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waypoint {
    /// Ran out of distance before the next mark.
    None,
    TileCenter,
    TileEdge,
}

/// A positioned, sized entity.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Center, in pixels.
    pub position: Vector2,
    /// Pixels per second.
    pub velocity: Vector2,
    pub size: Vector2,
    /// Frozen objects ignore movement.
    pub prevent_movement: bool,
}

impl GameObject {
    pub fn new(position: Vector2, size: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            size,
            prevent_movement: false,
        }
    }

    /// A tile-sized object centered on `tile`.
    pub fn on_tile(tile: TilePosition) -> Self {
        Self::new(geometry::tile_center(tile), DVec2::splat(TILE_SIZE))
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    pub fn tile(&self) -> TilePosition {
        geometry::tile_of(self.position)
    }

    /// Free integration of velocity; unused by grid movement but available to props.
    pub fn integrate(&mut self, dt: f64) {
        if !self.prevent_movement {
            self.position += self.velocity * dt;
        }
    }

    pub fn collides_with_wall(&self, maze: &Maze) -> bool {
        maze.rect_blocked(&self.bounds())
    }

    pub fn overlaps(&self, other: &GameObject) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    pub fn is_centered_on_tile(&self, tolerance: f64) -> bool {
        self.position.distance(geometry::tile_center(self.tile())) <= tolerance
    }

    pub fn snap_to_tile_center(&mut self) {
        self.position = geometry::tile_center(self.tile());
    }

    /// Moves up to `budget` pixels along `direction`, stopping early on the next tile center
    /// or tile edge. Returns the distance consumed and the mark reached.
    ///
    /// Marks are landed on exactly, so repeated stepping does not drift off the grid.
    pub fn step_towards_waypoint(&mut self, direction: Direction, budget: f64) -> (f64, Waypoint) {
        let half = TILE_SIZE / 2.0;
        let sign = match direction {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        };
        let axis = if direction.is_horizontal() {
            &mut self.position.x
        } else {
            &mut self.position.y
        };

        let mark_index = if sign > 0.0 {
            (*axis / half).floor() + 1.0
        } else {
            (*axis / half).ceil() - 1.0
        };
        let mark = mark_index * half;
        let gap = (mark - *axis).abs();

        if budget < gap {
            *axis += sign * budget;
            return (budget, Waypoint::None);
        }

        *axis = mark;
        let waypoint = if (mark_index as i64).rem_euclid(2) == 1 {
            Waypoint::TileCenter
        } else {
            Waypoint::TileEdge
        };
        (gap, waypoint)
    }

    /// Wraps the position across the left/right board edge. Returns true if it wrapped.
    pub fn wrap_horizontally(&mut self, board_width: f64) -> bool {
        if self.position.x < 0.0 {
            self.position.x += board_width;
            true
        } else if self.position.x >= board_width {
            self.position.x -= board_width;
            true
        } else {
            false
        }
    }
}
