//! Pac-Man entity implementation.
//!
//! Pac-Man walks the tile grid like the ghosts do, but his turns come from the player:
//! a requested turn is buffered until the tile in that direction is open, reversals
//! happen on the spot, and running into a wall stops him on the tile center.

use glam::DVec2;
use tracing::trace;

use crate::constants::{speed, BASE_SPEED, TILE_SIZE};
use crate::direction::Direction;
use crate::entity::{GameObject, Waypoint, MAX_WAYPOINTS};
use crate::geometry::{TilePosition, Vector2};
use crate::input::InputSnapshot;
use crate::map::Maze;

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Pacman {
    pub object: GameObject,
    pub orientation: Direction,
    /// Turn waiting for an open tile.
    pub queued: Option<Direction>,
    pub level_number: u32,
    moving: bool,
}

impl Pacman {
    /// Creates Pac-Man at `start`, facing left and already moving.
    pub fn new(start: Vector2, level_number: u32) -> Self {
        Self {
            object: GameObject::new(start, DVec2::splat(TILE_SIZE)),
            orientation: Direction::Left,
            queued: None,
            level_number,
            moving: true,
        }
    }

    pub fn tile(&self) -> TilePosition {
        self.object.tile()
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Pixels per second for the current level.
    pub fn speed(&self) -> f64 {
        BASE_SPEED * speed::PACMAN[speed::band(self.level_number)]
    }

    /// Applies the movement keys of `input`. Fresh presses win over held keys.
    pub fn steer(&mut self, input: &InputSnapshot) {
        let wanted = input.pressed.direction().or_else(|| input.held.direction());
        if let Some(direction) = wanted {
            self.request(direction);
        }
    }

    /// Requests a turn towards `direction`.
    pub fn request(&mut self, direction: Direction) {
        if direction == self.orientation.opposite() {
            self.orientation = direction;
            self.queued = None;
            self.moving = true;
        } else if direction == self.orientation {
            self.queued = None;
        } else {
            self.queued = Some(direction);
        }
    }

    /// Moves along the grid for `dt` seconds.
    pub fn update(&mut self, dt: f64, maze: &Maze) {
        if self.object.prevent_movement {
            self.object.velocity = Vector2::ZERO;
            return;
        }

        let mut budget = self.speed() * dt;
        for _ in 0..MAX_WAYPOINTS {
            if !self.moving && !self.try_start(maze) {
                break;
            }
            if budget <= 0.0 {
                break;
            }

            let (used, waypoint) = self.object.step_towards_waypoint(self.orientation, budget);
            budget -= used;
            self.object.wrap_horizontally(maze.pixel_width());

            if waypoint == Waypoint::TileCenter {
                self.apply_queued(maze);
                if maze.tile_blocked(self.tile() + self.orientation.as_ivec2()) {
                    trace!(tile = ?self.tile(), direction = ?self.orientation, "Pac-Man stopped against wall");
                    self.moving = false;
                }
            }
        }

        self.object.velocity = if self.moving {
            self.orientation.as_dvec2() * self.speed()
        } else {
            Vector2::ZERO
        };
    }

    /// Resumes movement from a standstill if the queued turn or the current facing is open.
    fn try_start(&mut self, maze: &Maze) -> bool {
        self.apply_queued(maze);
        self.moving = !maze.tile_blocked(self.tile() + self.orientation.as_ivec2());
        self.moving
    }

    fn apply_queued(&mut self, maze: &Maze) {
        if let Some(queued) = self.queued {
            if !maze.tile_blocked(self.tile() + queued.as_ivec2()) {
                self.orientation = queued;
                self.queued = None;
            }
        }
    }

    /// Places Pac-Man back on `start`, facing left.
    pub fn reset(&mut self, start: Vector2) {
        self.object = GameObject::new(start, DVec2::splat(TILE_SIZE));
        self.orientation = Direction::Left;
        self.queued = None;
        self.moving = true;
    }
}

