//! Ghost entity: movement on the tile grid driven by its mode and personality.
//!
//! Each ghost owns its [`ModeState`] and its frightened-wandering generator. Positions of
//! other entities it depends on (the target, the Chaser) are handed in per update through
//! [`Pursuit`] instead of being stored.

pub mod ai;
pub mod mode;
pub mod personality;

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::constants::{BASE_SPEED, TILE_SIZE};
use crate::direction::Direction;
use crate::entity::{GameObject, Waypoint, MAX_WAYPOINTS};
use crate::geometry::{TilePosition, Vector2};
use crate::map::Maze;

pub use mode::{GhostMode, ModeEvent, ModeState};
pub use personality::{Personality, Pursuit, Targeting};

/// Distance from a tile center, in pixels, still treated as on it.
const CENTER_TOLERANCE: f64 = 1e-6;

/// Something a ghost reports to the scene during an update or transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostEvent {
    /// The frightened countdown crossed `threshold` seconds remaining.
    Flash { threshold: f64 },
    FrightenedEnded,
    ModeChanged { from: GhostMode, to: GhostMode },
    /// A respawning ghost reached the ghost-house entrance.
    ReachedHouse,
}

pub struct Ghost {
    pub object: GameObject,
    pub personality: Personality,
    /// Current facing.
    pub direction: Direction,
    /// Decided turn waiting for the next tile center.
    pub pending_direction: Option<Direction>,
    pub level_number: u32,
    pub should_scatter: bool,
    /// Set from outside by the round controller; never decremented here.
    pub cruise_elroy_level: u8,
    state: ModeState,
    last_tile: TilePosition,
    rng: SmallRng,
}

impl Ghost {
    /// Creates a ghost on its spawn point, in Scatter, facing left.
    pub fn new(personality: Personality, maze: &Maze, level_number: u32) -> Self {
        let object = GameObject::new(maze.spawn(personality), DVec2::splat(TILE_SIZE));
        let last_tile = object.tile();
        Self {
            object,
            personality,
            direction: Direction::Left,
            pending_direction: None,
            level_number,
            should_scatter: true,
            cruise_elroy_level: 0,
            state: ModeState::default(),
            last_tile,
            rng: SmallRng::seed_from_u64(personality.rng_seed()),
        }
    }

    pub fn mode(&self) -> GhostMode {
        self.state.mode
    }

    pub fn mode_state(&self) -> &ModeState {
        &self.state
    }

    pub fn tile(&self) -> TilePosition {
        self.object.tile()
    }

    pub fn is_frightened(&self) -> bool {
        self.state.is_frightened()
    }

    pub fn is_respawning(&self) -> bool {
        self.state.is_respawning()
    }

    pub fn is_warping(&self) -> bool {
        self.state.is_warping()
    }

    /// Pixels per second in the current mode.
    pub fn speed(&self) -> f64 {
        BASE_SPEED * self.state.speed_multiplier(self.level_number, self.personality, self.cruise_elroy_level)
    }

    /// Puts the ghost on `position` facing `direction`, keeping its mode.
    pub fn place(&mut self, position: Vector2, direction: Direction) {
        self.object.position = position;
        self.object.velocity = Vector2::ZERO;
        self.direction = direction;
        self.pending_direction = None;
        self.last_tile = self.object.tile();
    }

    /// Back to the spawn point in Scatter with a fresh generator, for a new life or level.
    pub fn reset(&mut self, maze: &Maze, level_number: u32) {
        *self = Self::new(self.personality, maze, level_number);
    }

    fn targeting(&self) -> Targeting {
        if self.is_respawning() {
            Targeting::Respawn
        } else if self.should_scatter {
            Targeting::Scatter
        } else {
            Targeting::Chase
        }
    }

    /// The tile this ghost is currently steering toward.
    pub fn destination(&self, pursuit: &Pursuit, maze: &Maze) -> TilePosition {
        self.personality.destination(self.targeting(), pursuit, maze)
    }

    /// The direction to take from the current tile.
    pub fn choose_new_direction(&mut self, maze: &Maze, pursuit: &Pursuit) -> Direction {
        let tile = self.tile();
        if self.is_frightened() {
            ai::choose_frightened_direction(tile, self.direction, maze, &mut self.rng)
        } else {
            let destination = self.destination(pursuit, maze);
            ai::choose_new_direction(tile, self.direction, false, maze, destination)
        }
    }

    /// Turns around if possible, otherwise takes the first open direction.
    ///
    /// A perpendicular fallback away from a tile center waits for the center like any other turn.
    pub fn reverse(&mut self, maze: &Maze) {
        let direction = ai::change_direction(self.tile(), self.direction, maze);
        trace!(ghost = ?self.personality, from = ?self.direction, to = ?direction, "Ghost changed direction");
        if direction.same_axis(self.direction) || self.object.is_centered_on_tile(CENTER_TOLERANCE) {
            self.direction = direction;
            self.pending_direction = None;
        } else {
            self.pending_direction = Some(direction);
        }
    }

    /// Feeds `event` through the mode machine, reversing when leaving Scatter or Chase for
    /// anything but Warping.
    pub fn apply(&mut self, event: ModeEvent, maze: &Maze) -> Option<GhostEvent> {
        let from = self.state.mode;
        self.state = self.state.apply(event, self.should_scatter);
        let to = self.state.mode;
        if from == to {
            return None;
        }

        debug!(ghost = ?self.personality, %from, %to, "Ghost mode changed");
        if from.is_pursuit() && to != GhostMode::Warping {
            self.reverse(maze);
        }
        Some(GhostEvent::ModeChanged { from, to })
    }

    /// Updates the scatter flag, switching between Scatter and Chase when pursuing.
    pub fn set_should_scatter(&mut self, should_scatter: bool, maze: &Maze) -> Option<GhostEvent> {
        self.should_scatter = should_scatter;
        self.apply(ModeEvent::Schedule { should_scatter }, maze)
    }

    pub fn become_frightened(&mut self, turn_blue: bool, maze: &Maze) -> Option<GhostEvent> {
        self.apply(ModeEvent::BecomeFrightened { turn_blue }, maze)
    }

    pub fn begin_respawning(&mut self, maze: &Maze) -> Option<GhostEvent> {
        self.apply(ModeEvent::BeginRespawning, maze)
    }

    pub fn begin_warping(&mut self, maze: &Maze) -> Option<GhostEvent> {
        let entry = self.tile();
        self.apply(ModeEvent::BeginWarping { entry }, maze)
    }

    pub fn end_warping(&mut self, maze: &Maze) -> Option<GhostEvent> {
        self.apply(ModeEvent::EndWarping, maze)
    }

    /// Advances timers and moves the ghost for `dt` seconds.
    pub fn update(&mut self, dt: f64, maze: &Maze, pursuit: &Pursuit) -> Vec<GhostEvent> {
        let mut events = Vec::new();
        self.tick_timers(dt, maze, &mut events);

        if self.object.prevent_movement {
            self.object.velocity = Vector2::ZERO;
            return events;
        }

        let speed = self.speed();
        let mut budget = speed * dt;
        let mut stuck = self.object.is_centered_on_tile(CENTER_TOLERANCE) && !self.at_tile_center(maze);
        for _ in 0..MAX_WAYPOINTS {
            if stuck || budget <= 0.0 {
                break;
            }

            let (used, waypoint) = self.object.step_towards_waypoint(self.direction, budget);
            budget -= used;
            self.object.wrap_horizontally(maze.pixel_width());

            let tile = self.tile();
            if tile != self.last_tile {
                self.last_tile = tile;
                self.entered_tile(tile, maze, pursuit, &mut events);
            }

            if waypoint == Waypoint::TileCenter && !self.at_tile_center(maze) {
                stuck = true;
                break;
            }
        }

        self.object.velocity = if stuck {
            Vector2::ZERO
        } else {
            self.direction.as_dvec2() * speed
        };
        events
    }

    fn tick_timers(&mut self, dt: f64, maze: &Maze, events: &mut Vec<GhostEvent>) {
        let tick = self.state.tick(dt);
        for threshold in tick.flashes {
            trace!(ghost = ?self.personality, threshold, "Frightened flash");
            events.push(GhostEvent::Flash { threshold });
        }
        if tick.expired {
            events.push(GhostEvent::FrightenedEnded);
            events.extend(self.apply(ModeEvent::FrightenedExpired, maze));
        }
    }

    fn entered_tile(&mut self, tile: TilePosition, maze: &Maze, pursuit: &Pursuit, events: &mut Vec<GhostEvent>) {
        if maze.is_tunnel(tile) {
            if !self.is_warping() && !self.is_respawning() {
                events.extend(self.begin_warping(maze));
            }
        } else if self.is_warping() && maze.in_bounds(tile) {
            events.extend(self.end_warping(maze));
        }

        // Off-board tiles are open on every side, so no decisions are made there.
        if self.is_warping() || !maze.in_bounds(tile) {
            return;
        }

        if self.is_respawning() && tile == maze.ghost_house_entrance_tile() {
            debug!(ghost = ?self.personality, ?tile, "Ghost reached house");
            events.push(GhostEvent::ReachedHouse);
            events.extend(self.apply(ModeEvent::ReachedHouse, maze));
        }

        // Turns decided off a tile center wait for it, even from a standstill
        let chosen = self.choose_new_direction(maze, pursuit);
        if chosen == self.direction {
            self.pending_direction = None;
        } else if self.object.is_centered_on_tile(CENTER_TOLERANCE) {
            self.direction = chosen;
            self.pending_direction = None;
        } else {
            self.pending_direction = Some(chosen);
        }
    }

    /// Commits a pending turn on reaching a tile center. Returns false when the ghost has
    /// nowhere to go and stops.
    fn at_tile_center(&mut self, maze: &Maze) -> bool {
        let tile = self.tile();
        if let Some(pending) = self.pending_direction.take() {
            if !maze.tile_blocked(tile + pending.as_ivec2()) {
                self.direction = pending;
            }
        }

        if maze.tile_blocked(tile + self.direction.as_ivec2()) {
            let direction = ai::change_direction(tile, self.direction, maze);
            if maze.tile_blocked(tile + direction.as_ivec2()) {
                trace!(ghost = ?self.personality, ?tile, "Ghost boxed in");
                return false;
            }
            self.direction = direction;
        }
        true
    }
}
