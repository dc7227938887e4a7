//! Per-tick keyboard snapshot.
//!
//! Hosts report raw key transitions as they arrive; gameplay only ever reads the
//! [`InputSnapshot`] produced once at the start of each tick.

use bitflags::bitflags;

use crate::direction::Direction;

bitflags! {
    /// Abstract key identifiers the core understands.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        const UP = 1 << 0;
        const LEFT = 1 << 1;
        const DOWN = 1 << 2;
        const RIGHT = 1 << 3;
        const START = 1 << 4;
        const PAUSE = 1 << 5;
    }
}

impl Keys {
    /// The movement key for `direction`.
    pub fn from_direction(direction: Direction) -> Keys {
        match direction {
            Direction::Up => Keys::UP,
            Direction::Left => Keys::LEFT,
            Direction::Down => Keys::DOWN,
            Direction::Right => Keys::RIGHT,
        }
    }

    /// The first movement key in this set, in canonical direction order.
    pub fn direction(self) -> Option<Direction> {
        Direction::DIRECTIONS
            .into_iter()
            .find(|&direction| self.contains(Keys::from_direction(direction)))
    }
}

/// Keys pressed, held and released as of the latest refresh.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Went down since the previous refresh.
    pub pressed: Keys,
    /// Down as of this refresh.
    pub held: Keys,
    /// Went up since the previous refresh.
    pub released: Keys,
}

/// Accumulates raw key events between ticks.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pending_down: Keys,
    pending_up: Keys,
    snapshot: InputSnapshot,
}

impl InputState {
    pub fn key_down(&mut self, keys: Keys) {
        self.pending_down |= keys;
    }

    pub fn key_up(&mut self, keys: Keys) {
        self.pending_up |= keys;
    }

    /// Rebuilds the snapshot from events since the previous refresh and clears them.
    ///
    /// A key that goes down and up within one tick shows up as both pressed and released,
    /// but not held.
    pub fn refresh(&mut self) -> InputSnapshot {
        let previously_held = self.snapshot.held;
        self.snapshot = InputSnapshot {
            pressed: self.pending_down.difference(previously_held),
            held: previously_held.union(self.pending_down).difference(self.pending_up),
            released: self.pending_up,
        };
        self.pending_down = Keys::empty();
        self.pending_up = Keys::empty();
        self.snapshot
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    /// Forgets everything, including held keys.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
