//! Round pacing: the scatter/chase timetable and ghost-house release.

use tracing::debug;

use crate::constants::{schedule, HOUSE_IDLE_LIMIT};
use crate::ghost::Personality;

/// Alternating scatter/chase phases for one level, starting in scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChaseSchedule {
    phases: &'static [f64],
    phase: usize,
    elapsed: f64,
}

impl ScatterChaseSchedule {
    pub fn new(level_number: u32) -> Self {
        let phases: &'static [f64] = match level_number {
            0 => &schedule::LEVEL_0,
            1..=3 => &schedule::LEVEL_1_TO_3,
            _ => &schedule::LEVEL_4_PLUS,
        };
        Self {
            phases,
            phase: 0,
            elapsed: 0.0,
        }
    }

    /// Even phases scatter; the open-ended phase after the table is chase.
    pub fn should_scatter(&self) -> bool {
        self.phase < self.phases.len() && self.phase % 2 == 0
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Advances the timetable unless `frozen` (any ghost frightened). Returns the new
    /// `should_scatter` value when it changed.
    pub fn update(&mut self, dt: f64, frozen: bool) -> Option<bool> {
        if frozen {
            return None;
        }

        let before = self.should_scatter();
        self.elapsed += dt;
        while let Some(&length) = self.phases.get(self.phase) {
            if self.elapsed < length {
                break;
            }
            self.elapsed -= length;
            self.phase += 1;
        }

        let after = self.should_scatter();
        if before == after {
            return None;
        }
        debug!(phase = self.phase, should_scatter = after, "Scatter/chase phase changed");
        Some(after)
    }
}

/// Order in which ghosts leave the house.
const RELEASE_ORDER: [Personality; 3] = [Personality::Ambusher, Personality::Fickle, Personality::Stalker];

/// Global counter value at which the global counter is dropped if the Stalker is still inside.
const GLOBAL_COUNTER_LIMIT: u32 = 32;

/// Decides when ghosts leave the house.
///
/// Each ghost has a personal pellet counter compared against its per-level dot limit; only the
/// next ghost in line counts. After a life is lost a single global counter takes over until the
/// Stalker is inside past the limit. Independently, going too long without eating a pellet
/// forces the next ghost out.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseRelease {
    level_number: u32,
    in_house: [bool; 4],
    personal: [u32; 4],
    global: Option<u32>,
    idle: f64,
}

impl HouseRelease {
    /// Everyone but the Chaser starts inside.
    pub fn new(level_number: u32) -> Self {
        Self {
            level_number,
            in_house: [false, true, true, true],
            personal: [0; 4],
            global: None,
            idle: 0.0,
        }
    }

    pub fn is_in_house(&self, personality: Personality) -> bool {
        self.in_house[personality.index()]
    }

    /// The ghost whose counter is currently active.
    pub fn next_in_line(&self) -> Option<Personality> {
        RELEASE_ORDER.into_iter().find(|&personality| self.is_in_house(personality))
    }

    pub fn global_counter(&self) -> Option<u32> {
        self.global
    }

    pub fn personal_counter(&self, personality: Personality) -> u32 {
        self.personal[personality.index()]
    }

    pub fn pellet_eaten(&mut self) {
        self.idle = 0.0;
        match self.global.as_mut() {
            Some(count) => *count += 1,
            None => {
                if let Some(next) = self.next_in_line() {
                    self.personal[next.index()] += 1;
                }
            }
        }
    }

    /// Sends everyone but the Chaser back inside and switches to the global counter.
    pub fn life_lost(&mut self) {
        self.in_house = [false, true, true, true];
        self.global = Some(0);
        self.idle = 0.0;
    }

    /// Advances the idle timer and returns the ghost to release this tick, if any.
    pub fn update(&mut self, dt: f64) -> Option<Personality> {
        let next = self.next_in_line()?;
        self.idle += dt;

        let released = match self.global {
            Some(count) if next == Personality::Stalker && count >= GLOBAL_COUNTER_LIMIT => {
                self.global = None;
                false
            }
            Some(count) => next.global_pellet_release_reached(count),
            None => self.personal[next.index()] >= next.normal_dot_limit(self.level_number),
        };

        let idle_limit = HOUSE_IDLE_LIMIT[usize::from(self.level_number >= 4)];
        let forced = self.idle >= idle_limit;
        if !(released || forced) {
            return None;
        }

        if forced {
            self.idle = 0.0;
        }
        self.in_house[next.index()] = false;
        debug!(ghost = ?next, forced, global = ?self.global, "Ghost released from house");
        Some(next)
    }
}
