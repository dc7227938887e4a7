//! Ghost behavioral modes and their transitions.
//!
//! A ghost's mode lives in a [`ModeState`] value. Transitions consume the old state and
//! produce a new one through [`ModeState::apply`]; the only in-place mutation is the
//! frightened countdown ticking inside [`ModeState::tick`].

use smallvec::SmallVec;
use strum_macros::Display;

use crate::constants::{speed, FLASH_THRESHOLDS, FRIGHTENED_DURATION};
use crate::geometry::TilePosition;
use crate::ghost::Personality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Respawning,
    Warping,
}

impl GhostMode {
    /// The pursuit mode `should_scatter` selects.
    pub fn from_schedule(should_scatter: bool) -> GhostMode {
        if should_scatter {
            GhostMode::Scatter
        } else {
            GhostMode::Chase
        }
    }

    pub fn is_pursuit(self) -> bool {
        matches!(self, GhostMode::Scatter | GhostMode::Chase)
    }
}

/// Inputs that may move a ghost between modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeEvent {
    /// The round schedule changed the scatter flag.
    Schedule { should_scatter: bool },
    BecomeFrightened { turn_blue: bool },
    FrightenedExpired,
    BeginRespawning,
    BeginWarping { entry: TilePosition },
    EndWarping,
    ReachedHouse,
}

/// The current mode plus the transient data only some modes carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeState {
    pub mode: GhostMode,
    /// Seconds left while frightened; zero otherwise.
    pub frightened_remaining: f64,
    /// Whether this frightening turned the ghost blue (and flashes before expiring).
    pub turn_blue: bool,
    /// Tunnel tile the ghost entered through while warping.
    pub warp_entry: Option<TilePosition>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self::pursuing(true)
    }
}

/// What happened to the frightened countdown during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrightenedTick {
    /// Thresholds crossed this tick, in descending order.
    pub flashes: SmallVec<[f64; 8]>,
    pub expired: bool,
}

impl ModeState {
    /// Scatter or Chase, as `should_scatter` indicates.
    pub fn pursuing(should_scatter: bool) -> Self {
        Self {
            mode: GhostMode::from_schedule(should_scatter),
            frightened_remaining: 0.0,
            turn_blue: false,
            warp_entry: None,
        }
    }

    fn with_mode(mode: GhostMode) -> Self {
        Self {
            mode,
            ..Self::pursuing(true)
        }
    }

    pub fn is_frightened(&self) -> bool {
        self.mode == GhostMode::Frightened
    }

    pub fn is_respawning(&self) -> bool {
        self.mode == GhostMode::Respawning
    }

    pub fn is_warping(&self) -> bool {
        self.mode == GhostMode::Warping
    }

    /// The state after `event`. Events that do not apply to the current mode return it unchanged.
    ///
    /// Frightening an already frightened ghost of the same flavor leaves its countdown running.
    pub fn apply(self, event: ModeEvent, should_scatter: bool) -> ModeState {
        match event {
            ModeEvent::Schedule { should_scatter } if self.mode.is_pursuit() => Self::pursuing(should_scatter),
            ModeEvent::Schedule { .. } => self,
            ModeEvent::BecomeFrightened { turn_blue } if self.is_frightened() && self.turn_blue == turn_blue => self,
            ModeEvent::BecomeFrightened { turn_blue } => Self {
                mode: GhostMode::Frightened,
                frightened_remaining: FRIGHTENED_DURATION,
                turn_blue,
                warp_entry: None,
            },
            ModeEvent::FrightenedExpired if self.is_frightened() => Self::pursuing(should_scatter),
            ModeEvent::FrightenedExpired => self,
            ModeEvent::BeginRespawning => Self::with_mode(GhostMode::Respawning),
            ModeEvent::BeginWarping { entry } => Self {
                warp_entry: Some(entry),
                ..Self::with_mode(GhostMode::Warping)
            },
            ModeEvent::EndWarping if self.is_warping() => Self::pursuing(should_scatter),
            ModeEvent::EndWarping => self,
            ModeEvent::ReachedHouse if self.is_respawning() => Self::pursuing(should_scatter),
            ModeEvent::ReachedHouse => self,
        }
    }

    /// Counts the frightened timer down by `dt`, reporting flash thresholds crossed and expiry.
    ///
    /// A threshold fires when the remaining time was above it before the subtraction and at or
    /// below it after, so each one fires at most once per frightening.
    pub fn tick(&mut self, dt: f64) -> FrightenedTick {
        let mut result = FrightenedTick::default();
        if !self.is_frightened() {
            return result;
        }

        let before = self.frightened_remaining;
        let after = before - dt;
        self.frightened_remaining = after.max(0.0);

        if self.turn_blue {
            result
                .flashes
                .extend(FLASH_THRESHOLDS.into_iter().filter(|&threshold| before > threshold && after <= threshold));
        }
        result.expired = after <= 0.0;
        result
    }

    /// Fraction of base speed for this mode.
    ///
    /// Cruise Elroy only speeds up the Chaser, and only in Scatter or Chase.
    pub fn speed_multiplier(&self, level_number: u32, personality: Personality, cruise_elroy_level: u8) -> f64 {
        let band = speed::band(level_number);
        match self.mode {
            GhostMode::Frightened => speed::FRIGHTENED[band],
            GhostMode::Warping => speed::WARPING[band],
            GhostMode::Respawning => speed::RESPAWNING,
            GhostMode::Scatter | GhostMode::Chase => {
                let elroy = match personality {
                    Personality::Chaser => cruise_elroy_level.min(2) as f64 * speed::CRUISE_ELROY_BONUS,
                    _ => 0.0,
                };
                speed::NORMAL[band] + elroy
            }
        }
    }
}
