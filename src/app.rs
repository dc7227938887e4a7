//! The game loop controller.
//!
//! [`GameLoop`] turns wall-clock time into calls on a [`Simulation`]: variable-step updates get the
//! raw elapsed time, fixed-step updates drain an accumulator in constant steps. The controller is
//! state-agnostic; the simulation only tells it whether it is currently playing so that pausing can
//! suspend gameplay without freezing animation.

use std::time::{Duration, Instant};

use circular_buffer::CircularBuffer;
use tracing::{debug, info, warn};

use crate::constants::{MAX_ELAPSED, TARGET_FPS};
use crate::formatter;
use crate::game::GameState;
use crate::input::{InputSnapshot, Keys};

/// Number of recent frame times kept for the FPS average.
const FRAME_HISTORY: usize = 120;

/// How a category of work is stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Constant steps drained from the accumulator.
    Fixed,
    /// One call per tick with the raw elapsed time.
    Variable,
}

/// Timing policy for a [`GameLoop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    pub updates: StepMode,
    pub animations: StepMode,
    pub target_fps: f64,
    /// Longest elapsed time fed into the accumulator per tick, in seconds.
    pub max_elapsed: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            updates: StepMode::Fixed,
            animations: StepMode::Fixed,
            target_fps: TARGET_FPS,
            max_elapsed: MAX_ELAPSED,
        }
    }
}

impl LoopConfig {
    /// Length of one fixed step, in seconds.
    pub fn step(&self) -> f64 {
        1.0 / self.target_fps
    }

    fn any_fixed(&self) -> bool {
        self.updates == StepMode::Fixed || self.animations == StepMode::Fixed
    }
}

/// A concrete game driven by the loop.
///
/// Every method runs to completion within a tick; nothing here may block.
pub trait Simulation {
    /// Rebuilds the input snapshot from raw events since the previous tick.
    fn refresh_input(&mut self) -> InputSnapshot;

    /// Performs a scheduled reset.
    fn reset(&mut self);

    fn state(&self) -> GameState;

    fn is_playing(&self) -> bool {
        self.state() == GameState::Playing
    }

    fn update(&mut self, _dt: f64) {}

    fn fixed_update(&mut self, _dt: f64) {}

    fn update_animations(&mut self, _dt: f64) {}

    fn fixed_update_animations(&mut self, _dt: f64) {}

    /// Whether any tile changed since the last commit.
    fn tiles_dirty(&self) -> bool;

    /// Pushes changed tiles to the render surface.
    fn commit_tiles(&mut self);

    /// Sprite playback is frozen, e.g. during a scripted sequence.
    fn sprites_suppressed(&self) -> bool {
        false
    }

    fn update_sprites(&mut self, _dt: f64) {}

    fn draw(&mut self);

    /// Whether the simulation wants a reset at the start of the next tick.
    fn take_reset_request(&mut self) -> bool {
        false
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Raw elapsed time, before clamping.
    pub elapsed: f64,
    pub fixed_steps: u32,
    /// Whether anything was updated and tiles were committed.
    pub updated: bool,
    /// The tick only performed a scheduled reset.
    pub reset: bool,
}

/// Host services needed by [`GameLoop::run`].
pub trait LoopHost<S> {
    /// Drains pending host events into the simulation. Returns false to quit.
    fn poll_events(&mut self, sim: &mut S) -> bool;

    fn now(&mut self) -> Instant;

    /// Called with the time left in the frame budget.
    fn idle(&mut self, remaining: Duration);
}

pub struct GameLoop<S> {
    sim: S,
    config: LoopConfig,
    previous: Option<Instant>,
    accumulator: f64,
    paused: bool,
    reset_scheduled: bool,
    frame_times: CircularBuffer<FRAME_HISTORY, f64>,
    ticks: u64,
}

impl<S: Simulation> GameLoop<S> {
    pub fn new(sim: S, config: LoopConfig) -> Self {
        Self {
            sim,
            config,
            previous: None,
            accumulator: 0.0,
            paused: false,
            reset_scheduled: false,
            frame_times: CircularBuffer::new(),
            ticks: 0,
        }
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn into_simulation(self) -> S {
        self.sim
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Time carried over to the next tick, in seconds.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            info!("{}", if paused { "Paused" } else { "Unpaused" });
        }
    }

    /// Resets the simulation at the start of the next tick.
    pub fn schedule_reset(&mut self) {
        self.reset_scheduled = true;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Average frames per second over the recent frame history.
    pub fn average_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.frame_times.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Runs one tick at wall-clock time `now`. The first tick sees zero elapsed time.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let elapsed = match self.previous.replace(now) {
            Some(previous) => now.saturating_duration_since(previous).as_secs_f64(),
            None => 0.0,
        };
        self.tick_elapsed(elapsed)
    }

    /// Runs one tick with an explicit elapsed time in seconds.
    pub fn tick_elapsed(&mut self, elapsed: f64) -> TickReport {
        self.ticks += 1;
        formatter::increment_tick();

        let input = self.sim.refresh_input();
        if input.pressed.contains(Keys::PAUSE) {
            self.set_paused(!self.paused);
        }

        let mut report = TickReport {
            elapsed,
            ..TickReport::default()
        };

        if self.reset_scheduled {
            self.reset_scheduled = false;
            self.accumulator = 0.0;
            self.sim.reset();
            debug!("Scheduled reset performed");
            report.reset = true;
            return report;
        }

        self.frame_times.push_back(elapsed);
        let suspended = self.paused && self.sim.is_playing();

        if self.config.animations == StepMode::Variable {
            self.sim.update_animations(elapsed);
        }

        if self.config.updates == StepMode::Variable && !suspended {
            self.sim.update(elapsed);
            report.updated = true;
        }

        if self.config.any_fixed() {
            let clamped = elapsed.min(self.config.max_elapsed);
            if clamped < elapsed {
                warn!(elapsed, clamped, "Elapsed time clamped");
            }
            self.accumulator += clamped;

            let step = self.config.step();
            while self.accumulator >= step {
                self.accumulator -= step;
                if self.config.updates == StepMode::Fixed && !suspended {
                    self.sim.fixed_update(step);
                }
                if self.config.animations == StepMode::Fixed {
                    self.sim.fixed_update_animations(step);
                }
                report.fixed_steps += 1;
                report.updated = true;
            }
        }

        if self.sim.tiles_dirty() {
            report.updated = true;
        }
        if report.updated {
            self.sim.commit_tiles();
        }

        if !self.sim.sprites_suppressed() {
            self.sim.update_sprites(elapsed);
        }

        self.sim.draw();

        if self.sim.take_reset_request() {
            self.reset_scheduled = true;
        }

        report
    }

    /// The explicit run loop: poll host events, tick, then idle away the rest of the frame budget.
    pub fn run<H: LoopHost<S>>(&mut self, host: &mut H) {
        let budget = Duration::from_secs_f64(self.config.step());
        info!(step_ms = budget.as_secs_f64() * 1000.0, "Starting game loop");

        loop {
            let start = host.now();
            if !host.poll_events(&mut self.sim) {
                info!("Exit requested. Exiting...");
                break;
            }

            self.tick(start);

            let frame = host.now().saturating_duration_since(start);
            if frame < budget {
                host.idle(budget - frame);
            } else {
                warn!(behind = ?(frame - budget), "Game loop behind schedule");
            }
        }
    }
}
