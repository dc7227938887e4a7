//! Frame-based sprite playback and interval blinking.

use crate::error::AnimationError;

/// Identifier of a graphic in the renderer's sprite sheet.
pub type GraphicId = u16;

/// Cycles through a fixed list of frames, carrying partial frame time across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    frames: Vec<GraphicId>,
    frame_duration: f64,
    current_frame: usize,
    time_bank: f64,
}

impl AnimatedSprite {
    pub fn new(frames: Vec<GraphicId>, frame_duration: f64) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if frame_duration <= 0.0 {
            return Err(AnimationError::InvalidFrameDuration(frame_duration));
        }

        Ok(Self {
            frames,
            frame_duration,
            current_frame: 0,
            time_bank: 0.0,
        })
    }

    pub fn tick(&mut self, dt: f64) {
        self.time_bank += dt;
        while self.time_bank >= self.frame_duration {
            self.time_bank -= self.frame_duration;
            self.current_frame = (self.current_frame + 1) % self.frames.len();
        }
    }

    pub fn current_graphic(&self) -> GraphicId {
        self.frames[self.current_frame]
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.time_bank = 0.0;
    }
}

/// Toggles visibility every `interval` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Blinking {
    timer: f64,
    interval: f64,
    visible: bool,
}

impl Blinking {
    pub fn new(interval: f64) -> Self {
        Self {
            timer: 0.0,
            interval,
            visible: true,
        }
    }

    /// Advances the timer, flipping once per whole interval elapsed. Returns true if
    /// visibility ended up changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.interval <= 0.0 {
            return false;
        }

        let before = self.visible;
        self.timer += dt;
        // Keep the partial interval so the rhythm doesn't drift
        while self.timer >= self.interval {
            self.timer -= self.interval;
            self.visible = !self.visible;
        }
        self.visible != before
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible again, with the timer restarted.
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.visible = true;
    }
}
