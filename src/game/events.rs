//! Outbound notifications: what the renderer and the score keeper are told.

use strum_macros::Display;

use crate::animation::GraphicId;
use crate::game::GameState;
use crate::geometry::Vector2;
use crate::ghost::Personality;

/// Palette identifier understood by the renderer.
pub type PaletteId = u8;

/// A single tile that must be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileUpdate {
    pub row: u32,
    pub column: u32,
    pub graphic: GraphicId,
    pub palette: PaletteId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Pacman,
    Ghost(Personality),
    Fruit,
}

/// Animation sets a sprite can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AnimationSet {
    PacmanMoving,
    PacmanStopped,
    GhostNormal,
    GhostFrightened,
    GhostFlashing,
    GhostEyes,
    Fruit,
}

/// A sprite switched palette or animation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteChange {
    pub sprite: SpriteId,
    pub palette: PaletteId,
    pub animation: AnimationSet,
}

/// Where and how a sprite is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub sprite: SpriteId,
    pub position: Vector2,
    pub graphic: GraphicId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScoreReason {
    Pellet,
    PowerPellet,
    Ghost,
    Fruit,
}

/// Points awarded for a single consumption event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDelta {
    pub points: u32,
    pub reason: ScoreReason,
    /// Score after the award.
    pub total: u32,
}

/// Consumer of tile and sprite requests.
pub trait RenderSink {
    fn tile(&mut self, update: TileUpdate);

    fn sprite(&mut self, change: SpriteChange);

    /// The full sprite list for a drawn frame.
    fn frame(&mut self, _sprites: &[SpriteFrame]) {}
}

/// Consumer of score and game state notifications.
pub trait ScoreSink {
    fn score(&mut self, delta: ScoreDelta);

    fn state_changed(&mut self, _from: GameState, _to: GameState) {}
}

/// Records everything sent to it, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    pub tiles: Vec<TileUpdate>,
    pub sprites: Vec<SpriteChange>,
    pub scores: Vec<ScoreDelta>,
    pub states: Vec<(GameState, GameState)>,
    pub frames_drawn: u64,
    pub last_frame: Vec<SpriteFrame>,
}

impl EventLog {
    /// Total points recorded.
    pub fn points(&self) -> u32 {
        self.scores.iter().map(|delta| delta.points).sum()
    }

    /// Empties the recorded events, keeping the frame counter.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.sprites.clear();
        self.scores.clear();
        self.states.clear();
    }
}

impl RenderSink for EventLog {
    fn tile(&mut self, update: TileUpdate) {
        self.tiles.push(update);
    }

    fn sprite(&mut self, change: SpriteChange) {
        self.sprites.push(change);
    }

    fn frame(&mut self, sprites: &[SpriteFrame]) {
        self.frames_drawn += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(sprites);
    }
}

impl ScoreSink for EventLog {
    fn score(&mut self, delta: ScoreDelta) {
        self.scores.push(delta);
    }

    fn state_changed(&mut self, from: GameState, to: GameState) {
        self.states.push((from, to));
    }
}
