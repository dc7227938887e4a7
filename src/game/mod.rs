//! The concrete Pac-Man scene driven by the game loop.
//!
//! [`Game`] owns the maze, the entities, the background tiles and the round pacing, and reports
//! everything observable through its [`EventLog`] outbox: tile updates, sprite changes, drawn
//! frames, score deltas and state changes. Hosts drain the outbox after each tick.

pub mod events;
pub mod round;
pub mod state;
pub mod tiles;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::animation::{AnimatedSprite, Blinking, GraphicId};
use crate::app::Simulation;
use crate::constants::{
    score, CRUISE_ELROY_PELLETS, FRUIT_DURATION, FRUIT_TILE, FRUIT_TRIGGERS, INTERMISSION_DURATION,
    POWER_PELLET_BLINK_INTERVAL, RAW_BOARD, STARTING_LIVES,
};
use crate::direction::Direction;
use crate::entity::pacman::Pacman;
use crate::error::GameResult;
use crate::geometry;
use crate::ghost::{Ghost, GhostEvent, GhostMode, Personality, Pursuit};
use crate::input::{InputSnapshot, InputState, Keys};
use crate::map::{Maze, PelletKind};

pub use events::{
    AnimationSet, EventLog, PaletteId, RenderSink, ScoreDelta, ScoreReason, ScoreSink, SpriteChange, SpriteFrame, SpriteId,
    TileUpdate,
};
pub use round::{HouseRelease, ScatterChaseSchedule};
pub use state::{GameState, ResetKind};
pub use tiles::{graphic, palette, Tile, TileGrid};

const PACMAN_FRAMES: [GraphicId; 3] = [0x2C, 0x2D, 0x2E];
const PACMAN_FRAME_DURATION: f64 = 0.08;
const GHOST_FRAMES: [GraphicId; 2] = [0x20, 0x21];
const GHOST_FRAME_DURATION: f64 = 0.125;
const FRUIT_GRAPHIC: GraphicId = 0x30;

/// The palette and animation set a sprite is currently shown with.
type Look = (PaletteId, AnimationSet);

pub struct Game {
    maze: Maze,
    pacman: Pacman,
    ghosts: [Ghost; 4],
    tiles: TileGrid,
    input: InputState,
    snapshot: InputSnapshot,
    schedule: ScatterChaseSchedule,
    release: HouseRelease,
    state: GameState,
    score: u32,
    lives: u8,
    level: u32,
    /// Seconds left in the current cutscene.
    cutscene_remaining: f64,
    /// Ghosts captured since the last power pellet.
    capture_chain: u32,
    pellets_eaten: u32,
    fruits_spawned: usize,
    fruit_remaining: Option<f64>,
    power_blink: Blinking,
    pacman_sprite: AnimatedSprite,
    ghost_sprites: [AnimatedSprite; 4],
    ghost_looks: [Look; 4],
    /// Flash phase per ghost while frightened blue.
    ghost_flash: [bool; 4],
    pacman_look: Look,
    pending_reset: Option<ResetKind>,
    outbox: EventLog,
}

impl Game {
    /// A game on the built-in board, waiting in the menu.
    pub fn new() -> GameResult<Self> {
        Self::with_maze(Maze::from_layout(&RAW_BOARD)?)
    }

    pub fn with_maze(maze: Maze) -> GameResult<Self> {
        let level = 0;
        let pacman = Pacman::new(maze.player_start(), level);
        let ghosts = Personality::ALL.map(|personality| Ghost::new(personality, &maze, level));
        let ghost_sprites = [
            AnimatedSprite::new(GHOST_FRAMES.to_vec(), GHOST_FRAME_DURATION)?,
            AnimatedSprite::new(GHOST_FRAMES.to_vec(), GHOST_FRAME_DURATION)?,
            AnimatedSprite::new(GHOST_FRAMES.to_vec(), GHOST_FRAME_DURATION)?,
            AnimatedSprite::new(GHOST_FRAMES.to_vec(), GHOST_FRAME_DURATION)?,
        ];

        let mut game = Self {
            tiles: TileGrid::from_maze(&maze),
            pacman,
            ghosts,
            maze,
            input: InputState::default(),
            snapshot: InputSnapshot::default(),
            schedule: ScatterChaseSchedule::new(level),
            release: HouseRelease::new(level),
            state: GameState::Menu,
            score: 0,
            lives: STARTING_LIVES,
            level,
            cutscene_remaining: 0.0,
            capture_chain: 0,
            pellets_eaten: 0,
            fruits_spawned: 0,
            fruit_remaining: None,
            power_blink: Blinking::new(POWER_PELLET_BLINK_INTERVAL),
            pacman_sprite: AnimatedSprite::new(PACMAN_FRAMES.to_vec(), PACMAN_FRAME_DURATION)?,
            ghost_sprites,
            ghost_looks: [(0, AnimationSet::GhostNormal); 4],
            ghost_flash: [false; 4],
            pacman_look: (palette::PACMAN, AnimationSet::PacmanMoving),
            pending_reset: None,
            outbox: EventLog::default(),
        };
        game.place_entities();
        game.refresh_looks(true);
        info!(pellets = game.maze.pellets_remaining(), "Game created");
        Ok(game)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    pub fn pacman_mut(&mut self) -> &mut Pacman {
        &mut self.pacman
    }

    pub fn ghost(&self, personality: Personality) -> &Ghost {
        &self.ghosts[personality.index()]
    }

    pub fn ghost_mut(&mut self, personality: Personality) -> &mut Ghost {
        &mut self.ghosts[personality.index()]
    }

    pub fn ghosts(&self) -> &[Ghost; 4] {
        &self.ghosts
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn schedule(&self) -> &ScatterChaseSchedule {
        &self.schedule
    }

    pub fn release(&self) -> &HouseRelease {
        &self.release
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fruit_active(&self) -> bool {
        self.fruit_remaining.is_some()
    }

    pub fn outbox(&self) -> &EventLog {
        &self.outbox
    }

    /// Takes everything recorded since the last drain.
    pub fn drain_outbox(&mut self) -> EventLog {
        let frames_drawn = self.outbox.frames_drawn;
        let drained = std::mem::take(&mut self.outbox);
        self.outbox.frames_drawn = frames_drawn;
        drained
    }

    fn set_state(&mut self, state: GameState) {
        if self.state == state {
            return;
        }
        info!(from = %self.state, to = %state, "Game state changed");
        self.outbox.state_changed(self.state, state);
        self.state = state;
    }

    fn award(&mut self, points: u32, reason: ScoreReason) {
        self.score += points;
        self.outbox.score(ScoreDelta {
            points,
            reason,
            total: self.score,
        });
    }

    /// Puts Pac-Man and the ghosts on their starting spots; ghosts in the house wait there.
    fn place_entities(&mut self) {
        self.pacman.level_number = self.level;
        self.pacman.reset(self.maze.player_start());
        for ghost in self.ghosts.iter_mut() {
            ghost.reset(&self.maze, self.level);
            ghost.should_scatter = self.schedule.should_scatter();
            ghost.object.prevent_movement = self.release.is_in_house(ghost.personality);
        }
        self.ghost_flash = [false; 4];
        self.capture_chain = 0;
    }

    fn apply_reset(&mut self, kind: ResetKind) {
        info!(?kind, level = self.level, lives = self.lives, "Resetting");
        match kind {
            ResetKind::Life => {
                self.release.life_lost();
                self.schedule = ScatterChaseSchedule::new(self.level);
            }
            ResetKind::Restart => {
                self.schedule = ScatterChaseSchedule::new(self.level);
                self.release = HouseRelease::new(self.level);
            }
            ResetKind::Level => {
                self.maze.restore_pellets();
                self.tiles.load_maze(&self.maze);
                self.schedule = ScatterChaseSchedule::new(self.level);
                self.release = HouseRelease::new(self.level);
                self.pellets_eaten = 0;
                self.fruits_spawned = 0;
            }
            ResetKind::NewGame => {
                self.score = 0;
                self.lives = STARTING_LIVES;
                self.level = 0;
                self.maze.restore_pellets();
                self.tiles.load_maze(&self.maze);
                self.schedule = ScatterChaseSchedule::new(self.level);
                self.release = HouseRelease::new(self.level);
                self.pellets_eaten = 0;
                self.fruits_spawned = 0;
            }
        }
        self.fruit_remaining = None;
        self.power_blink.reset();
        self.show_power_pellets(true);
        self.place_entities();
        self.refresh_looks(false);
        self.set_state(GameState::Playing);
    }

    fn show_power_pellets(&mut self, visible: bool) {
        let graphic = if visible { graphic::POWER_PELLET } else { graphic::EMPTY };
        let tiles: SmallVec<[_; 8]> = self
            .maze
            .pellets()
            .filter(|&(_, kind)| kind == PelletKind::PowerPellet)
            .map(|(tile, _)| tile)
            .collect();
        for tile in tiles {
            self.tiles.set(tile.y as u32, tile.x as u32, Tile::new(graphic, palette::PELLET));
        }
    }

    fn ghost_look(&self, index: usize) -> Look {
        let ghost = &self.ghosts[index];
        let state = ghost.mode_state();
        match ghost.mode() {
            GhostMode::Respawning => (palette::EYES, AnimationSet::GhostEyes),
            GhostMode::Frightened if state.turn_blue && self.ghost_flash[index] => (palette::FLASHING, AnimationSet::GhostFlashing),
            GhostMode::Frightened if state.turn_blue => (palette::FRIGHTENED, AnimationSet::GhostFrightened),
            _ => (palette::GHOSTS[index], AnimationSet::GhostNormal),
        }
    }

    /// Emits sprite changes for every sprite whose look differs from the last one sent.
    fn refresh_looks(&mut self, force: bool) {
        for index in 0..self.ghosts.len() {
            let look = self.ghost_look(index);
            if force || look != self.ghost_looks[index] {
                self.ghost_looks[index] = look;
                self.outbox.sprite(SpriteChange {
                    sprite: SpriteId::Ghost(self.ghosts[index].personality),
                    palette: look.0,
                    animation: look.1,
                });
            }
        }

        let animation = if self.pacman.is_moving() {
            AnimationSet::PacmanMoving
        } else {
            AnimationSet::PacmanStopped
        };
        let look = (palette::PACMAN, animation);
        if force || look != self.pacman_look {
            self.pacman_look = look;
            self.outbox.sprite(SpriteChange {
                sprite: SpriteId::Pacman,
                palette: look.0,
                animation: look.1,
            });
        }
    }

    /// One fixed gameplay step while playing.
    fn play_step(&mut self, dt: f64) {
        let frozen = self.ghosts.iter().any(Ghost::is_frightened);
        if let Some(should_scatter) = self.schedule.update(dt, frozen) {
            for ghost in self.ghosts.iter_mut() {
                ghost.set_should_scatter(should_scatter, &self.maze);
            }
        }

        if let Some(personality) = self.release.update(dt) {
            let entrance = self.maze.ghost_house_entrance();
            let ghost = &mut self.ghosts[personality.index()];
            ghost.place(entrance, Direction::Left);
            ghost.object.prevent_movement = false;
        }

        self.pacman.update(dt, &self.maze);
        self.eat();

        let pursuit = Pursuit {
            target_tile: self.pacman.tile(),
            target_facing: self.pacman.orientation,
            chaser_tile: self.ghosts[Personality::Chaser.index()].tile(),
        };
        let mut ghost_events: SmallVec<[(usize, GhostEvent); 8]> = SmallVec::new();
        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            for event in ghost.update(dt, &self.maze, &pursuit) {
                ghost_events.push((index, event));
            }
        }
        for (index, event) in ghost_events {
            match event {
                GhostEvent::Flash { .. } => self.ghost_flash[index] = !self.ghost_flash[index],
                GhostEvent::FrightenedEnded => self.ghost_flash[index] = false,
                GhostEvent::ModeChanged { .. } | GhostEvent::ReachedHouse => {}
            }
        }

        self.tick_fruit(dt);
        if self.resolve_collisions() {
            return;
        }
        self.refresh_looks(false);

        if self.maze.pellets_remaining() == 0 {
            self.level += 1;
            info!(level = self.level, score = self.score, "Level cleared");
            self.cutscene_remaining = INTERMISSION_DURATION;
            self.set_state(GameState::Cutscene);
        }
    }

    /// Consumes whatever lies on Pac-Man's tile.
    fn eat(&mut self) {
        let tile = self.pacman.tile();
        if let Some(kind) = self.maze.remove_pellet(tile) {
            self.tiles.set(tile.y as u32, tile.x as u32, Tile::EMPTY);
            self.release.pellet_eaten();
            self.pellets_eaten += 1;

            match kind {
                PelletKind::Pellet => self.award(score::PELLET, ScoreReason::Pellet),
                PelletKind::PowerPellet => {
                    self.award(score::POWER_PELLET, ScoreReason::PowerPellet);
                    self.frighten_ghosts();
                }
            }

            if FRUIT_TRIGGERS.get(self.fruits_spawned) == Some(&self.pellets_eaten) {
                self.fruits_spawned += 1;
                self.fruit_remaining = Some(FRUIT_DURATION);
                self.outbox.sprite(SpriteChange {
                    sprite: SpriteId::Fruit,
                    palette: palette::FRUIT,
                    animation: AnimationSet::Fruit,
                });
                debug!(level = self.level, "Fruit spawned");
            }

            let remaining = self.maze.pellets_remaining();
            let elroy = CRUISE_ELROY_PELLETS.iter().filter(|&&limit| remaining <= limit).count() as u8;
            let chaser = &mut self.ghosts[Personality::Chaser.index()];
            chaser.cruise_elroy_level = chaser.cruise_elroy_level.max(elroy);
        }

        if self.fruit_remaining.is_some() && tile == FRUIT_TILE {
            self.fruit_remaining = None;
            let points = score::FRUIT[(self.level as usize).min(score::FRUIT.len() - 1)];
            self.award(points, ScoreReason::Fruit);
        }
    }

    fn frighten_ghosts(&mut self) {
        self.capture_chain = 0;
        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            if ghost.is_respawning() || ghost.is_frightened() {
                continue;
            }
            ghost.become_frightened(true, &self.maze);
            self.ghost_flash[index] = false;
        }
    }

    fn tick_fruit(&mut self, dt: f64) {
        if let Some(remaining) = self.fruit_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.fruit_remaining = None;
                debug!("Fruit expired");
            }
        }
    }

    /// Resolves Pac-Man meeting ghosts. Returns true if Pac-Man died.
    fn resolve_collisions(&mut self) -> bool {
        let tile = self.pacman.tile();
        for index in 0..self.ghosts.len() {
            let ghost = &self.ghosts[index];
            if ghost.object.prevent_movement || ghost.tile() != tile || ghost.is_respawning() {
                continue;
            }

            if ghost.is_frightened() {
                let points = score::GHOST << self.capture_chain.min(3);
                self.capture_chain += 1;
                debug!(ghost = ?ghost.personality, points, "Ghost captured");
                self.ghosts[index].begin_respawning(&self.maze);
                self.ghost_flash[index] = false;
                self.award(points, ScoreReason::Ghost);
                continue;
            }

            info!(ghost = ?ghost.personality, ?tile, lives = self.lives, "Pac-Man caught");
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.set_state(GameState::Highscores);
            } else {
                self.pending_reset = Some(ResetKind::Life);
            }
            return true;
        }
        false
    }

    fn sprite_frames(&self) -> SmallVec<[SpriteFrame; 6]> {
        let mut frames = SmallVec::new();
        frames.push(SpriteFrame {
            sprite: SpriteId::Pacman,
            position: self.pacman.object.position,
            graphic: self.pacman_sprite.current_graphic(),
        });
        for (ghost, sprite) in self.ghosts.iter().zip(self.ghost_sprites.iter()) {
            frames.push(SpriteFrame {
                sprite: SpriteId::Ghost(ghost.personality),
                position: ghost.object.position,
                graphic: sprite.current_graphic(),
            });
        }
        if self.fruit_remaining.is_some() {
            frames.push(SpriteFrame {
                sprite: SpriteId::Fruit,
                position: geometry::tile_center(FRUIT_TILE),
                graphic: FRUIT_GRAPHIC,
            });
        }
        frames
    }
}

impl Simulation for Game {
    fn refresh_input(&mut self) -> InputSnapshot {
        self.snapshot = self.input.refresh();
        match self.state {
            GameState::Menu if self.snapshot.pressed.contains(Keys::START) => self.set_state(GameState::Playing),
            GameState::Highscores if self.snapshot.pressed.contains(Keys::START) => {
                self.pending_reset = Some(ResetKind::NewGame);
            }
            GameState::Playing => self.pacman.steer(&self.snapshot),
            _ => {}
        }
        self.snapshot
    }

    fn reset(&mut self) {
        let kind = self.pending_reset.take().unwrap_or(ResetKind::Restart);
        self.apply_reset(kind);
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn fixed_update(&mut self, dt: f64) {
        match self.state {
            GameState::Playing if self.pending_reset.is_none() => self.play_step(dt),
            GameState::Cutscene => {
                self.cutscene_remaining -= dt;
                if self.cutscene_remaining <= 0.0 && self.pending_reset.is_none() {
                    self.pending_reset = Some(ResetKind::Level);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f64) {
        // Variable-step hosts feed the same step logic with the raw delta.
        self.fixed_update(dt);
    }

    fn fixed_update_animations(&mut self, dt: f64) {
        if self.state == GameState::Playing && self.power_blink.tick(dt) {
            let visible = self.power_blink.is_visible();
            self.show_power_pellets(visible);
        }
    }

    fn update_animations(&mut self, dt: f64) {
        self.fixed_update_animations(dt);
    }

    fn tiles_dirty(&self) -> bool {
        self.tiles.any_dirty()
    }

    fn commit_tiles(&mut self) {
        self.tiles.commit(&mut self.outbox);
    }

    fn sprites_suppressed(&self) -> bool {
        self.state == GameState::Cutscene
    }

    fn update_sprites(&mut self, dt: f64) {
        if self.pacman.is_moving() {
            self.pacman_sprite.tick(dt);
        }
        for sprite in self.ghost_sprites.iter_mut() {
            sprite.tick(dt);
        }
    }

    fn draw(&mut self) {
        let frames = self.sprite_frames();
        self.outbox.frame(&frames);
    }

    fn take_reset_request(&mut self) -> bool {
        self.pending_reset.is_some()
    }
}
