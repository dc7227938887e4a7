#![allow(dead_code)]

use std::time::{Duration, Instant};

use glam::IVec2;
use pacman_core::app::{LoopHost, Simulation};
use pacman_core::direction::Direction;
use pacman_core::game::GameState;
use pacman_core::geometry::{self, TilePosition};
use pacman_core::ghost::{Personality, Pursuit};
use pacman_core::input::{InputSnapshot, InputState};
use pacman_core::map::{Maze, MazeBuilder};

/// Builds a maze from rows of characters.
///
/// `#` wall, `.` pellet, `o` power pellet, `T` tunnel, `P` player start, `C`/`A`/`F`/`S` ghost
/// spawns, `+` limited intersection; anything else is open floor. Favorite tiles sit outside
/// the board corners.
pub fn maze_from_rows(rows: &[&str]) -> Maze {
    let height = rows.len() as i32;
    let width = rows.first().map(|row| row.chars().count()).unwrap_or_default() as i32;

    let mut builder = MazeBuilder::new(width as u32, height as u32)
        .favorite_tile(Personality::Chaser, IVec2::new(width - 2, -3))
        .favorite_tile(Personality::Ambusher, IVec2::new(1, -3))
        .favorite_tile(Personality::Fickle, IVec2::new(width - 1, height))
        .favorite_tile(Personality::Stalker, IVec2::new(0, height));

    for (y, row) in rows.iter().enumerate() {
        for (x, character) in row.chars().enumerate() {
            let tile = IVec2::new(x as i32, y as i32);
            builder = match character {
                '#' => builder.wall_tile(tile),
                '.' => builder.pellet(tile),
                'o' => builder.power_pellet(tile),
                'T' => builder.tunnel(tile),
                'P' => builder.player_start(geometry::tile_center(tile)),
                'C' => builder.spawn_tile(Personality::Chaser, tile),
                'A' => builder.spawn_tile(Personality::Ambusher, tile),
                'F' => builder.spawn_tile(Personality::Fickle, tile),
                'S' => builder.spawn_tile(Personality::Stalker, tile),
                '+' => builder.limited_intersection(tile),
                _ => builder,
            };
        }
    }

    builder.build().unwrap()
}

/// A `width` x `height` board with only a border wall.
///
/// Ghosts spawn in a row at (1, 1) to (4, 1) with the Chaser first; the player starts in the
/// bottom-right corner.
pub fn open_maze(width: usize, height: usize) -> Maze {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        '#'
                    } else if y == 1 && x <= 4 {
                        ['C', 'A', 'F', 'S'][x - 1]
                    } else if y == height - 2 && x == width - 2 {
                        'P'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    maze_from_rows(&rows)
}

/// A pursuit aimed at `target_tile`, with the Chaser parked on the origin.
pub fn pursuit(target_tile: TilePosition, target_facing: Direction) -> Pursuit {
    Pursuit {
        target_tile,
        target_facing,
        chaser_tile: IVec2::ZERO,
    }
}

/// A simulation that records what the loop asked of it.
#[derive(Default)]
pub struct RecordingSim {
    pub input: InputState,
    pub state: GameState,
    pub calls: Vec<&'static str>,
    pub updates: Vec<f64>,
    pub fixed_updates: u32,
    pub animation_updates: Vec<f64>,
    pub fixed_animation_updates: u32,
    pub commits: u32,
    pub sprite_updates: u32,
    pub draws: u32,
    pub resets: u32,
    pub dirty: bool,
    pub suppressed: bool,
    pub reset_requested: bool,
}

impl RecordingSim {
    pub fn playing() -> Self {
        Self {
            state: GameState::Playing,
            ..Self::default()
        }
    }
}

impl Simulation for RecordingSim {
    fn refresh_input(&mut self) -> InputSnapshot {
        self.calls.push("input");
        self.input.refresh()
    }

    fn reset(&mut self) {
        self.calls.push("reset");
        self.resets += 1;
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn update(&mut self, dt: f64) {
        self.calls.push("update");
        self.updates.push(dt);
    }

    fn fixed_update(&mut self, _dt: f64) {
        self.calls.push("fixed_update");
        self.fixed_updates += 1;
    }

    fn update_animations(&mut self, dt: f64) {
        self.calls.push("animations");
        self.animation_updates.push(dt);
    }

    fn fixed_update_animations(&mut self, _dt: f64) {
        self.calls.push("fixed_animations");
        self.fixed_animation_updates += 1;
    }

    fn tiles_dirty(&self) -> bool {
        self.dirty
    }

    fn commit_tiles(&mut self) {
        self.calls.push("commit");
        self.commits += 1;
        self.dirty = false;
    }

    fn sprites_suppressed(&self) -> bool {
        self.suppressed
    }

    fn update_sprites(&mut self, _dt: f64) {
        self.calls.push("sprites");
        self.sprite_updates += 1;
    }

    fn draw(&mut self) {
        self.calls.push("draw");
        self.draws += 1;
    }

    fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}

/// A host with a manual clock that only advances while idling.
pub struct ManualHost {
    pub base: Instant,
    pub offset: Duration,
    pub polls_left: u32,
    pub idles: Vec<Duration>,
}

impl ManualHost {
    pub fn new(polls: u32) -> Self {
        Self {
            base: Instant::now(),
            offset: Duration::ZERO,
            polls_left: polls,
            idles: Vec::new(),
        }
    }
}

impl LoopHost<RecordingSim> for ManualHost {
    fn poll_events(&mut self, _sim: &mut RecordingSim) -> bool {
        if self.polls_left == 0 {
            return false;
        }
        self.polls_left -= 1;
        true
    }

    fn now(&mut self) -> Instant {
        self.base + self.offset
    }

    fn idle(&mut self, remaining: Duration) {
        self.offset += remaining;
        self.idles.push(remaining);
    }
}
