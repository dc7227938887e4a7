//! This module contains all the constants used in the simulation.

use glam::{IVec2, UVec2};

/// Default number of simulation steps per second.
pub const TARGET_FPS: f64 = 60.0;

/// Largest elapsed time (in seconds) fed into the fixed-step accumulator in one tick.
pub const MAX_ELAPSED: f64 = 0.1;

/// The size of each tile, in pixels.
pub const TILE_SIZE: f64 = 8.0;
/// The size of the game board, in tiles.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);

/// Movement speed at 100%, in pixels per second.
pub const BASE_SPEED: f64 = 75.757_576_25;

/// How long a ghost stays frightened after a power pellet.
pub const FRIGHTENED_DURATION: f64 = 8.0;

/// Remaining frightened time (seconds) at which a flash fires, in descending order.
pub const FLASH_THRESHOLDS: [f64; 8] = [2.0, 1.75, 1.5, 1.25, 1.0, 0.75, 0.5, 0.25];

/// Ghost speed multipliers, indexed by level band (`0`, `1..=3`, `4..`).
pub mod speed {
    pub const FRIGHTENED: [f64; 3] = [0.50, 0.55, 0.60];
    pub const WARPING: [f64; 3] = [0.40, 0.45, 0.50];
    pub const NORMAL: [f64; 3] = [0.75, 0.85, 0.95];
    /// Eyes travel home at a fixed rate regardless of level.
    pub const RESPAWNING: f64 = 1.5;
    /// Added to the Chaser's normal multiplier per Cruise Elroy level.
    pub const CRUISE_ELROY_BONUS: f64 = 0.05;
    pub const PACMAN: [f64; 3] = [0.80, 0.90, 1.00];

    /// Index into the per-band tables for `level_number`.
    pub const fn band(level_number: u32) -> usize {
        match level_number {
            0 => 0,
            1..=3 => 1,
            _ => 2,
        }
    }
}

/// Scatter/chase phase lengths in seconds, alternating and starting with scatter.
/// The phase after the last entry lasts forever (chase).
pub mod schedule {
    pub const LEVEL_0: [f64; 7] = [7.0, 20.0, 7.0, 20.0, 5.0, 20.0, 5.0];
    pub const LEVEL_1_TO_3: [f64; 7] = [7.0, 20.0, 7.0, 20.0, 5.0, 1033.0, 1.0 / 60.0];
    pub const LEVEL_4_PLUS: [f64; 7] = [5.0, 20.0, 5.0, 20.0, 5.0, 1037.0, 1.0 / 60.0];
}

/// Points awarded for each consumable.
pub mod score {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    /// Base value for the first ghost captured per power pellet; doubles per capture.
    pub const GHOST: u32 = 200;
    /// Fruit value by level, the last entry repeats.
    pub const FRUIT: [u32; 13] = [100, 300, 500, 500, 700, 700, 1000, 1000, 2000, 2000, 3000, 3000, 5000];
}

/// Pellets eaten after which a fruit appears.
pub const FRUIT_TRIGGERS: [u32; 2] = [70, 170];
/// How long a fruit stays on the board.
pub const FRUIT_DURATION: f64 = 9.5;
/// Where the fruit appears, in tiles.
pub const FRUIT_TILE: IVec2 = IVec2::new(13, 17);

/// Seconds without a pellet being eaten before the next ghost is forced out of the house.
pub const HOUSE_IDLE_LIMIT: [f64; 2] = [4.0, 3.0];

/// How long the intermission between levels lasts.
pub const INTERMISSION_DURATION: f64 = 2.0;

/// Power pellets toggle visibility at this interval.
pub const POWER_PELLET_BLINK_INTERVAL: f64 = 0.2;

pub const STARTING_LIVES: u8 = 3;

/// Pellets remaining at which the Chaser enters each Cruise Elroy level.
pub const CRUISE_ELROY_PELLETS: [usize; 2] = [20, 10];

/// The raw layout of the game board, as a 2D array of characters.
///
/// `#` wall, `=` ghost house door, `.` pellet, `o` power pellet, `T` tunnel, `X` player start.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "T     .   #      #   .     T",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......X .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Ghost spawn tiles on [`RAW_BOARD`], in personality order (Chaser, Ambusher, Fickle, Stalker).
pub const GHOST_SPAWN_TILES: [IVec2; 4] = [
    IVec2::new(13, 11),
    IVec2::new(13, 14),
    IVec2::new(11, 14),
    IVec2::new(15, 14),
];

/// Scatter targets on [`RAW_BOARD`], in personality order. These sit outside the board on purpose.
pub const GHOST_FAVORITE_TILES: [IVec2; 4] = [
    IVec2::new(25, -3),
    IVec2::new(2, -3),
    IVec2::new(27, 31),
    IVec2::new(0, 31),
];

/// Tiles on [`RAW_BOARD`] where ghosts may not turn upward.
pub const LIMITED_INTERSECTIONS: [IVec2; 4] = [
    IVec2::new(12, 11),
    IVec2::new(15, 11),
    IVec2::new(12, 23),
    IVec2::new(15, 23),
];
