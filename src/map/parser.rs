//! Converts an ASCII board layout into a validated [`Maze`].
//!
//! This is the built-in level source; ghost spawns, favorite tiles and limited
//! intersections come from the standard tables in [`crate::constants`].

use glam::IVec2;

use crate::constants::{GHOST_FAVORITE_TILES, GHOST_SPAWN_TILES, LIMITED_INTERSECTIONS};
use crate::error::{GameResult, ParseError};
use crate::geometry::{self, Rect};
use crate::ghost::Personality;
use crate::map::{Maze, MazeBuilder};

/// A single character of the board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTile {
    Empty,
    Wall,
    /// Ghost house door; solid for movement.
    Door,
    Pellet,
    PowerPellet,
    Tunnel,
    PlayerStart,
}

impl LayoutTile {
    pub fn is_solid(self) -> bool {
        matches!(self, LayoutTile::Wall | LayoutTile::Door)
    }
}

/// Parses a single character into a layout tile.
pub fn parse_character(c: char) -> Option<LayoutTile> {
    match c {
        '#' => Some(LayoutTile::Wall),
        '=' => Some(LayoutTile::Door),
        '.' => Some(LayoutTile::Pellet),
        'o' => Some(LayoutTile::PowerPellet),
        ' ' => Some(LayoutTile::Empty),
        'T' => Some(LayoutTile::Tunnel),
        'X' => Some(LayoutTile::PlayerStart),
        _ => None,
    }
}

/// Parses `rows` into a grid of layout tiles, indexed `[y][x]`.
///
/// # Errors
///
/// Fails on an empty board, rows of differing width, or unknown characters.
pub fn parse_tiles(rows: &[&str]) -> Result<Vec<Vec<LayoutTile>>, ParseError> {
    let expected = rows.first().map(|row| row.chars().count()).ok_or(ParseError::Empty)?;
    if expected == 0 {
        return Err(ParseError::Empty);
    }

    rows.iter()
        .enumerate()
        .map(|(y, row)| -> Result<Vec<LayoutTile>, ParseError> {
            let found = row.chars().count();
            if found != expected {
                return Err(ParseError::RaggedRow { row: y, found, expected });
            }
            row.chars()
                .enumerate()
                .map(|(x, character)| parse_character(character).ok_or(ParseError::UnknownCharacter { character, x, y }))
                .collect()
        })
        .collect()
}

/// Builds a maze from an ASCII layout.
///
/// Consecutive solid tiles on a row are merged into a single wall rectangle.
pub fn parse_layout(rows: &[&str]) -> GameResult<Maze> {
    let tiles = parse_tiles(rows)?;
    let height = tiles.len() as u32;
    let width = tiles.first().map(|row| row.len()).unwrap_or_default() as u32;

    let mut builder = MazeBuilder::new(width, height);

    for (y, row) in tiles.iter().enumerate() {
        let mut run_start: Option<usize> = None;
        for x in 0..=row.len() {
            let solid = row.get(x).is_some_and(|tile| tile.is_solid());
            match (solid, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(start)) => {
                    let origin = IVec2::new(start as i32, y as i32);
                    builder = builder.wall(Rect::from_tile_run(origin, (x - start) as u32));
                    run_start = None;
                }
                _ => {}
            }

            let tile = IVec2::new(x as i32, y as i32);
            builder = match row.get(x) {
                Some(LayoutTile::Pellet) => builder.pellet(tile),
                Some(LayoutTile::PowerPellet) => builder.power_pellet(tile),
                Some(LayoutTile::Tunnel) => builder.tunnel(tile),
                Some(LayoutTile::PlayerStart) => builder.player_start(geometry::tile_center(tile)),
                _ => builder,
            };
        }
    }

    for personality in Personality::ALL {
        builder = builder
            .spawn_tile(personality, GHOST_SPAWN_TILES[personality.index()])
            .favorite_tile(personality, GHOST_FAVORITE_TILES[personality.index()]);
    }
    for tile in LIMITED_INTERSECTIONS {
        builder = builder.limited_intersection(tile);
    }

    Ok(builder.build()?)
}
