use glam::{DVec2, IVec2};
use pacman_core::constants::{speed, BASE_SPEED};
use pacman_core::direction::Direction;
use pacman_core::entity::pacman::Pacman;
use pacman_core::entity::{GameObject, Waypoint};
use pacman_core::geometry;
use pacman_core::input::{InputSnapshot, Keys};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const DT: f64 = 1.0 / 60.0;

/// A loop around a central block; Pac-Man starts in the middle of the west-east corridor.
const LOOP: [&str; 7] = [
    "#########", //
    "#CAFS   #", //
    "# ##### #", //
    "#   P   #", //
    "# ##### #", //
    "#       #", //
    "#########", //
];

const TUNNEL: [&str; 3] = [
    "##########", //
    "TCAFS   PT", //
    "##########", //
];

fn run(pacman: &mut Pacman, maze: &pacman_core::map::Maze, seconds: f64) {
    let steps = (seconds / DT).round() as usize;
    for _ in 0..steps {
        pacman.update(DT, maze);
    }
}

#[test]
fn test_step_stops_on_half_tile_marks() {
    let mut object = GameObject::on_tile(IVec2::new(2, 2));
    assert_eq!(object.position, DVec2::new(20.0, 20.0));

    assert_eq!(object.step_towards_waypoint(Direction::Right, 100.0), (4.0, Waypoint::TileEdge));
    assert_eq!(object.position.x, 24.0);
    assert_eq!(object.step_towards_waypoint(Direction::Right, 100.0), (4.0, Waypoint::TileCenter));
    assert_eq!(object.position.x, 28.0);

    assert_eq!(object.step_towards_waypoint(Direction::Up, 100.0), (4.0, Waypoint::TileEdge));
    assert_eq!(object.position.y, 16.0);
}

#[test]
fn test_step_with_short_budget() {
    let mut object = GameObject::on_tile(IVec2::new(2, 2));

    assert_eq!(object.step_towards_waypoint(Direction::Left, 1.0), (1.0, Waypoint::None));
    assert_eq!(object.position.x, 19.0);
    assert_eq!(object.step_towards_waypoint(Direction::Left, 10.0), (3.0, Waypoint::TileEdge));
    assert_eq!(object.position.x, 16.0);
}

#[test]
fn test_step_past_the_left_edge() {
    let mut object = GameObject::new(DVec2::new(-4.0, 12.0), DVec2::splat(8.0));

    assert_eq!(object.step_towards_waypoint(Direction::Left, 100.0), (4.0, Waypoint::TileEdge));
    assert_eq!(object.step_towards_waypoint(Direction::Left, 100.0), (4.0, Waypoint::TileCenter));
    assert_eq!(object.position.x, -12.0);
    assert_eq!(object.tile(), IVec2::new(-2, 1));
}

#[test]
fn test_wrap_horizontally() {
    let mut object = GameObject::new(DVec2::new(-1.0, 4.0), DVec2::splat(8.0));
    assert_that(&object.wrap_horizontally(80.0)).is_true();
    assert_eq!(object.position.x, 79.0);

    object.position.x = 80.0;
    assert_that(&object.wrap_horizontally(80.0)).is_true();
    assert_eq!(object.position.x, 0.0);

    assert_that(&object.wrap_horizontally(80.0)).is_false();
}

#[test]
fn test_object_queries() {
    let maze = common::open_maze(10, 10);
    let mut object = GameObject::on_tile(IVec2::new(3, 3));

    assert_that(&object.is_centered_on_tile(1e-6)).is_true();
    assert_that(&object.collides_with_wall(&maze)).is_false();
    assert_that(&object.overlaps(&GameObject::on_tile(IVec2::new(4, 3)))).is_false();

    object.position += DVec2::new(2.5, -1.0);
    assert_that(&object.is_centered_on_tile(1e-6)).is_false();
    assert_that(&object.overlaps(&GameObject::on_tile(IVec2::new(4, 3)))).is_true();
    object.snap_to_tile_center();
    assert_eq!(object.position, geometry::tile_center(IVec2::new(3, 3)));

    object.position = geometry::tile_center(IVec2::new(1, 1)) - DVec2::new(2.0, 0.0);
    assert_that(&object.collides_with_wall(&maze)).is_true();
}

#[test]
fn test_integrate_respects_prevent_movement() {
    let mut object = GameObject::on_tile(IVec2::new(3, 3));
    object.velocity = DVec2::new(10.0, 0.0);

    object.integrate(0.5);
    assert_eq!(object.position.x, 33.0);

    object.prevent_movement = true;
    object.integrate(0.5);
    assert_eq!(object.position.x, 33.0);
}

#[test]
fn test_pacman_speed_by_level() {
    let start = geometry::tile_center(IVec2::new(4, 3));
    assert_eq!(Pacman::new(start, 0).speed(), BASE_SPEED * speed::PACMAN[0]);
    assert_eq!(Pacman::new(start, 2).speed(), BASE_SPEED * speed::PACMAN[1]);
    assert_eq!(Pacman::new(start, 9).speed(), BASE_SPEED * speed::PACMAN[2]);
}

#[test]
fn test_pacman_stops_against_wall() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);

    pacman.update(DT, &maze);
    assert_that(&pacman.is_moving()).is_true();
    assert_eq!(pacman.object.velocity, DVec2::new(-pacman.speed(), 0.0));

    run(&mut pacman, &maze, 2.0);
    assert_that(&pacman.is_moving()).is_false();
    assert_eq!(pacman.object.position, geometry::tile_center(IVec2::new(1, 3)));
    assert_eq!(pacman.object.velocity, DVec2::ZERO);
}

#[test]
fn test_pacman_reverses_immediately() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);
    pacman.update(DT, &maze);

    pacman.request(Direction::Right);
    assert_eq!(pacman.orientation, Direction::Right);
    assert_eq!(pacman.queued, None);
}

#[test]
fn test_pacman_buffers_turn_until_open() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);

    pacman.request(Direction::Up);
    assert_eq!(pacman.queued, Some(Direction::Up));

    run(&mut pacman, &maze, 2.0);
    assert_eq!(pacman.orientation, Direction::Up);
    assert_eq!(pacman.queued, None);
    assert_eq!(pacman.object.position, geometry::tile_center(IVec2::new(1, 1)));
}

#[test]
fn test_pacman_restarts_from_standstill() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);
    run(&mut pacman, &maze, 2.0);
    assert_that(&pacman.is_moving()).is_false();

    pacman.request(Direction::Up);
    pacman.update(DT, &maze);
    assert_that(&pacman.is_moving()).is_true();
    assert_eq!(pacman.orientation, Direction::Up);
    assert_that(&pacman.object.position.y).is_less_than(geometry::tile_center(IVec2::new(1, 3)).y);
}

#[test]
fn test_pacman_steers_from_snapshot() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);

    pacman.steer(&InputSnapshot {
        pressed: Keys::RIGHT,
        held: Keys::RIGHT | Keys::DOWN,
        released: Keys::empty(),
    });
    assert_eq!(pacman.orientation, Direction::Right);

    pacman.steer(&InputSnapshot {
        pressed: Keys::empty(),
        held: Keys::DOWN,
        released: Keys::empty(),
    });
    assert_eq!(pacman.queued, Some(Direction::Down));
}

#[test]
fn test_pacman_wraps_through_tunnel() {
    let maze = common::maze_from_rows(&TUNNEL);
    let mut pacman = Pacman::new(maze.player_start(), 0);
    pacman.request(Direction::Right);

    run(&mut pacman, &maze, 0.5);

    assert_that(&pacman.is_moving()).is_true();
    assert_that(&pacman.tile().x).is_less_than(5);
    assert_eq!(pacman.tile().y, 1);
}

#[test]
fn test_pacman_reset() {
    let maze = common::maze_from_rows(&LOOP);
    let mut pacman = Pacman::new(maze.player_start(), 0);
    pacman.request(Direction::Right);
    pacman.request(Direction::Up);
    run(&mut pacman, &maze, 0.25);

    pacman.reset(maze.player_start());

    assert_eq!(pacman.object.position, maze.player_start());
    assert_eq!(pacman.orientation, Direction::Left);
    assert_eq!(pacman.queued, None);
    assert_that(&pacman.is_moving()).is_true();
}
