use glam::IVec2;
use pacman_core::app::{GameLoop, LoopConfig, Simulation};
use pacman_core::constants::STARTING_LIVES;
use pacman_core::game::{graphic, palette, AnimationSet, Game, GameState, ScoreDelta, ScoreReason, SpriteChange, SpriteId, TileUpdate};
use pacman_core::ghost::Personality;
use pacman_core::input::Keys;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

const DT: f64 = 1.0 / 60.0;

/// Pac-Man starts right of a pellet; a second pellet keeps the level going.
const PELLETS: [&str; 5] = [
    "##########", //
    "#.      C#", //
    "#   .P   #", //
    "#AFS     #", //
    "##########", //
];

const LAST_PELLET: [&str; 5] = [
    "##########", //
    "#       C#", //
    "#   .P   #", //
    "#AFS     #", //
    "##########", //
];

const POWER: [&str; 5] = [
    "##########", //
    "#.      C#", //
    "#   oP   #", //
    "#AFS     #", //
    "##########", //
];

fn game(rows: &[&str]) -> Game {
    Game::with_maze(common::maze_from_rows(rows)).unwrap()
}

fn press_start(game: &mut Game) {
    game.input_mut().key_down(Keys::START);
    game.refresh_input();
    game.input_mut().key_up(Keys::START);
    game.refresh_input();
}

/// Steps until `done` holds, for at most a second.
fn step_until(game: &mut Game, done: impl Fn(&Game) -> bool) {
    for _ in 0..60 {
        if done(game) {
            return;
        }
        game.fixed_update(DT);
    }
}

/// Puts `personality` on top of Pac-Man, free to move.
fn put_ghost_on_pacman(game: &mut Game, personality: Personality) {
    let position = game.pacman().object.position;
    let ghost = game.ghost_mut(personality);
    ghost.object.prevent_movement = false;
    ghost.place(position, pacman_core::direction::Direction::Left);
}

#[test]
fn test_starts_in_menu() {
    let mut game = game(&PELLETS);
    assert_eq!(game.state(), GameState::Menu);
    assert_eq!(game.lives(), STARTING_LIVES);

    let start = game.pacman().object.position;
    game.fixed_update(DT);
    assert_eq!(game.pacman().object.position, start);

    press_start(&mut game);
    assert_eq!(game.state(), GameState::Playing);
    assert_that(&game.outbox().states).contains((GameState::Menu, GameState::Playing));
}

#[test]
fn test_builtin_board_game() {
    let game = Game::new().unwrap();

    assert_eq!(game.state(), GameState::Menu);
    assert_that(&game.release().is_in_house(Personality::Stalker)).is_true();
    assert_that(&game.ghost(Personality::Stalker).object.prevent_movement).is_true();
    assert_that(&game.ghost(Personality::Chaser).object.prevent_movement).is_false();
    assert_that(&game.tiles().any_dirty()).is_true();
}

#[test]
fn test_eating_a_pellet() {
    let mut game = game(&PELLETS);
    press_start(&mut game);

    step_until(&mut game, |game| game.score() > 0);

    assert_eq!(game.score(), 10);
    assert_eq!(
        game.outbox().scores,
        vec![ScoreDelta {
            points: 10,
            reason: ScoreReason::Pellet,
            total: 10
        }]
    );
    assert_that(&game.maze().has_pellet(IVec2::new(4, 2))).is_false();
    assert_eq!(game.ghost(Personality::Chaser).cruise_elroy_level, 2);
    assert_eq!(game.state(), GameState::Playing);

    game.commit_tiles();
    assert_that(&game.outbox().tiles).contains(TileUpdate {
        row: 2,
        column: 4,
        graphic: graphic::EMPTY,
        palette: palette::MAZE,
    });
}

#[test]
fn test_power_pellet_frightens_ghosts() {
    let mut game = game(&POWER);
    press_start(&mut game);

    step_until(&mut game, |game| game.score() > 0);

    assert_eq!(game.score(), 50);
    for personality in Personality::ALL {
        assert_that(&game.ghost(personality).is_frightened()).is_true();
    }
    assert_that(&game.outbox().sprites).contains(SpriteChange {
        sprite: SpriteId::Ghost(Personality::Chaser),
        palette: palette::FRIGHTENED,
        animation: AnimationSet::GhostFrightened,
    });

    // The schedule holds still while anyone is frightened
    let phase = game.schedule().phase();
    for _ in 0..600 {
        game.fixed_update(DT);
    }
    assert_eq!(game.schedule().phase(), phase);
}

#[test]
fn test_capture_chain_doubles() {
    let mut game = game(&PELLETS);
    press_start(&mut game);
    game.fixed_update(1e-3);

    let maze = game.maze().clone();
    for personality in Personality::ALL {
        put_ghost_on_pacman(&mut game, personality);
        game.ghost_mut(personality).become_frightened(true, &maze);
    }
    game.fixed_update(DT);

    let points: Vec<u32> = game.outbox().scores.iter().map(|delta| delta.points).collect();
    assert_eq!(points, vec![200, 400, 800, 1600]);
    assert_eq!(game.score(), 3000);
    for personality in Personality::ALL {
        assert_that(&game.ghost(personality).is_respawning()).is_true();
    }
    assert_eq!(game.lives(), STARTING_LIVES);
}

#[test]
fn test_caught_by_ghost() {
    let mut game = game(&PELLETS);
    press_start(&mut game);
    game.fixed_update(1e-3);

    put_ghost_on_pacman(&mut game, Personality::Chaser);
    game.fixed_update(DT);

    assert_eq!(game.lives(), STARTING_LIVES - 1);
    assert_that(&game.take_reset_request()).is_true();

    // Nothing moves until the reset happens
    let frozen = game.pacman().object.position;
    game.fixed_update(DT);
    assert_eq!(game.pacman().object.position, frozen);

    game.reset();
    assert_that(&game.take_reset_request()).is_false();
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.pacman().object.position, game.maze().player_start());
    assert_eq!(game.release().global_counter(), Some(0));
    assert_that(&game.ghost(Personality::Ambusher).object.prevent_movement).is_true();
}

#[test]
fn test_host_reset_keeps_progress() {
    let mut game = game(&PELLETS);
    press_start(&mut game);
    step_until(&mut game, |game| game.score() > 0);

    game.pacman_mut().object.position.x += 3.0;
    game.reset();

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.lives(), STARTING_LIVES);
    assert_eq!(game.score(), 10);
    assert_eq!(game.release().global_counter(), None);
    assert_that(&game.maze().has_pellet(IVec2::new(4, 2))).is_false();
    assert_eq!(game.pacman().object.position, game.maze().player_start());
}

#[test]
fn test_game_over_and_new_game() {
    let mut game = game(&PELLETS);
    press_start(&mut game);

    for _ in 0..STARTING_LIVES {
        game.fixed_update(1e-3);
        put_ghost_on_pacman(&mut game, Personality::Chaser);
        game.fixed_update(DT);
        if game.take_reset_request() {
            game.reset();
        }
    }

    assert_eq!(game.lives(), 0);
    assert_eq!(game.state(), GameState::Highscores);
    assert_that(&game.take_reset_request()).is_false();

    press_start(&mut game);
    assert_that(&game.take_reset_request()).is_true();
    game.reset();

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.lives(), STARTING_LIVES);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 0);
}

#[test]
fn test_clearing_the_board() {
    let mut game = game(&LAST_PELLET);
    press_start(&mut game);

    step_until(&mut game, |game| game.state() == GameState::Cutscene);

    assert_eq!(game.state(), GameState::Cutscene);
    assert_eq!(game.level(), 1);
    assert_that(&game.sprites_suppressed()).is_true();
    assert_that(&game.take_reset_request()).is_false();

    game.fixed_update(2.5);
    assert_that(&game.take_reset_request()).is_true();

    game.reset();
    assert_eq!(game.state(), GameState::Playing);
    assert_that(&game.maze().has_pellet(IVec2::new(4, 2))).is_true();
    assert_eq!(game.pacman().level_number, 1);
    assert_eq!(game.ghost(Personality::Chaser).level_number, 1);
}

#[test]
fn test_draw_reports_every_sprite() {
    let mut game = game(&PELLETS);
    game.draw();

    assert_eq!(game.outbox().frames_drawn, 1);
    assert_that(&game.outbox().last_frame).has_length(5);

    let drained = game.drain_outbox();
    assert_that(&drained.sprites.is_empty()).is_false();
    assert_that(&game.outbox().sprites).is_empty();
    assert_eq!(game.outbox().frames_drawn, 1);
}

#[test]
fn test_driven_by_game_loop() {
    let mut game_loop = GameLoop::new(game(&PELLETS), LoopConfig::default());
    game_loop.simulation_mut().input_mut().key_down(Keys::START);

    let start = game_loop.simulation().pacman().object.position;
    for _ in 0..10 {
        game_loop.tick_elapsed(DT);
    }

    let game = game_loop.simulation();
    assert_eq!(game.state(), GameState::Playing);
    assert_that(&game.pacman().object.position.x).is_less_than(start.x);
    assert_eq!(game.outbox().frames_drawn, 10);
}
