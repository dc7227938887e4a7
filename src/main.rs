//! Headless demo: runs the built-in board for a while with scripted input.

use std::env;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use thousands::Separable;
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use pacman_core::app::{GameLoop, LoopConfig, LoopHost, StepMode};
use pacman_core::direction::Direction;
use pacman_core::formatter::CustomFormatter;
use pacman_core::game::Game;
use pacman_core::input::Keys;

const DEFAULT_SECONDS: f64 = 10.0;
/// Seconds between scripted turns.
const TURN_INTERVAL: f64 = 1.25;
/// How long each scripted key is held.
const KEY_HOLD: f64 = 0.1;

struct Options {
    seconds: f64,
    variable: bool,
}

impl Options {
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        let mut options = Options {
            seconds: DEFAULT_SECONDS,
            variable: false,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seconds" | "-s" => {
                    let value = iter.next().context("--seconds needs a value")?;
                    options.seconds = value.parse().with_context(|| format!("invalid --seconds value {value:?}"))?;
                }
                "--variable" | "-v" => options.variable = true,
                other => debug!(arg = other, "Ignoring unknown argument"),
            }
        }
        Ok(options)
    }
}

/// A key transition at a point in the run.
struct ScriptedKey {
    at: f64,
    keys: Keys,
    down: bool,
}

/// Presses start, then cycles through the four directions.
fn build_script(seconds: f64) -> Vec<ScriptedKey> {
    let mut script = vec![
        ScriptedKey {
            at: 0.0,
            keys: Keys::START,
            down: true,
        },
        ScriptedKey {
            at: KEY_HOLD,
            keys: Keys::START,
            down: false,
        },
    ];

    let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
    let mut at = TURN_INTERVAL;
    for direction in turns.iter().cycle() {
        if at >= seconds {
            break;
        }
        let keys = Keys::from_direction(*direction);
        script.push(ScriptedKey { at, keys, down: true });
        script.push(ScriptedKey {
            at: at + KEY_HOLD,
            keys,
            down: false,
        });
        at += TURN_INTERVAL;
    }
    script
}

struct DemoHost {
    started: Instant,
    deadline: Duration,
    script: Vec<ScriptedKey>,
    cursor: usize,
    tile_updates: usize,
    sprite_changes: usize,
}

impl DemoHost {
    fn new(seconds: f64) -> Self {
        Self {
            started: Instant::now(),
            deadline: Duration::from_secs_f64(seconds),
            script: build_script(seconds),
            cursor: 0,
            tile_updates: 0,
            sprite_changes: 0,
        }
    }
}

impl LoopHost<Game> for DemoHost {
    fn poll_events(&mut self, game: &mut Game) -> bool {
        let elapsed = self.started.elapsed();
        if elapsed >= self.deadline {
            return false;
        }

        let seconds = elapsed.as_secs_f64();
        while let Some(key) = self.script.get(self.cursor).filter(|key| key.at <= seconds) {
            if key.down {
                game.input_mut().key_down(key.keys);
            } else {
                game.input_mut().key_up(key.keys);
            }
            self.cursor += 1;
        }

        let drained = game.drain_outbox();
        self.tile_updates += drained.tiles.len();
        self.sprite_changes += drained.sprites.len();
        for delta in drained.scores {
            debug!(points = delta.points, reason = %delta.reason, total = delta.total, "Score");
        }
        true
    }

    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn idle(&mut self, remaining: Duration) {
        spin_sleep::sleep(remaining);
    }
}

pub fn main() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(CustomFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")?;

    let options = Options::parse()?;
    let config = LoopConfig {
        updates: if options.variable { StepMode::Variable } else { StepMode::Fixed },
        ..LoopConfig::default()
    };

    let game = Game::new().context("Could not create game")?;
    let mut game_loop = GameLoop::new(game, config);
    let mut host = DemoHost::new(options.seconds);
    game_loop.run(&mut host);

    let fps = game_loop.average_fps();
    let ticks = game_loop.ticks();
    let game = game_loop.into_simulation();
    info!(
        score = %game.score().separate_with_commas(),
        lives = game.lives(),
        level = game.level(),
        ticks,
        fps,
        tile_updates = host.tile_updates,
        sprite_changes = host.sprite_changes,
        "Demo finished"
    );
    Ok(())
}
