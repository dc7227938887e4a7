//! Pac-Man simulation core: ghost AI, ghost mode state machine and the game loop controller.

pub mod animation;
pub mod app;
pub mod constants;
pub mod direction;
pub mod entity;
pub mod error;
pub mod formatter;
pub mod game;
pub mod geometry;
pub mod ghost;
pub mod input;
pub mod map;
