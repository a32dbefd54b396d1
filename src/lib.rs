//! Simulation core of a top-down room-crawling shooter.
//!
//! Levels are generated as a grid of typed rooms; each tick moves enemies,
//! advances shots and resolves collisions against the room the player is
//! in. Nothing here touches a terminal or a clock: front ends feed
//! [`compute::InputEvent`]s and elapsed milliseconds, then read the
//! returned [`compute::GameState`].

pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod level;
pub mod powerup;
pub mod room;
pub mod strategy;
pub mod weapon;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
