//! Turn controller and match setup.
//!
//! `Game` owns the match state and is the only thing that mutates it. It
//! hands borrows of the players to the effect and combat resolvers for the
//! duration of one action.

pub mod builder;
pub mod engine;

pub use builder::GameBuilder;
pub use engine::{Game, GameResult, GameView, Inspection, PlayOutcome};
