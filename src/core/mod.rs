//! Core engine types: players, state, actions, events, RNG, configuration.
//!
//! These are plain data holders. The rules that mutate them live in
//! `effects`, `combat` and `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod event;
pub mod state;

pub use player::{CreatureDamage, Player, PlayerId};
pub use rng::{GameRng, RandomSource, ScriptedRandom};
pub use config::GameConfig;
pub use action::Action;
pub use event::GameEvent;
pub use state::{GameState, History, TurnPhase};
