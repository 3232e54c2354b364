//! # duel-engine
//!
//! A two-player turn-based card battle engine.
//!
//! Players draw from decks, play creature, spell, terrain and random-effect
//! cards, attack with creatures, and the match ends when a player's health
//! reaches zero.
//!
//! ## Design Principles
//!
//! 1. **Plain data entities**: `Player` and `Card` hold state only. Rules live
//!    in resolvers that take that state as explicit parameters.
//!
//! 2. **Sum-typed cards**: card variants are an enum dispatched by exhaustive
//!    `match`, never by overriding.
//!
//! 3. **Injected dependencies**: the base-toughness table and the random
//!    source are passed in, so every match can be replayed from a seed.
//!
//! 4. **No output**: the engine never prints. It appends human-readable
//!    entries to a history log and emits `tracing` events.
//!
//! ## Modules
//!
//! - `core`: players, state, actions, events, RNG, configuration
//! - `cards`: card definitions, catalog, deck building
//! - `effects`: spell, terrain and random-effect resolution
//! - `combat`: creature attacks
//! - `rules`: the turn controller state machine
//! - `controllers`: action providers (greedy AI, scripted input)

pub mod error;
pub mod core;
pub mod cards;
pub mod effects;
pub mod combat;
pub mod rules;
pub mod controllers;

// Re-export commonly used types
pub use crate::error::{ActionError, CatalogError, ConfigError, DuelError, Result};

pub use crate::core::{
    Action, GameConfig, GameEvent, GameRng, GameState, History,
    Player, PlayerId, RandomSource, ScriptedRandom, TurnPhase,
};

pub use crate::cards::{
    BaseToughness, Card, CardCatalog, CardInfo, CreatureCard, RandomEffectCard,
    SpellCard, TerrainCard,
};

pub use crate::effects::{
    EffectResolver, RandomEffect, RandomOutcome, SpellKind, SpellOutcome, Target,
    TerrainEffect, TerrainOutcome,
};

pub use crate::combat::{AttackOutcome, Attacker, CombatResolver};

pub use crate::rules::{Game, GameBuilder, GameResult, GameView, Inspection, PlayOutcome};

pub use crate::controllers::{ai_controllers, GreedyAi, PlayerController, ScriptedController};
