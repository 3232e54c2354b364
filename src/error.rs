//! Error types for the duel engine.
//!
//! Every action error is local and recoverable: when an operation returns
//! `Err`, no player state was touched. The only terminal condition of a
//! match is the win check, which is not an error.

use thiserror::Error;

use crate::core::{PlayerId, TurnPhase};

/// Why an action was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("invalid hand index {index} (hand has {len} cards)")]
    InvalidHandIndex { index: usize, len: usize },

    #[error("invalid attacker index {index} (battlefield has {len} creatures)")]
    InvalidAttacker { index: usize, len: usize },

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("insufficient mana: {required} required, {available} available")]
    InsufficientMana { required: u32, available: u32 },

    #[error("this effect needs an opponent")]
    MissingOpponent,

    #[error("action not allowed during {actual:?} (expected {expected:?})")]
    WrongPhase { expected: TurnPhase, actual: TurnPhase },

    #[error("the match is already over")]
    GameOver,

    #[error("no controller registered for {0}")]
    MissingController(PlayerId),
}

/// Errors raised while loading a card catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid card '{name}': {reason}")]
    InvalidCard { name: String, reason: String },

    #[error("duplicate card name '{0}'")]
    DuplicateName(String),
}

/// Errors raised while validating configuration or building a match.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a match needs at least 2 players, got {0}")]
    NotEnoughPlayers(usize),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot build random decks from an empty catalog")]
    EmptyCatalog,
}

/// Any engine error, for callers that drive a whole match.
#[derive(Error, Debug)]
pub enum DuelError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;

pub type ActionResult<T> = std::result::Result<T, ActionError>;
