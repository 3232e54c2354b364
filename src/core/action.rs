//! Actions a player can choose on their turn.
//!
//! Actions are structured commands produced by a controller (AI policy,
//! scripted input, or a front-end translating keystrokes). The engine never
//! parses text.
//!
//! ```
//! use duel_engine::core::Action;
//! use duel_engine::effects::Target;
//!
//! // Cast the first card in hand at the opponent's second creature
//! let cast = Action::play_at(0, Target::Creature(1));
//! assert!(cast.commits_turn());
//!
//! // Looking at the history does not end the turn
//! assert!(!Action::ViewHistory.commits_turn());
//! ```

use serde::{Deserialize, Serialize};

use crate::effects::Target;

/// A player action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `hand_index`, optionally aimed at `target`.
    PlayCard {
        hand_index: usize,
        target: Option<Target>,
    },

    /// Attack with the creature at `attacker` on the own battlefield.
    /// `defender` indexes the defending battlefield and must be set exactly
    /// when that battlefield is non-empty.
    Attack {
        attacker: usize,
        defender: Option<usize>,
    },

    /// End the turn without acting.
    Pass,

    /// Inspect the match history. Does not end the turn.
    ViewHistory,

    /// Inspect the own graveyard. Does not end the turn.
    ViewGraveyard,

    /// Leave the match.
    Concede,
}

impl Action {
    /// Play a card without a target.
    #[must_use]
    pub fn play(hand_index: usize) -> Self {
        Self::PlayCard {
            hand_index,
            target: None,
        }
    }

    /// Play a card at a target.
    #[must_use]
    pub fn play_at(hand_index: usize, target: Target) -> Self {
        Self::PlayCard {
            hand_index,
            target: Some(target),
        }
    }

    /// Attack the defending player directly.
    #[must_use]
    pub fn attack_player(attacker: usize) -> Self {
        Self::Attack {
            attacker,
            defender: None,
        }
    }

    /// Attack a defending creature.
    #[must_use]
    pub fn attack_creature(attacker: usize, defender: usize) -> Self {
        Self::Attack {
            attacker,
            defender: Some(defender),
        }
    }

    /// Does a successful execution of this action end the turn?
    #[must_use]
    pub fn commits_turn(&self) -> bool {
        !matches!(self, Self::ViewHistory | Self::ViewGraveyard)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayCard { hand_index, target: None } => write!(f, "play card {hand_index}"),
            Self::PlayCard { hand_index, target: Some(t) } => {
                write!(f, "play card {hand_index} at {t}")
            }
            Self::Attack { attacker, defender: None } => {
                write!(f, "attack player with creature {attacker}")
            }
            Self::Attack { attacker, defender: Some(d) } => {
                write!(f, "attack creature {d} with creature {attacker}")
            }
            Self::Pass => write!(f, "pass"),
            Self::ViewHistory => write!(f, "view history"),
            Self::ViewGraveyard => write!(f, "view graveyard"),
            Self::Concede => write!(f, "concede"),
        }
    }
}
