//! Committed match events.
//!
//! One event is produced per committed action (play, attack, pass,
//! concede) plus one per defeat and victory. Each renders to the
//! human-readable line stored in the match history.

use serde::{Deserialize, Serialize};

/// A committed match event.
///
/// `round` is the 1-based turn number the event happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A creature, terrain or random-effect card was played.
    CardPlayed {
        round: u32,
        player: String,
        card: String,
    },

    /// A spell was cast.
    SpellUsed {
        round: u32,
        player: String,
        card: String,
    },

    /// A creature hit the defending player.
    AttackedPlayer {
        round: u32,
        player: String,
        attacker: String,
        power: i32,
        toughness: i32,
        defender: String,
    },

    /// A creature hit a defending creature. Defender stats are post-damage.
    AttackedCreature {
        round: u32,
        player: String,
        attacker: String,
        power: i32,
        toughness: i32,
        defender: String,
        defender_power: i32,
        defender_toughness: i32,
    },

    Passed { round: u32, player: String },

    Conceded { round: u32, player: String },

    Defeated { round: u32, player: String },

    Victory { round: u32, player: String },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardPlayed { round, player, card } => {
                write!(f, "Round {round} - {player}: Played {card}")
            }
            Self::SpellUsed { round, player, card } => {
                write!(f, "Round {round} - {player}: Used {card}")
            }
            Self::AttackedPlayer {
                round,
                player,
                attacker,
                power,
                toughness,
                defender,
            } => write!(
                f,
                "Round {round} - {player}: {attacker}(P:{power}, T:{toughness}) attacked {defender} directly"
            ),
            Self::AttackedCreature {
                round,
                player,
                attacker,
                power,
                toughness,
                defender,
                defender_power,
                defender_toughness,
            } => write!(
                f,
                "Round {round} - {player}: {attacker}(P:{power}, T:{toughness}) attacked {defender}(P:{defender_power}, T:{defender_toughness})"
            ),
            Self::Passed { round, player } => write!(f, "Round {round} - {player}: Passed"),
            Self::Conceded { round, player } => write!(f, "Round {round} - {player}: Conceded"),
            Self::Defeated { round, player } => write!(f, "Round {round}: {player} was defeated!"),
            Self::Victory { round, player } => write!(f, "Round {round}: {player} is the winner!"),
        }
    }
}
