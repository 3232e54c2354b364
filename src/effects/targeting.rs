//! Effect targeting.
//!
//! A [`Target`] always points at the defending side: the defending player,
//! or a creature on the defending battlefield by index. Effects that act on
//! the caster (heals, buffs, revive) take no target.
//!
//! The selectors at the bottom pick creatures by stat, first on ties. They
//! are used by the greedy AI and are handy in tests.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::cards::CreatureCard;
use crate::core::Player;
use crate::error::{ActionError, ActionResult};

/// Where an effect lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The defending player.
    Player,
    /// The creature at this index on the defending battlefield.
    Creature(usize),
}

impl Target {
    /// Check that the target exists on `defending`'s side.
    pub fn validate(self, defending: &Player) -> ActionResult<()> {
        match self {
            Target::Player => Ok(()),
            Target::Creature(index) if index < defending.battlefield.len() => Ok(()),
            Target::Creature(index) => Err(ActionError::InvalidTarget(format!(
                "{} has no creature at index {index}",
                defending.name
            ))),
        }
    }

    /// Creature index, if this targets a creature.
    #[must_use]
    pub fn creature_index(self) -> Option<usize> {
        match self {
            Target::Creature(index) => Some(index),
            Target::Player => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player => write!(f, "opponent"),
            Target::Creature(index) => write!(f, "creature {index}"),
        }
    }
}

/// Index of the creature with the lowest toughness, first on ties.
#[must_use]
pub fn weakest_creature(battlefield: &[CreatureCard]) -> Option<usize> {
    battlefield
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.toughness)
        .map(|(i, _)| i)
}

/// Index of the creature with the highest power, first on ties.
#[must_use]
pub fn strongest_creature(battlefield: &[CreatureCard]) -> Option<usize> {
    // `max_by_key` keeps the last maximum
    battlefield
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| Reverse(c.power))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn creature(name: &str, power: i32, toughness: i32) -> CreatureCard {
        CreatureCard::new(name, 1, "", power, toughness)
    }

    #[test]
    fn test_validate() {
        let mut bob = Player::new(PlayerId::new(1), "Bob", 20, false);
        assert!(Target::Player.validate(&bob).is_ok());
        assert!(matches!(
            Target::Creature(0).validate(&bob),
            Err(ActionError::InvalidTarget(_))
        ));

        bob.battlefield.push(creature("Zombie", 2, 2));
        assert!(Target::Creature(0).validate(&bob).is_ok());
        assert!(Target::Creature(1).validate(&bob).is_err());
    }

    #[test]
    fn test_weakest_first_on_ties() {
        let field = vec![
            creature("A", 1, 3),
            creature("B", 1, 1),
            creature("C", 1, 1),
        ];
        assert_eq!(weakest_creature(&field), Some(1));
        assert_eq!(weakest_creature(&[]), None);
    }

    #[test]
    fn test_strongest_first_on_ties() {
        let field = vec![
            creature("A", 2, 1),
            creature("B", 4, 1),
            creature("C", 4, 1),
        ];
        assert_eq!(strongest_creature(&field), Some(1));
        assert_eq!(strongest_creature(&[]), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::Player.to_string(), "opponent");
        assert_eq!(Target::Creature(2).to_string(), "creature 2");
        assert_eq!(Target::Creature(2).creature_index(), Some(2));
    }
}
