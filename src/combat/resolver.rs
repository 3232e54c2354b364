//! Creature attacks.
//!
//! Combat is one-directional: the attacker deals its power and takes
//! nothing back. An empty defending battlefield means the attack lands on
//! the defending player; otherwise a defending creature must be named.

use tracing::{debug, info};

use crate::cards::CreatureCard;
use crate::core::{CreatureDamage, Player};
use crate::error::{ActionError, ActionResult};

/// Snapshot of the attacking creature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attacker {
    pub name: String,
    pub power: i32,
    pub toughness: i32,
}

impl From<&CreatureCard> for Attacker {
    fn from(creature: &CreatureCard) -> Self {
        Self {
            name: creature.info.name.clone(),
            power: creature.power,
            toughness: creature.toughness,
        }
    }
}

/// Result of a resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The defending player took the hit.
    HitPlayer {
        attacker: Attacker,
        defender: String,
        health: i32,
    },
    /// A defending creature took the hit. `damage.remaining` is its
    /// toughness after the hit.
    HitCreature {
        attacker: Attacker,
        defender_power: i32,
        damage: CreatureDamage,
    },
}

impl AttackOutcome {
    /// The attacking creature.
    #[must_use]
    pub fn attacker(&self) -> &Attacker {
        match self {
            Self::HitPlayer { attacker, .. } | Self::HitCreature { attacker, .. } => attacker,
        }
    }

    /// Was a defending creature destroyed?
    #[must_use]
    pub fn destroyed_creature(&self) -> bool {
        matches!(self, Self::HitCreature { damage, .. } if damage.destroyed)
    }
}

/// Resolves attacks between two players.
pub struct CombatResolver;

impl CombatResolver {
    /// Check an attack without resolving it.
    pub fn validate_attack(
        attacker: usize,
        attacking: &Player,
        defending: &Player,
        target: Option<usize>,
    ) -> ActionResult<()> {
        if attacker >= attacking.battlefield.len() {
            return Err(ActionError::InvalidAttacker {
                index: attacker,
                len: attacking.battlefield.len(),
            });
        }

        match (defending.battlefield.is_empty(), target) {
            (true, None) => Ok(()),
            (true, Some(_)) => Err(ActionError::InvalidTarget(format!(
                "{} has no creatures, attack the player directly",
                defending.name
            ))),
            (false, None) => Err(ActionError::InvalidTarget(format!(
                "{} has creatures, a defending creature must be chosen",
                defending.name
            ))),
            (false, Some(index)) if index < defending.battlefield.len() => Ok(()),
            (false, Some(index)) => Err(ActionError::InvalidTarget(format!(
                "{} has no creature at index {index}",
                defending.name
            ))),
        }
    }

    /// Resolve an attack by the creature at `attacker` on `attacking`'s
    /// battlefield.
    ///
    /// `target` indexes `defending`'s battlefield and must be `Some` exactly
    /// when that battlefield is non-empty. A destroyed defender moves to its
    /// owner's graveyard before this returns.
    pub fn resolve_attack(
        attacker: usize,
        attacking: &Player,
        defending: &mut Player,
        target: Option<usize>,
    ) -> ActionResult<AttackOutcome> {
        Self::validate_attack(attacker, attacking, defending, target)?;

        let attacker = Attacker::from(&attacking.battlefield[attacker]);
        debug!(
            player = %attacking.name,
            attacker = %attacker.name,
            power = attacker.power,
            ?target,
            "resolving attack"
        );

        let outcome = match target {
            None => {
                defending.receive_damage(attacker.power);
                AttackOutcome::HitPlayer {
                    defender: defending.name.clone(),
                    health: defending.health,
                    attacker,
                }
            }
            Some(index) => {
                let defender_power = defending.battlefield[index].power;
                let damage = defending.damage_creature(index, attacker.power)?;
                AttackOutcome::HitCreature {
                    attacker,
                    defender_power,
                    damage,
                }
            }
        };

        info!(player = %attacking.name, ?outcome, "attack resolved");
        Ok(outcome)
    }
}
