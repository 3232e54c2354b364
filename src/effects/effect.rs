//! Effect tags and resolution outcomes.
//!
//! Tags are the data half of a card's behavior: a spell carries a
//! [`SpellKind`], a terrain a [`TerrainEffect`], a random card a list of
//! [`RandomEffect`]s. The resolver turns a tag into a state change and
//! reports what happened as an outcome value.
//!
//! Tags serialize in snake_case. Legacy card-file tags (`dano_direto`,
//! `cura`, `mana_extra`, ...) are accepted as aliases when loading.

use serde::{Deserialize, Serialize};

use crate::core::CreatureDamage;

/// What a spell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellKind {
    /// `power` damage to the target if given, otherwise to the opponent.
    #[serde(alias = "dano_direto")]
    DirectDamage,
    /// `power` damage to one opposing creature.
    #[serde(alias = "dano_unico")]
    SingleDamage,
    /// Caster gains `power` health.
    #[serde(alias = "cura")]
    Heal,
    /// Every creature of the caster gains `power` toughness.
    #[serde(alias = "buff_coletivo")]
    BuffAll,
    /// Every creature of the opponent takes `power` damage.
    #[serde(alias = "dano_coletivo")]
    DamageAll,
    /// A random creature returns from the caster's graveyard.
    Revive,
}

impl SpellKind {
    /// Does this kind require a creature target?
    #[must_use]
    pub fn needs_creature_target(self) -> bool {
        matches!(self, Self::SingleDamage)
    }

    /// Can this kind be aimed at a creature?
    #[must_use]
    pub fn accepts_target(self) -> bool {
        matches!(self, Self::DirectDamage | Self::SingleDamage)
    }

    /// Does this kind hit every creature on a battlefield?
    #[must_use]
    pub fn affects_all(self) -> bool {
        matches!(self, Self::DamageAll)
    }

    /// Does this kind deal damage?
    #[must_use]
    pub fn is_damage(self) -> bool {
        matches!(self, Self::DirectDamage | Self::SingleDamage | Self::DamageAll)
    }

    /// Does this kind act on the opponent?
    #[must_use]
    pub fn needs_opponent(self) -> bool {
        self.is_damage()
    }
}

impl std::fmt::Display for SpellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::DirectDamage => "direct_damage",
            Self::SingleDamage => "single_damage",
            Self::Heal => "heal",
            Self::BuffAll => "buff_all",
            Self::DamageAll => "damage_all",
            Self::Revive => "revive",
        };
        f.write_str(tag)
    }
}

/// Fixed bonus granted by a terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainEffect {
    #[serde(alias = "mana_extra")]
    ManaBonus,
    #[serde(alias = "cura")]
    Heal,
}

/// One possible outcome of a random-effect card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomEffect {
    #[serde(alias = "dano")]
    Damage,
    #[serde(alias = "cura")]
    Heal,
    #[serde(alias = "mana_extra")]
    ExtraMana,
}

impl std::fmt::Display for RandomEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Damage => f.write_str("damage"),
            Self::Heal => f.write_str("heal"),
            Self::ExtraMana => f.write_str("extra mana"),
        }
    }
}

/// Result of a resolved spell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpellOutcome {
    /// A player lost health.
    DamagedPlayer {
        player: String,
        amount: i32,
        health: i32,
    },
    /// One creature was damaged.
    DamagedCreature(CreatureDamage),
    /// The caster gained health.
    Healed { amount: i32, health: i32 },
    /// The caster's creatures gained toughness.
    Buffed { creatures: usize, amount: i32 },
    /// Every opposing creature was damaged, in battlefield order.
    DamagedAll(Vec<CreatureDamage>),
    /// A creature came back with its base toughness.
    Revived { creature: String, toughness: i32 },
    /// Mana was spent but nothing happened (revive with no creature in the
    /// graveyard).
    Fizzled,
}

impl SpellOutcome {
    /// Did the spell have an effect?
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Fizzled)
    }
}

/// Result of an activated terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainOutcome {
    ManaGained { amount: u32, mana: u32 },
    Healed { amount: i32, health: i32 },
}

/// Result of an activated random-effect card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RandomOutcome {
    DamagedPlayer {
        player: String,
        amount: i32,
        health: i32,
    },
    DamagedCreature(CreatureDamage),
    Healed { amount: i32, health: i32 },
    ManaGained { amount: u32, mana: u32 },
    /// Damage was rolled with nobody to hit.
    Fizzled,
}

impl RandomOutcome {
    /// The effect that was rolled.
    #[must_use]
    pub fn effect(&self) -> RandomEffect {
        match self {
            Self::DamagedPlayer { .. } | Self::DamagedCreature(_) | Self::Fizzled => {
                RandomEffect::Damage
            }
            Self::Healed { .. } => RandomEffect::Heal,
            Self::ManaGained { .. } => RandomEffect::ExtraMana,
        }
    }
}
