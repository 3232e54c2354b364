//! Card definitions.
//!
//! A card is a sum type over its variants. Every variant embeds the shared
//! [`CardInfo`] (name, cost, description) and adds its own fields. Rules
//! dispatch on the variant with an exhaustive `match`.
//!
//! Cloning a card yields an independent instance: damage dealt to one copy
//! of "Zombie" never shows up on another copy.
//!
//! ## Example
//!
//! ```
//! use duel_engine::cards::{Card, CreatureCard};
//!
//! let zombie = Card::Creature(CreatureCard::new("Zombie", 2, "A mindless undead creature.", 2, 2));
//! let mut copy = zombie.clone();
//!
//! if let Card::Creature(c) = &mut copy {
//!     c.take_damage(1);
//! }
//!
//! assert_eq!(zombie.as_creature().unwrap().toughness, 2);
//! assert_eq!(copy.as_creature().unwrap().toughness, 1);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::{RandomEffect, SpellKind, TerrainEffect};

/// Fields shared by every card variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInfo {
    /// Catalog name. Unique per catalog entry, shared by deck copies.
    pub name: String,

    /// Mana needed to play the card.
    #[serde(default)]
    pub mana_cost: u32,

    /// Display-only text.
    #[serde(default)]
    pub description: String,
}

impl CardInfo {
    /// Create card info.
    pub fn new(name: impl Into<String>, mana_cost: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mana_cost,
            description: description.into(),
        }
    }
}

/// A creature. `toughness` is the current remaining toughness.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureCard {
    #[serde(flatten)]
    pub info: CardInfo,
    pub power: i32,
    pub toughness: i32,
}

impl CreatureCard {
    /// Create a creature card.
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        description: impl Into<String>,
        power: i32,
        toughness: i32,
    ) -> Self {
        Self {
            info: CardInfo::new(name, mana_cost, description),
            power,
            toughness,
        }
    }

    /// Subtract `amount` from toughness.
    ///
    /// Returns `true` if the creature is destroyed (toughness ≤ 0). Moving it
    /// off the battlefield is the caller's job.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.toughness -= amount;
        self.is_destroyed()
    }

    /// Is toughness exhausted?
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.toughness <= 0
    }
}

/// A spell. How `power` is used depends on `spell_kind`.
///
/// `has_target` and `affects_all` always agree with `spell_kind`. When
/// loading, missing flags are derived from the kind and contradicting ones
/// are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpellCardData")]
pub struct SpellCard {
    #[serde(flatten)]
    pub info: CardInfo,
    pub spell_kind: SpellKind,
    pub power: i32,
    pub has_target: bool,
    pub affects_all: bool,
}

#[derive(Deserialize)]
struct SpellCardData {
    #[serde(flatten)]
    info: CardInfo,
    spell_kind: SpellKind,
    #[serde(default)]
    power: i32,
    has_target: Option<bool>,
    affects_all: Option<bool>,
}

impl TryFrom<SpellCardData> for SpellCard {
    type Error = String;

    fn try_from(data: SpellCardData) -> Result<Self, Self::Error> {
        let kind = data.spell_kind;
        let spell = Self {
            info: data.info,
            spell_kind: kind,
            power: data.power,
            has_target: data.has_target.unwrap_or(kind.accepts_target()),
            affects_all: data.affects_all.unwrap_or(kind.affects_all()),
        };
        spell
            .check_flags()
            .map_err(|reason| format!("{}: {reason}", spell.info.name))?;
        Ok(spell)
    }
}

impl SpellCard {
    /// Create a spell card.
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        description: impl Into<String>,
        spell_kind: SpellKind,
        power: i32,
    ) -> Self {
        Self {
            info: CardInfo::new(name, mana_cost, description),
            spell_kind,
            power,
            has_target: spell_kind.accepts_target(),
            affects_all: spell_kind.affects_all(),
        }
    }

    /// Check that the target flags match `spell_kind`.
    pub fn check_flags(&self) -> Result<(), String> {
        if self.has_target != self.spell_kind.accepts_target() {
            return Err(format!(
                "has_target = {} does not match spell kind {}",
                self.has_target, self.spell_kind
            ));
        }
        if self.affects_all != self.spell_kind.affects_all() {
            return Err(format!(
                "affects_all = {} does not match spell kind {}",
                self.affects_all, self.spell_kind
            ));
        }
        Ok(())
    }

    /// Damage to a target if given, otherwise to the opponent.
    pub fn direct_damage(name: impl Into<String>, mana_cost: u32, description: impl Into<String>, power: i32) -> Self {
        Self::new(name, mana_cost, description, SpellKind::DirectDamage, power)
    }

    /// Damage to one creature.
    pub fn single_damage(name: impl Into<String>, mana_cost: u32, description: impl Into<String>, power: i32) -> Self {
        Self::new(name, mana_cost, description, SpellKind::SingleDamage, power)
    }

    /// Heal the caster.
    pub fn heal(name: impl Into<String>, mana_cost: u32, description: impl Into<String>, power: i32) -> Self {
        Self::new(name, mana_cost, description, SpellKind::Heal, power)
    }

    /// Raise toughness of all the caster's creatures.
    pub fn buff_all(name: impl Into<String>, mana_cost: u32, description: impl Into<String>, power: i32) -> Self {
        Self::new(name, mana_cost, description, SpellKind::BuffAll, power)
    }

    /// Damage every creature of the opponent.
    pub fn damage_all(name: impl Into<String>, mana_cost: u32, description: impl Into<String>, power: i32) -> Self {
        Self::new(name, mana_cost, description, SpellKind::DamageAll, power)
    }

    /// Bring a random creature back from the caster's graveyard.
    pub fn revive(name: impl Into<String>, mana_cost: u32, description: impl Into<String>) -> Self {
        Self::new(name, mana_cost, description, SpellKind::Revive, 0)
    }
}

/// A terrain. Always free to play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainCard {
    #[serde(flatten)]
    pub info: CardInfo,
    pub effect: TerrainEffect,
}

impl TerrainCard {
    /// Create a terrain card (mana cost 0).
    pub fn new(name: impl Into<String>, description: impl Into<String>, effect: TerrainEffect) -> Self {
        Self {
            info: CardInfo::new(name, 0, description),
            effect,
        }
    }
}

/// A card that applies one of its effects at random.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomEffectCard {
    #[serde(flatten)]
    pub info: CardInfo,
    pub possible_effects: SmallVec<[RandomEffect; 4]>,
    /// Effect chosen on the last activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_effect: Option<RandomEffect>,
}

impl RandomEffectCard {
    /// Create a random-effect card.
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        description: impl Into<String>,
        effects: impl IntoIterator<Item = RandomEffect>,
    ) -> Self {
        Self {
            info: CardInfo::new(name, mana_cost, description),
            possible_effects: effects.into_iter().collect(),
            current_effect: None,
        }
    }
}

/// A card of any variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    Creature(CreatureCard),
    Spell(SpellCard),
    Terrain(TerrainCard),
    RandomEffect(RandomEffectCard),
}

impl Card {
    /// Shared card fields.
    #[must_use]
    pub fn info(&self) -> &CardInfo {
        match self {
            Card::Creature(c) => &c.info,
            Card::Spell(s) => &s.info,
            Card::Terrain(t) => &t.info,
            Card::RandomEffect(r) => &r.info,
        }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Mana cost.
    #[must_use]
    pub fn mana_cost(&self) -> u32 {
        self.info().mana_cost
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.info().description
    }

    /// Is this a creature card?
    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self, Card::Creature(_))
    }

    /// Get the creature if this is one.
    #[must_use]
    pub fn as_creature(&self) -> Option<&CreatureCard> {
        match self {
            Card::Creature(c) => Some(c),
            _ => None,
        }
    }

    /// Get the spell if this is one.
    #[must_use]
    pub fn as_spell(&self) -> Option<&SpellCard> {
        match self {
            Card::Spell(s) => Some(s),
            _ => None,
        }
    }

    /// Variant name for display.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Card::Creature(_) => "creature",
            Card::Spell(s) if s.spell_kind == SpellKind::Revive => "revive spell",
            Card::Spell(_) => "spell",
            Card::Terrain(_) => "terrain",
            Card::RandomEffect(_) => "random effect",
        }
    }
}

impl From<CreatureCard> for Card {
    fn from(card: CreatureCard) -> Self {
        Card::Creature(card)
    }
}

impl From<SpellCard> for Card {
    fn from(card: SpellCard) -> Self {
        Card::Spell(card)
    }
}

impl From<TerrainCard> for Card {
    fn from(card: TerrainCard) -> Self {
        Card::Terrain(card)
    }
}

impl From<RandomEffectCard> for Card {
    fn from(card: RandomEffectCard) -> Self {
        Card::RandomEffect(card)
    }
}

impl std::fmt::Display for CreatureCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Mana: {}) [Power: {}, Toughness: {}] - {}",
            self.info.name, self.info.mana_cost, self.power, self.toughness, self.info.description
        )
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Creature(c) => c.fmt(f),
            _ => {
                let info = self.info();
                write!(f, "{} (Mana: {}) - {}", info.name, info.mana_cost, info.description)
            }
        }
    }
}
