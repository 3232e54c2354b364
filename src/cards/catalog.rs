//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition available to a match.
//! Entries are looked up by name and cloned into decks.
//!
//! Catalogs come from [`CardCatalog::standard`], from code via
//! [`CardCatalog::from_cards`], or from a JSON array of cards:
//!
//! ```json
//! [
//!   { "type": "creature", "name": "Zombie", "mana_cost": 2, "power": 2, "toughness": 2 },
//!   { "type": "spell", "name": "Fireball", "mana_cost": 3, "spell_kind": "direct_damage", "power": 3 },
//!   { "type": "terrain", "name": "Healing Spring", "effect": "heal" }
//! ]
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{Card, CreatureCard, RandomEffectCard, SpellCard, TerrainCard};
use crate::effects::{RandomEffect, TerrainEffect};
use crate::error::CatalogError;

/// Printed toughness per creature name.
///
/// Revival restores a creature to this value no matter how much damage it
/// took before dying. Built from a catalog and handed to the effect
/// resolver at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseToughness {
    table: FxHashMap<String, i32>,
}

impl BaseToughness {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the base toughness of `name`.
    pub fn insert(&mut self, name: impl Into<String>, toughness: i32) {
        self.table.insert(name.into(), toughness);
    }

    /// Base toughness of `name`, if known.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i32> {
        self.table.get(name).copied()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Is the table empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for BaseToughness {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|(name, t)| (name.into(), t)).collect(),
        }
    }
}

/// Catalog of card definitions.
///
/// Keeps insertion order for iteration and deck building, and indexes
/// entries by name.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardCatalog, CreatureCard, SpellCard};
///
/// let catalog = CardCatalog::from_cards([
///     CreatureCard::new("Zombie", 2, "Undead.", 2, 2).into(),
///     SpellCard::heal("Minor Heal", 1, "Restores 2 health.", 2).into(),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get("Zombie").unwrap().mana_cost(), 2);
/// assert_eq!(catalog.base_toughness().get("Zombie"), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from cards, validating each one.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of cards.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Load a JSON catalog from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Register a card definition.
    ///
    /// Fails if the name is taken or the card is malformed.
    pub fn register(&mut self, card: Card) -> Result<(), CatalogError> {
        validate(&card)?;
        if self.by_name.contains_key(card.name()) {
            return Err(CatalogError::DuplicateName(card.name().to_string()));
        }
        self.by_name.insert(card.name().to_string(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Get a card definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.by_name.get(name).map(|&i| &self.cards[i])
    }

    /// Check if a card name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Definitions as a slice, in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }

    /// Build the base-toughness table from the creature entries.
    #[must_use]
    pub fn base_toughness(&self) -> BaseToughness {
        self.cards
            .iter()
            .filter_map(Card::as_creature)
            .map(|c| (c.info.name.clone(), c.toughness))
            .collect()
    }

    /// The built-in card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in standard_cards() {
            // Built-in names are distinct and every entry is well formed.
            let name = card.name().to_string();
            catalog.by_name.insert(name, catalog.cards.len());
            catalog.cards.push(card);
        }
        catalog
    }
}

fn validate(card: &Card) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidCard {
        name: card.name().to_string(),
        reason: reason.to_string(),
    };

    if card.name().trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    match card {
        Card::Creature(c) => {
            if c.power < 0 {
                return Err(invalid("power must not be negative"));
            }
            if c.toughness <= 0 {
                return Err(invalid("toughness must be positive"));
            }
        }
        Card::Spell(s) => {
            if s.power < 0 {
                return Err(invalid("power must not be negative"));
            }
            s.check_flags().map_err(|reason| invalid(&reason))?;
        }
        Card::Terrain(t) => {
            if t.info.mana_cost != 0 {
                return Err(invalid("terrain cards cost no mana"));
            }
        }
        Card::RandomEffect(r) => {
            if r.possible_effects.is_empty() {
                return Err(invalid("needs at least one possible effect"));
            }
        }
    }
    Ok(())
}

fn standard_cards() -> Vec<Card> {
    vec![
        CreatureCard::new("Skeleton Warrior", 1, "A skeletal fighter.", 1, 1).into(),
        CreatureCard::new("Giant Skeleton", 5, "A massive skeleton of immense strength.", 5, 5).into(),
        CreatureCard::new("Zombie", 2, "A mindless undead creature.", 2, 2).into(),
        CreatureCard::new("Vampire", 4, "A bloodthirsty creature.", 3, 4).into(),
        CreatureCard::new("Goblin Scout", 1, "A sneaky goblin.", 1, 1).into(),
        CreatureCard::new("Orc Warrior", 3, "A strong orc.", 4, 3).into(),
        CreatureCard::new("Dragon Whelp", 2, "A young dragon.", 2, 3).into(),
        CreatureCard::new("Fire Elemental", 4, "A creature of fire.", 4, 4).into(),
        CreatureCard::new("Water Elemental", 4, "A creature of water.", 3, 5).into(),
        CreatureCard::new("Stone Golem", 6, "A giant made of stone.", 6, 6).into(),
        SpellCard::heal("Minor Heal", 1, "Restores 2 health.", 2).into(),
        SpellCard::heal("Medium Heal", 3, "Restores 5 health.", 5).into(),
        SpellCard::heal("Greater Heal", 5, "Restores 10 health.", 10).into(),
        SpellCard::direct_damage("Fireball", 3, "Deals 3 damage to a target.", 3).into(),
        SpellCard::direct_damage("Lightning", 2, "Deals 2 damage to a target.", 2).into(),
        SpellCard::direct_damage("Ice Blast", 4, "Deals 4 damage to the opponent.", 4).into(),
        SpellCard::damage_all("Earthquake", 5, "Deals 5 damage to every opposing creature.", 5).into(),
        SpellCard::buff_all("Shield", 2, "Gives every friendly creature +1 toughness.", 1).into(),
        SpellCard::revive("Necromancy", 5, "Brings a random creature back from your graveyard.").into(),
        TerrainCard::new("Enchanted Forest", "Grants extra mana.", TerrainEffect::ManaBonus).into(),
        TerrainCard::new("Healing Spring", "Restores health.", TerrainEffect::Heal).into(),
        RandomEffectCard::new(
            "Magic Chaos",
            3,
            "Unleashes a random effect.",
            [RandomEffect::Damage, RandomEffect::Heal, RandomEffect::ExtraMana],
        )
        .into(),
    ]
}
