//! Card system: definitions, catalog, and deck building.
//!
//! ## Key Types
//!
//! - `Card`: Sum type over creature, spell, terrain and random-effect cards
//! - `CardInfo`: Name, mana cost and description shared by every variant
//! - `CardCatalog`: Immutable set of card definitions, looked up by name
//! - `BaseToughness`: Name → printed toughness table used by revival
//!
//! ## Copies
//!
//! Decks hold clones of catalog entries. Every clone is an independent
//! instance, so damage on one "Zombie" never leaks into another.

pub mod catalog;
pub mod deck;
pub mod definition;

pub use catalog::{BaseToughness, CardCatalog};
pub use deck::{deck_from_names, random_deck, shuffle_deck};
pub use definition::{Card, CardInfo, CreatureCard, RandomEffectCard, SpellCard, TerrainCard};
