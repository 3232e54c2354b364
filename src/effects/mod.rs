//! Effect system for spells, terrains and random cards.
//!
//! - `SpellKind`, `TerrainEffect`, `RandomEffect`: effect tags carried by cards
//! - `Target`: where an effect lands on the defending side
//! - `EffectResolver`: applies an effect tag to player state
//!
//! Dispatch is an exhaustive `match` on the tag. Adding a spell kind is a
//! compile error everywhere it is not yet handled.

mod effect;
mod resolver;
mod targeting;

pub use effect::{RandomEffect, RandomOutcome, SpellKind, SpellOutcome, TerrainEffect, TerrainOutcome};
pub use resolver::EffectResolver;
pub use targeting::{strongest_creature, weakest_creature, Target};
