//! Combat resolution between creatures and players.

mod resolver;

pub use resolver::{AttackOutcome, Attacker, CombatResolver};
