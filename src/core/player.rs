//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Stable identifier assigned at match setup. It survives removal of other
//! players from the match, unlike a seat index.
//!
//! ## Player
//!
//! Plain data holder: health, mana and the four card containers. The only
//! behavior here is bookkeeping that cannot break an invariant on its own
//! (drawing, paying mana, taking damage). Everything that crosses players
//! lives in the resolvers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{Card, CreatureCard};
use crate::error::{ActionError, ActionResult};

/// Player identifier.
///
/// Ids are 0-based and assigned in seating order: the first player is
/// `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Result of damaging a creature on a battlefield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureDamage {
    /// Name of the damaged creature.
    pub name: String,
    /// Damage dealt.
    pub amount: i32,
    /// Toughness left after the damage (may be negative).
    pub remaining: i32,
    /// Whether the creature was moved to the graveyard.
    pub destroyed: bool,
}

/// Per-player match state.
///
/// `deck` front is the next draw. `hand` keeps acquisition order and is
/// addressed by index. `battlefield` only ever holds creatures with positive
/// toughness once a resolution step finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// May go negative before the defeat check runs.
    pub health: i32,
    pub mana: u32,
    pub deck: VecDeque<Card>,
    pub hand: Vec<Card>,
    pub battlefield: Vec<CreatureCard>,
    pub graveyard: Vec<Card>,
    /// Human seats are driven by a front-end; the rest get a `GreedyAi`
    /// from `controllers::ai_controllers`.
    pub is_human: bool,
}

impl Player {
    /// Create a player with empty containers.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, health: i32, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            health,
            mana: 0,
            deck: VecDeque::new(),
            hand: Vec::new(),
            battlefield: Vec::new(),
            graveyard: Vec::new(),
            is_human,
        }
    }

    /// Draw the front card of the deck into the hand.
    ///
    /// Returns `None` when the deck is empty. That is not an error: the turn
    /// goes on.
    pub fn draw(&mut self) -> Option<&Card> {
        let Some(card) = self.deck.pop_front() else {
            warn!(player = %self.name, "deck is empty, nothing drawn");
            return None;
        };
        debug!(player = %self.name, card = card.name(), "drew a card");
        self.hand.push(card);
        self.hand.last()
    }

    /// Check that `cost` can be paid without touching mana.
    pub fn can_pay(&self, cost: u32) -> ActionResult<()> {
        if self.mana < cost {
            return Err(ActionError::InsufficientMana {
                required: cost,
                available: self.mana,
            });
        }
        Ok(())
    }

    /// Debit `cost` mana. Fails with no mutation if mana is insufficient.
    pub fn pay_mana(&mut self, cost: u32) -> ActionResult<()> {
        self.can_pay(cost)?;
        self.mana -= cost;
        Ok(())
    }

    /// Subtract `amount` from health unconditionally.
    pub fn receive_damage(&mut self, amount: i32) {
        self.health -= amount;
        debug!(player = %self.name, amount, health = self.health, "player takes damage");
    }

    /// Add `amount` to health.
    pub fn heal(&mut self, amount: i32) {
        self.health += amount;
        debug!(player = %self.name, amount, health = self.health, "player heals");
    }

    /// Has this player lost?
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Validate a hand index.
    pub fn check_hand_index(&self, index: usize) -> ActionResult<()> {
        if index >= self.hand.len() {
            return Err(ActionError::InvalidHandIndex {
                index,
                len: self.hand.len(),
            });
        }
        Ok(())
    }

    /// Damage the creature at `index` on this player's battlefield.
    ///
    /// A creature left with toughness ≤ 0 is moved to the graveyard in the
    /// same step.
    pub fn damage_creature(&mut self, index: usize, amount: i32) -> ActionResult<CreatureDamage> {
        let creature = self
            .battlefield
            .get_mut(index)
            .ok_or_else(|| ActionError::InvalidTarget(format!("no creature at index {index}")))?;

        let destroyed = creature.take_damage(amount);
        let result = CreatureDamage {
            name: creature.info.name.clone(),
            amount,
            remaining: creature.toughness,
            destroyed,
        };

        if destroyed {
            self.bury_creature(index);
        }
        Ok(result)
    }

    /// Move the creature at `index` from the battlefield to the graveyard.
    fn bury_creature(&mut self, index: usize) {
        let creature = self.battlefield.remove(index);
        debug!(player = %self.name, creature = %creature.info.name, "creature sent to graveyard");
        self.graveyard.push(Card::Creature(creature));
    }

    /// Indices of creature cards in the graveyard, oldest first.
    #[must_use]
    pub fn graveyard_creatures(&self) -> Vec<usize> {
        self.graveyard
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_creature())
            .map(|(i, _)| i)
            .collect()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: health = {}, mana = {}, hand = {}, battlefield = {}",
            self.name,
            self.health,
            self.mana,
            self.hand.len(),
            self.battlefield.len()
        )
    }
}
