//! Match state: players still in the match, turn index, phase, history, RNG.
//!
//! `GameState` is the single mutable resource of a match. The turn
//! controller owns it and hands out borrows to the resolvers.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::player::{Player, PlayerId};
use super::rng::GameRng;

/// Turn controller states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for `start_turn` (mana grant and draw not done yet).
    AwaitingTurnStart,
    /// The active player may act.
    TurnInProgress,
    /// The active player committed an action; `end_turn` runs the checks.
    TurnResolved,
    /// One player remains. Terminal.
    GameOver,
}

/// Append-only log of human-readable event lines.
///
/// Backed by an `im::Vector`, so handing a snapshot to a reader is O(1)
/// and the snapshot is unaffected by later appends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vector<String>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the line for `event`.
    pub fn record(&mut self, event: &GameEvent) {
        self.entries.push_back(event.to_string());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the history empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &String> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&String> {
        self.entries.last()
    }

    /// Copy the entries into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// Full match state.
///
/// Only the turn controller and the resolvers it calls mutate the state.
/// Outside the crate it is read through accessors.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Players still in the match, in seating order.
    pub(crate) players: Vec<Player>,

    /// Turn index, starts at 0 and only increases.
    pub(crate) turn: u32,

    /// Current turn controller state.
    pub(crate) phase: TurnPhase,

    /// Committed events.
    pub(crate) history: History,

    /// In-match random source (revive target, random effects).
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Create a new state for the given players.
    #[must_use]
    pub(crate) fn new(players: Vec<Player>, rng: GameRng) -> Self {
        Self {
            players,
            turn: 0,
            phase: TurnPhase::AwaitingTurnStart,
            history: History::new(),
            rng,
        }
    }

    /// Players still in the match, in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Turn index (0-based).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The append-only history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of players still in the match.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// 1-based round number shown in the history.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.turn + 1
    }

    /// Seat of the active player: turn index modulo remaining players.
    /// `None` once no player is left.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        match self.players.len() {
            0 => None,
            n => Some(self.turn as usize % n),
        }
    }

    /// Seat of the defending player (the next seat after the active one).
    /// `None` with fewer than two players.
    #[must_use]
    pub fn defending_index(&self) -> Option<usize> {
        match self.players.len() {
            0 | 1 => None,
            n => Some((self.turn as usize + 1) % n),
        }
    }

    /// The active player.
    #[must_use]
    pub fn active(&self) -> Option<&Player> {
        self.players.get(self.active_index()?)
    }

    /// The defending player.
    #[must_use]
    pub fn defending(&self) -> Option<&Player> {
        self.players.get(self.defending_index()?)
    }

    /// Mutable access to the active player.
    pub(crate) fn active_mut(&mut self) -> Option<&mut Player> {
        let idx = self.active_index()?;
        self.players.get_mut(idx)
    }

    /// Mutable borrows of the active and defending players at once.
    ///
    /// Returns `None` when fewer than two players remain.
    pub(crate) fn combatants_mut(&mut self) -> Option<(&mut Player, &mut Player)> {
        let active = self.active_index()?;
        let defending = self.defending_index()?;
        pair_mut(&mut self.players, active, defending)
    }

    /// Active player, defending player and the match RNG, borrowed together
    /// for a resolution step.
    pub(crate) fn resolution_parts(&mut self) -> Option<(&mut Player, &mut Player, &mut GameRng)> {
        let active = self.active_index()?;
        let defending = self.defending_index()?;
        let (a, d) = pair_mut(&mut self.players, active, defending)?;
        Some((a, d, &mut self.rng))
    }

    /// Look a player up by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Remove a player from the match, returning it.
    pub(crate) fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let pos = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(pos))
    }

    /// Append an event to the history.
    pub(crate) fn record(&mut self, event: &GameEvent) {
        self.history.record(event);
    }
}

/// Borrow two distinct elements of a slice mutably.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
