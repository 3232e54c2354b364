//! Greedy AI controller.
//!
//! Picks one committing action per turn by fixed priority:
//!
//! 1. Below 10 health, cast the first affordable heal.
//! 2. If the opponent has creatures, cast an affordable damage spell.
//!    Targeted spells go first and aim at the opponent's lowest-toughness
//!    creature; otherwise the first affordable `damage_all`.
//! 3. Play the first affordable creature.
//! 4. Attack with the highest-power creature, at the opponent's
//!    lowest-toughness creature if there is one, otherwise directly.
//! 5. Pass.
//!
//! Ties always go to the earliest index, so the policy is deterministic.

use tracing::debug;

use super::PlayerController;
use crate::cards::Card;
use crate::core::{Action, PlayerId};
use crate::effects::{strongest_creature, weakest_creature, SpellKind, Target};
use crate::error::ActionError;
use crate::rules::GameView;

/// Health below which the AI heals first.
const LOW_HEALTH: i32 = 10;

/// Deterministic greedy controller.
#[derive(Clone, Debug)]
pub struct GreedyAi {
    player_id: PlayerId,
}

impl GreedyAi {
    #[must_use]
    pub fn new(player_id: PlayerId) -> Self {
        Self { player_id }
    }

    /// Choose an action for `view` without side effects.
    #[must_use]
    pub fn decide(view: &GameView<'_>) -> Action {
        let me = view.me;
        let opponent = view.opponent;

        let affordable_spells = move || {
            me.hand.iter().enumerate().filter_map(move |(i, card)| match card {
                Card::Spell(spell) if spell.info.mana_cost <= me.mana => Some((i, spell)),
                _ => None,
            })
        };

        if me.health < LOW_HEALTH {
            if let Some((i, _)) = affordable_spells().find(|(_, s)| s.spell_kind == SpellKind::Heal) {
                return Action::play(i);
            }
        }

        if let Some(weakest) = weakest_creature(&opponent.battlefield) {
            if let Some((i, _)) = affordable_spells().find(|(_, s)| s.has_target) {
                return Action::play_at(i, Target::Creature(weakest));
            }
            if let Some((i, _)) = affordable_spells().find(|(_, s)| s.affects_all) {
                return Action::play(i);
            }
        }

        if let Some(i) = me
            .hand
            .iter()
            .position(|card| card.is_creature() && card.mana_cost() <= me.mana)
        {
            return Action::play(i);
        }

        if let Some(attacker) = strongest_creature(&me.battlefield) {
            return Action::Attack {
                attacker,
                defender: weakest_creature(&opponent.battlefield),
            };
        }

        Action::Pass
    }
}

impl PlayerController for GreedyAi {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, view: &GameView<'_>) -> Action {
        Self::decide(view)
    }

    fn on_rejected(&mut self, action: &Action, error: &ActionError) {
        debug!(player = %self.player_id, %action, %error, "greedy action rejected");
    }
}
