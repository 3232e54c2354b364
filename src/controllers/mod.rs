//! Player controllers.
//!
//! A controller is the action provider for one player. The turn controller
//! hands it a read-only [`GameView`] and gets back a structured [`Action`].
//! Front-ends that read keystrokes implement this trait and translate
//! input into actions; the engine never parses text.
//!
//! - `GreedyAi`: fixed-priority policy, deterministic for a given view
//! - `ScriptedController`: replays a queue of actions, then passes
//!
//! [`ai_controllers`] seats a `GreedyAi` for every player whose `is_human`
//! flag is off. Human seats are left to the front-end.

mod greedy;
mod scripted;

pub use greedy::GreedyAi;
pub use scripted::ScriptedController;

use crate::core::{Action, Player, PlayerId};
use crate::error::ActionError;
use crate::rules::{GameResult, GameView, Inspection};

/// Player controller trait.
///
/// Implement this trait to create AI players or connect to a UI.
/// The game calls these methods when the controlled player must act.
pub trait PlayerController {
    /// The player this controller acts for.
    fn player_id(&self) -> PlayerId;

    /// Choose the next action for the current turn.
    fn choose_action(&mut self, view: &GameView<'_>) -> Action;

    /// Called when the chosen action was rejected. The turn goes on and
    /// `choose_action` is called again.
    fn on_rejected(&mut self, _action: &Action, _error: &ActionError) {}

    /// Called with the data of an inspection action.
    fn on_inspect(&mut self, _inspection: &Inspection) {}

    /// Called once when the match ends.
    fn on_game_end(&mut self, _result: &GameResult) {}
}

/// A `GreedyAi` for every non-human player, in seating order.
///
/// Human players get no controller here; the caller adds one for each
/// (a UI bridge, or a `ScriptedController` in tests).
#[must_use]
pub fn ai_controllers(players: &[Player]) -> Vec<Box<dyn PlayerController>> {
    players
        .iter()
        .filter(|p| !p.is_human)
        .map(|p| Box::new(GreedyAi::new(p.id)) as Box<dyn PlayerController>)
        .collect()
}
