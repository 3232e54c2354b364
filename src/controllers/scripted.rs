//! Scripted player controller for tests and replays.
//!
//! Follows a predetermined queue of actions and passes once the queue is
//! empty. Rejections and inspections are kept so tests can assert on them.

use std::collections::VecDeque;

use super::PlayerController;
use crate::core::{Action, PlayerId};
use crate::error::ActionError;
use crate::rules::{GameResult, GameView, Inspection};

/// A controller that follows a predetermined sequence of actions.
#[derive(Clone, Debug)]
pub struct ScriptedController {
    player_id: PlayerId,
    actions: VecDeque<Action>,
    rejected: Vec<(Action, ActionError)>,
    inspections: Vec<Inspection>,
    result: Option<GameResult>,
}

impl ScriptedController {
    /// Create a scripted controller with a sequence of actions.
    pub fn new(player_id: PlayerId, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            player_id,
            actions: actions.into_iter().collect(),
            rejected: Vec::new(),
            inspections: Vec::new(),
            result: None,
        }
    }

    /// Actions not played yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    /// Rejected actions with their errors, oldest first.
    #[must_use]
    pub fn rejected(&self) -> &[(Action, ActionError)] {
        &self.rejected
    }

    /// Data received from inspection actions, oldest first.
    #[must_use]
    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    /// The match result, once reported.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameView<'_>) -> Action {
        self.actions.pop_front().unwrap_or(Action::Pass)
    }

    fn on_rejected(&mut self, action: &Action, error: &ActionError) {
        self.rejected.push((action.clone(), error.clone()));
    }

    fn on_inspect(&mut self, inspection: &Inspection) {
        self.inspections.push(inspection.clone());
    }

    fn on_game_end(&mut self, result: &GameResult) {
        self.result = Some(result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{History, Player};

    #[test]
    fn test_scripted_controller() {
        let me = Player::new(PlayerId::new(0), "A", 20, true);
        let opponent = Player::new(PlayerId::new(1), "B", 20, false);
        let history = History::new();
        let view = GameView {
            me: &me,
            opponent: &opponent,
            round: 1,
            history: &history,
        };

        let mut controller =
            ScriptedController::new(PlayerId::new(0), [Action::play(0), Action::attack_player(1)]);

        assert_eq!(controller.player_id(), PlayerId::new(0));
        assert_eq!(controller.choose_action(&view), Action::play(0));
        assert_eq!(controller.choose_action(&view), Action::attack_player(1));
        assert_eq!(controller.remaining(), 0);

        // Out of script: pass
        assert_eq!(controller.choose_action(&view), Action::Pass);
    }

    #[test]
    fn test_records_feedback() {
        let mut controller = ScriptedController::new(PlayerId::new(1), []);

        controller.on_rejected(&Action::play(4), &ActionError::InvalidHandIndex { index: 4, len: 0 });
        controller.on_inspect(&Inspection::History(vec!["Round 1 - A: Passed".into()]));
        controller.on_game_end(&GameResult::Winner(PlayerId::new(1)));

        assert_eq!(controller.rejected().len(), 1);
        assert_eq!(controller.inspections().len(), 1);
        assert_eq!(controller.result(), Some(&GameResult::Winner(PlayerId::new(1))));
    }
}
