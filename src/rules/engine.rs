//! Turn controller state machine.
//!
//! A match moves through
//! `AwaitingTurnStart → TurnInProgress → TurnResolved → (AwaitingTurnStart | GameOver)`.
//!
//! ## Turn sequence
//!
//! 1. The active player is `players[turn % players.len()]`.
//! 2. `start_turn` grants mana and draws one card.
//! 3. One committing action: `play_card`, `attack`, `pass` or `concede`.
//!    Inspections (`ViewHistory`, `ViewGraveyard`) do not commit.
//! 4. `end_turn` removes a defeated defender (or a conceding player),
//!    advances the turn index and checks for a winner.
//!
//! Every action method returns `Err` without touching state when the
//! action is rejected, so the caller may simply ask again.
//!
//! ## Example
//!
//! ```
//! use duel_engine::rules::GameBuilder;
//! use duel_engine::{GameConfig, GreedyAi, PlayerController, PlayerId};
//!
//! let mut game = GameBuilder::new()
//!     .with_config(GameConfig::default().with_seed(7))
//!     .player("Alice", false)
//!     .player("Bob", false)
//!     .build()
//!     .unwrap();
//!
//! let mut controllers: Vec<Box<dyn PlayerController>> = vec![
//!     Box::new(GreedyAi::new(PlayerId::new(0))),
//!     Box::new(GreedyAi::new(PlayerId::new(1))),
//! ];
//!
//! let result = game.run(&mut controllers, 500).unwrap();
//! assert!(result.is_some() || game.turn() == 500);
//! ```

use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::combat::{AttackOutcome, CombatResolver};
use crate::controllers::PlayerController;
use crate::core::{Action, GameConfig, GameEvent, GameState, History, Player, PlayerId, TurnPhase};
use crate::effects::{EffectResolver, RandomOutcome, SpellOutcome, Target, TerrainOutcome};
use crate::error::{ActionError, ActionResult, ConfigError};

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// No winner (no player left, or the caller stopped the match).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// What a successfully played card did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A creature entered the battlefield.
    Creature { name: String },
    /// A spell resolved (possibly fizzled).
    Spell { name: String, outcome: SpellOutcome },
    /// A terrain was activated.
    Terrain { name: String, outcome: TerrainOutcome },
    /// A random-effect card was activated.
    Random { name: String, outcome: RandomOutcome },
}

impl PlayOutcome {
    /// Name of the played card.
    #[must_use]
    pub fn card_name(&self) -> &str {
        match self {
            Self::Creature { name }
            | Self::Spell { name, .. }
            | Self::Terrain { name, .. }
            | Self::Random { name, .. } => name,
        }
    }
}

/// Data returned by a non-committing inspection action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inspection {
    /// History entries, oldest first.
    History(Vec<String>),
    /// The active player's graveyard, oldest first.
    Graveyard(Vec<Card>),
}

/// Read-only projection of the match for the player about to act.
#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    /// The acting player.
    pub me: &'a Player,
    /// The defending player.
    pub opponent: &'a Player,
    /// 1-based round number.
    pub round: u32,
    /// Match history so far.
    pub history: &'a History,
}

/// A running match.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    resolver: EffectResolver,
    conceded: Option<PlayerId>,
    result: Option<GameResult>,
}

impl Game {
    /// Wrap a prepared state. [`GameBuilder`](super::GameBuilder) is the
    /// public way in.
    pub(crate) fn new(config: GameConfig, state: GameState, resolver: EffectResolver) -> Result<Self, ConfigError> {
        if state.player_count() < 2 {
            return Err(ConfigError::NotEnoughPlayers(state.player_count()));
        }
        Ok(Self {
            config,
            state,
            resolver,
            conceded: None,
            result: None,
        })
    }

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Full match state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The effect resolver used by this match.
    #[must_use]
    pub fn resolver(&self) -> &EffectResolver {
        &self.resolver
    }

    /// Players still in the match, in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    /// Current turn index (0-based).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    /// The append-only match history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// Final result, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase == TurnPhase::GameOver
    }

    /// The player whose turn it is. `None` once nobody is left.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.state.active()
    }

    /// The player being attacked this turn. `None` once the match is
    /// down to one player.
    #[must_use]
    pub fn defending_player(&self) -> Option<&Player> {
        self.state.defending()
    }

    /// View for the active player's controller, while two players remain.
    #[must_use]
    pub fn view(&self) -> Option<GameView<'_>> {
        Some(GameView {
            me: self.state.active()?,
            opponent: self.state.defending()?,
            round: self.state.round(),
            history: &self.state.history,
        })
    }

    fn expect_phase(&self, expected: TurnPhase) -> ActionResult<()> {
        match self.state.phase {
            TurnPhase::GameOver => Err(ActionError::GameOver),
            actual if actual != expected => Err(ActionError::WrongPhase { expected, actual }),
            _ => Ok(()),
        }
    }

    /// Begin the active player's turn: grant mana, then draw.
    ///
    /// Returns the drawn card, or `None` if the deck was empty.
    pub fn start_turn(&mut self) -> ActionResult<Option<Card>> {
        self.expect_phase(TurnPhase::AwaitingTurnStart)?;

        let round = self.state.round();
        let mana_per_turn = self.config.mana_per_turn;
        let player = self.state.active_mut().ok_or(ActionError::MissingOpponent)?;
        player.mana += mana_per_turn;
        info!(round, player = %player.name, mana = player.mana, "turn started");

        let drawn = player.draw().cloned();
        self.state.phase = TurnPhase::TurnInProgress;
        Ok(drawn)
    }

    /// Draw a card for the active player outside the turn sequence.
    pub fn draw(&mut self) -> Option<Card> {
        if self.is_over() {
            return None;
        }
        self.state.active_mut()?.draw().cloned()
    }

    /// Play the card at `hand_index` from the active player's hand.
    ///
    /// `target` refers to the defending side and is only used by damage
    /// spells and random-effect cards. On success the card moves to the
    /// battlefield (creatures) or the graveyard (everything else).
    pub fn play_card(&mut self, hand_index: usize, target: Option<Target>) -> ActionResult<PlayOutcome> {
        self.expect_phase(TurnPhase::TurnInProgress)?;

        let round = self.state.round();
        let resolver = &self.resolver;
        let (active, defending, rng) = self
            .state
            .resolution_parts()
            .ok_or(ActionError::MissingOpponent)?;
        active.check_hand_index(hand_index)?;

        let mut card = active.hand.remove(hand_index);
        let result = match &mut card {
            Card::Creature(creature) => active
                .pay_mana(creature.info.mana_cost)
                .map(|()| PlayOutcome::Creature {
                    name: creature.info.name.clone(),
                }),
            Card::Spell(spell) => resolver
                .resolve_spell(spell, active, target, Some(defending), rng)
                .map(|outcome| PlayOutcome::Spell {
                    name: spell.info.name.clone(),
                    outcome,
                }),
            Card::Terrain(terrain) => Ok(PlayOutcome::Terrain {
                name: terrain.info.name.clone(),
                outcome: resolver.activate_terrain(terrain, active),
            }),
            Card::RandomEffect(random) => resolver
                .activate_random(random, active, target, Some(defending), rng)
                .map(|outcome| PlayOutcome::Random {
                    name: random.info.name.clone(),
                    outcome,
                }),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                active.hand.insert(hand_index, card);
                warn!(player = %active.name, hand_index, %err, "card play rejected");
                return Err(err);
            }
        };

        let player = active.name.clone();
        let event = match card {
            Card::Creature(creature) => {
                active.battlefield.push(creature);
                GameEvent::CardPlayed {
                    round,
                    player,
                    card: outcome.card_name().to_string(),
                }
            }
            Card::Spell(spell) => {
                active.graveyard.push(Card::Spell(spell));
                GameEvent::SpellUsed {
                    round,
                    player,
                    card: outcome.card_name().to_string(),
                }
            }
            spent => {
                active.graveyard.push(spent);
                GameEvent::CardPlayed {
                    round,
                    player,
                    card: outcome.card_name().to_string(),
                }
            }
        };

        self.commit(&event);
        Ok(outcome)
    }

    /// Attack with the active player's creature at `attacker`.
    ///
    /// `defender` must name a defending creature exactly when the defending
    /// battlefield is non-empty.
    pub fn attack(&mut self, attacker: usize, defender: Option<usize>) -> ActionResult<AttackOutcome> {
        self.expect_phase(TurnPhase::TurnInProgress)?;

        let round = self.state.round();
        let (active, defending, _) = self
            .state
            .resolution_parts()
            .ok_or(ActionError::MissingOpponent)?;

        let outcome = CombatResolver::resolve_attack(attacker, active, defending, defender)
            .inspect_err(|err| warn!(player = %active.name, attacker, %err, "attack rejected"))?;

        let player = active.name.clone();
        let event = match &outcome {
            AttackOutcome::HitPlayer { attacker, defender, .. } => GameEvent::AttackedPlayer {
                round,
                player,
                attacker: attacker.name.clone(),
                power: attacker.power,
                toughness: attacker.toughness,
                defender: defender.clone(),
            },
            AttackOutcome::HitCreature {
                attacker,
                defender_power,
                damage,
            } => GameEvent::AttackedCreature {
                round,
                player,
                attacker: attacker.name.clone(),
                power: attacker.power,
                toughness: attacker.toughness,
                defender: damage.name.clone(),
                defender_power: *defender_power,
                defender_toughness: damage.remaining,
            },
        };

        self.commit(&event);
        Ok(outcome)
    }

    /// End the turn without acting.
    pub fn pass(&mut self) -> ActionResult<()> {
        self.expect_phase(TurnPhase::TurnInProgress)?;
        let event = GameEvent::Passed {
            round: self.state.round(),
            player: self.state.active().ok_or(ActionError::MissingOpponent)?.name.clone(),
        };
        self.commit(&event);
        Ok(())
    }

    /// The active player leaves the match. Takes effect at `end_turn`.
    pub fn concede(&mut self) -> ActionResult<()> {
        self.expect_phase(TurnPhase::TurnInProgress)?;
        let active = self.state.active().ok_or(ActionError::MissingOpponent)?;
        let event = GameEvent::Conceded {
            round: self.state.round(),
            player: active.name.clone(),
        };
        self.conceded = Some(active.id);
        self.commit(&event);
        Ok(())
    }

    fn commit(&mut self, event: &GameEvent) {
        info!(%event, "action committed");
        self.state.record(event);
        self.state.phase = TurnPhase::TurnResolved;
    }

    /// Run a structured action for the active player.
    ///
    /// Returns inspection data for `ViewHistory` and `ViewGraveyard`, which
    /// leave the turn in progress.
    pub fn apply_action(&mut self, action: &Action) -> ActionResult<Option<Inspection>> {
        match action {
            Action::PlayCard { hand_index, target } => {
                self.play_card(*hand_index, *target).map(|_| None)
            }
            Action::Attack { attacker, defender } => self.attack(*attacker, *defender).map(|_| None),
            Action::Pass => self.pass().map(|()| None),
            Action::Concede => self.concede().map(|()| None),
            Action::ViewHistory => {
                self.expect_phase(TurnPhase::TurnInProgress)?;
                Ok(Some(Inspection::History(self.state.history.to_vec())))
            }
            Action::ViewGraveyard => {
                self.expect_phase(TurnPhase::TurnInProgress)?;
                let active = self.state.active().ok_or(ActionError::MissingOpponent)?;
                Ok(Some(Inspection::Graveyard(active.graveyard.clone())))
            }
        }
    }

    /// Finish the turn: remove a defeated defender or a conceding player,
    /// advance the turn index, and check for a winner.
    pub fn end_turn(&mut self) -> ActionResult<Option<GameResult>> {
        self.expect_phase(TurnPhase::TurnResolved)?;

        let round = self.state.round();
        let defeated = self.state.defending().filter(|p| p.is_defeated()).map(|p| p.id);

        let mut eliminated: Vec<PlayerId> = self.conceded.take().into_iter().collect();
        if let Some(defending) = defeated.filter(|id| !eliminated.contains(id)) {
            eliminated.push(defending);
        }

        for id in eliminated {
            if let Some(player) = self.state.remove_player(id) {
                info!(round, player = %player.name, health = player.health, "player defeated");
                self.state.record(&GameEvent::Defeated {
                    round,
                    player: player.name,
                });
            }
        }

        self.state.turn += 1;

        let result = match self.state.players.as_slice() {
            [winner] => Some(GameResult::Winner(winner.id)),
            [] => Some(GameResult::Draw),
            _ => None,
        };

        if let Some(GameResult::Winner(id)) = result {
            if let Some(winner) = self.state.player(id) {
                let event = GameEvent::Victory {
                    round,
                    player: winner.name.clone(),
                };
                info!(%event, "match over");
                self.state.record(&event);
            }
        }

        self.state.phase = if result.is_some() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingTurnStart
        };
        self.result.clone_from(&result);
        debug!(turn = self.state.turn, phase = ?self.state.phase, "turn ended");
        Ok(result)
    }

    /// Play one full turn, asking the active player's controller for
    /// actions.
    ///
    /// Rejected actions and inspections ask again, up to
    /// `max_action_attempts` requests; after that the turn is passed.
    pub fn play_turn(&mut self, controllers: &mut [Box<dyn PlayerController>]) -> ActionResult<Option<GameResult>> {
        if self.is_over() {
            return Err(ActionError::GameOver);
        }
        let id = self.state.active().ok_or(ActionError::MissingOpponent)?.id;
        let controller = controllers
            .iter_mut()
            .find(|c| c.player_id() == id)
            .ok_or(ActionError::MissingController(id))?;

        self.start_turn()?;

        let mut attempts = 0;
        while self.state.phase == TurnPhase::TurnInProgress {
            if attempts >= self.config.max_action_attempts {
                warn!(player = %id, attempts, "too many attempts, passing turn");
                self.pass()?;
                break;
            }
            attempts += 1;

            let view = self.view().ok_or(ActionError::MissingOpponent)?;
            let action = controller.choose_action(&view);
            debug!(player = %id, %action, "controller chose action");
            match self.apply_action(&action) {
                Ok(Some(inspection)) => controller.on_inspect(&inspection),
                Ok(None) => {}
                Err(err) => controller.on_rejected(&action, &err),
            }
        }

        let result = self.end_turn()?;
        if let Some(result) = &result {
            for controller in controllers.iter_mut() {
                controller.on_game_end(result);
            }
        }
        Ok(result)
    }

    /// Play turns until the match ends or `max_turns` turns have been
    /// played in total.
    ///
    /// Returns the result, or `None` if the turn cap was reached first.
    pub fn run(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
        max_turns: u32,
    ) -> ActionResult<Option<GameResult>> {
        while !self.is_over() && self.state.turn < max_turns {
            self.play_turn(controllers)?;
        }
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::cards::{CreatureCard, SpellCard};
    use crate::core::GameRng;
    use crate::rules::GameBuilder;

    fn empty_game() -> Game {
        GameBuilder::new()
            .player_with_deck("Alice", true, VecDeque::new())
            .player_with_deck("Bob", false, VecDeque::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_phase_gates() {
        let mut game = empty_game();

        assert_eq!(
            game.pass(),
            Err(ActionError::WrongPhase {
                expected: TurnPhase::TurnInProgress,
                actual: TurnPhase::AwaitingTurnStart,
            })
        );
        assert!(matches!(game.end_turn(), Err(ActionError::WrongPhase { .. })));

        game.start_turn().unwrap();
        assert!(matches!(game.start_turn(), Err(ActionError::WrongPhase { .. })));

        game.pass().unwrap();
        assert_eq!(game.phase(), TurnPhase::TurnResolved);
        assert!(matches!(game.pass(), Err(ActionError::WrongPhase { .. })));
    }

    #[test]
    fn test_start_turn_grants_mana_and_draws() {
        let mut game = empty_game();
        game.state.players[0]
            .deck
            .push_back(CreatureCard::new("Zombie", 2, "", 2, 2).into());

        let drawn = game.start_turn().unwrap();

        assert_eq!(drawn.as_ref().map(Card::name), Some("Zombie"));
        assert_eq!(game.players()[0].mana, 1);
        assert_eq!(game.players()[0].hand.len(), 1);
        assert_eq!(game.phase(), TurnPhase::TurnInProgress);
    }

    #[test]
    fn test_rejected_play_leaves_hand_intact() {
        let mut game = empty_game();
        game.state.players[0]
            .hand
            .push(SpellCard::heal("Greater Heal", 5, "", 10).into());
        game.start_turn().unwrap();

        let err = game.play_card(0, None).unwrap_err();

        assert!(matches!(err, ActionError::InsufficientMana { required: 5, available: 1 }));
        assert_eq!(game.players()[0].hand.len(), 1);
        assert_eq!(game.players()[0].mana, 1);
        assert_eq!(game.phase(), TurnPhase::TurnInProgress);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_play_creature_and_spell() {
        let mut game = empty_game();
        {
            let alice = &mut game.state.players[0];
            alice.mana = 4;
            alice.hand.push(CreatureCard::new("Zombie", 2, "", 2, 2).into());
            alice.hand.push(SpellCard::heal("Minor Heal", 1, "", 2).into());
        }

        game.start_turn().unwrap();
        let outcome = game.play_card(0, None).unwrap();
        assert_eq!(outcome, PlayOutcome::Creature { name: "Zombie".into() });
        assert_eq!(game.players()[0].battlefield.len(), 1);
        assert_eq!(game.players()[0].mana, 3);
        game.end_turn().unwrap();

        // Bob passes
        game.start_turn().unwrap();
        game.pass().unwrap();
        game.end_turn().unwrap();

        game.start_turn().unwrap();
        game.play_card(0, None).unwrap();
        assert_eq!(game.players()[0].health, 22);
        assert_eq!(game.players()[0].graveyard.len(), 1);

        assert_eq!(
            game.history().to_vec(),
            vec![
                "Round 1 - Alice: Played Zombie",
                "Round 2 - Bob: Passed",
                "Round 3 - Alice: Used Minor Heal",
            ]
        );
    }

    #[test]
    fn test_inspection_does_not_commit() {
        let mut game = empty_game();
        game.start_turn().unwrap();

        let inspection = game.apply_action(&Action::ViewHistory).unwrap();
        assert_eq!(inspection, Some(Inspection::History(vec![])));
        assert_eq!(game.phase(), TurnPhase::TurnInProgress);

        let inspection = game.apply_action(&Action::ViewGraveyard).unwrap();
        assert_eq!(inspection, Some(Inspection::Graveyard(vec![])));
        assert_eq!(game.phase(), TurnPhase::TurnInProgress);
    }

    #[test]
    fn test_win_condition() {
        let mut game = empty_game();
        {
            let state = &mut game.state;
            state.players[0].battlefield.push(CreatureCard::new("Orc Warrior", 3, "", 3, 3));
            state.players[1].health = 1;
        }

        game.start_turn().unwrap();
        game.attack(0, None).unwrap();
        let result = game.end_turn().unwrap();

        assert_eq!(result, Some(GameResult::Winner(PlayerId::new(0))));
        assert!(game.is_over());
        assert_eq!(game.players().len(), 1);
        assert_eq!(
            game.history().to_vec(),
            vec![
                "Round 1 - Alice: Orc Warrior(P:3, T:3) attacked Bob directly",
                "Round 1: Bob was defeated!",
                "Round 1: Alice is the winner!",
            ]
        );
        assert_eq!(game.start_turn(), Err(ActionError::GameOver));
        assert!(game.draw().is_none());
    }

    #[test]
    fn test_concede() {
        let mut game = empty_game();
        game.start_turn().unwrap();
        game.concede().unwrap();

        let result = game.end_turn().unwrap();
        assert_eq!(result, Some(GameResult::Winner(PlayerId::new(1))));
        assert_eq!(game.history().last().map(String::as_str), Some("Round 1: Bob is the winner!"));
    }

    fn seated(names: &[&str]) -> Game {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as u8), *name, 20, false))
            .collect();
        Game {
            config: GameConfig::default(),
            state: GameState::new(players, GameRng::new(1)),
            resolver: EffectResolver::new(Default::default()),
            conceded: None,
            result: None,
        }
    }

    #[test]
    fn test_new_needs_two_players() {
        let cases: [&[&str]; 2] = [&[], &["Solo"]];
        for names in cases {
            let state = seated(names).state;
            let err = Game::new(GameConfig::default(), state, EffectResolver::new(Default::default()));
            assert!(matches!(err, Err(ConfigError::NotEnoughPlayers(n)) if n == names.len()));
        }

        let state = seated(&["Alice", "Bob"]).state;
        assert!(Game::new(GameConfig::default(), state, EffectResolver::new(Default::default())).is_ok());
    }

    #[test]
    fn test_missing_opponent_with_one_seat() {
        let mut game = seated(&["Solo"]);
        game.start_turn().unwrap();
        assert_eq!(game.attack(0, None).unwrap_err(), ActionError::MissingOpponent);
        assert!(game.defending_player().is_none());
        assert!(game.view().is_none());
    }

    #[test]
    fn test_no_players_is_an_error_not_a_panic() {
        let mut game = seated(&[]);

        assert_eq!(game.start_turn(), Err(ActionError::MissingOpponent));
        assert!(game.draw().is_none());
        assert!(game.active_player().is_none());
        assert!(game.defending_player().is_none());
        assert!(game.view().is_none());

        let mut controllers: Vec<Box<dyn PlayerController>> =
            vec![Box::new(crate::controllers::ScriptedController::new(PlayerId::new(0), []))];
        assert_eq!(game.play_turn(&mut controllers), Err(ActionError::MissingOpponent));
        assert_eq!(game.phase(), TurnPhase::AwaitingTurnStart);
    }

    #[test]
    fn test_after_win_only_the_winner_is_seated() {
        let mut game = empty_game();
        game.state.players[1].health = 1;
        game.state.players[0].battlefield.push(CreatureCard::new("Zombie", 2, "", 2, 2));

        game.start_turn().unwrap();
        game.attack(0, None).unwrap();
        game.end_turn().unwrap();

        assert_eq!(game.active_player().map(|p| p.name.as_str()), Some("Alice"));
        assert!(game.defending_player().is_none());
        assert!(game.view().is_none());
    }
}
