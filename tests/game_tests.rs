//! Turn controller integration tests.

use std::collections::VecDeque;

use duel_engine::{
    ai_controllers, Action, ActionError, Card, CardCatalog, CreatureCard, Game, GameBuilder, GameConfig, GameResult,
    GreedyAi, PlayerController, PlayerId, ScriptedController, Target, TurnPhase,
};

fn catalog_card(name: &str) -> Card {
    CardCatalog::standard()
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("{name} missing from the standard catalog"))
}

fn seat(config: GameConfig, alice: Vec<Card>, bob: Vec<Card>) -> GameBuilder {
    GameBuilder::new()
        .with_config(config.with_starting_hand_size(0))
        .player_with_deck("Alice", false, VecDeque::from(alice))
        .player_with_deck("Bob", false, VecDeque::from(bob))
}

fn duel(config: GameConfig, alice: Vec<Card>, bob: Vec<Card>) -> Game {
    seat(config, alice, bob).build().unwrap()
}

fn greedy_pair() -> Vec<Box<dyn PlayerController>> {
    vec![
        Box::new(GreedyAi::new(PlayerId::new(0))),
        Box::new(GreedyAi::new(PlayerId::new(1))),
    ]
}

// =============================================================================
// Turn Flow
// =============================================================================

#[test]
fn test_spell_mana_gate_in_match() {
    let mut game = duel(GameConfig::default(), vec![catalog_card("Fireball")], vec![]);

    game.start_turn().unwrap();
    let err = game.play_card(0, Some(Target::Player)).unwrap_err();

    assert_eq!(err, ActionError::InsufficientMana { required: 3, available: 1 });
    assert_eq!(game.active_player().unwrap().hand.len(), 1);
    assert_eq!(game.active_player().unwrap().mana, 1);
    assert_eq!(game.defending_player().unwrap().health, 20);
    assert_eq!(game.phase(), TurnPhase::TurnInProgress);
}

#[test]
fn test_empty_deck_draw_is_not_an_error() {
    let mut game = duel(GameConfig::default(), vec![], vec![]);

    assert_eq!(game.start_turn().unwrap(), None);
    assert_eq!(game.active_player().unwrap().mana, 1);
}

#[test]
fn test_mana_accumulates_across_turns() {
    let mut game = duel(GameConfig::default(), vec![], vec![]);

    for _ in 0..6 {
        game.start_turn().unwrap();
        game.pass().unwrap();
        game.end_turn().unwrap();
    }

    assert_eq!(game.players()[0].mana, 3);
    assert_eq!(game.players()[1].mana, 3);
    assert_eq!(game.turn(), 6);
}

#[test]
fn test_win_condition() {
    let mut game = seat(
        GameConfig::default(),
        vec![CreatureCard::new("Orc Warrior", 0, "", 4, 3).into()],
        vec![],
    )
    .with_player_health(1, 4)
    .build()
    .unwrap();

    game.start_turn().unwrap();
    game.play_card(0, None).unwrap();
    assert_eq!(game.end_turn().unwrap(), None);

    game.start_turn().unwrap();
    game.pass().unwrap();
    game.end_turn().unwrap();

    game.start_turn().unwrap();
    game.attack(0, None).unwrap();
    let result = game.end_turn().unwrap();

    assert_eq!(result, Some(GameResult::Winner(PlayerId::new(0))));
    assert!(game.is_over());
    assert_eq!(game.players().len(), 1);
    let lines = game.history().to_vec();
    assert_eq!(lines[lines.len() - 2], "Round 3: Bob was defeated!");
    assert_eq!(lines[lines.len() - 1], "Round 3: Alice is the winner!");

    assert_eq!(game.start_turn().unwrap_err(), ActionError::GameOver);
}

#[test]
fn test_fireball_finishes_match_and_run_halts() {
    let mut game = seat(
        GameConfig::default().with_starting_mana(2),
        vec![catalog_card("Fireball")],
        vec![],
    )
    .with_player_health(1, 1)
    .build()
    .unwrap();
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![
        Box::new(ScriptedController::new(
            PlayerId::new(0),
            [Action::play_at(0, Target::Player)],
        )),
        Box::new(ScriptedController::new(PlayerId::new(1), [])),
    ];

    let result = game.run(&mut controllers, 100).unwrap();

    assert_eq!(result, Some(GameResult::Winner(PlayerId::new(0))));
    assert_eq!(game.turn(), 1);
    assert_eq!(game.players()[0].mana, 0);
    assert_eq!(
        game.history().iter().next().map(String::as_str),
        Some("Round 1 - Alice: Used Fireball")
    );
}

#[test]
fn test_heal_spell_through_game() {
    let mut game = seat(
        GameConfig::default().with_starting_mana(4),
        vec![catalog_card("Medium Heal")],
        vec![],
    )
    .with_player_health(0, 12)
    .build()
    .unwrap();

    game.start_turn().unwrap();
    game.play_card(0, None).unwrap();

    assert_eq!(game.active_player().unwrap().health, 17);
    assert_eq!(game.active_player().unwrap().mana, 2);
    assert_eq!(game.active_player().unwrap().graveyard.len(), 1);
    assert_eq!(
        game.history().last().map(String::as_str),
        Some("Round 1 - Alice: Used Medium Heal")
    );
}

#[test]
fn test_terrain_goes_to_graveyard() {
    let mut game = duel(GameConfig::default(), vec![catalog_card("Enchanted Forest")], vec![]);

    game.start_turn().unwrap();
    game.play_card(0, None).unwrap();

    let alice = game.active_player().unwrap();
    assert_eq!(alice.mana, 2);
    assert!(alice.hand.is_empty());
    assert!(alice.battlefield.is_empty());
    assert_eq!(alice.graveyard.len(), 1);
}

// =============================================================================
// Controllers
// =============================================================================

#[test]
fn test_scripted_turns() {
    let mut game = duel(
        GameConfig::default(),
        vec![CreatureCard::new("Zombie", 1, "", 2, 2).into()],
        vec![],
    );
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![
        Box::new(ScriptedController::new(PlayerId::new(0), [Action::play(0)])),
        Box::new(ScriptedController::new(PlayerId::new(1), [])),
    ];

    game.play_turn(&mut controllers).unwrap();
    game.play_turn(&mut controllers).unwrap();

    assert_eq!(game.players()[0].battlefield.len(), 1);
    assert_eq!(
        game.history().to_vec(),
        vec![
            "Round 1 - Alice: Played Zombie".to_string(),
            "Round 2 - Bob: Passed".to_string(),
        ]
    );
}

#[test]
fn test_too_many_rejections_pass_the_turn() {
    let mut game = duel(GameConfig::default().with_max_action_attempts(3), vec![], vec![]);
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![Box::new(ScriptedController::new(
        PlayerId::new(0),
        std::iter::repeat(Action::play(5)).take(10),
    ))];

    game.play_turn(&mut controllers).unwrap();

    assert_eq!(game.turn(), 1);
    assert_eq!(game.phase(), TurnPhase::AwaitingTurnStart);
    assert_eq!(
        game.history().last().map(String::as_str),
        Some("Round 1 - Alice: Passed")
    );
}

#[test]
fn test_inspection_keeps_turn_open() {
    let mut game = duel(GameConfig::default(), vec![], vec![]);
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![Box::new(ScriptedController::new(
        PlayerId::new(0),
        [Action::ViewHistory, Action::ViewGraveyard, Action::Pass],
    ))];

    game.play_turn(&mut controllers).unwrap();

    assert_eq!(game.history().len(), 1);
    assert_eq!(game.turn(), 1);
}

#[test]
fn test_missing_controller() {
    let mut game = duel(GameConfig::default(), vec![], vec![]);
    let mut controllers: Vec<Box<dyn PlayerController>> =
        vec![Box::new(ScriptedController::new(PlayerId::new(1), []))];

    let err = game.play_turn(&mut controllers).unwrap_err();

    assert_eq!(err, ActionError::MissingController(PlayerId::new(0)));
    assert_eq!(game.phase(), TurnPhase::AwaitingTurnStart);
    assert_eq!(game.active_player().unwrap().mana, 0);
}

#[test]
fn test_concede_ends_match() {
    let mut game = duel(GameConfig::default(), vec![], vec![]);
    let mut controllers: Vec<Box<dyn PlayerController>> = vec![
        Box::new(ScriptedController::new(PlayerId::new(0), [Action::Concede])),
        Box::new(ScriptedController::new(PlayerId::new(1), [])),
    ];

    let result = game.run(&mut controllers, 10).unwrap();

    assert_eq!(result, Some(GameResult::Winner(PlayerId::new(1))));
    assert_eq!(game.turn(), 1);
    assert_eq!(
        game.history().to_vec(),
        vec![
            "Round 1 - Alice: Conceded".to_string(),
            "Round 1: Alice was defeated!".to_string(),
            "Round 1: Bob is the winner!".to_string(),
        ]
    );
}

#[test]
fn test_human_seat_needs_its_own_controller() {
    let mut game = GameBuilder::new()
        .with_config(GameConfig::default().with_starting_hand_size(0))
        .player_with_deck("Alice", true, VecDeque::new())
        .player_with_deck("Bob", false, VecDeque::new())
        .build()
        .unwrap();
    let mut controllers = ai_controllers(game.players());

    assert_eq!(
        game.play_turn(&mut controllers),
        Err(ActionError::MissingController(PlayerId::new(0)))
    );

    controllers.push(Box::new(ScriptedController::new(PlayerId::new(0), [Action::Pass])));
    game.play_turn(&mut controllers).unwrap();
    game.play_turn(&mut controllers).unwrap();

    assert_eq!(
        game.history().to_vec(),
        vec!["Round 1 - Alice: Passed".to_string(), "Round 2 - Bob: Passed".to_string()]
    );
}

#[test]
fn test_history_and_turn_only_advance() {
    let mut game = GameBuilder::new()
        .with_config(GameConfig::default().with_seed(3))
        .player("Player", false)
        .player("Machine", false)
        .build()
        .unwrap();
    let mut controllers = greedy_pair();

    let mut seen = game.history().clone();
    let mut turn = game.turn();
    while !game.is_over() && game.turn() < 60 {
        game.play_turn(&mut controllers).unwrap();

        let history = game.state().history();
        assert!(history.len() > seen.len());
        assert!(seen.iter().zip(history.iter()).all(|(a, b)| a == b));
        assert_eq!(game.state().turn(), turn + 1);
        seen = history.clone();
        turn = game.state().turn();
    }
}

// =============================================================================
// Determinism
// =============================================================================

fn greedy_match(seed: u64) -> Game {
    let mut game = GameBuilder::new()
        .with_config(GameConfig::default().with_seed(seed))
        .player("Player", false)
        .player("Machine", false)
        .build()
        .unwrap();
    game.run(&mut greedy_pair(), 300).unwrap();
    game
}

#[test]
fn test_same_seed_same_history() {
    let a = greedy_match(7);
    let b = greedy_match(7);

    assert!(!a.history().is_empty());
    assert_eq!(a.history(), b.history());
    assert_eq!(a.result(), b.result());
    assert_eq!(a.turn(), b.turn());
}

#[test]
fn test_greedy_match_reports_result_to_state() {
    let game = greedy_match(11);

    if let Some(GameResult::Winner(id)) = game.result() {
        assert_eq!(game.players().len(), 1);
        assert_eq!(game.players()[0].id, *id);
        assert_eq!(game.phase(), TurnPhase::GameOver);
    }
}
