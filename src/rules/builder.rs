//! Match setup.

use std::collections::VecDeque;

use tracing::info;

use super::engine::Game;
use crate::cards::{deck, Card, CardCatalog};
use crate::core::{GameConfig, GameRng, GameState, Player, PlayerId};
use crate::effects::EffectResolver;
use crate::error::ConfigError;

struct PlayerSpec {
    name: String,
    is_human: bool,
    deck: Option<VecDeque<Card>>,
}

/// Builder for creating a [`Game`].
///
/// Players without an explicit deck get a random one: `deck_size` catalog
/// entries drawn with replacement, then shuffled. Explicit decks are used
/// in the given order. Every player then draws `starting_hand_size` cards.
///
/// ```
/// use duel_engine::rules::GameBuilder;
/// use duel_engine::{GameConfig, TurnPhase};
///
/// let game = GameBuilder::new()
///     .with_config(GameConfig::default().with_seed(3))
///     .player("Player", true)
///     .player("Machine", false)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.phase(), TurnPhase::AwaitingTurnStart);
/// assert_eq!(game.players()[0].hand.len(), 3);
/// assert_eq!(game.players()[0].deck.len(), 27);
/// ```
#[derive(Default)]
pub struct GameBuilder {
    config: GameConfig,
    catalog: Option<CardCatalog>,
    players: Vec<PlayerSpec>,
    health_overrides: Vec<(usize, i32)>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw random decks from this catalog instead of the standard one.
    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Add a player with a random deck.
    pub fn player(mut self, name: impl Into<String>, is_human: bool) -> Self {
        self.players.push(PlayerSpec {
            name: name.into(),
            is_human,
            deck: None,
        });
        self
    }

    /// Add a player with a fixed deck (front = first draw).
    pub fn player_with_deck(mut self, name: impl Into<String>, is_human: bool, deck: VecDeque<Card>) -> Self {
        self.players.push(PlayerSpec {
            name: name.into(),
            is_human,
            deck: Some(deck),
        });
        self
    }

    /// Start the player at `seat` (0-based, in the order added) with
    /// `health` instead of the configured starting health.
    pub fn with_player_health(mut self, seat: usize, health: i32) -> Self {
        self.health_overrides.push((seat, health));
        self
    }

    /// Build the match in `AwaitingTurnStart`.
    pub fn build(self) -> Result<Game, ConfigError> {
        let config = self.config;
        config.validate()?;
        if self.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers(self.players.len()));
        }
        if self.players.len() > usize::from(u8::MAX) {
            return Err(ConfigError::InvalidValue {
                field: "players",
                reason: format!("at most {} players, got {}", u8::MAX, self.players.len()),
            });
        }

        for &(seat, health) in &self.health_overrides {
            if seat >= self.players.len() {
                return Err(ConfigError::InvalidValue {
                    field: "player_health",
                    reason: format!("no player at seat {seat}"),
                });
            }
            if health <= 0 {
                return Err(ConfigError::InvalidValue {
                    field: "player_health",
                    reason: format!("must be positive, got {health}"),
                });
            }
        }

        let catalog = self.catalog.unwrap_or_else(CardCatalog::standard);
        let mut base_toughness = catalog.base_toughness();

        let root = GameRng::new(config.seed);
        let mut deck_rng = root.for_context("decks");

        let mut players = Vec::with_capacity(self.players.len());
        for (seat, spec) in self.players.into_iter().enumerate() {
            let cards = match spec.deck {
                Some(cards) => {
                    // Fresh cards carry their printed toughness
                    for creature in cards.iter().filter_map(Card::as_creature) {
                        if base_toughness.get(&creature.info.name).is_none() {
                            base_toughness.insert(creature.info.name.clone(), creature.toughness);
                        }
                    }
                    cards
                }
                None => {
                    let mut cards = deck::random_deck(&catalog, config.deck_size, &mut deck_rng)?;
                    deck::shuffle_deck(&mut cards, &mut deck_rng);
                    cards
                }
            };

            let id = PlayerId::new(seat as u8);
            let health = self
                .health_overrides
                .iter()
                .rev()
                .find(|(s, _)| *s == seat)
                .map_or(config.starting_health, |&(_, h)| h);
            let mut player = Player::new(id, spec.name, health, spec.is_human);
            player.mana = config.starting_mana;
            player.deck = cards;
            for _ in 0..config.starting_hand_size {
                player.draw();
            }
            players.push(player);
        }

        info!(
            players = players.len(),
            seed = config.seed,
            catalog = catalog.len(),
            "match created"
        );

        let state = GameState::new(players, root.for_context("match"));
        let resolver = EffectResolver::with_config(base_toughness, &config);
        Game::new(config, state, resolver)
    }
}
