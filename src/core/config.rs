//! Match configuration.
//!
//! All tunable numbers of a match live here: starting resources, deck and
//! hand sizes, the fixed magnitudes of terrain and random effects, and the
//! seed of the match random source.
//!
//! ```
//! use duel_engine::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_starting_health(30)
//!     .with_seed(7);
//!
//! assert_eq!(config.starting_health, 30);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Health each player starts with.
    pub starting_health: i32,

    /// Mana each player starts with.
    pub starting_mana: u32,

    /// Mana granted at the start of each owned turn.
    pub mana_per_turn: u32,

    /// Cards drawn by each player at match setup.
    pub starting_hand_size: usize,

    /// Cards per randomly built deck.
    pub deck_size: usize,

    /// Mana granted by a mana-bonus terrain.
    pub terrain_mana_bonus: u32,

    /// Health restored by a healing terrain.
    pub terrain_heal: i32,

    /// Damage dealt by the "damage" random effect.
    pub random_damage: i32,

    /// Health restored by the "heal" random effect.
    pub random_heal: i32,

    /// Mana granted by the "extra mana" random effect.
    pub random_mana: u32,

    /// Controller requests allowed per turn before the turn is passed.
    /// Counts rejected actions and inspections.
    pub max_action_attempts: u32,

    /// Seed of the match random source.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            starting_mana: 0,
            mana_per_turn: 1,
            starting_hand_size: 3,
            deck_size: 30,
            terrain_mana_bonus: 1,
            terrain_heal: 3,
            random_damage: 3,
            random_heal: 3,
            random_mana: 1,
            max_action_attempts: 16,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "starting_health",
                reason: format!("must be positive, got {}", self.starting_health),
            });
        }
        if self.max_action_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_action_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the starting mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: u32) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the size of randomly built decks.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the per-turn request cap.
    #[must_use]
    pub fn with_max_action_attempts(mut self, attempts: u32) -> Self {
        self.max_action_attempts = attempts;
        self
    }

    /// Set the match seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.starting_health, 20);
        assert_eq!(config.starting_mana, 0);
        assert_eq!(config.mana_per_turn, 1);
        assert_eq!(config.starting_hand_size, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = GameConfig::default()
            .with_starting_health(5)
            .with_starting_mana(2)
            .with_starting_hand_size(0)
            .with_deck_size(10)
            .with_max_action_attempts(3)
            .with_seed(99);

        assert_eq!(config.starting_health, 5);
        assert_eq!(config.starting_mana, 2);
        assert_eq!(config.starting_hand_size, 0);
        assert_eq!(config.deck_size, 10);
        assert_eq!(config.max_action_attempts, 3);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "starting_health": 12, "seed": 5 }"#).unwrap();
        assert_eq!(config.starting_health, 12);
        assert_eq!(config.seed, 5);
        assert_eq!(config.deck_size, 30);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = GameConfig::from_json(r#"{ "starting_health": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "starting_health", .. }));

        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = GameConfig::default().with_seed(1234);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
