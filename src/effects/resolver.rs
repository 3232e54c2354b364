//! Effect resolution - applying spells, terrains and random cards.
//!
//! The `EffectResolver` owns no match state. Every call takes the caster
//! and, where needed, the opponent as explicit `&mut Player` parameters.
//!
//! ## Atomicity
//!
//! Each entry point validates everything it can (mana, target, opponent)
//! before touching state. On `Err` nothing was mutated. After the mana is
//! paid the effect always completes; a revive that finds no creature
//! reports [`SpellOutcome::Fizzled`] with the mana spent.
//!
//! The card being resolved is passed separately from the caster. Moving it
//! out of the hand and into the graveyard is the turn controller's job.

use tracing::{debug, info, warn};

use crate::cards::{BaseToughness, Card, RandomEffectCard, SpellCard, TerrainCard};
use crate::core::{CreatureDamage, GameConfig, Player, RandomSource};
use crate::error::{ActionError, ActionResult};

use super::effect::{RandomEffect, RandomOutcome, SpellKind, SpellOutcome, TerrainEffect, TerrainOutcome};
use super::targeting::Target;

/// Resolves card effects against player state.
#[derive(Clone, Debug)]
pub struct EffectResolver {
    base_toughness: BaseToughness,
    terrain_mana_bonus: u32,
    terrain_heal: i32,
    random_damage: i32,
    random_heal: i32,
    random_mana: u32,
}

impl EffectResolver {
    /// Create a resolver with default effect magnitudes.
    #[must_use]
    pub fn new(base_toughness: BaseToughness) -> Self {
        Self::with_config(base_toughness, &GameConfig::default())
    }

    /// Create a resolver taking terrain and random-effect magnitudes from
    /// `config`.
    #[must_use]
    pub fn with_config(base_toughness: BaseToughness, config: &GameConfig) -> Self {
        Self {
            base_toughness,
            terrain_mana_bonus: config.terrain_mana_bonus,
            terrain_heal: config.terrain_heal,
            random_damage: config.random_damage,
            random_heal: config.random_heal,
            random_mana: config.random_mana,
        }
    }

    /// The base-toughness table used by revival.
    #[must_use]
    pub fn base_toughness(&self) -> &BaseToughness {
        &self.base_toughness
    }

    /// Resolve a spell cast by `caster`.
    ///
    /// `target` always refers to `opponent`'s side. Heal, buff and revive
    /// ignore it.
    pub fn resolve_spell<R: RandomSource>(
        &self,
        spell: &SpellCard,
        caster: &mut Player,
        target: Option<Target>,
        mut opponent: Option<&mut Player>,
        rng: &mut R,
    ) -> ActionResult<SpellOutcome> {
        caster.can_pay(spell.info.mana_cost)?;
        check_spell_target(spell.spell_kind, target, opponent.as_deref())?;

        caster.pay_mana(spell.info.mana_cost)?;
        debug!(
            caster = %caster.name,
            spell = %spell.info.name,
            kind = %spell.spell_kind,
            mana = caster.mana,
            "casting spell"
        );

        let power = spell.power;
        let outcome = match spell.spell_kind {
            SpellKind::DirectDamage | SpellKind::SingleDamage => {
                let opponent = opponent.as_deref_mut().ok_or(ActionError::MissingOpponent)?;
                match target {
                    Some(Target::Creature(index)) => {
                        SpellOutcome::DamagedCreature(opponent.damage_creature(index, power)?)
                    }
                    _ => {
                        opponent.receive_damage(power);
                        SpellOutcome::DamagedPlayer {
                            player: opponent.name.clone(),
                            amount: power,
                            health: opponent.health,
                        }
                    }
                }
            }
            SpellKind::Heal => {
                caster.heal(power);
                SpellOutcome::Healed {
                    amount: power,
                    health: caster.health,
                }
            }
            SpellKind::BuffAll => {
                for creature in &mut caster.battlefield {
                    creature.toughness += power;
                }
                SpellOutcome::Buffed {
                    creatures: caster.battlefield.len(),
                    amount: power,
                }
            }
            SpellKind::DamageAll => {
                let opponent = opponent.as_deref_mut().ok_or(ActionError::MissingOpponent)?;
                SpellOutcome::DamagedAll(damage_all(opponent, power))
            }
            SpellKind::Revive => self.revive(caster, rng),
        };

        info!(caster = %caster.name, spell = %spell.info.name, ?outcome, "spell resolved");
        Ok(outcome)
    }

    /// Bring a uniformly chosen creature back from `caster`'s graveyard.
    fn revive<R: RandomSource>(&self, caster: &mut Player, rng: &mut R) -> SpellOutcome {
        let candidates = caster.graveyard_creatures();
        if candidates.is_empty() {
            warn!(caster = %caster.name, "no creature in graveyard, revive fizzles");
            return SpellOutcome::Fizzled;
        }

        let slot = candidates[rng.pick(candidates.len())];
        let Card::Creature(mut creature) = caster.graveyard.remove(slot) else {
            return SpellOutcome::Fizzled;
        };

        // Unknown names keep their last toughness, but never come back dead.
        creature.toughness = self
            .base_toughness
            .get(&creature.info.name)
            .unwrap_or(creature.toughness)
            .max(1);

        let outcome = SpellOutcome::Revived {
            creature: creature.info.name.clone(),
            toughness: creature.toughness,
        };
        debug!(caster = %caster.name, creature = %creature.info.name, "creature revived");
        caster.battlefield.push(creature);
        outcome
    }

    /// Apply a terrain's fixed bonus to `player`. Terrains are free and
    /// always succeed.
    pub fn activate_terrain(&self, terrain: &TerrainCard, player: &mut Player) -> TerrainOutcome {
        let outcome = match terrain.effect {
            TerrainEffect::ManaBonus => {
                player.mana += self.terrain_mana_bonus;
                TerrainOutcome::ManaGained {
                    amount: self.terrain_mana_bonus,
                    mana: player.mana,
                }
            }
            TerrainEffect::Heal => {
                player.heal(self.terrain_heal);
                TerrainOutcome::Healed {
                    amount: self.terrain_heal,
                    health: player.health,
                }
            }
        };
        info!(player = %player.name, terrain = %terrain.info.name, ?outcome, "terrain activated");
        outcome
    }

    /// Pay for `card`, roll one of its effects and apply it.
    ///
    /// The rolled effect is stored in `card.current_effect`. Damage hits the
    /// target creature if one is given, otherwise the opponent.
    pub fn activate_random<R: RandomSource>(
        &self,
        card: &mut RandomEffectCard,
        player: &mut Player,
        target: Option<Target>,
        opponent: Option<&mut Player>,
        rng: &mut R,
    ) -> ActionResult<RandomOutcome> {
        player.can_pay(card.info.mana_cost)?;
        if card.possible_effects.is_empty() {
            return Err(ActionError::InvalidTarget(format!(
                "{} has no possible effects",
                card.info.name
            )));
        }
        if let Some(target) = target {
            target.validate(opponent.as_deref().ok_or(ActionError::MissingOpponent)?)?;
        }

        player.pay_mana(card.info.mana_cost)?;
        let effect = card.possible_effects[rng.pick(card.possible_effects.len())];
        card.current_effect = Some(effect);
        debug!(player = %player.name, card = %card.info.name, %effect, "random effect rolled");

        let outcome = match effect {
            RandomEffect::Damage => match (opponent, target) {
                (Some(opponent), Some(Target::Creature(index))) => {
                    RandomOutcome::DamagedCreature(opponent.damage_creature(index, self.random_damage)?)
                }
                (Some(opponent), _) => {
                    opponent.receive_damage(self.random_damage);
                    RandomOutcome::DamagedPlayer {
                        player: opponent.name.clone(),
                        amount: self.random_damage,
                        health: opponent.health,
                    }
                }
                (None, _) => RandomOutcome::Fizzled,
            },
            RandomEffect::Heal => {
                player.heal(self.random_heal);
                RandomOutcome::Healed {
                    amount: self.random_heal,
                    health: player.health,
                }
            }
            RandomEffect::ExtraMana => {
                player.mana += self.random_mana;
                RandomOutcome::ManaGained {
                    amount: self.random_mana,
                    mana: player.mana,
                }
            }
        };

        info!(player = %player.name, card = %card.info.name, ?outcome, "random effect applied");
        Ok(outcome)
    }
}

/// Validate target and opponent for a spell kind without mutating.
fn check_spell_target(kind: SpellKind, target: Option<Target>, opponent: Option<&Player>) -> ActionResult<()> {
    match kind {
        SpellKind::DirectDamage | SpellKind::DamageAll => {
            let opponent = opponent.ok_or(ActionError::MissingOpponent)?;
            if let Some(target) = target {
                target.validate(opponent)?;
            }
            Ok(())
        }
        SpellKind::SingleDamage => {
            let opponent = opponent.ok_or(ActionError::MissingOpponent)?;
            match target {
                Some(target @ Target::Creature(_)) => target.validate(opponent),
                _ => Err(ActionError::InvalidTarget(
                    "this spell needs a creature target".to_string(),
                )),
            }
        }
        SpellKind::Heal | SpellKind::BuffAll | SpellKind::Revive => Ok(()),
    }
}

/// Damage every creature on `player`'s battlefield. Destroyed creatures go
/// to the graveyard; survivors keep their order.
fn damage_all(player: &mut Player, amount: i32) -> Vec<CreatureDamage> {
    let mut hits = Vec::with_capacity(player.battlefield.len());
    let mut survivors = Vec::with_capacity(player.battlefield.len());

    for mut creature in std::mem::take(&mut player.battlefield) {
        let destroyed = creature.take_damage(amount);
        hits.push(CreatureDamage {
            name: creature.info.name.clone(),
            amount,
            remaining: creature.toughness,
            destroyed,
        });
        if destroyed {
            debug!(player = %player.name, creature = %creature.info.name, "creature sent to graveyard");
            player.graveyard.push(Card::Creature(creature));
        } else {
            survivors.push(creature);
        }
    }

    player.battlefield = survivors;
    hits
}
