//! Deck building.
//!
//! Decks are filled from a catalog by cloning entries, so every card in a
//! deck is an independent instance.

use std::collections::VecDeque;

use tracing::debug;

use super::catalog::CardCatalog;
use super::definition::Card;
use crate::core::RandomSource;
use crate::error::{CatalogError, ConfigError};

/// Fill a deck with `size` catalog entries drawn uniformly with replacement.
///
/// The same entry may be drawn several times; each draw is its own copy.
pub fn random_deck<R: RandomSource>(
    catalog: &CardCatalog,
    size: usize,
    rng: &mut R,
) -> Result<VecDeque<Card>, ConfigError> {
    if size > 0 && catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }

    let entries = catalog.as_slice();
    let deck: VecDeque<Card> = (0..size)
        .map(|_| entries[rng.pick(entries.len())].clone())
        .collect();

    debug!(size = deck.len(), "built random deck");
    Ok(deck)
}

/// Build a deck from catalog names, in the given order.
pub fn deck_from_names<'a>(
    catalog: &CardCatalog,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<VecDeque<Card>, CatalogError> {
    names
        .into_iter()
        .map(|name| {
            catalog.get(name).cloned().ok_or_else(|| CatalogError::InvalidCard {
                name: name.to_string(),
                reason: "not in catalog".to_string(),
            })
        })
        .collect()
}

/// Shuffle a deck in place.
pub fn shuffle_deck<R: RandomSource>(deck: &mut VecDeque<Card>, rng: &mut R) {
    rng.shuffle(deck.make_contiguous());
}
