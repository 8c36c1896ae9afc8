//! Draw mechanics
//!
//! A [`DrawStrategy`] decides how cards leave the deck. The standard strategy
//! shuffles first, then takes from the top, flipping a coin per card for
//! reversal when reversed readings are enabled.

use crate::domain::{Deck, DrawnCard};
use rand::{Rng, RngCore};
use thiserror::Error;

/// Errors raised while drawing cards
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("deck has {available} cards left, cannot draw {requested}")]
    NotEnoughCards { requested: usize, available: usize },
}

/// How cards are selected from a deck
pub trait DrawStrategy {
    /// Draw `count` cards from `deck`, deciding each card's orientation
    fn draw(
        &self,
        deck: &mut Deck,
        count: usize,
        enable_reversed: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<DrawnCard>, DrawError>;
}

/// Shuffle, then deal `count` cards from the top
pub struct StandardDrawStrategy;

impl DrawStrategy for StandardDrawStrategy {
    fn draw(
        &self,
        deck: &mut Deck,
        count: usize,
        enable_reversed: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<DrawnCard>, DrawError> {
        if deck.len() < count {
            return Err(DrawError::NotEnoughCards {
                requested: count,
                available: deck.len(),
            });
        }

        deck.shuffle(rng);

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let card = deck.draw_top().ok_or(DrawError::NotEnoughCards {
                requested: count,
                available: deck.len(),
            })?;
            let reversed = enable_reversed && rng.gen_bool(0.5);
            drawn.push(DrawnCard::new(card, reversed));
        }

        Ok(drawn)
    }
}
