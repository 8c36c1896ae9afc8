//! Draw orchestration
//!
//! Ties the card repository, deck and draw strategy together behind a small
//! service. The deck is rebuilt from the repository on demand so every
//! reading starts from a full deck.

use crate::domain::{Deck, DrawResult};
use crate::draw::{DrawError, DrawStrategy};
use crate::repository::{CardDataError, CardRepository};
use crate::spread::{Spread, SpreadError, SpreadResult};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::debug;

/// Failures surfaced by the draw service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    CardData(#[from] CardDataError),
    #[error(transparent)]
    Draw(#[from] DrawError),
    #[error(transparent)]
    Spread(#[from] SpreadError),
}

/// Drawing service over a repository-built deck
pub struct DrawService {
    repository: Box<dyn CardRepository>,
    strategy: Box<dyn DrawStrategy>,
    rng: StdRng,
    current_deck: Deck,
}

impl DrawService {
    /// Build the service and its initial deck from the repository
    pub fn new(
        repository: Box<dyn CardRepository>,
        strategy: Box<dyn DrawStrategy>,
        rng: StdRng,
    ) -> Result<Self, ServiceError> {
        let current_deck = Deck::new(repository.find_all()?);
        debug!(cards = current_deck.len(), "deck initialized");
        Ok(Self {
            repository,
            strategy,
            rng,
            current_deck,
        })
    }

    /// Convenience constructor seeding the RNG from the OS
    pub fn with_entropy(
        repository: Box<dyn CardRepository>,
        strategy: Box<dyn DrawStrategy>,
    ) -> Result<Self, ServiceError> {
        Self::new(repository, strategy, StdRng::from_entropy())
    }

    /// Draw `count` cards from the current deck without spread semantics
    pub fn draw_cards(
        &mut self,
        count: usize,
        enable_reversed: bool,
    ) -> Result<DrawResult, ServiceError> {
        let drawn = self
            .strategy
            .draw(&mut self.current_deck, count, enable_reversed, &mut self.rng)?;
        Ok(DrawResult::new(drawn, Utc::now()))
    }

    /// Draw one card per position of `spread`
    pub fn draw_spread(
        &mut self,
        spread: &Spread,
        enable_reversed: bool,
    ) -> Result<SpreadResult, ServiceError> {
        let count = spread.card_count();
        let drawn = self
            .strategy
            .draw(&mut self.current_deck, count, enable_reversed, &mut self.rng)?;
        Ok(SpreadResult::new(spread.clone(), drawn, Utc::now())?)
    }

    /// Rebuild a full deck from the repository
    pub fn reset_deck(&mut self) -> Result<(), ServiceError> {
        self.current_deck = Deck::new(self.repository.find_all()?);
        Ok(())
    }

    pub fn deck_size(&self) -> usize {
        self.current_deck.len()
    }
}
