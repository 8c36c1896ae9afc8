//! Draw results bound to a spread
//!
//! Pairs each drawn card with the spread position it landed on. The card
//! count is checked at construction so a result can never disagree with its
//! spread.

use super::Spread;
use crate::domain::DrawnCard;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Invariant violations when binding cards to a spread
#[derive(Debug, Error)]
pub enum SpreadError {
    #[error("spread 「{spread}」 needs {expected} cards but got {actual}")]
    CardCountMismatch {
        spread: String,
        expected: usize,
        actual: usize,
    },
}

/// A completed spread reading: the spread, one card per position, and when
/// the cards were drawn
#[derive(Debug, Clone)]
pub struct SpreadResult {
    spread: Spread,
    drawn_cards: Vec<DrawnCard>,
    timestamp: DateTime<Utc>,
}

impl SpreadResult {
    pub fn new(
        spread: Spread,
        drawn_cards: Vec<DrawnCard>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, SpreadError> {
        if drawn_cards.len() != spread.card_count() {
            return Err(SpreadError::CardCountMismatch {
                spread: spread.name().to_string(),
                expected: spread.card_count(),
                actual: drawn_cards.len(),
            });
        }
        Ok(Self {
            spread,
            drawn_cards,
            timestamp,
        })
    }

    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    pub fn drawn_cards(&self) -> &[DrawnCard] {
        &self.drawn_cards
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for SpreadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "牌阵：{}", self.spread.name())?;
        writeln!(f, "抽牌时间：{}", self.timestamp)?;
        for (position, card) in self.spread.positions().iter().zip(&self.drawn_cards) {
            writeln!(f, " - {}: {}", position.label(), card)?;
        }
        Ok(())
    }
}
