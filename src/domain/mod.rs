//! Card and deck entities
//!
//! Value objects shared by the repository, draw and spread modules. A
//! [`TarotCard`] carries no orientation; reversal is decided at draw time and
//! recorded on the [`DrawnCard`].

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Major or minor arcana
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Arcana {
    Major,
    Minor,
}

/// Minor arcana suit; major arcana cards use [`Suit::None`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    None,
    Wands,
    Cups,
    Swords,
    Pentacles,
}

/// A single tarot card definition, without orientation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarotCard {
    pub id: String,
    pub name: String,
    #[serde(rename = "nameEn")]
    pub name_en: String,
    pub arcana: Arcana,
    pub suit: Suit,
    /// 0-21 for major arcana, 1-14 within a minor suit
    pub number: u8,
}

/// One card of a draw result, with its orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: TarotCard,
    pub reversed: bool,
}

impl DrawnCard {
    pub fn new(card: TarotCard, reversed: bool) -> Self {
        Self { card, reversed }
    }
}

impl fmt::Display for DrawnCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = if self.reversed { "逆位" } else { "正位" };
        write!(f, "{}({})", self.card.name, orientation)
    }
}

/// The pool of cards still available for drawing
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<TarotCard>,
}

impl Deck {
    pub fn new(cards: Vec<TarotCard>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[TarotCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle the remaining cards in place
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card, or `None` when the deck is exhausted
    pub fn draw_top(&mut self) -> Option<TarotCard> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }
}

/// Result of a plain draw, without spread semantics
#[derive(Debug, Clone)]
pub struct DrawResult {
    drawn_cards: Vec<DrawnCard>,
    timestamp: DateTime<Utc>,
}

impl DrawResult {
    pub fn new(drawn_cards: Vec<DrawnCard>, timestamp: DateTime<Utc>) -> Self {
        Self {
            drawn_cards,
            timestamp,
        }
    }

    pub fn drawn_cards(&self) -> &[DrawnCard] {
        &self.drawn_cards
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "抽牌时间：{}", self.timestamp)?;
        writeln!(f, "抽到的牌：")?;
        for drawn in &self.drawn_cards {
            writeln!(f, " - {}", drawn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_card(id: &str, number: u8) -> TarotCard {
        TarotCard {
            id: id.to_string(),
            name: format!("牌{}", number),
            name_en: format!("Card {}", number),
            arcana: Arcana::Major,
            suit: Suit::None,
            number,
        }
    }

    #[test]
    fn draw_top_consumes_cards_in_order() {
        let mut deck = Deck::new(vec![sample_card("a", 0), sample_card("b", 1)]);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.draw_top().map(|c| c.id), Some("a".to_string()));
        assert_eq!(deck.draw_top().map(|c| c.id), Some("b".to_string()));
        assert!(deck.draw_top().is_none());
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffle_is_deterministic_with_seeded_rng() {
        let cards: Vec<_> = (0..10).map(|n| sample_card(&format!("c{}", n), n)).collect();
        let mut deck_a = Deck::new(cards.clone());
        let mut deck_b = Deck::new(cards);

        deck_a.shuffle(&mut StdRng::seed_from_u64(7));
        deck_b.shuffle(&mut StdRng::seed_from_u64(7));

        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn drawn_card_display_shows_orientation() {
        let upright = DrawnCard::new(sample_card("a", 0), false);
        let reversed = DrawnCard::new(sample_card("a", 0), true);
        assert!(upright.to_string().contains("正位"));
        assert!(reversed.to_string().contains("逆位"));
    }
}
