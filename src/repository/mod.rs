//! Card data loading
//!
//! The standard 78-card deck ships embedded in the binary; a file path can
//! override it for custom decks. The repository trait is the seam that lets
//! tests run on a small in-memory catalog.

use crate::domain::{Arcana, Suit, TarotCard};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embedded standard deck, same schema as a user-supplied JSON file
const EMBEDDED_CARDS: &str = include_str!("../../assets/cards.json");

/// Errors raised while loading card data
#[derive(Debug, Error)]
pub enum CardDataError {
    #[error("failed to read card data file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid card data JSON")]
    Parse(#[from] serde_json::Error),
    #[error("card catalog is empty")]
    Empty,
}

/// Source of card definitions
pub trait CardRepository {
    /// Return every card of the deck this repository describes
    fn find_all(&self) -> Result<Vec<TarotCard>, CardDataError>;
}

enum CardSource {
    Embedded,
    File(PathBuf),
}

/// JSON-backed card repository
pub struct JsonCardRepository {
    source: CardSource,
}

impl JsonCardRepository {
    /// Use the embedded standard 78-card deck
    pub fn embedded() -> Self {
        Self {
            source: CardSource::Embedded,
        }
    }

    /// Load card definitions from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: CardSource::File(path.as_ref().to_path_buf()),
        }
    }

    fn parse(json: &str) -> Result<Vec<TarotCard>, CardDataError> {
        let cards: Vec<TarotCard> = serde_json::from_str(json)?;
        if cards.is_empty() {
            return Err(CardDataError::Empty);
        }
        Ok(cards)
    }
}

impl CardRepository for JsonCardRepository {
    fn find_all(&self) -> Result<Vec<TarotCard>, CardDataError> {
        match &self.source {
            CardSource::Embedded => Self::parse(EMBEDDED_CARDS),
            CardSource::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| CardDataError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::parse(&json)
            }
        }
    }
}

/// Small fixed catalog, mainly for tests and demos
pub struct InMemoryCardRepository;

impl CardRepository for InMemoryCardRepository {
    fn find_all(&self) -> Result<Vec<TarotCard>, CardDataError> {
        let majors = [
            ("MAJOR_00_FOOL", "愚者", "The Fool", 0),
            ("MAJOR_01_MAGICIAN", "魔术师", "The Magician", 1),
            ("MAJOR_02_HIGH_PRIESTESS", "女祭司", "The High Priestess", 2),
            ("MAJOR_03_EMPRESS", "女皇", "The Empress", 3),
            ("MAJOR_04_EMPEROR", "皇帝", "The Emperor", 4),
            ("MAJOR_05_HIEROPHANT", "教皇", "The Hierophant", 5),
            ("MAJOR_06_LOVERS", "恋人", "The Lovers", 6),
            ("MAJOR_07_CHARIOT", "战车", "The Chariot", 7),
            ("MAJOR_08_STRENGTH", "力量", "Strength", 8),
        ];

        Ok(majors
            .iter()
            .map(|&(id, name, name_en, number)| TarotCard {
                id: id.to_string(),
                name: name.to_string(),
                name_en: name_en.to_string(),
                arcana: Arcana::Major,
                suit: Suit::None,
                number,
            })
            .collect())
    }
}
