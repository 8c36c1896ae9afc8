//! Offline tarot reading toolkit
//!
//! The interesting part lives in [`recommend`]: a purely lexical engine that
//! maps a free-text question to the spreads whose position semantics match it
//! best. Everything else (cards, decks, draw mechanics, spread definitions)
//! is plain domain modeling consumed by the CLI in `main.rs`.

pub mod config;
pub mod domain;
pub mod draw;
pub mod recommend;
pub mod repository;
pub mod service;
pub mod spread;

pub use recommend::{ConfigError, Recommender, RecommenderConfig, SpreadSuggestion};
pub use spread::{default_catalog, CardPosition, Spread};
