//! Spread profiles
//!
//! A profile is the precomputed term-vector of a spread's descriptive text,
//! built once at startup and compared against every query.

use super::tokenizer::Tokenizer;
use super::vector::TokenVector;
use crate::spread::Spread;

/// Reason used when a spread has no positions to describe
const GENERIC_REASON: &str = "与你的问题描述相近";

/// A spread with its descriptive term vector and display reason
#[derive(Debug, Clone)]
pub struct SpreadProfile {
    spread: Spread,
    vector: TokenVector,
    reason: String,
}

impl SpreadProfile {
    pub fn spread(&self) -> &Spread {
        &self.spread
    }

    pub fn vector(&self) -> &TokenVector {
        &self.vector
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Build one profile per catalog spread, preserving catalog order
pub fn build_profiles(tokenizer: &Tokenizer, catalog: &[Spread]) -> Vec<SpreadProfile> {
    catalog
        .iter()
        .map(|spread| build_profile(tokenizer, spread.clone()))
        .collect()
}

fn build_profile(tokenizer: &Tokenizer, spread: Spread) -> SpreadProfile {
    let text = profile_text(&spread);
    let vector = TokenVector::from_terms(tokenizer.tokenize(&text));
    let reason = build_reason(&spread);
    SpreadProfile {
        spread,
        vector,
        reason,
    }
}

/// Descriptive text: spread name, then each position's label and non-blank
/// description, space-joined
fn profile_text(spread: &Spread) -> String {
    let mut text = spread.name().to_string();
    for position in spread.positions() {
        text.push(' ');
        text.push_str(position.label());
        let description = position.description();
        if !description.trim().is_empty() {
            text.push(' ');
            text.push_str(description);
        }
    }
    text
}

fn build_reason(spread: &Spread) -> String {
    let positions = spread.positions();
    if positions.is_empty() {
        return GENERIC_REASON.to_string();
    }
    let labels: Vec<&str> = positions.iter().map(|p| p.label()).collect();
    format!("牌位侧重：{}", labels.join(" / "))
}
