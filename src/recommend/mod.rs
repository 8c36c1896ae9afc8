//! Spread recommendation from a free-text question
//!
//! Purely offline lexical matching, no model or network service:
//! - each spread gets a "semantic profile" built from its name and position
//!   descriptions (see [`profile`]);
//! - the question is compared against every profile with character n-gram
//!   cosine similarity;
//! - results are filtered by a minimum score, sorted, deduplicated by spread
//!   name and capped;
//! - blank or low-signal input falls back to a fixed default list.
//!
//! Every call is a total function over its input: bad-looking questions are
//! normal fallback cases, never errors. The profile catalog is immutable
//! after construction, so one [`Recommender`] can be shared freely across
//! threads.

use serde::Deserialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

use crate::spread::{Spread, ThreeCardPattern};

pub mod profile;
pub mod tokenizer;
pub mod vector;

pub use profile::SpreadProfile;
pub use tokenizer::{CanonicalTable, Tokenizer};
pub use vector::TokenVector;

use profile::build_profiles;

/// Tuning knobs for the recommendation engine. The defaults are the
/// production values; they are fields rather than literals because their
/// tuning is an intended extension point.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Profiles scoring below this are dropped
    pub min_score: f64,
    /// Maximum number of suggestions returned
    pub max_results: usize,
    /// Smallest ideographic n-gram emitted
    pub ngram_min: usize,
    /// Largest ideographic n-gram emitted
    pub ngram_max: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_score: 0.05,
            max_results: 3,
            ngram_min: 2,
            ngram_max: 3,
        }
    }
}

/// Tuning values that would make the engine degenerate
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ngram sizes must satisfy 1 <= ngram_min <= ngram_max, got {min}..={max}")]
    NgramRange { min: usize, max: usize },
    #[error("max_results must be at least 1")]
    NoResultsAllowed,
}

impl RecommenderConfig {
    /// Reject values the engine cannot honor. Loaded configuration is
    /// checked here before a [`Recommender`] is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(ConfigError::NgramRange {
                min: self.ngram_min,
                max: self.ngram_max,
            });
        }
        if self.max_results == 0 {
            return Err(ConfigError::NoResultsAllowed);
        }
        Ok(())
    }
}

/// A recommended spread with a human-readable reason
#[derive(Debug, Clone)]
pub struct SpreadSuggestion {
    pub spread: Spread,
    pub reason: String,
}

impl SpreadSuggestion {
    fn new(spread: Spread, reason: impl Into<String>) -> Self {
        Self {
            spread,
            reason: reason.into(),
        }
    }
}

/// Recommendation facade over an immutable profile catalog
#[derive(Debug, Clone)]
pub struct Recommender {
    tokenizer: Tokenizer,
    profiles: Vec<SpreadProfile>,
    defaults: Vec<SpreadSuggestion>,
    config: RecommenderConfig,
}

impl Recommender {
    /// Build profiles for `catalog` once; the result is read-only state.
    /// Degenerate config values are clamped rather than rejected here; see
    /// [`RecommenderConfig::validate`] for the checked entry point.
    pub fn new(catalog: &[Spread], config: RecommenderConfig) -> Self {
        let config = RecommenderConfig {
            max_results: config.max_results.max(1),
            ..config
        };
        let tokenizer = Tokenizer::new(
            CanonicalTable::standard(),
            config.ngram_min,
            config.ngram_max,
        );
        let profiles = build_profiles(&tokenizer, catalog);
        let defaults = vec![
            SpreadSuggestion::new(Spread::single_card(), "适合开放式问题的整体提示"),
            SpreadSuggestion::new(
                Spread::from_template("三张牌", &ThreeCardPattern::PastPresentFuture),
                "基础时间线解读，帮助观察趋势",
            ),
        ];
        Self {
            tokenizer,
            profiles,
            defaults,
            config,
        }
    }

    /// Recommender over the standard spread catalog with default tuning
    pub fn standard() -> Self {
        Self::new(&crate::spread::default_catalog(), RecommenderConfig::default())
    }

    /// Suggest spreads for a question. Never returns an empty list: blank
    /// input, input with no extractable terms, and input that clears no
    /// minimum score all fall back to the fixed default suggestions.
    pub fn recommend(&self, question: &str) -> Vec<SpreadSuggestion> {
        let normalized = question.to_lowercase();
        if normalized.trim().is_empty() {
            return self.defaults.clone();
        }

        let query = TokenVector::from_terms(self.tokenizer.tokenize(&normalized));
        if query.is_empty() {
            return self.defaults.clone();
        }

        let mut scored: Vec<(&SpreadProfile, f64)> = Vec::new();
        for profile in &self.profiles {
            let score = query.cosine_similarity(profile.vector());
            debug!(spread = %profile.spread().name(), score, "scored profile");
            if score >= self.config.min_score {
                scored.push((profile, score));
            }
        }

        if scored.is_empty() {
            return self.defaults.clone();
        }

        // Deterministic total order: score desc, then card count asc, then
        // name asc. No two catalog entries share all three.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.spread().card_count().cmp(&b.0.spread().card_count()))
                .then_with(|| a.0.spread().name().cmp(b.0.spread().name()))
        });

        let mut results: Vec<SpreadSuggestion> = Vec::new();
        for (profile, _) in scored {
            let already_listed = results
                .iter()
                .any(|s| s.spread.name() == profile.spread().name());
            if !already_listed {
                results.push(SpreadSuggestion::new(
                    profile.spread().clone(),
                    profile.reason(),
                ));
            }
            if results.len() >= self.config.max_results {
                break;
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(suggestions: &[SpreadSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.spread.name()).collect()
    }

    #[test]
    fn blank_inputs_all_return_default_list() {
        let recommender = Recommender::standard();

        for question in ["", "   ", "\t\n"] {
            let suggestions = recommender.recommend(question);
            assert_eq!(suggestions.len(), 2, "question {:?}", question);
            assert_eq!(suggestions[0].spread.name(), "单张牌：主题指引");
            assert_eq!(suggestions[1].spread.name(), "三张牌：过去 / 现在 / 未来");
        }
    }

    #[test]
    fn punctuation_only_input_falls_back_to_defaults() {
        let recommender = Recommender::standard();
        let suggestions = recommender.recommend("？！。。。——！");
        assert_eq!(names(&suggestions), names(&recommender.recommend("")));
    }

    #[test]
    fn results_are_capped_and_free_of_duplicates() {
        let recommender = Recommender::standard();
        let suggestions = recommender.recommend("我最近的感情和工作该怎么办");

        assert!(suggestions.len() <= 3);
        let mut seen = std::collections::HashSet::new();
        for suggestion in &suggestions {
            assert!(seen.insert(suggestion.spread.name().to_string()));
        }
    }

    #[test]
    fn recommendation_is_deterministic() {
        let recommender = Recommender::standard();
        let question = "接下来的发展趋势如何";

        let first = recommender.recommend(question);
        let second = recommender.recommend(question);

        assert_eq!(names(&first), names(&second));
        let reasons_first: Vec<_> = first.iter().map(|s| s.reason.clone()).collect();
        let reasons_second: Vec<_> = second.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(reasons_first, reasons_second);
    }

    #[test]
    fn relationship_question_picks_relationship_spread() {
        let recommender = Recommender::standard();
        let suggestions = recommender.recommend("我和她的关系走向？");

        assert!(!suggestions.is_empty());
        assert_eq!(
            suggestions[0].spread.name(),
            "四张牌：你 / 对方 / 关系走向 / 建议"
        );
        assert!(suggestions.iter().any(|s| s.spread.name().contains("关系")));
    }

    #[test]
    fn work_bottleneck_question_picks_problem_spread() {
        let recommender = Recommender::standard();
        let suggestions = recommender.recommend("工作遇到瓶颈怎么办");

        assert!(!suggestions.is_empty());
        assert_eq!(
            suggestions[0].spread.name(),
            "四张牌：问题 / 成因 / 解决方案 / 结果"
        );
        assert_eq!(suggestions[0].spread.card_count(), 4);
        assert!(suggestions
            .iter()
            .any(|s| s.spread.name().contains("阻碍") || s.spread.name().contains("问题")));
    }

    #[test]
    fn problem_spread_outranks_shorter_obstacle_spread_for_bottlenecks() {
        // The compact 现状 / 困境 / 建议 profile scores high on obstacle
        // questions through its small magnitude alone; the problem spread's
        // positions carry enough obstacle and advice wording to stay ahead.
        let recommender = Recommender::standard();
        let suggestions = recommender.recommend("工作遇到瓶颈怎么办");

        let names = names(&suggestions);
        let problem = names
            .iter()
            .position(|n| *n == "四张牌：问题 / 成因 / 解决方案 / 结果");
        let situation = names.iter().position(|n| *n == "三张牌：现状 / 困境 / 建议");
        assert_eq!(problem, Some(0));
        if let Some(rank) = situation {
            assert!(rank > 0);
        }
    }

    #[test]
    fn synonym_ranks_relationship_spreads_like_the_canonical_term() {
        let recommender = Recommender::standard();

        // 感情 canonicalizes to 关系, and no profile mentions 感情 itself, so
        // both queries produce the same dot products and the same ranking.
        let literal = recommender.recommend("关系");
        let synonym = recommender.recommend("感情");

        assert_eq!(literal[0].spread.name(), synonym[0].spread.name());
        assert!(literal[0].spread.name().contains("关系"));
        assert!(synonym.iter().any(|s| s.spread.name().contains("关系")));
    }

    #[test]
    fn unmatched_text_falls_back_to_defaults() {
        let recommender = Recommender::standard();
        // ASCII terms that appear in no profile text
        let suggestions = recommender.recommend("zzz qqq xxx");
        assert_eq!(names(&suggestions), names(&recommender.recommend("")));
    }

    #[test]
    fn max_results_override_is_honored() {
        let config = RecommenderConfig {
            max_results: 1,
            ..RecommenderConfig::default()
        };
        let recommender = Recommender::new(&crate::spread::default_catalog(), config);
        let suggestions = recommender.recommend("我和她的关系走向？");
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn zero_max_results_is_clamped_to_one_suggestion() {
        let config = RecommenderConfig {
            max_results: 0,
            ..RecommenderConfig::default()
        };
        let recommender = Recommender::new(&crate::spread::default_catalog(), config);
        let suggestions = recommender.recommend("我和她的关系走向？");
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn validation_rejects_degenerate_tuning_values() {
        assert!(RecommenderConfig::default().validate().is_ok());

        let zero_min = RecommenderConfig {
            ngram_min: 0,
            ..RecommenderConfig::default()
        };
        assert!(matches!(
            zero_min.validate(),
            Err(ConfigError::NgramRange { min: 0, max: 3 })
        ));

        let inverted = RecommenderConfig {
            ngram_min: 3,
            ngram_max: 2,
            ..RecommenderConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::NgramRange { min: 3, max: 2 })
        ));

        let no_results = RecommenderConfig {
            max_results: 0,
            ..RecommenderConfig::default()
        };
        assert!(matches!(
            no_results.validate(),
            Err(ConfigError::NoResultsAllowed)
        ));
    }

    #[test]
    fn high_min_score_forces_default_fallback() {
        let config = RecommenderConfig {
            min_score: 1.1,
            ..RecommenderConfig::default()
        };
        let recommender = Recommender::new(&crate::spread::default_catalog(), config);
        let suggestions = recommender.recommend("我和她的关系走向？");
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].spread.name(), "单张牌：主题指引");
    }

    #[test]
    fn scores_stay_within_unit_interval() {
        let recommender = Recommender::standard();
        let query = TokenVector::from_terms(
            recommender
                .tokenizer
                .tokenize("我和她的关系走向？工作遇到瓶颈怎么办"),
        );
        for profile in &recommender.profiles {
            let score = query.cosine_similarity(profile.vector());
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}
