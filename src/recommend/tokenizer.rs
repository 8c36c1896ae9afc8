//! Term extraction and synonym canonicalization
//!
//! Questions and spread descriptions share one tokenization: maximal ASCII
//! alphanumeric runs are one term class, maximal ideographic runs another.
//! Multi-character ideographic runs are decomposed into 2- and 3-gram
//! substrings so that partial phrasing still overlaps. Each emitted term is
//! looked up in the canonical synonym table; when a surface term has a
//! canonical form, both are kept. The canonical form spreads shared concept
//! signal across synonyms while the surface form preserves exact-match
//! precision.

use regex::Regex;
use std::collections::HashMap;

/// Fixed surface-term to canonical-term mapping
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    map: HashMap<&'static str, &'static str>,
}

impl CanonicalTable {
    /// The standard synonym table for question intent matching
    pub fn standard() -> Self {
        let entries: &[(&str, &str)] = &[
            // relationship wording
            ("感情", "关系"),
            ("恋爱", "关系"),
            ("爱情", "关系"),
            ("婚姻", "关系"),
            ("伴侣", "关系"),
            ("对象", "关系"),
            ("情侣", "关系"),
            ("暧昧", "关系"),
            ("合作", "关系"),
            ("搭档", "关系"),
            // future / trend wording
            ("走向", "未来"),
            ("趋势", "未来"),
            ("发展", "未来"),
            ("前景", "未来"),
            ("接下来", "未来"),
            ("之后", "未来"),
            // advice / decision wording
            ("怎么办", "建议"),
            ("如何", "建议"),
            ("怎么", "建议"),
            ("要不要", "建议"),
            ("是否", "建议"),
            ("方案", "建议"),
            ("方向", "建议"),
            ("选择", "建议"),
            ("决定", "建议"),
            // obstacle wording
            ("困境", "阻碍"),
            ("困难", "阻碍"),
            ("瓶颈", "阻碍"),
            ("压力", "阻碍"),
            ("挑战", "阻碍"),
            ("障碍", "阻碍"),
            ("问题", "阻碍"),
            ("阻力", "阻碍"),
            // cause / outcome wording
            ("成因", "原因"),
            ("结局", "结果"),
        ];
        Self {
            map: entries.iter().copied().collect(),
        }
    }

    /// Empty table; every term is its own canonical form
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Map a surface term to its canonical form, or return it unchanged
    pub fn canonicalize<'a>(&self, term: &'a str) -> &'a str {
        match self.map.get(term) {
            Some(&canonical) => canonical,
            None => term,
        }
    }
}

/// Splits text into terms and expands them into countable sub-tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    canonical: CanonicalTable,
    term_pattern: Regex,
    ngram_min: usize,
    ngram_max: usize,
}

impl Tokenizer {
    /// Degenerate n-gram bounds are clamped to `1 <= ngram_min <= ngram_max`;
    /// [`RecommenderConfig::validate`](super::RecommenderConfig::validate)
    /// rejects them with an error at the configuration boundary.
    pub fn new(canonical: CanonicalTable, ngram_min: usize, ngram_max: usize) -> Self {
        // Anything that is neither an ASCII alphanumeric run nor an
        // ideographic run is a separator.
        let term_pattern = Regex::new(r"[a-z0-9]+|\p{Han}+").expect("term pattern is valid");
        let ngram_min = ngram_min.max(1);
        let ngram_max = ngram_max.max(ngram_min);
        Self {
            canonical,
            term_pattern,
            ngram_min,
            ngram_max,
        }
    }

    /// Standard tokenizer: the fixed synonym table with 2/3-gram expansion
    pub fn standard() -> Self {
        Self::new(CanonicalTable::standard(), 2, 3)
    }

    /// Extract the token multiset of `text`. Blank input yields no tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut tokens = Vec::new();
        for term in self.term_pattern.find_iter(&lowered) {
            self.expand_term(term.as_str(), &mut tokens);
        }
        tokens
    }

    fn expand_term(&self, term: &str, tokens: &mut Vec<String>) {
        if term.is_ascii() {
            self.push_canonicalized(term, tokens);
            return;
        }

        let chars: Vec<char> = term.chars().collect();
        if chars.len() == 1 {
            self.push_canonicalized(term, tokens);
            return;
        }

        // Multi-character ideographic runs contribute only their n-gram
        // decomposition, not whole-run or single-character tokens.
        for size in self.ngram_min..=self.ngram_max {
            if chars.len() < size {
                continue;
            }
            for window in chars.windows(size) {
                let gram: String = window.iter().collect();
                self.push_canonicalized(&gram, tokens);
            }
        }
    }

    fn push_canonicalized(&self, term: &str, tokens: &mut Vec<String>) {
        let canonical = self.canonical.canonicalize(term);
        if canonical != term {
            tokens.push(canonical.to_string());
        }
        tokens.push(term.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(tokens: &[String], term: &str) -> usize {
        tokens.iter().filter(|t| t.as_str() == term).count()
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        let tokenizer = Tokenizer::standard();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \t\n").is_empty());
        assert!(tokenizer.tokenize("！？。，、…—").is_empty());
    }

    #[test]
    fn ascii_terms_are_case_folded() {
        let tokenizer = Tokenizer::standard();
        let tokens = tokenizer.tokenize("Work WORK work");
        assert_eq!(count(&tokens, "work"), 3);
    }

    #[test]
    fn punctuation_separates_terms() {
        let tokenizer = Tokenizer::standard();
        let tokens = tokenizer.tokenize("abc-123, def");
        assert_eq!(count(&tokens, "abc"), 1);
        assert_eq!(count(&tokens, "123"), 1);
        assert_eq!(count(&tokens, "def"), 1);
    }

    #[test]
    fn single_ideographic_char_passes_through() {
        let tokenizer = Tokenizer::standard();
        let tokens = tokenizer.tokenize("火");
        assert_eq!(tokens, vec!["火".to_string()]);
    }

    #[test]
    fn multi_char_runs_expand_to_2_and_3_grams_only() {
        let tokenizer = Tokenizer::new(CanonicalTable::empty(), 2, 3);
        let tokens = tokenizer.tokenize("过去现在");
        // 2-grams: 过去 去现 现在; 3-grams: 过去现 去现在
        assert_eq!(count(&tokens, "过去"), 1);
        assert_eq!(count(&tokens, "去现"), 1);
        assert_eq!(count(&tokens, "现在"), 1);
        assert_eq!(count(&tokens, "过去现"), 1);
        assert_eq!(count(&tokens, "去现在"), 1);
        assert_eq!(count(&tokens, "过"), 0);
        assert_eq!(count(&tokens, "过去现在"), 0);
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn canonical_form_is_added_alongside_surface_form() {
        let tokenizer = Tokenizer::standard();
        let tokens = tokenizer.tokenize("感情");
        assert_eq!(count(&tokens, "关系"), 1);
        assert_eq!(count(&tokens, "感情"), 1);
    }

    #[test]
    fn canonical_terms_map_to_themselves() {
        let table = CanonicalTable::standard();
        assert_eq!(table.canonicalize("关系"), "关系");
        assert_eq!(table.canonicalize("瓶颈"), "阻碍");
        assert_eq!(table.canonicalize("hello"), "hello");
    }

    #[test]
    fn zero_ngram_min_is_clamped_instead_of_panicking() {
        let tokenizer = Tokenizer::new(CanonicalTable::empty(), 0, 3);
        let tokens = tokenizer.tokenize("过去现在");
        // Clamped to 1..=3, so 1-grams appear alongside the 2/3-grams.
        assert_eq!(count(&tokens, "过"), 1);
        assert_eq!(count(&tokens, "过去"), 1);
        assert_eq!(count(&tokens, "过去现"), 1);
    }

    #[test]
    fn inverted_ngram_bounds_are_clamped_to_the_minimum() {
        let tokenizer = Tokenizer::new(CanonicalTable::empty(), 3, 2);
        let tokens = tokenizer.tokenize("过去现在");
        // Clamped to 3..=3: only the 3-gram windows remain.
        assert_eq!(count(&tokens, "过去"), 0);
        assert_eq!(count(&tokens, "过去现"), 1);
        assert_eq!(count(&tokens, "去现在"), 1);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn ideographic_and_ascii_runs_mix() {
        let tokenizer = Tokenizer::new(CanonicalTable::empty(), 2, 3);
        let tokens = tokenizer.tokenize("明天airbnb住宿");
        assert_eq!(count(&tokens, "airbnb"), 1);
        assert_eq!(count(&tokens, "明天"), 1);
        assert_eq!(count(&tokens, "住宿"), 1);
    }
}
