//! Sparse term-frequency vectors

use std::collections::HashMap;

/// A term-frequency vector with its precomputed Euclidean magnitude
#[derive(Debug, Clone, Default)]
pub struct TokenVector {
    counts: HashMap<String, u32>,
    magnitude: f64,
}

impl TokenVector {
    /// Aggregate a token multiset into term counts
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        let magnitude = counts
            .values()
            .map(|&count| f64::from(count) * f64::from(count))
            .sum::<f64>()
            .sqrt();
        Self { counts, magnitude }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Cosine similarity in [0, 1]; zero when either vector is empty.
    /// The dot product iterates the smaller map and probes the larger.
    pub fn cosine_similarity(&self, other: &TokenVector) -> f64 {
        if self.magnitude == 0.0 || other.magnitude == 0.0 {
            return 0.0;
        }

        let (smaller, larger) = if self.counts.len() <= other.counts.len() {
            (&self.counts, &other.counts)
        } else {
            (&other.counts, &self.counts)
        };

        let mut dot = 0.0;
        for (term, &count) in smaller {
            if let Some(&other_count) = larger.get(term) {
                dot += f64::from(count) * f64::from(other_count);
            }
        }

        dot / (self.magnitude * other.magnitude)
    }
}
