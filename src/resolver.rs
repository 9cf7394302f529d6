//! Fuzzy resolution of extracted company names against the canonical set.
//!
//! One shared resolver serves every lookup so the acceptance threshold and
//! tie-break rule are defined exactly once. The resolver doubles as an
//! existence check ("is this company known?") and a correction mechanism
//! (typos and partial names); both roles use the same score gate.

use log::debug;
use serde::{Deserialize, Serialize};

/// Configuration for fuzzy company-name resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Score (0-100) a match must strictly exceed to be accepted.
    pub min_score: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { min_score: 70.0 }
    }
}

/// A canonical company name matched by the resolver, with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMatch {
    /// The canonical spelling from the dataset.
    pub name: String,
    /// Similarity score on the 0-100 scale.
    pub score: f64,
}

/// Threshold-gated fuzzy matcher over a caller-supplied canonical name list.
#[derive(Debug, Clone)]
pub struct FuzzyResolver {
    config: ResolverConfig,
}

impl FuzzyResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolve a candidate string to the closest canonical name.
    ///
    /// Scores the candidate against every canonical name and returns the
    /// highest scorer, provided its score strictly exceeds the configured
    /// minimum. Ties resolve to the first canonical name of equal top score
    /// in the caller's stored order.
    pub fn resolve(&self, candidate: &str, canonical_names: &[String]) -> Option<CompanyMatch> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }

        let mut best: Option<CompanyMatch> = None;
        for name in canonical_names {
            let score = similarity_score(candidate, name);
            // Strict comparison keeps the earliest name on ties.
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(CompanyMatch {
                    name: name.clone(),
                    score,
                });
            }
        }

        let best = best?;
        debug!(
            "best fuzzy match for {:?}: {:?} at {:.1}",
            candidate, best.name, best.score
        );
        if best.score > self.config.min_score {
            Some(best)
        } else {
            None
        }
    }

    /// The resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl Default for FuzzyResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Approximate string similarity on a 0-100 scale.
///
/// Case-insensitive maximum of three normalized-Levenshtein views: the whole
/// strings, the token-sorted strings (word-order noise), and the best
/// same-token-count window of the longer string against the shorter (partial
/// names and over-captured candidates). Monotonic in string closeness; exact
/// matches score 100.
pub fn similarity_score(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let whole = strsim::normalized_levenshtein(&a, &b);
    let token_sorted = token_sort_ratio(&a, &b);
    let windowed = partial_window_ratio(&a, &b);

    whole.max(token_sorted).max(windowed) * 100.0
}

/// Normalized Levenshtein over the sorted token sequences of both strings.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let mut a_tokens: Vec<&str> = a.split_whitespace().collect();
    let mut b_tokens: Vec<&str> = b.split_whitespace().collect();
    a_tokens.sort_unstable();
    b_tokens.sort_unstable();
    strsim::normalized_levenshtein(&a_tokens.join(" "), &b_tokens.join(" "))
}

/// Best score of the shorter string against every same-token-count window of
/// the longer one. Lets "Acme" match "Acme Corp" and an over-captured
/// "when did acme corp last raise" still find "acme corp".
fn partial_window_ratio(a: &str, b: &str) -> f64 {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();

    let (short, long) = if a_tokens.len() <= b_tokens.len() {
        (a_tokens, b_tokens)
    } else {
        (b_tokens, a_tokens)
    };

    if short.is_empty() || short.len() == long.len() {
        return 0.0;
    }

    let needle = short.join(" ");
    long.windows(short.len())
        .map(|window| strsim::normalized_levenshtein(&needle, &window.join(" ")))
        .fold(0.0, f64::max)
}
