//! Nearest-neighbor intent classification over the template embedding index.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::embedding::engine::{EmbeddingConfig, EmbeddingEngine};
use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{ChatError, Result};
use crate::templates::{Intent, TemplateBank};
use crate::vector::{Vector, cosine_similarity};

/// Configuration for the embedding matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum cosine similarity for a template match to be accepted.
    pub similarity_threshold: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
        }
    }
}

/// Outcome of classifying one utterance against the template bank.
///
/// `template` and `intent` are both `Some` or both `None`; `score` is always
/// the best similarity found, even when it fell below the acceptance
/// threshold.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The best-matching template phrasing, if it cleared the threshold.
    pub template: Option<&'static str>,
    /// Cosine similarity of the best match.
    pub score: f32,
    /// The intent registered for the best-matching template.
    pub intent: Option<Intent>,
}

/// Intent classifier backed by a template embedding index.
///
/// Construction embeds every template phrasing once; the resulting index is
/// read-only for the process lifetime and kept in lock-step with the bank's
/// order. Classification is a linear cosine-similarity scan with a stable
/// argmax (ties go to the earliest template in bank order).
pub struct EmbeddingMatcher {
    bank: TemplateBank,
    embedder: Box<dyn TextEmbedder>,
    index: Vec<Vector>,
    config: MatcherConfig,
}

impl std::fmt::Debug for EmbeddingMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingMatcher")
            .field("templates", &self.bank.len())
            .field("embedder", &self.embedder.name())
            .field("config", &self.config)
            .finish()
    }
}

impl EmbeddingMatcher {
    /// Build a matcher with the default embedding engine fitted on the bank.
    ///
    /// Fitting the engine on the template corpus puts templates and user
    /// input in the same vector space, which cosine similarity requires.
    pub fn new(bank: TemplateBank, config: MatcherConfig) -> Result<Self> {
        let phrasings = bank.all_templates();
        let mut engine = EmbeddingEngine::new(EmbeddingConfig::default());
        engine.fit(&phrasings)?;
        Self::with_embedder(bank, Box::new(engine), config)
    }

    /// Build a matcher with a caller-supplied embedder.
    ///
    /// The embedder must already be able to encode the bank's phrasings; the
    /// same instance is used for user input at classification time.
    pub fn with_embedder(
        bank: TemplateBank,
        embedder: Box<dyn TextEmbedder>,
        config: MatcherConfig,
    ) -> Result<Self> {
        if bank.is_empty() {
            return Err(ChatError::template("template bank is empty"));
        }

        let phrasings = bank.all_templates();
        let index = embedder.embed_batch(&phrasings)?;
        debug!(
            "embedded {} templates with {} ({} dimensions)",
            index.len(),
            embedder.name(),
            embedder.dimension()
        );

        Ok(Self {
            bank,
            embedder,
            index,
            config,
        })
    }

    /// Classify an utterance against the template bank.
    ///
    /// Encodes the input with the same embedder used for the index, scans
    /// every template vector for the maximum cosine similarity, and accepts
    /// the best match only at or above the configured threshold.
    pub fn classify(&self, user_text: &str) -> Result<Classification> {
        let user_vector = self.embedder.embed(user_text)?;

        let mut best_idx = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (idx, template_vector) in self.index.iter().enumerate() {
            let score = cosine_similarity(&user_vector.data, &template_vector.data);
            // Strict comparison keeps the first template on ties.
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }

        let (intent, template) = self.bank.entries()[best_idx];
        debug!(
            "best template {:?} (intent {}) scored {:.3}",
            template, intent, best_score
        );

        if best_score >= self.config.similarity_threshold {
            Ok(Classification {
                template: Some(template),
                score: best_score,
                intent: Some(intent),
            })
        } else {
            Ok(Classification {
                template: None,
                score: best_score,
                intent: None,
            })
        }
    }

    /// The template bank backing this matcher.
    pub fn bank(&self) -> &TemplateBank {
        &self.bank
    }

    /// The matcher configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> EmbeddingMatcher {
        EmbeddingMatcher::new(TemplateBank::new(), MatcherConfig::default()).unwrap()
    }

    #[test]
    fn test_every_template_self_matches() {
        let matcher = matcher();
        for (intent, phrasing) in matcher.bank().entries().to_vec() {
            let classification = matcher.classify(phrasing).unwrap();
            assert!(
                classification.score >= matcher.config().similarity_threshold,
                "template {phrasing:?} scored {} below threshold",
                classification.score
            );
            assert_eq!(
                classification.intent,
                Some(intent),
                "template {phrasing:?} classified as {:?}",
                classification.intent
            );
        }
    }

    #[test]
    fn test_status_question() {
        let matcher = matcher();
        let classification = matcher
            .classify("What is the status of Acme Corp?")
            .unwrap();
        assert_eq!(classification.intent, Some(Intent::CheckStatus));
        assert!(classification.template.is_some());
    }

    #[test]
    fn test_funding_question() {
        let matcher = matcher();
        let classification = matcher
            .classify("When did Acme Corp last raise funding?")
            .unwrap();
        assert_eq!(classification.intent, Some(Intent::LastFunding));
    }

    #[test]
    fn test_contact_question() {
        let matcher = matcher();
        let classification = matcher
            .classify("When was Acme Corp last contacted?")
            .unwrap();
        assert_eq!(classification.intent, Some(Intent::LastContact));
    }

    #[test]
    fn test_gibberish_is_rejected() {
        let matcher = matcher();
        let classification = matcher.classify("xyzzy plugh qwerty").unwrap();
        assert_eq!(classification.intent, None);
        assert_eq!(classification.template, None);
        assert!(classification.score < matcher.config().similarity_threshold);
    }

    #[test]
    fn test_intent_and_template_agree() {
        let matcher = matcher();
        for input in ["status of Acme", "zzzz", "funding for Globex"] {
            let c = matcher.classify(input).unwrap();
            assert_eq!(c.intent.is_some(), c.template.is_some());
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let matcher = matcher();
        let a = matcher.classify("What is the status of Acme?").unwrap();
        let b = matcher.classify("What is the status of Acme?").unwrap();
        assert_eq!(a.template, b.template);
        assert_eq!(a.intent, b.intent);
        assert_eq!(a.score, b.score);
    }
}
