//! Intent routing: combines the extractor and matcher into one descriptor.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extractor;
use crate::matcher::EmbeddingMatcher;
use crate::templates::Intent;

/// The parsed form of one utterance, consumed immediately by the lookup
/// layer and never persisted.
///
/// `intent` is `None` exactly when the matcher's best similarity fell below
/// its threshold, and `matched_template` is populated exactly when `intent`
/// is. `raw_company_candidate` being `None` means the extractor found
/// nothing; a populated candidate can still fail fuzzy resolution later, and
/// the two conditions are reported distinctly downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// The recognized intent, if the similarity threshold was cleared.
    pub intent: Option<Intent>,
    /// The extractor's candidate company name, not yet resolved.
    pub raw_company_candidate: Option<String>,
    /// Best template similarity in [0, 1].
    pub confidence: f32,
    /// The template that produced the intent, if any.
    pub matched_template: Option<String>,
}

/// Parses utterances into [`QueryDescriptor`]s.
///
/// The extractor and matcher run independently (neither feeds the other);
/// the router only packages their outputs. The fuzzy-resolution threshold is
/// deliberately not applied here: each lookup performs resolution itself
/// through the shared resolver.
#[derive(Debug)]
pub struct IntentRouter {
    matcher: EmbeddingMatcher,
}

impl IntentRouter {
    /// Create a router over an already-constructed matcher.
    pub fn new(matcher: EmbeddingMatcher) -> Self {
        Self { matcher }
    }

    /// Parse an utterance into a query descriptor.
    pub fn parse(&self, user_text: &str) -> Result<QueryDescriptor> {
        let raw_company_candidate = extractor::extract(user_text);
        let classification = self.matcher.classify(user_text)?;

        Ok(QueryDescriptor {
            intent: classification.intent,
            raw_company_candidate,
            confidence: classification.score,
            matched_template: classification.template.map(str::to_string),
        })
    }

    /// The matcher backing this router.
    pub fn matcher(&self) -> &EmbeddingMatcher {
        &self.matcher
    }
}
