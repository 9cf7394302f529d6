//! Corpus-fitted embedding engine.
//!
//! Fits a vocabulary on a reference corpus (the template bank) and embeds
//! arbitrary text into that vocabulary's vector space. Deterministic, fully
//! offline, and cheap to construct; the fit happens once at matcher startup
//! and the engine is read-only afterwards.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::embedding::text_embedder::TextEmbedder;
use crate::error::{ChatError, Result};
use crate::vector::Vector;

/// Configuration for embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding generation method.
    pub method: EmbeddingMethod,
    /// Whether to normalize embeddings to unit length.
    pub normalize: bool,
    /// Minimum token length for inclusion in the vocabulary.
    pub min_token_len: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            method: EmbeddingMethod::TfIdf,
            normalize: true,
            min_token_len: 3,
        }
    }
}

/// Methods for generating embeddings from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingMethod {
    /// Term frequency-inverse document frequency.
    TfIdf,
    /// Bag-of-words with binary features.
    BagOfWords,
}

/// Engine for generating text embeddings over a fitted vocabulary.
#[derive(Debug)]
pub struct EmbeddingEngine {
    config: EmbeddingConfig,
    /// Vocabulary: token -> vector index.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency, parallel to vocabulary indices.
    idf: Vec<f32>,
    total_documents: usize,
    is_fitted: bool,
}

impl EmbeddingEngine {
    /// Create a new, unfitted embedding engine.
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            total_documents: 0,
            is_fitted: false,
        }
    }

    /// Fit the engine on a corpus of documents.
    ///
    /// Builds the vocabulary and document frequencies. Refitting on a new
    /// corpus replaces the vector space, which invalidates any embeddings
    /// produced earlier.
    pub fn fit(&mut self, documents: &[&str]) -> Result<()> {
        if documents.is_empty() {
            return Err(ChatError::embedding(
                "cannot fit embedding engine on an empty corpus",
            ));
        }

        self.total_documents = documents.len();

        let mut vocabulary = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let tokens = self.tokenize(document);
            let unique_tokens: HashSet<_> = tokens.into_iter().collect();

            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                if !vocabulary.contains_key(&token) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token, idx);
                }
            }
        }

        // Smoothed IDF: ln((N + 1) / (df + 1)) + 1, never zero, so tokens
        // shared by every document still contribute to similarity.
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &idx) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            idf[idx] =
                ((self.total_documents as f32 + 1.0) / (df as f32 + 1.0)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.is_fitted = true;
        Ok(())
    }

    /// Generate an embedding for a text document.
    ///
    /// Tokens outside the fitted vocabulary are ignored; text made entirely
    /// of unknown tokens embeds to the zero vector, which scores 0.0 against
    /// everything.
    pub fn embed_text(&self, text: &str) -> Result<Vector> {
        if !self.is_fitted {
            return Err(ChatError::embedding(
                "embedding engine must be fitted before use",
            ));
        }

        let tokens = self.tokenize(text);
        let mut data = vec![0.0; self.vocabulary.len()];

        match self.config.method {
            EmbeddingMethod::TfIdf => self.compute_tfidf(&tokens, &mut data),
            EmbeddingMethod::BagOfWords => self.compute_bow(&tokens, &mut data),
        }

        let mut vector = Vector::new(data);
        if self.config.normalize {
            vector.normalize();
        }

        Ok(vector)
    }

    /// Tokenize text into lowercase word terms.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.len() >= self.config.min_token_len)
            .collect()
    }

    /// Compute the TF-IDF vector representation.
    fn compute_tfidf(&self, tokens: &[String], data: &mut [f32]) {
        let mut term_counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *term_counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let total_tokens = tokens.len() as f32;
        if total_tokens == 0.0 {
            return;
        }

        for (term, count) in term_counts {
            if let Some(&idx) = self.vocabulary.get(term) {
                let tf = count as f32 / total_tokens;
                data[idx] = tf * self.idf[idx];
            }
        }
    }

    /// Compute the binary bag-of-words vector representation.
    fn compute_bow(&self, tokens: &[String], data: &mut [f32]) {
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token.as_str()) {
                data[idx] = 1.0;
            }
        }
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if the engine has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }
}

impl TextEmbedder for EmbeddingEngine {
    fn embed(&self, text: &str) -> Result<Vector> {
        self.embed_text(text)
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        match self.config.method {
            EmbeddingMethod::TfIdf => "tfidf",
            EmbeddingMethod::BagOfWords => "bag_of_words",
        }
    }
}
