//! Text embedding trait for the intent-matching pipeline.

use crate::error::Result;
use crate::vector::Vector;

/// Trait for converting text to vector embeddings.
///
/// This is the seam between the intent matcher and the embedding backend.
/// The bundled [`EmbeddingEngine`](crate::embedding::EmbeddingEngine) is a
/// deterministic corpus-fitted implementation; a neural sentence-embedding
/// model can plug in behind the same trait. Whatever the backend, templates
/// and user input must be embedded by the *same* instance so they share one
/// vector space.
///
/// # Examples
///
/// ```
/// use crmchat::embedding::TextEmbedder;
/// use crmchat::error::Result;
/// use crmchat::vector::Vector;
///
/// struct ConstantEmbedder {
///     dimension: usize,
/// }
///
/// impl TextEmbedder for ConstantEmbedder {
///     fn embed(&self, _text: &str) -> Result<Vector> {
///         Ok(Vector::new(vec![1.0; self.dimension]))
///     }
///
///     fn dimension(&self) -> usize {
///         self.dimension
///     }
/// }
/// ```
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding vector for the given text.
    fn embed(&self, text: &str) -> Result<Vector>;

    /// Generate embeddings for multiple texts.
    ///
    /// The default implementation calls `embed` sequentially.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text)?);
        }
        Ok(results)
    }

    /// Get the dimension of generated embeddings.
    fn dimension(&self) -> usize;

    /// Get the name/identifier of this embedder, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
