//! Text embedding generation for intent matching.

pub mod engine;
pub mod text_embedder;

pub use engine::{EmbeddingConfig, EmbeddingEngine, EmbeddingMethod};
pub use text_embedder::TextEmbedder;
