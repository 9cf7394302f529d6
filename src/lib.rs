//! # crmchat
//!
//! A natural-language chat assistant for querying CRM data.
//!
//! Free-text questions are classified into a fixed set of intents by
//! embedding similarity against a bank of example phrasings, a company name
//! is extracted syntactically and resolved fuzzily against the dataset's
//! canonical names, and the resulting query is dispatched to a deterministic
//! CSV-backed lookup.
//!
//! ## Features
//!
//! - Template-bank intent classification (nearest neighbor, no training)
//! - Pluggable text embedding behind the [`embedding::TextEmbedder`] trait
//! - Ordered pattern rules plus a capitalized-run fallback for name extraction
//! - Threshold-gated fuzzy company resolution shared by all lookups
//! - Interactive chat and one-shot CLI front ends

pub mod cli;
pub mod data;
pub mod embedding;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod matcher;
pub mod resolver;
pub mod router;
pub mod templates;
pub mod vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
