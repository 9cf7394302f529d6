//! Static template bank: canonical example phrasings for each query intent.
//!
//! Each phrasing contains exactly one `[company]` placeholder marking where a
//! company name would appear. The bank is fixed at process start and never
//! mutated; its ordering is stable, and the matcher's embedding index is kept
//! in lock-step with it.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// The category of question being asked. Closed, fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Company status: stage, program, industry, funding total, location.
    CheckStatus,
    /// Most recent closed funding round.
    LastFunding,
    /// Most recent contact/meeting with the company.
    LastContact,
}

impl Intent {
    /// Stable string tag for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CheckStatus => "check_status",
            Intent::LastFunding => "last_funding",
            Intent::LastContact => "last_contact",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const CHECK_STATUS_TEMPLATES: &[&str] = &[
    "What is the status of [company]?",
    "Show me the status of [company]",
    "What's the current status of [company]?",
    "Tell me about [company] status",
    "How is [company] doing?",
    "What stage is [company] in?",
    "What program is [company] in?",
    "Show me status of [company]",
    "What is [company] status?",
    "Status of [company]",
    "What's [company] status?",
    "Tell me about [company]",
    "Show me [company] information",
    "What's going on with [company]?",
    "Current status of [company]?",
    "Tell me the status of [company]",
    "What's happening with [company]?",
    "Give me [company] status",
    "Show [company] status",
    "What's the deal with [company]?",
    "How's [company] doing?",
    "What's up with [company]?",
    "Tell me about [company]'s status",
    "What's [company]'s current status?",
    "Status update for [company]",
    "What's the latest on [company]?",
    "How is [company] performing?",
    "What's [company]'s situation?",
    "Give me an update on [company]",
];

const LAST_FUNDING_TEMPLATES: &[&str] = &[
    "When did [company] last raise funding?",
    "What was [company]'s last funding round?",
    "When was [company]'s most recent funding?",
    "Show me [company]'s last funding event",
    "What's the latest funding for [company]?",
    "When did [company] last get funding?",
    "Tell me about [company]'s funding history",
    "When did [company] last raise money?",
    "What's [company]'s latest funding?",
    "Show me [company] funding",
    "When was [company]'s last funding?",
    "Funding for [company]",
    "Last funding round for [company]",
    "When did [company] last get investment?",
    "What's [company]'s most recent funding?",
    "Show me [company]'s funding rounds",
    "When was [company]'s latest funding?",
    "Tell me about [company]'s funding",
    "What funding did [company] get?",
    "When did [company] raise money last?",
    "Show [company] funding history",
    "What's the latest funding round for [company]?",
    "When was [company]'s most recent investment?",
    "Tell me about [company]'s investments",
    "What's [company]'s funding status?",
    "Show me [company]'s investment history",
    "When did [company] last receive funding?",
    "What's [company]'s funding timeline?",
    "Tell me about [company]'s capital raises",
];

const LAST_CONTACT_TEMPLATES: &[&str] = &[
    "When was [company] last contacted?",
    "When did we last meet with [company]?",
    "What's the last contact date for [company]?",
    "When was the last meeting with [company]?",
    "Show me last contact with [company]",
    "When did we last talk to [company]?",
    "What's the most recent contact with [company]?",
    "Last contact with [company]",
    "When did we last contact [company]?",
    "Show me contact history for [company]",
    "Last meeting with [company]",
    "Contact date for [company]",
    "When did we last speak with [company]?",
    "What's the latest contact with [company]?",
    "Show me [company] contact history",
    "When was our last interaction with [company]?",
    "Tell me about [company] contact",
    "What's the last communication with [company]?",
    "When did we last reach out to [company]?",
    "Show me [company] interactions",
    "What's the most recent meeting with [company]?",
    "When was [company] last reached out to?",
    "Tell me about [company] communications",
    "What's the latest interaction with [company]?",
    "Show me [company] communication history",
    "When did we last connect with [company]?",
    "What's [company]'s contact timeline?",
    "Tell me about [company]'s recent contacts",
    "When was [company] last touched base with?",
];

/// The static bank of (intent, phrasing) templates.
///
/// Ordering is stable across calls within a process: all `check_status`
/// phrasings first, then `last_funding`, then `last_contact`, each in
/// declaration order. The matcher relies on this to break similarity ties by
/// first occurrence.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    templates: Vec<(Intent, &'static str)>,
}

impl TemplateBank {
    /// Build the bank from the built-in template data.
    pub fn new() -> Self {
        let mut templates = Vec::new();
        for &phrasing in CHECK_STATUS_TEMPLATES {
            templates.push((Intent::CheckStatus, phrasing));
        }
        for &phrasing in LAST_FUNDING_TEMPLATES {
            templates.push((Intent::LastFunding, phrasing));
        }
        for &phrasing in LAST_CONTACT_TEMPLATES {
            templates.push((Intent::LastContact, phrasing));
        }
        Self { templates }
    }

    /// All template phrasings, in stable bank order.
    pub fn all_templates(&self) -> Vec<&'static str> {
        self.templates.iter().map(|(_, phrasing)| *phrasing).collect()
    }

    /// The (intent, phrasing) pairs, in stable bank order.
    pub fn entries(&self) -> &[(Intent, &'static str)] {
        &self.templates
    }

    /// Number of templates in the bank.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the bank is empty (never true for the built-in data).
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up the intent registered for a phrasing.
    ///
    /// Fails with a template error if the phrasing is not in the bank. This
    /// is internal use only; the matcher always passes phrasings it obtained
    /// from this bank.
    pub fn intent_for(&self, phrasing: &str) -> Result<Intent> {
        self.templates
            .iter()
            .find(|(_, candidate)| *candidate == phrasing)
            .map(|(intent, _)| *intent)
            .ok_or_else(|| {
                ChatError::template(format!("unknown template phrasing: {phrasing:?}"))
            })
    }
}

impl Default for TemplateBank {
    fn default() -> Self {
        Self::new()
    }
}
