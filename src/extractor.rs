//! Company-name extraction from raw utterances.
//!
//! Purely syntactic: an ordered table of pattern rules tried first-match-wins
//! (rule priority, not match quality, decides), followed by a
//! capitalized-word-run fallback. The extractor never consults the dataset;
//! mapping its candidate to a canonical company name is the
//! [resolver](crate::resolver)'s job.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Capitalized-phrase capture group shared by all rules. Greedy, so a
/// multi-word name is taken whole; the terminator backtracks it to the last
/// allowed character when trailing text intervenes. Case-insensitive
/// matching is applied at the rule level, mirroring the keyword parts.
const NAME: &str = r"([A-Z][a-zA-Z\s&\-'.]+)";

/// Terminator after a captured name: end of phrase or a separator.
const END: &str = r"(?:[?\s,]|$)";

lazy_static! {
    /// Ordered pattern rules. Earliest rule wins; the order is a fidelity
    /// target even where a later rule would capture a better candidate.
    static ref NAME_RULES: Vec<Regex> = {
        let rules = [
            // Keyword-adjacent forms: "of X", "with X", "for X".
            format!(r"(?i)of\s+{NAME}{END}"),
            format!(r"(?i)with\s+{NAME}{END}"),
            format!(r"(?i)for\s+{NAME}{END}"),
            // Possessive: "X's".
            format!(r"(?i){NAME}'s"),
            // Subject before a topic keyword: "X status/funding/contact".
            format!(r"(?i){NAME}\s+(?:status|funding|contact)"),
            // Interrogative forms.
            format!(
                r"(?i)(?:what|when|how|show|tell)\s+(?:is|was|did|does)\s+(?:the\s+)?(?:status|funding|contact)\s+(?:of\s+)?{NAME}{END}"
            ),
            // "did/was X last ..." and bare "X last/most recent" forms.
            format!(r"(?i)(?:when\s+)?(?:did|was)\s+{NAME}\s+(?:last|most\s+recent)"),
            format!(r"(?i){NAME}\s+(?:last|most\s+recent)"),
        ];
        rules
            .iter()
            .map(|rule| Regex::new(rule).expect("extractor rule must compile"))
            .collect()
    };

    /// Characters allowed in a company name: word characters, whitespace,
    /// ampersand, hyphen, apostrophe, period.
    static ref DISALLOWED: Regex = Regex::new(r"[^\w\s&\-'.]").expect("cleanup rule must compile");

    /// Tokens that terminate a capitalized run in the fallback scan.
    static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "and", "or", "for", "with", "of", "in", "on", "at", "to", "from",
        "by", "about", "like", "as", "is", "was", "are", "were", "be", "been",
        "being", "have", "has", "had", "do", "does", "did", "will", "would",
        "could", "should", "may", "might", "can", "must", "shall",
    ]
    .into_iter()
    .collect();
}

/// Minimum length for an accepted candidate; shorter captures are rejected
/// and the next rule is tried.
const MIN_CANDIDATE_LEN: usize = 3;

/// Extract a candidate company name from an utterance.
///
/// Tries each pattern rule in priority order and returns the first capture
/// that survives cleanup and the length check. If no rule matches, scans for
/// runs of capitalized tokens and returns the longest run found. Returns
/// `None` when neither strategy produces a candidate.
pub fn extract(user_text: &str) -> Option<String> {
    for rule in NAME_RULES.iter() {
        if let Some(captures) = rule.captures(user_text) {
            if let Some(candidate) = clean_candidate(&captures[1]) {
                return Some(candidate);
            }
        }
    }

    capitalized_run_fallback(user_text)
}

/// Trim and strip characters outside the allowed set; reject short results.
fn clean_candidate(raw: &str) -> Option<String> {
    let cleaned = DISALLOWED.replace_all(raw, "");
    let cleaned = cleaned.trim();
    if cleaned.len() >= MIN_CANDIDATE_LEN {
        Some(cleaned.to_string())
    } else {
        None
    }
}

/// Fallback heuristic: collect runs of uppercase-initial tokens.
///
/// Every token beginning with an uppercase letter and longer than 2
/// characters starts a run; the run greedily consumes up to 3 subsequent
/// uppercase-initial tokens that are not stop words. The longest run (by
/// character count, first on ties) is the candidate.
fn capitalized_run_fallback(user_text: &str) -> Option<String> {
    let words: Vec<&str> = user_text.split_whitespace().collect();
    let mut candidates: Vec<String> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        if !starts_uppercase(word) || word.chars().count() <= 2 {
            continue;
        }

        let mut run = vec![*word];
        for next in words.iter().skip(i + 1).take(3) {
            if starts_uppercase(next) && !STOP_WORDS.contains(next.to_lowercase().as_str()) {
                run.push(*next);
            } else {
                break;
            }
        }
        candidates.push(run.join(" "));
    }

    let longest = candidates
        .into_iter()
        .fold(None::<String>, |best, candidate| match best {
            Some(best) if best.len() >= candidate.len() => Some(best),
            _ => Some(candidate),
        })?;

    clean_candidate(&longest)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}
