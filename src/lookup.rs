//! Intent-specific lookups over the dataset, and the top-level query engine.
//!
//! Every lookup resolves its company through the one shared
//! [`FuzzyResolver`] so the acceptance threshold cannot drift between call
//! sites. Replies are plain data with no presentation markup; rendering is
//! the CLI layer's job.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{Company, DataStore, parse_date};
use crate::error::Result;
use crate::resolver::FuzzyResolver;
use crate::router::IntentRouter;
use crate::templates::Intent;

/// Number of sample company names included in a not-found reply.
const SAMPLE_COMPANY_COUNT: usize = 10;

/// Company status details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub company_name: String,
    pub stage: String,
    pub program: String,
    pub last_contacted: String,
    pub industry: String,
    pub total_funding: i64,
    pub location: String,
}

/// Most recent closed funding round details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingReport {
    pub company_name: String,
    pub funding_type: String,
    pub amount: i64,
    pub date_closed: String,
    pub total_closed_rounds: usize,
}

/// Most recent contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub company_name: String,
    pub last_contact_date: String,
    pub contact_name: String,
    pub contact_role: String,
    pub total_contacts: usize,
}

/// Structured reply to one utterance.
///
/// The four non-success variants map to the recoverable, user-facing
/// conditions: unrecognized intent and missing company name are distinct by
/// construction, a candidate that fails fuzzy resolution reports sample
/// names to guide retry, and an empty result set for a valid company is an
/// informational message rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryReply {
    /// Company status details.
    Status(StatusReport),
    /// Most recent closed funding round.
    Funding(FundingReport),
    /// Most recent contact.
    Contact(ContactReport),
    /// The company resolved, but has no matching records.
    NoRecords {
        company_name: String,
        message: String,
    },
    /// The extracted candidate did not resolve to any known company.
    CompanyNotFound {
        requested: String,
        samples: Vec<String>,
    },
    /// The intent was recognized but no company name was found.
    CompanyNameMissing { intent: Intent },
    /// Similarity to every template fell below the acceptance threshold.
    IntentUnrecognized { confidence: f32 },
}

/// Top-level query engine: parses utterances and dispatches lookups.
#[derive(Debug)]
pub struct QueryEngine {
    store: DataStore,
    router: IntentRouter,
    resolver: FuzzyResolver,
}

impl QueryEngine {
    /// Create an engine over a loaded store, router, and shared resolver.
    pub fn new(store: DataStore, router: IntentRouter, resolver: FuzzyResolver) -> Self {
        Self {
            store,
            router,
            resolver,
        }
    }

    /// Answer one utterance.
    pub fn answer(&self, user_text: &str) -> Result<QueryReply> {
        let descriptor = self.router.parse(user_text)?;
        debug!("parsed descriptor: {descriptor:?}");

        let Some(intent) = descriptor.intent else {
            return Ok(QueryReply::IntentUnrecognized {
                confidence: descriptor.confidence,
            });
        };

        let Some(candidate) = descriptor.raw_company_candidate else {
            return Ok(QueryReply::CompanyNameMissing { intent });
        };

        Ok(match intent {
            Intent::CheckStatus => self.check_status(&candidate),
            Intent::LastFunding => self.last_funding_event(&candidate),
            Intent::LastContact => self.last_contact(&candidate),
        })
    }

    /// Report stage, program, and profile details for a company.
    pub fn check_status(&self, candidate: &str) -> QueryReply {
        let company = match self.resolve_company(candidate) {
            Ok(company) => company,
            Err(reply) => return reply,
        };

        QueryReply::Status(StatusReport {
            company_name: company.name.clone(),
            stage: company.stage.clone(),
            program: company.program.clone(),
            last_contacted: company.last_contacted.clone(),
            industry: company.industry.clone(),
            total_funding: company.total_funding,
            location: company.location.clone(),
        })
    }

    /// Report the most recent closed funding round for a company.
    pub fn last_funding_event(&self, candidate: &str) -> QueryReply {
        let company = match self.resolve_company(candidate) {
            Ok(company) => company,
            Err(reply) => return reply,
        };

        let closed_won: Vec<_> = self
            .store
            .opportunities_for(&company.company_id)
            .into_iter()
            .filter(|o| o.stage == "Closed Won")
            .collect();

        let Some(latest) = closed_won
            .iter()
            .max_by_key(|o| parse_date(&o.date_closed))
        else {
            return QueryReply::NoRecords {
                company_name: company.name.clone(),
                message: "No closed funding rounds found for this company.".to_string(),
            };
        };

        QueryReply::Funding(FundingReport {
            company_name: company.name.clone(),
            funding_type: latest.opportunity_type.clone(),
            amount: latest.amount,
            date_closed: latest.date_closed.clone(),
            total_closed_rounds: closed_won.len(),
        })
    }

    /// Report the most recent meeting with any contact at a company.
    pub fn last_contact(&self, candidate: &str) -> QueryReply {
        let company = match self.resolve_company(candidate) {
            Ok(company) => company,
            Err(reply) => return reply,
        };

        let contacts = self.store.contacts_for(&company.company_id);
        let Some(latest) = contacts
            .iter()
            .max_by_key(|c| parse_date(&c.last_meeting))
        else {
            return QueryReply::NoRecords {
                company_name: company.name.clone(),
                message: "No contacts found for this company.".to_string(),
            };
        };

        QueryReply::Contact(ContactReport {
            company_name: company.name.clone(),
            last_contact_date: latest.last_meeting.clone(),
            contact_name: latest.name.clone(),
            contact_role: latest.role.clone(),
            total_contacts: contacts.len(),
        })
    }

    /// Resolve a candidate name through the shared resolver.
    ///
    /// On failure, builds the not-found reply with sample canonical names.
    fn resolve_company(&self, candidate: &str) -> std::result::Result<&Company, QueryReply> {
        match self.resolver.resolve(candidate, self.store.company_names()) {
            Some(matched) => {
                // The resolver only returns names taken from the store.
                self.store
                    .company_by_name(&matched.name)
                    .ok_or_else(|| QueryReply::CompanyNotFound {
                        requested: candidate.to_string(),
                        samples: self.sample_names(),
                    })
            }
            None => Err(QueryReply::CompanyNotFound {
                requested: candidate.to_string(),
                samples: self.sample_names(),
            }),
        }
    }

    fn sample_names(&self) -> Vec<String> {
        self.store
            .company_names()
            .iter()
            .take(SAMPLE_COMPANY_COUNT)
            .cloned()
            .collect()
    }

    /// The dataset behind this engine.
    pub fn store(&self) -> &DataStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Contact, Opportunity};
    use crate::matcher::{EmbeddingMatcher, MatcherConfig};
    use crate::templates::TemplateBank;

    fn company(id: &str, name: &str) -> Company {
        Company {
            company_id: id.to_string(),
            name: name.to_string(),
            stage: "Series A".to_string(),
            program: "Growth".to_string(),
            last_contacted: "2024-05-01".to_string(),
            industry: "Software".to_string(),
            total_funding: 12_000_000,
            location: "Denver, CO".to_string(),
        }
    }

    fn opportunity(company_id: &str, stage: &str, date: &str, amount: i64) -> Opportunity {
        Opportunity {
            company_id: company_id.to_string(),
            opportunity_type: "Series A".to_string(),
            amount,
            stage: stage.to_string(),
            date_closed: date.to_string(),
        }
    }

    fn contact(company_id: &str, name: &str, date: &str) -> Contact {
        Contact {
            company_id: company_id.to_string(),
            name: name.to_string(),
            role: "CTO".to_string(),
            last_meeting: date.to_string(),
        }
    }

    fn engine() -> QueryEngine {
        let store = DataStore::from_records(
            vec![company("C1", "Acme Corp"), company("C2", "Globex Industries")],
            vec![
                contact("C1", "Jordan Reyes", "2024-03-10"),
                contact("C1", "Sam Okafor", "2024-06-21"),
            ],
            vec![
                opportunity("C1", "Closed Won", "2023-05-01", 4_000_000),
                opportunity("C1", "Closed Won", "2024-02-14", 8_000_000),
                opportunity("C1", "Negotiation", "2024-07-01", 20_000_000),
            ],
        )
        .unwrap();
        let matcher =
            EmbeddingMatcher::new(TemplateBank::new(), MatcherConfig::default()).unwrap();
        QueryEngine::new(store, IntentRouter::new(matcher), FuzzyResolver::default())
    }

    #[test]
    fn test_answer_status() {
        let engine = engine();
        let reply = engine.answer("What is the status of Acme Corp?").unwrap();
        match reply {
            QueryReply::Status(report) => {
                assert_eq!(report.company_name, "Acme Corp");
                assert_eq!(report.stage, "Series A");
                assert_eq!(report.total_funding, 12_000_000);
            }
            other => panic!("expected status reply, got {other:?}"),
        }
    }

    #[test]
    fn test_answer_funding_picks_latest_closed_won() {
        let engine = engine();
        let reply = engine
            .answer("When did Acme Corp last raise funding?")
            .unwrap();
        match reply {
            QueryReply::Funding(report) => {
                assert_eq!(report.company_name, "Acme Corp");
                // The 2024 round beats the 2023 one; the open negotiation
                // round is excluded.
                assert_eq!(report.date_closed, "2024-02-14");
                assert_eq!(report.amount, 8_000_000);
                assert_eq!(report.total_closed_rounds, 2);
            }
            other => panic!("expected funding reply, got {other:?}"),
        }
    }

    #[test]
    fn test_answer_contact_picks_latest_meeting() {
        let engine = engine();
        let reply = engine
            .answer("When was Acme Corp last contacted?")
            .unwrap();
        match reply {
            QueryReply::Contact(report) => {
                assert_eq!(report.contact_name, "Sam Okafor");
                assert_eq!(report.last_contact_date, "2024-06-21");
                assert_eq!(report.total_contacts, 2);
            }
            other => panic!("expected contact reply, got {other:?}"),
        }
    }

    #[test]
    fn test_no_records_is_informational() {
        let engine = engine();
        let reply = engine
            .answer("When did Globex Industries last raise funding?")
            .unwrap();
        match reply {
            QueryReply::NoRecords { company_name, .. } => {
                assert_eq!(company_name, "Globex Industries");
            }
            other => panic!("expected no-records reply, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_company_reports_samples() {
        let engine = engine();
        let reply = engine
            .answer("What is the status of Zzyzx Quarry?")
            .unwrap();
        match reply {
            QueryReply::CompanyNotFound { requested, samples } => {
                assert!(requested.contains("Zzyzx"));
                assert!(!samples.is_empty());
            }
            other => panic!("expected company-not-found reply, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_company_is_distinct_from_not_found() {
        let engine = engine();
        let reply = engine.answer("status?").unwrap();
        assert_eq!(
            reply,
            QueryReply::CompanyNameMissing {
                intent: Intent::CheckStatus
            }
        );
    }

    #[test]
    fn test_unrecognized_intent() {
        let engine = engine();
        let reply = engine.answer("zxcvbn qwerty").unwrap();
        assert!(matches!(reply, QueryReply::IntentUnrecognized { .. }));
    }

    #[test]
    fn test_typo_resolves_to_canonical_company() {
        let engine = engine();
        let reply = engine.answer("What is the status of Acme Crop?").unwrap();
        match reply {
            QueryReply::Status(report) => assert_eq!(report.company_name, "Acme Corp"),
            other => panic!("expected status reply, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_serialization_round_trip() {
        let engine = engine();

        for input in [
            "What is the status of Acme Corp?",
            "When did Acme Corp last raise funding?",
            "When was Acme Corp last contacted?",
            "status?",
            "zxcvbn qwerty",
        ] {
            let reply = engine.answer(input).unwrap();
            let json = serde_json::to_string(&reply).unwrap();
            let parsed: QueryReply = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, reply);
        }
    }
}
