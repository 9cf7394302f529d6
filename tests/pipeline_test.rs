//! End-to-end tests for the question-answering pipeline.

use std::fs;
use std::path::Path;

use crmchat::data::DataStore;
use crmchat::extractor;
use crmchat::lookup::{QueryEngine, QueryReply};
use crmchat::matcher::{EmbeddingMatcher, MatcherConfig};
use crmchat::resolver::{FuzzyResolver, ResolverConfig};
use crmchat::router::IntentRouter;
use crmchat::templates::{Intent, TemplateBank};

fn engine_over(store: DataStore) -> QueryEngine {
    let matcher = EmbeddingMatcher::new(TemplateBank::new(), MatcherConfig::default()).unwrap();
    QueryEngine::new(store, IntentRouter::new(matcher), FuzzyResolver::default())
}

fn sample_engine() -> QueryEngine {
    let store = DataStore::load(Path::new("data")).unwrap();
    engine_over(store)
}

#[test]
fn sample_dataset_loads_in_file_order() {
    let store = DataStore::load(Path::new("data")).unwrap();
    assert_eq!(store.company_count(), 10);
    assert_eq!(store.company_names()[0], "Bowman-Campbell");
    assert_eq!(store.company_names()[3], "Acme Corp");
}

#[test]
fn status_question_end_to_end() {
    let engine = sample_engine();
    let reply = engine.answer("What is the status of Acme Corp?").unwrap();
    match reply {
        QueryReply::Status(report) => {
            assert_eq!(report.company_name, "Acme Corp");
            assert_eq!(report.stage, "Series A");
            assert_eq!(report.location, "Denver, CO");
        }
        other => panic!("expected status reply, got {other:?}"),
    }
}

#[test]
fn funding_question_end_to_end() {
    let engine = sample_engine();
    let reply = engine
        .answer("When did Acme Corp last raise funding?")
        .unwrap();
    match reply {
        QueryReply::Funding(report) => {
            assert_eq!(report.company_name, "Acme Corp");
            assert_eq!(report.date_closed, "2024-02-14");
            assert_eq!(report.total_closed_rounds, 2);
        }
        other => panic!("expected funding reply, got {other:?}"),
    }
}

#[test]
fn contact_question_end_to_end() {
    let engine = sample_engine();
    let reply = engine
        .answer("When was Spears LLC last contacted?")
        .unwrap();
    match reply {
        QueryReply::Contact(report) => {
            assert_eq!(report.company_name, "Spears LLC");
            assert_eq!(report.contact_name, "Marcus Webb");
            assert_eq!(report.last_contact_date, "2024-06-21");
        }
        other => panic!("expected contact reply, got {other:?}"),
    }
}

#[test]
fn misspelled_company_still_resolves() {
    let engine = sample_engine();
    let reply = engine
        .answer("What is the status of Bowman-Cambell?")
        .unwrap();
    match reply {
        QueryReply::Status(report) => assert_eq!(report.company_name, "Bowman-Campbell"),
        other => panic!("expected status reply, got {other:?}"),
    }
}

#[test]
fn company_with_no_closed_rounds_is_informational() {
    let engine = sample_engine();
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
fn company_with_no_contacts_is_informational() {
    let engine = sample_engine();
    let reply = engine
        .answer("When was Vandelay Export last contacted?")
        .unwrap();
    match reply {
        QueryReply::NoRecords { company_name, .. } => {
            assert_eq!(company_name, "Vandelay Export");
        }
        other => panic!("expected no-records reply, got {other:?}"),
    }
}

#[test]
fn unknown_company_reports_samples() {
    let engine = sample_engine();
    let reply = engine
        .answer("What is the status of Quuxify Dynamics?")
        .unwrap();
    match reply {
        QueryReply::CompanyNotFound { samples, .. } => {
            assert!(!samples.is_empty());
            assert!(samples.contains(&"Bowman-Campbell".to_string()));
        }
        other => panic!("expected company-not-found reply, got {other:?}"),
    }
}

#[test]
fn gibberish_is_unrecognized_not_an_error() {
    let engine = sample_engine();
    let reply = engine.answer("zxcvbn qwerty uiop").unwrap();
    assert!(matches!(reply, QueryReply::IntentUnrecognized { .. }));
}

#[test]
fn failure_conditions_are_distinct() {
    let engine = sample_engine();

    // Intent known, company absent.
    let missing = engine.answer("status?").unwrap();
    assert!(matches!(missing, QueryReply::CompanyNameMissing { .. }));

    // Intent known, candidate present but unresolvable.
    let unknown = engine
        .answer("What is the status of Zzyzx Quarry?")
        .unwrap();
    assert!(matches!(unknown, QueryReply::CompanyNotFound { .. }));
}

#[test]
fn answers_are_idempotent() {
    let engine = sample_engine();
    for input in [
        "What is the status of Acme Corp?",
        "When did Hooli Labs last raise funding?",
        "nonsense input here",
    ] {
        let first = engine.answer(input).unwrap();
        let second = engine.answer(input).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn every_canonical_name_survives_the_full_pipeline() {
    let engine = sample_engine();
    for name in engine.store().company_names().to_vec() {
        let reply = engine
            .answer(&format!("What is the status of {name}?"))
            .unwrap();
        match reply {
            QueryReply::Status(report) => assert_eq!(report.company_name, name),
            other => panic!("company {name:?} produced {other:?}"),
        }
    }
}

#[test]
fn extractor_and_matcher_agree_on_spec_examples() {
    let matcher = EmbeddingMatcher::new(TemplateBank::new(), MatcherConfig::default()).unwrap();

    assert_eq!(
        extractor::extract("What is the status of Acme Corp?").as_deref(),
        Some("Acme Corp")
    );
    assert_eq!(
        matcher
            .classify("What is the status of Acme Corp?")
            .unwrap()
            .intent,
        Some(Intent::CheckStatus)
    );

    let candidate = extractor::extract("When did Acme Corp last raise funding?").unwrap();
    assert!(candidate.contains("Acme Corp"));
    assert_eq!(
        matcher
            .classify("When did Acme Corp last raise funding?")
            .unwrap()
            .intent,
        Some(Intent::LastFunding)
    );

    assert_eq!(extractor::extract("tell me something"), None);
}

#[test]
fn engine_works_over_generated_fixture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("companies.csv"),
        "Company_ID,Name,Stage,Program,Last_Contacted,Industry,Total_Funding,Location\n\
         X1,Umbrella Research,Seed,Incubator,2024-01-01,Biotech,500000,\"Raleigh, NC\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("contacts.csv"),
        "Company_ID,Name,Role,Last_Meeting\nX1,Ada Moreno,CEO,2024-01-01\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("opportunities.csv"),
        "Company_ID,Type,Amount,Stage,Date_Closed\nX1,Seed,500000,Closed Won,2023-06-30\n",
    )
    .unwrap();

    let store = DataStore::load(dir.path()).unwrap();
    let engine = engine_over(store);

    let reply = engine
        .answer("When did Umbrella Research last raise funding?")
        .unwrap();
    match reply {
        QueryReply::Funding(report) => {
            assert_eq!(report.company_name, "Umbrella Research");
            assert_eq!(report.amount, 500_000);
        }
        other => panic!("expected funding reply, got {other:?}"),
    }
}

#[test]
fn tightened_fuzzy_threshold_rejects_loose_matches() {
    let store = DataStore::load(Path::new("data")).unwrap();
    let matcher = EmbeddingMatcher::new(TemplateBank::new(), MatcherConfig::default()).unwrap();
    let strict = FuzzyResolver::new(ResolverConfig { min_score: 99.0 });
    let engine = QueryEngine::new(store, IntentRouter::new(matcher), strict);

    // A one-letter typo scores below 99 and no longer resolves.
    let reply = engine
        .answer("What is the status of Initach?")
        .unwrap();
    assert!(matches!(reply, QueryReply::CompanyNotFound { .. }));
}
