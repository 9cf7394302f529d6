//! Command implementations for the crmchat CLI.

use std::io::{self, BufRead, Write};

use log::info;

use crate::cli::args::{AskArgs, ChatArgs, Command};
use crate::cli::output::render_reply;
use crate::data::DataStore;
use crate::error::Result;
use crate::lookup::QueryEngine;
use crate::matcher::{EmbeddingMatcher, MatcherConfig};
use crate::resolver::{FuzzyResolver, ResolverConfig};
use crate::router::IntentRouter;
use crate::templates::TemplateBank;

/// Execute a CLI command.
pub fn execute_command(args: ChatArgs) -> Result<()> {
    let engine = build_engine(&args)?;

    match &args.command {
        Command::Chat => run_chat(&engine, &args),
        Command::Ask(ask_args) => run_ask(&engine, ask_args.clone(), &args),
    }
}

/// Construct the query engine from CLI configuration.
///
/// This is the one place the model state is built: the template bank is
/// embedded once here and shared by reference for the rest of the process.
fn build_engine(args: &ChatArgs) -> Result<QueryEngine> {
    if args.verbosity() > 0 {
        println!("Loading CRM data from: {}", args.data_dir.display());
    }

    let store = DataStore::load(&args.data_dir)?;
    if args.verbosity() > 0 {
        println!("Loaded {} companies", store.company_count());
    }

    let matcher = EmbeddingMatcher::new(
        TemplateBank::new(),
        MatcherConfig {
            similarity_threshold: args.similarity_threshold,
        },
    )?;
    info!("template index ready ({} templates)", matcher.bank().len());

    let resolver = FuzzyResolver::new(ResolverConfig {
        min_score: args.fuzzy_threshold,
    });

    Ok(QueryEngine::new(store, IntentRouter::new(matcher), resolver))
}

/// Answer a single question and print the reply.
fn run_ask(engine: &QueryEngine, ask_args: AskArgs, cli_args: &ChatArgs) -> Result<()> {
    let reply = engine.answer(&ask_args.question)?;
    let rendered = render_reply(&reply, cli_args.output_format, cli_args.pretty)?;
    println!("{rendered}");
    Ok(())
}

/// Run the interactive chat loop.
fn run_chat(engine: &QueryEngine, cli_args: &ChatArgs) -> Result<()> {
    println!("CRM Chat Assistant");
    println!("Ask about your CRM data in natural language. Example questions:");
    println!("  - \"What is the status of Acme Corp?\"");
    println!("  - \"When did Acme Corp last raise funding?\"");
    println!("  - \"When was Acme Corp last contacted?\"");
    println!("Type 'quit' or 'exit' to leave.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("\n> ");
        stdout.flush()?;

        let mut line = String::new();
        // EOF ends the session like an explicit quit.
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        let reply = engine.answer(input)?;
        let rendered = render_reply(&reply, cli_args.output_format, cli_args.pretty)?;
        println!("{rendered}");
    }

    println!("Goodbye!");
    Ok(())
}
