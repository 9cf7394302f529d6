//! Output rendering for CLI commands.
//!
//! All presentation lives here; the query engine returns plain data. Human
//! rendering includes the guidance text for the recoverable conditions
//! (example phrasings, sample company names).

use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::lookup::QueryReply;

const RULE: &str = "---------------------------------------------------";

/// Render a reply in the requested output format.
pub fn render_reply(reply: &QueryReply, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => {
            if pretty {
                Ok(serde_json::to_string_pretty(reply)?)
            } else {
                Ok(serde_json::to_string(reply)?)
            }
        }
        OutputFormat::Human => Ok(render_human(reply)),
    }
}

fn render_human(reply: &QueryReply) -> String {
    match reply {
        QueryReply::Status(report) => format!(
            "Company Status Report\n{RULE}\n\
             Company:        {}\n\
             Industry:       {}\n\
             Location:       {}\n\
             Stage:          {}\n\
             Program:        {}\n\
             Total Funding:  ${}\n\
             Last Contacted: {}\n{RULE}",
            report.company_name,
            report.industry,
            report.location,
            report.stage,
            report.program,
            group_thousands(report.total_funding),
            report.last_contacted,
        ),
        QueryReply::Funding(report) => format!(
            "Latest Funding Event\n{RULE}\n\
             Company:             {}\n\
             Funding Type:        {}\n\
             Amount:              ${}\n\
             Date Closed:         {}\n\
             Total Closed Rounds: {}\n{RULE}",
            report.company_name,
            report.funding_type,
            group_thousands(report.amount),
            report.date_closed,
            report.total_closed_rounds,
        ),
        QueryReply::Contact(report) => format!(
            "Last Contact Information\n{RULE}\n\
             Company:           {}\n\
             Last Contact Date: {}\n\
             Contact Name:      {}\n\
             Contact Role:      {}\n\
             Total Contacts:    {}\n{RULE}",
            report.company_name,
            report.last_contact_date,
            report.contact_name,
            report.contact_role,
            report.total_contacts,
        ),
        QueryReply::NoRecords {
            company_name,
            message,
        } => format!("{company_name}: {message}"),
        QueryReply::CompanyNotFound { requested, samples } => {
            let mut out = format!(
                "Company '{requested}' not found in the database. \
                 Try one of the known companies:\n"
            );
            for name in samples {
                out.push_str(&format!("  - {name}\n"));
            }
            out.trim_end().to_string()
        }
        QueryReply::CompanyNameMissing { intent } => format!(
            "I understood you want to know about: {intent}\n\
             But I couldn't identify which company you're asking about.\n\
             Please include the company name in your question.\n\
             Example: \"What is the status of Acme Corp?\""
        ),
        QueryReply::IntentUnrecognized { confidence } => format!(
            "I couldn't understand what you're asking for (confidence: {confidence:.2}).\n\
             Try asking about:\n\
             - Company status:  \"What is the status of [Company Name]?\"\n\
             - Funding events:  \"When did [Company Name] last raise funding?\"\n\
             - Contact history: \"When was [Company Name] last contacted?\""
        ),
    }
}

/// Format an integer with comma thousands separators.
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
