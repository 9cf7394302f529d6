//! CSV-backed CRM dataset: companies, contacts, opportunities.
//!
//! Loaded once at startup and read-only afterwards. The store owns the
//! canonical company-name list; its order is the file order, which also
//! fixes the fuzzy resolver's tie-break order.

use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// A company record from `companies.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "Company_ID")]
    pub company_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Stage")]
    pub stage: String,
    #[serde(rename = "Program")]
    pub program: String,
    #[serde(rename = "Last_Contacted")]
    pub last_contacted: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Total_Funding")]
    pub total_funding: i64,
    #[serde(rename = "Location")]
    pub location: String,
}

/// A contact record from `contacts.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "Company_ID")]
    pub company_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Last_Meeting")]
    pub last_meeting: String,
}

/// An opportunity record from `opportunities.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "Company_ID")]
    pub company_id: String,
    #[serde(rename = "Type")]
    pub opportunity_type: String,
    #[serde(rename = "Amount")]
    pub amount: i64,
    #[serde(rename = "Stage")]
    pub stage: String,
    #[serde(rename = "Date_Closed")]
    pub date_closed: String,
}

/// Parse a dataset date field.
///
/// Dates are stored as strings in the CSVs and may be absent or malformed;
/// callers ordering by date treat `None` as sorting last.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// In-memory, read-only store over the three CSV tables.
#[derive(Debug, Clone)]
pub struct DataStore {
    companies: Vec<Company>,
    contacts: Vec<Contact>,
    opportunities: Vec<Opportunity>,
    /// Canonical company names, in companies-file order.
    names: Vec<String>,
}

impl DataStore {
    /// Load the store from `companies.csv`, `contacts.csv`, and
    /// `opportunities.csv` under the given directory.
    ///
    /// Any missing file or malformed row is fatal; the assistant cannot
    /// answer questions over a partial dataset.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let companies = read_table(&data_dir.join("companies.csv"))?;
        let contacts = read_table(&data_dir.join("contacts.csv"))?;
        let opportunities = read_table(&data_dir.join("opportunities.csv"))?;
        let store = Self::from_records(companies, contacts, opportunities)?;
        info!(
            "loaded {} companies, {} contacts, {} opportunities",
            store.companies.len(),
            store.contacts.len(),
            store.opportunities.len()
        );
        Ok(store)
    }

    /// Build a store from in-memory records.
    pub fn from_records(
        companies: Vec<Company>,
        contacts: Vec<Contact>,
        opportunities: Vec<Opportunity>,
    ) -> Result<Self> {
        if companies.is_empty() {
            return Err(ChatError::data("companies table is empty"));
        }

        let names = companies.iter().map(|c| c.name.clone()).collect();
        Ok(Self {
            companies,
            contacts,
            opportunities,
            names,
        })
    }

    /// The canonical company names, in stored (file) order.
    pub fn company_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a company by its exact canonical name.
    pub fn company_by_name(&self, name: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.name == name)
    }

    /// All opportunity records for a company.
    pub fn opportunities_for(&self, company_id: &str) -> Vec<&Opportunity> {
        self.opportunities
            .iter()
            .filter(|o| o.company_id == company_id)
            .collect()
    }

    /// All contact records for a company.
    pub fn contacts_for(&self, company_id: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.company_id == company_id)
            .collect()
    }

    /// Number of companies in the store.
    pub fn company_count(&self) -> usize {
        self.companies.len()
    }
}

/// Read one CSV table with a header row into typed records.
fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(ChatError::data(format!(
            "dataset file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
