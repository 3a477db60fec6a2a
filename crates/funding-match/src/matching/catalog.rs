//! CSV catalog importer. One malformed row degrades to defaults or is
//! skipped; it never aborts the rest of the import.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use super::domain::{ApplicationComplexity, EligibilityScope, FundingSource, SourceType};

/// Success rate assumed when a row reports none.
const DEFAULT_SUCCESS_RATE: f64 = 0.1;

/// Fallback range for percentage-based awards ("30% of investment") so they
/// match broadly instead of dropping out.
const OPEN_ENDED_MAX: f64 = 999_999_999.0;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<FundingSource>, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<FundingSource>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut sources = Vec::new();
        let mut next_id: u64 = 1;
        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = match record {
                Ok(row) => row,
                Err(error) => {
                    warn!(%error, "skipping malformed catalog row");
                    continue;
                }
            };
            if let Some(source) = row.into_source(next_id) {
                next_id += 1;
                sources.push(source);
            }
        }

        Ok(sources)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    #[serde(default)]
    provider: String,
    #[serde(default)]
    provider_type: String,
    #[serde(default, rename = "type")]
    source_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    funding_range: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(default)]
    eligible_states: String,
    #[serde(default)]
    eligible_project_types: String,
    #[serde(default)]
    eligible_fields: String,
    #[serde(default)]
    requirements: String,
    #[serde(default)]
    complexity: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    estimated_hours: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    success_rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    awards_last_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
}

impl CatalogRow {
    fn into_source(self, id: u64) -> Option<FundingSource> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return None;
        }

        let (min_amount, max_amount) = self.amounts();
        let deadline = self.deadline.as_deref().and_then(parse_deadline);
        let deadline_type = if deadline.is_some() {
            "fixed".to_string()
        } else {
            "rolling".to_string()
        };

        Some(FundingSource {
            id,
            name,
            provider_name: self.provider,
            provider_type: self.provider_type,
            source_type: normalize_source_type(&self.source_type),
            min_amount,
            max_amount,
            deadline,
            deadline_type,
            eligible_states: parse_scope(&self.eligible_states),
            eligible_project_types: parse_scope(&self.eligible_project_types),
            eligible_fields: parse_scope(&self.eligible_fields),
            requirements_text: self.requirements,
            application_complexity: parse_complexity(&self.complexity),
            estimated_hours: self
                .estimated_hours
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(0.0),
            success_rate: self
                .success_rate
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_SUCCESS_RATE),
            awards_last_year: self
                .awards_last_year
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(0),
            application_url: self.url,
        })
    }

    fn amounts(&self) -> (f64, f64) {
        let explicit_min = self.min_amount.as_deref().and_then(parse_dollars);
        let explicit_max = self.max_amount.as_deref().and_then(parse_dollars);
        if let (Some(min), Some(max)) = (explicit_min, explicit_max) {
            return if min <= max { (min, max) } else { (max, min) };
        }

        if let Some(range) = self.funding_range.as_deref() {
            if let Some(parsed) = parse_funding_range(range) {
                return parsed;
            }
        }

        (explicit_min.unwrap_or(0.0), explicit_max.unwrap_or(0.0))
    }
}

/// Parses "$50,000 - $500,000" style range strings; a single figure yields a
/// point interval, a percentage-based award yields an open-ended one.
pub(crate) fn parse_funding_range(raw: &str) -> Option<(f64, f64)> {
    let amounts = dollar_figures(raw);
    match amounts.as_slice() {
        [single] => Some((*single, *single)),
        [first, second, ..] => {
            if first <= second {
                Some((*first, *second))
            } else {
                Some((*second, *first))
            }
        }
        [] => {
            if raw.contains('%') || raw.to_lowercase().contains("percent") {
                Some((0.0, OPEN_ENDED_MAX))
            } else {
                None
            }
        }
    }
}

fn dollar_figures(raw: &str) -> Vec<f64> {
    let mut figures = Vec::new();
    let mut remainder = raw;
    while let Some(pos) = remainder.find('$') {
        let tail = &remainder[pos + 1..];
        let end = tail
            .find(|c: char| !c.is_ascii_digit() && c != ',' && c != '.')
            .unwrap_or(tail.len());
        if let Some(value) = parse_dollars(&tail[..end]) {
            figures.push(value);
        }
        remainder = &tail[end..];
    }
    figures
}

fn parse_dollars(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Best-effort source-type normalization for loosely-labelled batch data.
pub(crate) fn normalize_source_type(raw: &str) -> SourceType {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "grant" => return SourceType::Grant,
        "loan" => return SourceType::Loan,
        "contest" => return SourceType::Contest,
        "angel" => return SourceType::Angel,
        "microloan" => return SourceType::Microloan,
        "crowdfund" => return SourceType::Crowdfund,
        "tax_credit" => return SourceType::TaxCredit,
        "scholarship" => return SourceType::Scholarship,
        _ => {}
    }
    if lowered.contains("loan") {
        SourceType::Loan
    } else if lowered.contains("tax") || lowered.contains("credit") {
        SourceType::TaxCredit
    } else if lowered.contains("contest") || lowered.contains("prize") {
        SourceType::Contest
    } else {
        SourceType::Grant
    }
}

fn parse_complexity(raw: &str) -> ApplicationComplexity {
    match raw.trim().to_lowercase().as_str() {
        "simple" => ApplicationComplexity::Simple,
        "complex" => ApplicationComplexity::Complex,
        "very_complex" => ApplicationComplexity::VeryComplex,
        _ => ApplicationComplexity::Moderate,
    }
}

/// Pipe-separated tag lists; "ALL" or blank means unrestricted.
fn parse_scope(raw: &str) -> EligibilityScope {
    EligibilityScope::from_tags(raw.split('|').map(|tag| tag.to_string()).collect())
}

fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
