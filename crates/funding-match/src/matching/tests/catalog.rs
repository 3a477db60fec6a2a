use chrono::{Datelike, Timelike};

use crate::matching::catalog::{normalize_source_type, parse_funding_range, CatalogImporter};
use crate::matching::domain::{ApplicationComplexity, EligibilityScope, SourceType};

const HEADER: &str = "name,provider,provider_type,type,min_amount,max_amount,funding_range,\
                      deadline,eligible_states,eligible_project_types,eligible_fields,\
                      requirements,complexity,estimated_hours,success_rate,awards_last_year,url";

fn import(rows: &[&str]) -> Vec<crate::matching::domain::FundingSource> {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    CatalogImporter::from_reader(csv.as_bytes()).expect("csv parses")
}

#[test]
fn complete_row_imports_every_field() {
    let sources = import(&[
        "Appalachian Growth Grant,Appalachia Fund,foundation,grant,5000,50000,,2025-09-01,\
         TN|WV,business,,Open to small businesses,simple,10,0.25,12,https://example.org/apply",
    ]);

    assert_eq!(sources.len(), 1);
    let source = &sources[0];
    assert_eq!(source.id, 1);
    assert_eq!(source.name, "Appalachian Growth Grant");
    assert_eq!(source.provider_name, "Appalachia Fund");
    assert_eq!(source.source_type, SourceType::Grant);
    assert_eq!(source.min_amount, 5_000.0);
    assert_eq!(source.max_amount, 50_000.0);
    assert_eq!(source.deadline_type, "fixed");
    let deadline = source.deadline.expect("deadline parsed");
    assert_eq!(
        (deadline.year(), deadline.month(), deadline.day(), deadline.hour()),
        (2025, 9, 1, 0)
    );
    assert!(source.eligible_states.permits("wv"));
    assert!(!source.eligible_states.permits("CA"));
    assert_eq!(source.application_complexity, ApplicationComplexity::Simple);
    assert_eq!(source.estimated_hours, 10.0);
    assert_eq!(source.success_rate, 0.25);
    assert_eq!(source.awards_last_year, 12);
    assert_eq!(
        source.application_url.as_deref(),
        Some("https://example.org/apply")
    );
}

#[test]
fn funding_range_fills_in_missing_amounts() {
    let sources = import(&[
        "Range Grant,Prov,,grant,,,\"$50,000 - $500,000\",,ALL,,,,,,,,",
    ]);

    assert_eq!(sources[0].min_amount, 50_000.0);
    assert_eq!(sources[0].max_amount, 500_000.0);
    assert_eq!(sources[0].eligible_states, EligibilityScope::Unrestricted);
}

#[test]
fn inverted_explicit_amounts_are_swapped() {
    let sources = import(&["Swap Grant,Prov,,grant,50000,5000,,,ALL,,,,,,,,"]);
    assert_eq!(sources[0].min_amount, 5_000.0);
    assert_eq!(sources[0].max_amount, 50_000.0);
}

#[test]
fn sparse_row_degrades_to_defaults() {
    let sources = import(&["Mystery Grant,,,,,,,soon,,,,,,,,,"]);

    let source = &sources[0];
    assert_eq!(source.source_type, SourceType::Grant);
    assert_eq!(source.application_complexity, ApplicationComplexity::Moderate);
    assert_eq!(source.success_rate, 0.1);
    assert_eq!(source.estimated_hours, 0.0);
    // Unparseable deadline falls back to rolling.
    assert!(source.deadline.is_none());
    assert_eq!(source.deadline_type, "rolling");
    assert_eq!(source.eligible_states, EligibilityScope::Unrestricted);
}

#[test]
fn nameless_rows_are_skipped_without_gaps_in_ids() {
    let sources = import(&[
        "First Grant,Prov,,grant,,,,,ALL,,,,,,,,",
        " ,Prov,,grant,,,,,ALL,,,,,,,,",
        "Second Grant,Prov,,grant,,,,,ALL,,,,,,,,",
    ]);

    let ids: Vec<u64> = sources.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(sources[1].name, "Second Grant");
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let sources = import(&[
        "First Grant,Prov,,grant,,,,,ALL,,,,,,,,",
        "Broken Grant,Prov,,grant,,,,,ALL,,,,,,,,,surplus,fields",
        "Second Grant,Prov,,grant,,,,,ALL,,,,,,,,",
    ]);

    let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["First Grant", "Second Grant"]);
    assert_eq!(sources[1].id, 2);
}

#[test]
fn range_parsing_handles_points_and_percentages() {
    assert_eq!(
        parse_funding_range("$50,000 - $500,000"),
        Some((50_000.0, 500_000.0))
    );
    assert_eq!(parse_funding_range("$25,000"), Some((25_000.0, 25_000.0)));
    assert_eq!(parse_funding_range("$500,000 - $50,000"), Some((50_000.0, 500_000.0)));
    assert_eq!(
        parse_funding_range("30% of qualified investment"),
        Some((0.0, 999_999_999.0))
    );
    assert_eq!(parse_funding_range("varies"), None);
}

#[test]
fn loose_type_labels_normalize_by_keyword() {
    assert_eq!(normalize_source_type("grant"), SourceType::Grant);
    assert_eq!(normalize_source_type("Prize Competition"), SourceType::Contest);
    assert_eq!(normalize_source_type("SBA Microloan Program"), SourceType::Loan);
    assert_eq!(normalize_source_type("State tax credit"), SourceType::TaxCredit);
    assert_eq!(normalize_source_type("something else"), SourceType::Grant);
}
