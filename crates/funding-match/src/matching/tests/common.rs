use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::matching::domain::{
    ApplicantProfile, ApplicationComplexity, EligibilityScope, FundingNeed, FundingSource,
    HiddenFactors, Location, ProjectStage, SourceType, TimeCapacity, Urgency,
};
use crate::matching::repository::{RepositoryError, SourceRepository};
use crate::matching::scoring::{MatchTuning, ScoringEngine};
use crate::matching::service::MatchService;

/// Deterministic clock for deadline math.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid timestamp")
}

pub(super) fn tuning() -> MatchTuning {
    MatchTuning::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(tuning())
}

/// Appalachian founder profile mirroring the intake walkthrough.
pub(super) fn sample_profile() -> ApplicantProfile {
    ApplicantProfile {
        location: Location {
            city: "Johnson City".to_string(),
            state: "TN".to_string(),
            zip: "37601".to_string(),
        },
        age: 43,
        project_type: "business".to_string(),
        project_field: "AI consulting".to_string(),
        project_description: "Building AI tools for underserved communities".to_string(),
        project_stage: ProjectStage::Started,
        funding_needed: FundingNeed::new(10_000.0, 50_000.0),
        education_level: "Some college".to_string(),
        experience_years: 2,
        licenses: Vec::new(),
        income_bracket: "Under $25K household income".to_string(),
        credit_bracket: "Under 580".to_string(),
        identity_factors: vec![
            "Woman".to_string(),
            "First-generation college student".to_string(),
        ],
        heritage: "Appalachian".to_string(),
        obstacles_overcome: "Poverty, lack of formal education".to_string(),
        community_ties: "Rural community, church member".to_string(),
        unique_story: "Building AI tools that serve Appalachian communities".to_string(),
        hidden_factors: HiddenFactors { rural_status: true },
        nuanced_qualifications: BTreeMap::new(),
        competitive_advantages: vec![
            "Deep community knowledge".to_string(),
            "Unique market focus".to_string(),
            "Lived experience".to_string(),
        ],
        urgency: Urgency::WithinSixMonths,
        time_capacity: TimeCapacity::TenToTwentyHours,
    }
}

/// Open grant with no restrictions; baseline for scorer tests.
pub(super) fn open_source(id: u64, name: &str) -> FundingSource {
    FundingSource {
        id,
        name: name.to_string(),
        provider_name: "Test Provider".to_string(),
        provider_type: "foundation".to_string(),
        source_type: SourceType::Grant,
        min_amount: 1_000.0,
        max_amount: 50_000.0,
        deadline: None,
        deadline_type: "rolling".to_string(),
        eligible_states: EligibilityScope::Unrestricted,
        eligible_project_types: EligibilityScope::Unrestricted,
        eligible_fields: EligibilityScope::Unrestricted,
        requirements_text: String::new(),
        application_complexity: ApplicationComplexity::Simple,
        estimated_hours: 10.0,
        success_rate: 0.0,
        awards_last_year: 0,
        application_url: None,
    }
}

pub(super) struct MemoryCatalog {
    sources: Vec<FundingSource>,
}

impl MemoryCatalog {
    pub(super) fn new(sources: Vec<FundingSource>) -> Self {
        Self { sources }
    }
}

impl SourceRepository for MemoryCatalog {
    fn list_active(&self) -> Result<Vec<FundingSource>, RepositoryError> {
        Ok(self.sources.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl SourceRepository for UnavailableCatalog {
    fn list_active(&self) -> Result<Vec<FundingSource>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with(sources: Vec<FundingSource>) -> MatchService<MemoryCatalog> {
    MatchService::new(Arc::new(MemoryCatalog::new(sources)), tuning())
}
