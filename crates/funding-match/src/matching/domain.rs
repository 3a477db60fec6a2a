use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::explain::ExplanationSet;
use super::scoring::Scorecard;

/// Applicant location captured during intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    pub city: String,
    /// Two-letter state code, uppercase.
    pub state: String,
    pub zip: String,
}

/// Closed dollar interval the applicant needs; `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FundingNeedRepr")]
pub struct FundingNeed {
    min: f64,
    max: f64,
}

/// Wire shape for [`FundingNeed`]; conversion funnels through `new` so an
/// inverted interval is normalized on the way in.
#[derive(Deserialize)]
struct FundingNeedRepr {
    min: f64,
    max: f64,
}

impl From<FundingNeedRepr> for FundingNeed {
    fn from(repr: FundingNeedRepr) -> Self {
        FundingNeed::new(repr.min, repr.max)
    }
}

impl FundingNeed {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Where the applicant is in their project journey. Labels match the intake
/// questionnaire verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStage {
    #[serde(rename = "Just an idea I can't stop thinking about")]
    Idea,
    #[serde(rename = "I've been planning this for a while")]
    Planning,
    #[serde(rename = "I've started but need help to grow")]
    Started,
    #[serde(rename = "I'm already doing this and want to expand")]
    Expanding,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl ProjectStage {
    /// Source types that suit this stage best, in preference order.
    pub fn preferred_source_types(self) -> &'static [SourceType] {
        match self {
            ProjectStage::Idea => &[SourceType::Grant, SourceType::Contest, SourceType::Microloan],
            ProjectStage::Planning => &[SourceType::Grant, SourceType::Loan, SourceType::Contest],
            ProjectStage::Started | ProjectStage::Expanding => {
                &[SourceType::Loan, SourceType::Grant, SourceType::Angel]
            }
            ProjectStage::Unspecified => &[],
        }
    }
}

/// How soon the applicant needs money in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Urgency {
    #[serde(rename = "As soon as possible (emergency)")]
    Emergency,
    #[serde(rename = "Within 3 months")]
    WithinThreeMonths,
    #[default]
    #[serde(rename = "Within 6 months")]
    WithinSixMonths,
    #[serde(rename = "Within a year")]
    WithinYear,
    #[serde(rename = "No rush, just exploring")]
    Exploring,
}

impl Urgency {
    /// Deadline horizon (days) beyond which an opportunity is farther out than
    /// the applicant's stated need.
    pub fn threshold_days(self) -> i64 {
        match self {
            Urgency::Emergency => 30,
            Urgency::WithinThreeMonths => 90,
            Urgency::WithinSixMonths => 180,
            Urgency::WithinYear => 365,
            Urgency::Exploring => 9999,
        }
    }
}

/// Weekly time the applicant can spend on applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeCapacity {
    #[serde(rename = "A few hours per week")]
    FewHoursPerWeek,
    #[serde(rename = "Very limited time")]
    VeryLimited,
    #[serde(rename = "10-20 hours per week")]
    TenToTwentyHours,
    #[serde(rename = "Full-time (40+ hours)")]
    FullTime,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl TimeCapacity {
    /// Scales the application-complexity penalty: less time makes the same
    /// paperwork cost more.
    pub fn effort_multiplier(self) -> f64 {
        match self {
            TimeCapacity::FewHoursPerWeek => 2.0,
            TimeCapacity::VeryLimited => 3.0,
            TimeCapacity::TenToTwentyHours => 1.0,
            TimeCapacity::FullTime => 0.5,
            TimeCapacity::Unspecified => 1.0,
        }
    }
}

/// Signals inferred during intake rather than asked directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HiddenFactors {
    #[serde(default)]
    pub rural_status: bool,
}

/// Immutable applicant snapshot scored against every catalog source.
///
/// Free-text fields default to empty strings so keyword rules never need to
/// special-case missing input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub location: Location,
    pub age: u32,
    pub project_type: String,
    pub project_field: String,
    #[serde(default)]
    pub project_description: String,
    pub project_stage: ProjectStage,
    pub funding_needed: FundingNeed,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub income_bracket: String,
    #[serde(default)]
    pub credit_bracket: String,
    #[serde(default)]
    pub identity_factors: Vec<String>,
    #[serde(default)]
    pub heritage: String,
    #[serde(default)]
    pub obstacles_overcome: String,
    #[serde(default)]
    pub community_ties: String,
    #[serde(default)]
    pub unique_story: String,
    #[serde(default)]
    pub hidden_factors: HiddenFactors,
    /// Opaque to the engine; carried through for the caller.
    #[serde(default)]
    pub nuanced_qualifications: BTreeMap<String, String>,
    #[serde(default)]
    pub competitive_advantages: Vec<String>,
    pub urgency: Urgency,
    pub time_capacity: TimeCapacity,
}

impl ApplicantProfile {
    /// Identity factors lowercased and trimmed, empties dropped. Every identity
    /// comparison in the engine runs against this normalized form.
    pub fn normalized_identities(&self) -> Vec<String> {
        self.identity_factors
            .iter()
            .map(|factor| factor.trim().to_lowercase())
            .filter(|factor| !factor.is_empty())
            .collect()
    }
}

/// Kind of funding a source offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Grant,
    Loan,
    Contest,
    Angel,
    Microloan,
    Crowdfund,
    TaxCredit,
    Scholarship,
}

impl SourceType {
    pub const fn label(self) -> &'static str {
        match self {
            SourceType::Grant => "grant",
            SourceType::Loan => "loan",
            SourceType::Contest => "contest",
            SourceType::Angel => "angel",
            SourceType::Microloan => "microloan",
            SourceType::Crowdfund => "crowdfund",
            SourceType::TaxCredit => "tax_credit",
            SourceType::Scholarship => "scholarship",
        }
    }
}

/// How heavy the application paperwork is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationComplexity {
    Simple,
    #[default]
    Moderate,
    Complex,
    VeryComplex,
}

impl ApplicationComplexity {
    pub fn penalty(self) -> f64 {
        match self {
            ApplicationComplexity::Simple => 0.0,
            ApplicationComplexity::Moderate => 20.0,
            ApplicationComplexity::Complex => 40.0,
            ApplicationComplexity::VeryComplex => 60.0,
        }
    }

    /// Complex applications need runway; used by the timeline scorer.
    pub fn is_demanding(self) -> bool {
        matches!(
            self,
            ApplicationComplexity::Complex | ApplicationComplexity::VeryComplex
        )
    }
}

/// Eligibility restriction on a list-typed source field. Replaces the storage
/// encoding's "ALL" sentinel with an explicit variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EligibilityScope {
    #[default]
    Unrestricted,
    RestrictedTo(Vec<String>),
}

impl EligibilityScope {
    /// Builds a scope from a raw tag list; an empty list or an "ALL" entry
    /// means unrestricted.
    pub fn from_tags(tags: Vec<String>) -> Self {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        if tags.is_empty() || tags.iter().any(|tag| tag.eq_ignore_ascii_case("all")) {
            EligibilityScope::Unrestricted
        } else {
            EligibilityScope::RestrictedTo(tags)
        }
    }

    pub fn permits(&self, value: &str) -> bool {
        match self {
            EligibilityScope::Unrestricted => true,
            EligibilityScope::RestrictedTo(tags) => {
                tags.iter().any(|tag| tag.eq_ignore_ascii_case(value))
            }
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            EligibilityScope::Unrestricted => &[],
            EligibilityScope::RestrictedTo(tags) => tags,
        }
    }
}

/// One funding opportunity as delivered by the record store. Read-only during
/// a match pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    pub id: u64,
    pub name: String,
    pub provider_name: String,
    #[serde(default)]
    pub provider_type: String,
    pub source_type: SourceType,
    pub min_amount: f64,
    pub max_amount: f64,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deadline_type: String,
    #[serde(default)]
    pub eligible_states: EligibilityScope,
    #[serde(default)]
    pub eligible_project_types: EligibilityScope,
    #[serde(default)]
    pub eligible_fields: EligibilityScope,
    #[serde(default)]
    pub requirements_text: String,
    #[serde(default)]
    pub application_complexity: ApplicationComplexity,
    #[serde(default)]
    pub estimated_hours: f64,
    /// Historical award rate in [0,1]; 0 means unknown.
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub awards_last_year: u32,
    #[serde(default)]
    pub application_url: Option<String>,
}

/// Scored pairing of one source with the applicant, ready for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub source: FundingSource,
    pub overall_score: f64,
    pub scores: Scorecard,
    pub explanations: ExplanationSet,
}
