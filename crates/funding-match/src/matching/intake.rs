//! Maps the public match-request payload onto a full applicant profile,
//! filling the gaps a short intake form leaves open.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::domain::{
    ApplicantProfile, FundingNeed, HiddenFactors, Location, ProjectStage, TimeCapacity, Urgency,
};

const STORY_LIMIT: usize = 500;
const EXCERPT_LIMIT: usize = 300;
const DEFAULT_MAX_RESULTS: usize = 15;

// States where a non-metro default is the safer assumption for the rural flag.
const RURAL_STATES: &[&str] = &["WV", "VT", "ME", "MT", "WY", "SD", "ND", "AK"];

/// Coarse funding bracket offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AmountBracket {
    Micro,
    Small,
    #[default]
    Medium,
    Large,
}

impl AmountBracket {
    pub fn funding_need(self) -> FundingNeed {
        match self {
            AmountBracket::Micro => FundingNeed::new(0.0, 5_000.0),
            AmountBracket::Small => FundingNeed::new(5_000.0, 25_000.0),
            AmountBracket::Medium => FundingNeed::new(25_000.0, 100_000.0),
            AmountBracket::Large => FundingNeed::new(100_000.0, 1_000_000.0),
        }
    }
}

/// Short stage keys used by the form, mapped onto the questionnaire stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StageKey {
    Concept,
    #[default]
    Planning,
    Launched,
    Growing,
}

impl StageKey {
    pub fn project_stage(self) -> ProjectStage {
        match self {
            StageKey::Concept => ProjectStage::Idea,
            StageKey::Planning => ProjectStage::Planning,
            StageKey::Launched => ProjectStage::Started,
            StageKey::Growing => ProjectStage::Expanding,
        }
    }
}

/// Public request payload for a match pass. Every field is optional; defaults
/// mirror the intake form's.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MatchRequest {
    #[serde(default, alias = "id")]
    pub identity: Vec<String>,
    #[serde(default)]
    pub amount: AmountBracket,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub stage: StageKey,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub capacity: Option<TimeCapacity>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

impl MatchRequest {
    pub fn max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// Expands the form payload into a fully-populated profile.
    pub fn into_profile(self) -> ApplicantProfile {
        let state: String = self
            .state
            .trim()
            .chars()
            .take(2)
            .collect::<String>()
            .to_uppercase();
        let rural_status = RURAL_STATES.contains(&state.as_str());

        let story = truncate_chars(&self.story, STORY_LIMIT);
        let vision = truncate_chars(&self.vision, STORY_LIMIT);
        let description = if !vision.is_empty() {
            vision
        } else if !story.is_empty() {
            story.clone()
        } else {
            "General business or project".to_string()
        };
        let excerpt = truncate_chars(&story, EXCERPT_LIMIT);

        let competitive_advantages = if story.is_empty() {
            Vec::new()
        } else {
            vec!["Strong personal story".to_string()]
        };

        ApplicantProfile {
            location: Location {
                city: self.city.trim().to_string(),
                state,
                zip: if self.zip.trim().is_empty() {
                    "00000".to_string()
                } else {
                    self.zip.trim().to_string()
                },
            },
            age: 35,
            project_type: "business".to_string(),
            project_field: "general".to_string(),
            project_description: description,
            project_stage: self.stage.project_stage(),
            funding_needed: self.amount.funding_need(),
            education_level: self
                .education
                .unwrap_or_else(|| "Some college".to_string()),
            experience_years: self.experience_years.unwrap_or(2),
            licenses: Vec::new(),
            income_bracket: "Under $50K household income".to_string(),
            credit_bracket: "Under 650".to_string(),
            identity_factors: self.identity,
            heritage: String::new(),
            obstacles_overcome: excerpt.clone(),
            community_ties: String::new(),
            unique_story: excerpt,
            hidden_factors: HiddenFactors { rural_status },
            nuanced_qualifications: BTreeMap::new(),
            competitive_advantages,
            urgency: self.urgency.unwrap_or_default(),
            time_capacity: self.capacity.unwrap_or(TimeCapacity::TenToTwentyHours),
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.trim().chars().take(limit).collect()
}
