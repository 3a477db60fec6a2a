mod config;
pub(crate) mod rules;

pub use config::{MatchTuning, ScoreWeights};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, FundingSource, TimeCapacity};

/// The five independent sub-scores for one profile/source pairing, each in
/// [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub eligibility: f64,
    pub success_probability: f64,
    pub effort: f64,
    pub timeline: f64,
    pub fit: f64,
}

impl Scorecard {
    pub fn composite(&self, weights: &ScoreWeights) -> f64 {
        self.eligibility * weights.eligibility
            + self.success_probability * weights.success_probability
            + self.fit * weights.fit
            + self.timeline * weights.timeline
            + self.effort * weights.effort
    }
}

/// Stateless scorer applying the tuning to a profile/source pair.
pub struct ScoringEngine {
    tuning: MatchTuning,
}

impl ScoringEngine {
    pub fn new(tuning: MatchTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &MatchTuning {
        &self.tuning
    }

    /// Computes all five sub-scores. `identities` is the profile's normalized
    /// identity list; `now` anchors the timeline scorer.
    pub fn score(
        &self,
        profile: &ApplicantProfile,
        identities: &[String],
        source: &FundingSource,
        now: DateTime<Utc>,
    ) -> Scorecard {
        Scorecard {
            eligibility: self.score_eligibility(profile, identities, source),
            success_probability: score_success_probability(profile, identities, source),
            effort: score_effort(profile, source),
            timeline: score_timeline(profile, source, now),
            fit: score_fit(profile, source),
        }
    }

    /// Can they apply at all? Starts at 100, subtracts structural mismatches,
    /// then adds the hidden-eligibility boost.
    fn score_eligibility(
        &self,
        profile: &ApplicantProfile,
        identities: &[String],
        source: &FundingSource,
    ) -> f64 {
        let mut score = 100.0;

        // Wrong state is the one true disqualifier here.
        if !source.eligible_states.permits(&profile.location.state) {
            score -= 100.0;
        }

        if !source.eligible_project_types.permits(&profile.project_type) {
            score -= 50.0;
        }

        // Field tags are loose: a tag (or its underscores-to-spaces form)
        // appearing anywhere in the field/description text counts.
        let field_tags = source.eligible_fields.tags();
        if !field_tags.is_empty() {
            let haystack = format!(
                "{} {}",
                profile.project_field.to_lowercase(),
                profile.project_description.to_lowercase()
            );
            let field_match = field_tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                haystack.contains(&tag) || haystack.contains(&tag.replace('_', " "))
            });
            if !field_match {
                score -= 10.0;
            }
        }

        // Amount mismatch stays lenient so stretch opportunities still surface.
        let need = profile.funding_needed;
        if source.max_amount < need.min() || source.min_amount > need.max() {
            score -= 20.0;
        }

        let requirements = source.requirements_text.to_lowercase();
        score += rules::hidden_boost(
            profile,
            identities,
            &requirements,
            self.tuning.hidden_boost_cap,
        );

        score.clamp(0.0, 100.0)
    }
}

/// Will they win? Baseline 50 unless the source reports a real success rate.
fn score_success_probability(
    profile: &ApplicantProfile,
    identities: &[String],
    source: &FundingSource,
) -> f64 {
    let mut score = if source.success_rate > 0.0 {
        source.success_rate * 100.0
    } else {
        50.0
    };

    let advantages = profile.competitive_advantages.len();
    if advantages >= 3 {
        score += 20.0;
    } else if advantages == 2 {
        score += 10.0;
    }

    if profile.unique_story.chars().count() > 100 {
        score += 10.0;
    }

    // Both branches apply past ten years; the bonuses stack deliberately.
    if profile.experience_years >= 5 {
        score += 10.0;
    }
    if profile.experience_years >= 10 {
        score += 15.0;
    }

    let field_tags = source.eligible_fields.tags();
    if field_tags
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case("education") || tag.eq_ignore_ascii_case("research"))
    {
        let education = profile.education_level.to_lowercase();
        if education.contains("bachelor") || education.contains("master") {
            score += 10.0;
        }
    }

    // Diversity-focused grants favor multi-factor applications.
    if identities.len() >= 2 {
        score += 15.0;
    }

    score.min(100.0)
}

/// Can they realistically complete the application?
fn score_effort(profile: &ApplicantProfile, source: &FundingSource) -> f64 {
    let mut score = 100.0
        - source.application_complexity.penalty() * profile.time_capacity.effort_multiplier();

    if source.estimated_hours > 0.0 {
        if source.estimated_hours > 40.0 && profile.time_capacity == TimeCapacity::VeryLimited {
            score -= 30.0;
        } else if source.estimated_hours < 5.0 {
            // Quick win.
            score += 10.0;
        }
    }

    score.clamp(0.0, 100.0)
}

/// Can they meet the deadline? Rolling deadlines score a flat 100.
fn score_timeline(profile: &ApplicantProfile, source: &FundingSource, now: DateTime<Utc>) -> f64 {
    let Some(deadline) = source.deadline else {
        return 100.0;
    };

    // Floor, not truncate: a deadline that passed hours ago is day -1, while
    // one expiring later today is still day 0 and stays live.
    let days_until_deadline = (deadline - now).num_seconds().div_euclid(86_400);
    if days_until_deadline < 0 {
        return 0.0;
    }

    let mut score: f64 = 100.0;
    if days_until_deadline < 30 && source.application_complexity.is_demanding() {
        score -= 50.0;
    } else if days_until_deadline > profile.urgency.threshold_days() {
        score -= 20.0;
    }

    score.max(0.0)
}

/// Is this the right funding for their vision? Keyword overlap plus
/// stage/source-type alignment over a baseline of 50.
fn score_fit(profile: &ApplicantProfile, source: &FundingSource) -> f64 {
    let mut score = 50.0;

    let project_keywords = rules::extract_keywords(&profile.project_description);
    let source_keywords =
        rules::extract_keywords(&format!("{} {}", source.name, source.requirements_text));
    let overlap = project_keywords.intersection(&source_keywords).count() as f64;
    score += (overlap * 5.0).min(30.0);

    if profile
        .project_stage
        .preferred_source_types()
        .contains(&source.source_type)
    {
        score += 15.0;
    }

    score.min(100.0)
}
