//! Turns already-computed signals into human-readable text. No scoring logic
//! lives here.

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, FundingSource};
use super::scoring::Scorecard;

/// Natural-language output attached to every match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExplanationSet {
    pub match_reasons: Vec<String>,
    pub eligibility_gaps: Vec<String>,
    pub competitive_advantages: Vec<String>,
}

pub(crate) fn explain(
    profile: &ApplicantProfile,
    identities: &[String],
    source: &FundingSource,
    scores: &Scorecard,
) -> ExplanationSet {
    ExplanationSet {
        match_reasons: match_reasons(profile, identities, source, scores),
        eligibility_gaps: eligibility_gaps(profile, source),
        competitive_advantages: competitive_advantages(profile, identities),
    }
}

fn has_identity(identities: &[String], label: &str) -> bool {
    identities.iter().any(|factor| factor == label)
}

fn match_reasons(
    profile: &ApplicantProfile,
    identities: &[String],
    source: &FundingSource,
    scores: &Scorecard,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let requirements = source.requirements_text.to_lowercase();

    if scores.eligibility >= 80.0 {
        reasons.push(format!(
            "You meet all major eligibility requirements for {}",
            source.name
        ));
    }

    if scores.success_probability >= 70.0 {
        reasons.push("You have strong competitive advantages for this opportunity".to_string());
    }

    if has_identity(identities, "woman") && requirements.contains("women") {
        reasons.push("Women-owned business program match".to_string());
    }

    if has_identity(identities, "veteran") && requirements.contains("veteran") {
        reasons.push("Veteran-specific funding opportunity".to_string());
    }

    if profile.hidden_factors.rural_status && requirements.contains("rural") {
        reasons.push("Rural location qualifies you for this program".to_string());
    }

    let need_min = profile.funding_needed.min();
    if source.min_amount <= need_min && need_min <= source.max_amount {
        reasons.push(format!(
            "Funding amount ({} - {}) matches your needs",
            format_usd(source.min_amount),
            format_usd(source.max_amount)
        ));
    }

    reasons
}

fn eligibility_gaps(profile: &ApplicantProfile, source: &FundingSource) -> Vec<String> {
    let mut gaps = Vec::new();
    let requirements = source.requirements_text.to_lowercase();

    let mentions_plan = profile
        .competitive_advantages
        .iter()
        .any(|advantage| advantage.to_lowercase().contains("plan"));
    if requirements.contains("business plan") && !mentions_plan {
        gaps.push("Business plan required - not mentioned in your profile".to_string());
    }

    if requirements.contains("financial statements") {
        gaps.push("Financial statements may be required".to_string());
    }

    if requirements.contains("letters of support") || requirements.contains("recommendation") {
        gaps.push("Letters of support/recommendation needed".to_string());
    }

    gaps
}

fn competitive_advantages(profile: &ApplicantProfile, identities: &[String]) -> Vec<String> {
    let mut advantages: Vec<String> = profile
        .competitive_advantages
        .iter()
        .take(3)
        .cloned()
        .collect();

    if identities.len() >= 2 {
        advantages.push("Multiple diversity factors strengthen your application".to_string());
    }

    if profile.obstacles_overcome.chars().count() > 50 {
        advantages.push("Compelling personal story of overcoming obstacles".to_string());
    }

    if profile.experience_years >= 10 {
        advantages.push(format!(
            "{} years of experience in your field",
            profile.experience_years
        ));
    }

    advantages.truncate(5);
    advantages
}

/// Whole-dollar rendering with thousands separators ("25,000").
pub(crate) fn format_usd(amount: f64) -> String {
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount.round() < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
