//! Declarative rule table behind the hidden-eligibility boost, plus the
//! keyword tokenizer shared with the fit scorer.
//!
//! Each rule pairs a profile-side signal with requirements-text keywords and a
//! fixed point value; rules are evaluated uniformly and their contributions
//! summed before the global cap is applied.

use std::collections::HashSet;

use super::super::domain::ApplicantProfile;

/// Which free-text profile field a rule inspects.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ProfileText {
    Heritage,
    Obstacles,
    CommunityTies,
}

fn profile_text(profile: &ApplicantProfile, field: ProfileText) -> &str {
    match field {
        ProfileText::Heritage => &profile.heritage,
        ProfileText::Obstacles => &profile.obstacles_overcome,
        ProfileText::CommunityTies => &profile.community_ties,
    }
}

/// Profile-side condition of a boost rule.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ProfileSignal {
    /// Any of these labels appears in the normalized identity list.
    IdentityAnyOf(&'static [&'static str]),
    /// The same vocabulary term appears in both the profile field and the
    /// requirements text.
    SharedTerm {
        field: ProfileText,
        vocabulary: &'static [&'static str],
    },
    /// The profile field mentions one vocabulary, the requirements another.
    TermPair {
        field: ProfileText,
        profile_terms: &'static [&'static str],
    },
    /// The rural intake flag is set.
    RuralFlag,
}

pub(crate) struct BoostRule {
    pub(crate) signal: ProfileSignal,
    pub(crate) requirement_terms: &'static [&'static str],
    pub(crate) points: f64,
}

const HERITAGE_TERMS: &[&str] = &[
    "irish",
    "italian",
    "asian",
    "hispanic",
    "latino",
    "appalachian",
    "tribal",
    "indigenous",
];

const COMMUNITY_TERMS: &[&str] = &[
    "church",
    "religious",
    "fraternal",
    "union",
    "tribal",
    "civic",
];

pub(crate) const BOOST_RULES: &[BoostRule] = &[
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["woman"]),
        requirement_terms: &["women", "woman-owned"],
        points: 25.0,
    },
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["veteran"]),
        requirement_terms: &["veteran", "military"],
        points: 30.0,
    },
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["minority", "person of color"]),
        requirement_terms: &["minority", "diverse", "underrepresented"],
        points: 25.0,
    },
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["disability"]),
        requirement_terms: &["disability", "accessible"],
        points: 20.0,
    },
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["lgbtq"]),
        requirement_terms: &["lgbtq", "pride"],
        points: 20.0,
    },
    BoostRule {
        signal: ProfileSignal::SharedTerm {
            field: ProfileText::Heritage,
            vocabulary: HERITAGE_TERMS,
        },
        requirement_terms: &[],
        points: 15.0,
    },
    BoostRule {
        signal: ProfileSignal::TermPair {
            field: ProfileText::Obstacles,
            profile_terms: &["poor", "poverty", "homeless", "foster"],
        },
        requirement_terms: &[
            "poverty",
            "low-income",
            "disadvantaged",
            "underserved",
            "second-chance",
        ],
        points: 20.0,
    },
    BoostRule {
        signal: ProfileSignal::SharedTerm {
            field: ProfileText::CommunityTies,
            vocabulary: COMMUNITY_TERMS,
        },
        requirement_terms: &[],
        points: 15.0,
    },
    BoostRule {
        signal: ProfileSignal::RuralFlag,
        requirement_terms: &["rural"],
        points: 30.0,
    },
    BoostRule {
        signal: ProfileSignal::IdentityAnyOf(&["first-generation"]),
        requirement_terms: &["first-generation", "first gen"],
        points: 15.0,
    },
];

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack.contains(term))
}

fn rule_applies(
    rule: &BoostRule,
    profile: &ApplicantProfile,
    identities: &[String],
    requirements: &str,
) -> bool {
    match rule.signal {
        ProfileSignal::IdentityAnyOf(labels) => {
            identities.iter().any(|id| labels.contains(&id.as_str()))
                && contains_any(requirements, rule.requirement_terms)
        }
        ProfileSignal::SharedTerm { field, vocabulary } => {
            let text = profile_text(profile, field).to_lowercase();
            vocabulary
                .iter()
                .any(|term| text.contains(term) && requirements.contains(term))
        }
        ProfileSignal::TermPair {
            field,
            profile_terms,
        } => {
            let text = profile_text(profile, field).to_lowercase();
            contains_any(&text, profile_terms)
                && contains_any(requirements, rule.requirement_terms)
        }
        ProfileSignal::RuralFlag => {
            profile.hidden_factors.rural_status
                && contains_any(requirements, rule.requirement_terms)
        }
    }
}

/// Additive bonus from free-text correlation between the profile and the
/// requirements text, capped at `cap`. `requirements` must be lowercased.
pub(crate) fn hidden_boost(
    profile: &ApplicantProfile,
    identities: &[String],
    requirements: &str,
    cap: f64,
) -> f64 {
    let boost: f64 = BOOST_RULES
        .iter()
        .filter(|rule| rule_applies(rule, profile, identities, requirements))
        .map(|rule| rule.points)
        .sum();
    boost.min(cap)
}

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Lowercase word tokens longer than three characters, stopwords dropped.
pub(crate) fn extract_keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 3 && !STOPWORDS.contains(word))
        .map(|word| word.to_string())
        .collect()
}
