//! Derives the identity categories a source restricts itself to from its
//! requirements text and name. A source with no matched tag is universally
//! eligible with respect to identity.

use serde::{Deserialize, Serialize};

use super::domain::FundingSource;

/// Identity categories a funding source can restrict itself to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityTag {
    Veteran,
    Woman,
    Minority,
    Disability,
    Lgbtq,
    FirstGeneration,
}

impl IdentityTag {
    pub const fn label(self) -> &'static str {
        match self {
            IdentityTag::Veteran => "veteran",
            IdentityTag::Woman => "woman",
            IdentityTag::Minority => "minority",
            IdentityTag::Disability => "disability",
            IdentityTag::Lgbtq => "lgbtq",
            IdentityTag::FirstGeneration => "first-generation",
        }
    }

    /// Whether a normalized identity list satisfies this requirement. "Person
    /// of color" counts as minority.
    pub fn satisfied_by(self, normalized_identities: &[String]) -> bool {
        if normalized_identities
            .iter()
            .any(|factor| factor == self.label())
        {
            return true;
        }
        self == IdentityTag::Minority
            && normalized_identities
                .iter()
                .any(|factor| factor == "person of color")
    }
}

const VETERAN_PHRASES: &[&str] = &[
    "veteran-owned",
    "veteran only",
    "veteran business",
    "veterans only",
    "military veteran",
    "service-disabled veteran",
    "for veterans",
    "veteran-owned business",
    "veteran entrepreneur",
];

const WOMAN_PHRASES: &[&str] = &[
    "woman-owned",
    "women-owned",
    "female-owned",
    "women only",
    "for women",
    "women entrepreneur",
    "women-owned business",
];

const MINORITY_PHRASES: &[&str] = &[
    "minority-owned",
    "minority business",
    "minority entrepreneur",
    "person of color",
    "underrepresented minority",
];

const DISABILITY_PHRASES: &[&str] = &[
    "disability",
    "disabled-owned",
    "service-disabled",
    "disabled veteran",
];

// "lgbt " keeps its trailing space to avoid matching inside longer words.
const LGBTQ_PHRASES: &[&str] = &["lgbtq", "lgbt ", "lgbtq+", "pride business", "lgbtq-owned"];

const FIRST_GENERATION_PHRASES: &[&str] = &["first-generation", "first generation", "first-gen"];

fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| haystack.contains(phrase))
}

/// Identity tags the source requires, in first-match order; empty means no
/// identity restriction.
pub fn required_identities(source: &FundingSource) -> Vec<IdentityTag> {
    let name = source.name.to_lowercase();
    let combined = format!("{} {}", source.requirements_text.to_lowercase(), name);

    let mut required = Vec::new();

    // Veteran funds frequently signal only through the program name.
    let veteran_by_name = name.contains("veteran")
        && (name.contains("grant") || name.contains("fund") || name.contains("loan"));
    if contains_any(&combined, VETERAN_PHRASES) || veteran_by_name {
        required.push(IdentityTag::Veteran);
    }

    if contains_any(&combined, WOMAN_PHRASES) {
        required.push(IdentityTag::Woman);
    }

    if contains_any(&combined, MINORITY_PHRASES) {
        required.push(IdentityTag::Minority);
    }

    // A disabled-veteran program requires one identity, not two: veteran wins.
    if contains_any(&combined, DISABILITY_PHRASES) && !combined.contains("veteran") {
        required.push(IdentityTag::Disability);
    }

    if contains_any(&combined, LGBTQ_PHRASES) {
        required.push(IdentityTag::Lgbtq);
    }

    if contains_any(&combined, FIRST_GENERATION_PHRASES) {
        required.push(IdentityTag::FirstGeneration);
    }

    required
}
