use serde::{Deserialize, Serialize};

/// Weights combining the five sub-scores into the composite. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub eligibility: f64,
    pub success_probability: f64,
    pub fit: f64,
    pub timeline: f64,
    pub effort: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            eligibility: 0.35,
            success_probability: 0.25,
            fit: 0.20,
            timeline: 0.10,
            effort: 0.10,
        }
    }
}

/// Tuned constants of the matcher. The threshold and boost cap are observed
/// values with no derivation; they are configuration, not law.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTuning {
    pub weights: ScoreWeights,
    /// Matches scoring below this are not worth surfacing.
    pub minimum_overall_score: f64,
    /// Ceiling on the additive hidden-eligibility boost.
    pub hidden_boost_cap: f64,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            minimum_overall_score: 15.0,
            hidden_boost_cap: 50.0,
        }
    }
}
