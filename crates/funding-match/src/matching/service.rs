use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{ApplicantProfile, Match};
use super::explain;
use super::identity;
use super::repository::{RepositoryError, SourceRepository};
use super::scoring::{MatchTuning, ScoringEngine};

/// Orchestrates a match pass: identity filtering, scoring, thresholding,
/// ranking, truncation. Pure function of (profile, catalog snapshot, clock).
pub struct MatchService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
}

impl<R> MatchService<R>
where
    R: SourceRepository,
{
    pub fn new(repository: Arc<R>, tuning: MatchTuning) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(tuning),
        }
    }

    /// Ranks the current catalog against the profile, returning at most
    /// `max_results` matches in descending score order.
    pub fn match_profile(
        &self,
        profile: &ApplicantProfile,
        max_results: usize,
    ) -> Result<Vec<Match>, MatchError> {
        self.match_profile_at(profile, max_results, Utc::now())
    }

    /// Same as [`match_profile`](Self::match_profile) with an explicit clock,
    /// so deadline scoring is reproducible in tests.
    pub fn match_profile_at(
        &self,
        profile: &ApplicantProfile,
        max_results: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Match>, MatchError> {
        let sources = self.repository.list_active()?;
        let identities = profile.normalized_identities();
        let tuning = self.engine.tuning();

        let mut matches = Vec::new();
        for source in sources {
            let required = identity::required_identities(&source);
            if !required.is_empty()
                && !required.iter().any(|tag| tag.satisfied_by(&identities))
            {
                // Restricted program the applicant cannot enter; never shown.
                debug!(source = %source.name, "skipping identity-restricted source");
                continue;
            }

            let scores = self.engine.score(profile, &identities, &source, now);
            let overall_score = scores.composite(&tuning.weights);
            if overall_score < tuning.minimum_overall_score {
                continue;
            }

            let explanations = explain::explain(profile, &identities, &source, &scores);
            matches.push(Match {
                source,
                overall_score,
                scores,
                explanations,
            });
        }

        // Stable sort keeps encounter order for equal scores.
        matches.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(max_results);

        Ok(matches)
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
