//! Funding-source matching: domain model, eligibility classification, the
//! five-factor scoring engine, explanation generation, and the orchestrating
//! service, plus the HTTP router and catalog importer around them.

pub mod catalog;
pub mod domain;
pub mod explain;
pub mod identity;
pub mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogImportError, CatalogImporter};
pub use domain::{
    ApplicantProfile, ApplicationComplexity, EligibilityScope, FundingNeed, FundingSource,
    HiddenFactors, Location, Match, ProjectStage, SourceType, TimeCapacity, Urgency,
};
pub use explain::ExplanationSet;
pub use identity::{required_identities, IdentityTag};
pub use intake::{AmountBracket, MatchRequest, StageKey};
pub use repository::{RepositoryError, SourceRepository};
pub use router::{match_router, MatchResponse, MatchView, SourceView};
pub use scoring::{MatchTuning, Scorecard, ScoreWeights, ScoringEngine};
pub use service::{MatchError, MatchService};
