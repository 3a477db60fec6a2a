use super::common::*;
use crate::matching::domain::{
    ApplicationComplexity, EligibilityScope, ProjectStage, SourceType, TimeCapacity,
};
use crate::matching::repository::RepositoryError;
use crate::matching::service::{MatchError, MatchService};
use chrono::Duration;
use std::sync::Arc;

#[test]
fn open_source_matches_and_scores_high() {
    let profile = sample_profile();
    let service = service_with(vec![open_source(1, "Open Grant")]);

    let matches = service
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");

    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.source.id, 1);
    assert_eq!(m.scores.eligibility, 100.0);
    // 100*0.35 + 85*0.25 + 65*0.20 + 100*0.10 + 100*0.10
    assert!((m.overall_score - 89.25).abs() < 1e-9);
}

#[test]
fn weak_matches_fall_below_the_floor() {
    let mut profile = sample_profile();
    profile.identity_factors.clear();
    profile.competitive_advantages.clear();
    profile.unique_story.clear();
    profile.experience_years = 0;
    profile.project_stage = ProjectStage::Unspecified;
    profile.project_description.clear();
    profile.time_capacity = TimeCapacity::VeryLimited;

    let mut source = open_source(1, "Long Shot");
    source.source_type = SourceType::Crowdfund;
    source.eligible_states = EligibilityScope::RestrictedTo(vec!["CA".to_string()]);
    source.success_rate = 0.05;
    source.deadline = Some(fixed_now() - Duration::days(30));
    source.application_complexity = ApplicationComplexity::VeryComplex;

    // eligibility 0, success 5, effort 0, timeline 0, fit 50 -> overall 11.25.
    let matches = service_with(vec![source])
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");
    assert!(matches.is_empty());
}

#[test]
fn results_sort_by_score_descending() {
    let profile = sample_profile();
    let mut strong = open_source(2, "High Odds Grant");
    strong.success_rate = 0.9;

    let matches = service_with(vec![open_source(1, "Open Grant"), strong])
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");

    let ids: Vec<u64> = matches.iter().map(|m| m.source.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(matches[0].overall_score > matches[1].overall_score);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let profile = sample_profile();
    let matches = service_with(vec![open_source(1, "Twin A"), open_source(2, "Twin A")])
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");

    let ids: Vec<u64> = matches.iter().map(|m| m.source.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn results_truncate_to_max_results() {
    let profile = sample_profile();
    let sources = (1..=4).map(|id| open_source(id, "Open Grant")).collect();

    let matches = service_with(sources)
        .match_profile_at(&profile, 2, fixed_now())
        .expect("catalog available");
    assert_eq!(matches.len(), 2);
}

#[test]
fn identity_restricted_sources_are_invisible_to_nonmembers() {
    let profile = sample_profile(); // woman, not a veteran
    let veteran_only = open_source(1, "Veteran Entrepreneurs Fund");

    let matches = service_with(vec![veteran_only, open_source(2, "Open Grant")])
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");

    let ids: Vec<u64> = matches.iter().map(|m| m.source.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn identity_restricted_sources_surface_for_members() {
    let mut profile = sample_profile();
    profile.identity_factors = vec!["Veteran".to_string()];

    let matches = service_with(vec![open_source(1, "Veteran Entrepreneurs Fund")])
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");
    assert_eq!(matches.len(), 1);
}

#[test]
fn matching_is_deterministic_for_a_fixed_snapshot() {
    let profile = sample_profile();
    let mut strong = open_source(2, "High Odds Grant");
    strong.success_rate = 0.9;
    let service = service_with(vec![open_source(1, "Open Grant"), strong]);

    let first = service
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");
    let second = service
        .match_profile_at(&profile, 15, fixed_now())
        .expect("catalog available");
    assert_eq!(first, second);
}

#[test]
fn repository_failure_propagates() {
    let profile = sample_profile();
    let service = MatchService::new(Arc::new(UnavailableCatalog), tuning());

    let err = service
        .match_profile_at(&profile, 15, fixed_now())
        .expect_err("repository is down");
    assert!(matches!(
        err,
        MatchError::Repository(RepositoryError::Unavailable(_))
    ));
}
