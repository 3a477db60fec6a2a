use crate::infra::{default_tuning, seed_catalog, InMemorySourceRepository};
use clap::Args;
use funding_match::error::AppError;
use funding_match::matching::{
    AmountBracket, CatalogImporter, MatchRequest, MatchService, MatchView, StageKey,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Catalog CSV to rank; defaults to the built-in seed catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Two-letter state code for the applicant.
    #[arg(long, default_value = "WV")]
    pub(crate) state: String,
    /// Funding bracket: micro, small, medium, or large.
    #[arg(long, default_value = "small", value_parser = parse_amount)]
    pub(crate) amount: AmountBracket,
    /// Project stage: concept, planning, launched, or growing.
    #[arg(long, default_value = "planning", value_parser = parse_stage)]
    pub(crate) stage: StageKey,
    /// Identity factor, repeatable (e.g. --identity woman --identity veteran).
    #[arg(long = "identity")]
    pub(crate) identities: Vec<String>,
    /// Short story about the applicant and their project.
    #[arg(long)]
    pub(crate) story: Option<String>,
    /// Maximum number of matches to print.
    #[arg(long, default_value_t = 10)]
    pub(crate) max_results: usize,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        catalog,
        state,
        amount,
        stage,
        identities,
        story,
        max_results,
    } = args;

    let sources = match catalog {
        Some(path) => CatalogImporter::from_path(path)?,
        None => seed_catalog(),
    };
    println!("Funding match demo ({} sources in catalog)", sources.len());

    let request = MatchRequest {
        identity: identities,
        amount,
        state,
        story: story.unwrap_or_default(),
        stage,
        ..MatchRequest::default()
    };
    let profile = request.into_profile();
    println!(
        "Applicant: state {} | {} identity factor(s) | needs ${:.0} - ${:.0}",
        profile.location.state,
        profile.identity_factors.len(),
        profile.funding_needed.min(),
        profile.funding_needed.max()
    );

    let repository = Arc::new(InMemorySourceRepository::with_sources(sources));
    let service = MatchService::new(repository, default_tuning());
    let matches = service.match_profile(&profile, max_results)?;

    if matches.is_empty() {
        println!("\nNo sources cleared the match threshold for this profile.");
        return Ok(());
    }

    println!("\nTop matches:");
    for (rank, matched) in matches.into_iter().enumerate() {
        let view = MatchView::from_match(matched);
        println!(
            "{:>2}. {} ({}) - score {:.1}",
            rank + 1,
            view.source.name,
            view.source.source_type,
            view.overall_score
        );
        println!(
            "    ${:.0} - ${:.0} | eligibility {:.1} | success {:.1} | effort {:.1} | timeline {:.1} | fit {:.1}",
            view.source.min_amount,
            view.source.max_amount,
            view.eligibility_score,
            view.success_probability,
            view.effort_score,
            view.timeline_score,
            view.fit_score
        );
        for reason in &view.match_reasons {
            println!("    + {reason}");
        }
        for gap in &view.eligibility_gaps {
            println!("    - {gap}");
        }
    }

    Ok(())
}

fn parse_amount(raw: &str) -> Result<AmountBracket, String> {
    match raw.trim().to_lowercase().as_str() {
        "micro" => Ok(AmountBracket::Micro),
        "small" => Ok(AmountBracket::Small),
        "medium" => Ok(AmountBracket::Medium),
        "large" => Ok(AmountBracket::Large),
        other => Err(format!(
            "unknown amount bracket '{other}' (expected micro, small, medium, or large)"
        )),
    }
}

fn parse_stage(raw: &str) -> Result<StageKey, String> {
    match raw.trim().to_lowercase().as_str() {
        "concept" => Ok(StageKey::Concept),
        "planning" => Ok(StageKey::Planning),
        "launched" => Ok(StageKey::Launched),
        "growing" => Ok(StageKey::Growing),
        other => Err(format!(
            "unknown stage '{other}' (expected concept, planning, launched, or growing)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_and_stage_flags_parse_known_values() {
        assert_eq!(parse_amount(" Small "), Ok(AmountBracket::Small));
        assert_eq!(parse_stage("LAUNCHED"), Ok(StageKey::Launched));
        assert!(parse_amount("huge").is_err());
        assert!(parse_stage("someday").is_err());
    }

    #[test]
    fn seed_catalog_produces_matches_for_the_default_applicant() {
        let request = MatchRequest {
            identity: vec!["Woman".to_string()],
            amount: AmountBracket::Small,
            state: "WV".to_string(),
            stage: StageKey::Launched,
            story: "Opening a bakery in a small mountain town".to_string(),
            ..MatchRequest::default()
        };
        let profile = request.into_profile();

        let repository = Arc::new(InMemorySourceRepository::with_sources(seed_catalog()));
        let service = MatchService::new(repository, default_tuning());
        let matches = service.match_profile(&profile, 10).expect("catalog available");

        assert!(!matches.is_empty());
        assert!(matches
            .iter()
            .all(|m| m.source.name != "Veteran Entrepreneurs Fund"));
    }
}
