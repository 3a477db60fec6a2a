use chrono::{TimeZone, Utc};
use funding_match::matching::{
    ApplicationComplexity, EligibilityScope, FundingSource, MatchTuning, RepositoryError,
    SourceRepository, SourceType,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySourceRepository {
    sources: Arc<Mutex<Vec<FundingSource>>>,
}

impl InMemorySourceRepository {
    pub(crate) fn with_sources(sources: Vec<FundingSource>) -> Self {
        Self {
            sources: Arc::new(Mutex::new(sources)),
        }
    }
}

impl SourceRepository for InMemorySourceRepository {
    fn list_active(&self) -> Result<Vec<FundingSource>, RepositoryError> {
        let guard = self.sources.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }
}

pub(crate) fn default_tuning() -> MatchTuning {
    MatchTuning::default()
}

fn source(
    id: u64,
    name: &str,
    provider: &str,
    provider_type: &str,
    source_type: SourceType,
    min_amount: f64,
    max_amount: f64,
    requirements: &str,
    complexity: ApplicationComplexity,
    estimated_hours: f64,
    success_rate: f64,
) -> FundingSource {
    FundingSource {
        id,
        name: name.to_string(),
        provider_name: provider.to_string(),
        provider_type: provider_type.to_string(),
        source_type,
        min_amount,
        max_amount,
        deadline: None,
        deadline_type: "rolling".to_string(),
        eligible_states: EligibilityScope::Unrestricted,
        eligible_project_types: EligibilityScope::Unrestricted,
        eligible_fields: EligibilityScope::Unrestricted,
        requirements_text: requirements.to_string(),
        application_complexity: complexity,
        estimated_hours,
        success_rate,
        awards_last_year: 0,
        application_url: None,
    }
}

/// Built-in catalog used when no CSV is supplied. Small but covers the
/// interesting shapes: identity-restricted programs, state restrictions,
/// a fixed deadline, and every complexity tier.
pub(crate) fn seed_catalog() -> Vec<FundingSource> {
    let mut catalog = vec![
        source(
            1,
            "Amber Grant for Women",
            "WomensNet",
            "foundation",
            SourceType::Grant,
            1_000.0,
            25_000.0,
            "For women-owned businesses; short written pitch required",
            ApplicationComplexity::Simple,
            2.0,
            0.02,
        ),
        source(
            2,
            "Veteran Entrepreneurs Fund",
            "Warrior Capital Alliance",
            "nonprofit",
            SourceType::Grant,
            5_000.0,
            100_000.0,
            "Veteran-owned small businesses; proof of service required",
            ApplicationComplexity::Moderate,
            12.0,
            0.15,
        ),
        source(
            3,
            "Rural Business Development Grant",
            "USDA Rural Development",
            "government",
            SourceType::Grant,
            10_000.0,
            500_000.0,
            "Projects in rural communities; business plan and financial statements required",
            ApplicationComplexity::Complex,
            40.0,
            0.2,
        ),
        source(
            4,
            "Appalachian Regional Seed Fund",
            "Appalachian Community Capital",
            "cdfi",
            SourceType::Loan,
            5_000.0,
            50_000.0,
            "Businesses serving appalachian communities affected by poverty",
            ApplicationComplexity::Moderate,
            15.0,
            0.25,
        ),
        source(
            5,
            "Community Microloan Program",
            "Kiva",
            "nonprofit",
            SourceType::Microloan,
            1_000.0,
            15_000.0,
            "Zero-interest crowdfunded loans; community endorsements accepted",
            ApplicationComplexity::Simple,
            5.0,
            0.6,
        ),
        source(
            6,
            "National Small Business Pitch Contest",
            "Commerce Forward",
            "corporate",
            SourceType::Contest,
            2_500.0,
            50_000.0,
            "Business plan and recorded pitch required; letters of support welcome",
            ApplicationComplexity::Complex,
            30.0,
            0.05,
        ),
        source(
            7,
            "First Generation Founders Grant",
            "Pathway Foundation",
            "foundation",
            SourceType::Grant,
            2_000.0,
            20_000.0,
            "First-generation college students launching their first venture",
            ApplicationComplexity::Moderate,
            8.0,
            0.1,
        ),
        source(
            8,
            "Community Development Tax Credit",
            "State Commerce Office",
            "government",
            SourceType::TaxCredit,
            0.0,
            250_000.0,
            "Investments in low-income census tracts; financial statements required",
            ApplicationComplexity::VeryComplex,
            60.0,
            0.3,
        ),
    ];

    catalog[3].eligible_states = EligibilityScope::RestrictedTo(
        ["TN", "WV", "KY", "OH", "PA", "VA", "NC", "GA"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    );
    catalog[5].deadline = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).single();
    catalog[5].deadline_type = "fixed".to_string();

    catalog
}
