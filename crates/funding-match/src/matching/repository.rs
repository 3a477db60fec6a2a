use super::domain::FundingSource;

/// Record-store abstraction so the match service can be exercised in
/// isolation. Implementations return active sources ordered by their quality
/// signal; the service re-sorts by score, so the order is not load-bearing.
pub trait SourceRepository: Send + Sync {
    fn list_active(&self) -> Result<Vec<FundingSource>, RepositoryError>;
}

/// Error enumeration for record-store failures. An unusable store aborts the
/// whole match request; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("source catalog unavailable: {0}")]
    Unavailable(String),
}
