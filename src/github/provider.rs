use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ContributionSummary, GitHubUser, LanguageHistogram, Repository};

/// Read side of the GitHub data the analyzer consumes. Implementations own
/// authentication, pagination and error reporting.
#[async_trait]
pub trait GitHubDataProvider: Send + Sync {
    async fn get_user(&self) -> Result<GitHubUser>;

    async fn get_repositories(&self) -> Result<Vec<Repository>>;

    // Trailing-year totals; Err when the API cannot be queried, None when the
    // response carries no collection
    async fn get_contributions(&self) -> Result<Option<ContributionSummary>>;

    // Derived from repositories unless an implementation knows better
    async fn get_language_stats(&self) -> Result<LanguageHistogram> {
        let repos = self.get_repositories().await?;
        Ok(LanguageHistogram::from_repositories(&repos))
    }
}
