use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::analysis::branding::generate_branding_statement;
use crate::analysis::scoring::score_profile;
use crate::error::{Error, Result};
use crate::github::GitHubDataProvider;
use crate::models::{BrandingReport, ProfileSnapshot, StrengthScore};

const TOP_LANGUAGES: usize = 5;

pub struct ProfileAnalyzer {
    provider: Arc<dyn GitHubDataProvider>,
}

impl ProfileAnalyzer {
    pub fn new(provider: Arc<dyn GitHubDataProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch_snapshot(&self) -> Result<ProfileSnapshot> {
        // Issue the four reads concurrently; any single failure aborts the snapshot
        let (user, repositories, contributions, languages) = futures::try_join!(
            self.provider.get_user(),
            self.provider.get_repositories(),
            self.provider.get_contributions(),
            self.provider.get_language_stats()
        )
        .map_err(|e| Error::DataUnavailable(e.to_string()))?;

        tracing::debug!(
            "Snapshot for {}: {} repositories, {} languages",
            user.login,
            repositories.len(),
            languages.len()
        );

        Ok(ProfileSnapshot {
            user,
            repositories,
            contributions,
            languages,
        })
    }

    pub async fn try_analyze(&self) -> Result<Vec<StrengthScore>> {
        let snapshot = self.fetch_snapshot().await?;
        Ok(self.analyze_snapshot(&snapshot, Utc::now()))
    }

    pub fn analyze_snapshot(
        &self,
        snapshot: &ProfileSnapshot,
        now: DateTime<Utc>,
    ) -> Vec<StrengthScore> {
        let strengths = score_profile(snapshot, now);
        for s in &strengths {
            tracing::debug!("{}: {}/100", s.kind, s.score);
        }
        strengths
    }

    /// Scores the profile, yielding an empty list when the data could not be
    /// fetched.
    pub async fn analyze(&self) -> Vec<StrengthScore> {
        match self.try_analyze().await {
            Ok(strengths) => strengths,
            Err(e) => {
                tracing::warn!("Error analyzing GitHub profile: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn analyze_with_branding(&self) -> BrandingReport {
        let (login, strengths, top_languages) = match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let strengths = self.analyze_snapshot(&snapshot, Utc::now());
                let top_languages = snapshot.languages.top(TOP_LANGUAGES).to_vec();
                (Some(snapshot.user.login), strengths, top_languages)
            }
            Err(e) => {
                tracing::warn!("Error analyzing GitHub profile: {}", e);
                (None, Vec::new(), Vec::new())
            }
        };

        // Empty strengths fall back to the default statement
        let statement = generate_branding_statement(&strengths);
        BrandingReport {
            login,
            strengths,
            statement,
            top_languages,
        }
    }
}
