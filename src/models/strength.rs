use serde::{Deserialize, Serialize};

use super::contribution::ContributionSummary;
use super::language::{LanguageCount, LanguageHistogram};
use super::user::{GitHubUser, Repository};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StrengthKind {
    #[serde(rename = "Technical Depth")]
    TechnicalDepth,
    #[serde(rename = "Execution Speed")]
    ExecutionSpeed,
    #[serde(rename = "Open Source Impact")]
    OpenSourceImpact,
    #[serde(rename = "Learning Speed")]
    LearningSpeed,
}

impl StrengthKind {
    /// Insertion order used to break score ties.
    pub const ALL: [StrengthKind; 4] = [
        StrengthKind::TechnicalDepth,
        StrengthKind::ExecutionSpeed,
        StrengthKind::OpenSourceImpact,
        StrengthKind::LearningSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrengthKind::TechnicalDepth => "Technical Depth",
            StrengthKind::ExecutionSpeed => "Execution Speed",
            StrengthKind::OpenSourceImpact => "Open Source Impact",
            StrengthKind::LearningSpeed => "Learning Speed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrengthKind::TechnicalDepth => {
                "Demonstrates deep understanding of multiple technologies and complex system design"
            }
            StrengthKind::ExecutionSpeed => "Rapid development and consistent delivery of projects",
            StrengthKind::OpenSourceImpact => "Active contributor with significant community impact",
            StrengthKind::LearningSpeed => "Rapid acquisition of new technologies and skills",
        }
    }
}

impl std::fmt::Display for StrengthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthScore {
    #[serde(rename = "name")]
    pub kind: StrengthKind,
    pub score: u8,
    pub description: String,
    pub evidence: Vec<String>,
}

impl StrengthScore {
    pub fn new(kind: StrengthKind, raw: f64, evidence: Vec<String>) -> Self {
        // Nearest integer, clamped into [0, 100]
        let score = if raw.is_finite() {
            raw.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        Self {
            kind,
            score,
            description: kind.description().to_string(),
            evidence,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub contributions: Option<ContributionSummary>,
    pub languages: LanguageHistogram,
}

// `login` and `top_languages` are empty when the snapshot could not be fetched
#[derive(Debug, Clone, Serialize)]
pub struct BrandingReport {
    pub login: Option<String>,
    pub strengths: Vec<StrengthScore>,
    pub statement: String,
    pub top_languages: Vec<LanguageCount>,
}
