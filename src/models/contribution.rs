use serde::{Deserialize, Serialize};

/// Trailing-year contribution totals from the GraphQL `contributionsCollection`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    #[serde(default)]
    pub total_commit_contributions: u64,
    #[serde(default)]
    pub total_issue_contributions: u64,
    #[serde(default)]
    pub total_pull_request_contributions: u64,
    #[serde(default)]
    pub total_pull_request_review_contributions: u64,
    #[serde(default)]
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u64,
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u64,
    pub date: String,
}

impl ContributionSummary {
    pub fn with_commits(total_commit_contributions: u64) -> Self {
        Self {
            total_commit_contributions,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contributions_collection() {
        let json = r#"{
            "totalCommitContributions": 730,
            "totalIssueContributions": 12,
            "totalPullRequestContributions": 40,
            "totalPullRequestReviewContributions": 9,
            "contributionCalendar": {
                "totalContributions": 791,
                "weeks": [
                    {"contributionDays": [{"contributionCount": 4, "date": "2025-01-05"}]}
                ]
            }
        }"#;
        let summary: ContributionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_commit_contributions, 730);
        assert_eq!(summary.total_pull_request_review_contributions, 9);
        assert_eq!(summary.contribution_calendar.weeks[0].contribution_days[0].contribution_count, 4);
    }

    #[test]
    fn test_partial_collection() {
        let summary: ContributionSummary =
            serde_json::from_str(r#"{"totalCommitContributions": 5}"#).unwrap();
        assert_eq!(summary.total_commit_contributions, 5);
        assert_eq!(summary.total_issue_contributions, 0);
        assert!(summary.contribution_calendar.weeks.is_empty());
    }
}
