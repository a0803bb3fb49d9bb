//! Profile strength heuristics.
//!
//! Each scorer is a pure function of the fetched snapshot plus the moment of
//! the call. Scores are weighted counts capped at 100:
//!
//! ```text
//! Technical Depth    = (10·languages + 15·complex_repos + 5·documented_repos) / 2
//! Execution Speed    = 15·repos_last_6_months + 20·(yearly_commits / 365)
//! Open Source Impact = 5·public_sources + min(stars, 100) + 10·forks + 2·followers
//! Learning Speed     = 100·recent_languages / max(languages, 1) + 10·languages
//! ```
//!
//! "Last N months" windows subtract calendar months, clamping to the end of
//! shorter months (May 31 minus 3 months is Feb 28).

use std::collections::HashSet;

use chrono::{DateTime, Months, Utc};
use thousands::Separable;

use crate::models::{
    total_forks, total_stars, ContributionSummary, GitHubUser, LanguageHistogram,
    ProfileSnapshot, Repository, StrengthKind, StrengthScore,
};

const COMPLEX_REPO_SIZE: u64 = 1000;
const COMPLEX_REPO_STARS: u32 = 10;
const STAR_CAP: u64 = 100;
const DAYS_PER_YEAR: f64 = 365.0;

const EXECUTION_WINDOW_MONTHS: u32 = 6;
const LEARNING_WINDOW_MONTHS: u32 = 3;

// Out-of-range results fall back to `now`, leaving the window empty
pub fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

pub fn score_profile(snapshot: &ProfileSnapshot, now: DateTime<Utc>) -> Vec<StrengthScore> {
    // Insertion order doubles as the tie-break order
    let mut strengths = vec![
        technical_depth(&snapshot.repositories, &snapshot.languages),
        execution_speed(&snapshot.repositories, snapshot.contributions.as_ref(), now),
        open_source_impact(&snapshot.repositories, &snapshot.user),
        learning_speed(&snapshot.repositories, &snapshot.languages, now),
    ];

    // Stable sort, highest score first
    strengths.sort_by(|a, b| b.score.cmp(&a.score));
    strengths
}

pub fn technical_depth(repos: &[Repository], languages: &LanguageHistogram) -> StrengthScore {
    let language_count = languages.len() as u64;
    let complex_repos = repos
        .iter()
        .filter(|r| r.size > COMPLEX_REPO_SIZE || r.stargazers_count > COMPLEX_REPO_STARS)
        .count() as u64;
    let documented_repos = repos.iter().filter(|r| r.has_wiki || r.has_pages).count() as u64;

    let weighted = language_count * 10 + complex_repos * 15 + documented_repos * 5;
    let score = (weighted as f64 / 2.0).min(100.0);

    StrengthScore::new(
        StrengthKind::TechnicalDepth,
        score,
        vec![
            format!("{} programming languages mastered", language_count),
            format!("{} complex projects with significant codebases", complex_repos),
            format!("{} projects with comprehensive documentation", documented_repos),
        ],
    )
}

pub fn execution_speed(
    repos: &[Repository],
    contributions: Option<&ContributionSummary>,
    now: DateTime<Utc>,
) -> StrengthScore {
    let cutoff = months_before(now, EXECUTION_WINDOW_MONTHS);
    let recent_repos = repos.iter().filter(|r| r.created_after(cutoff)).count() as u64;

    let total_commits = contributions
        .map(|c| c.total_commit_contributions)
        .unwrap_or(0);
    // Contribution totals cover a trailing 365-day window
    let avg_commits_per_day = total_commits as f64 / DAYS_PER_YEAR;

    let score = (recent_repos as f64 * 15.0 + avg_commits_per_day * 20.0).min(100.0);

    StrengthScore::new(
        StrengthKind::ExecutionSpeed,
        score,
        vec![
            format!(
                "{} projects created in the last {} months",
                recent_repos, EXECUTION_WINDOW_MONTHS
            ),
            format!(
                "{} total commits this year",
                total_commits.separate_with_commas()
            ),
            format!("Average {:.1} commits per day", avg_commits_per_day),
        ],
    )
}

pub fn open_source_impact(repos: &[Repository], user: &GitHubUser) -> StrengthScore {
    let public_repos = repos.iter().filter(|r| r.is_public_source()).count() as u64;
    let stars = total_stars(repos);
    let forks = total_forks(repos);
    let followers = user.followers as u64;

    // Star term is capped on its own before the outer cap
    let weighted =
        public_repos * 5 + stars.min(STAR_CAP) + forks * 10 + followers * 2;
    let score = (weighted as f64).min(100.0);

    StrengthScore::new(
        StrengthKind::OpenSourceImpact,
        score,
        vec![
            format!("{} public repositories", public_repos),
            format!("{} total stars received", stars.separate_with_commas()),
            format!("{} times forked by others", forks.separate_with_commas()),
            format!("{} GitHub followers", followers.separate_with_commas()),
        ],
    )
}

pub fn learning_speed(
    repos: &[Repository],
    languages: &LanguageHistogram,
    now: DateTime<Utc>,
) -> StrengthScore {
    let cutoff = months_before(now, LEARNING_WINDOW_MONTHS);
    let recent_languages: HashSet<&str> = repos
        .iter()
        .filter(|r| r.created_after(cutoff))
        .filter_map(|r| r.language.as_deref())
        .collect();

    // Floor of one language keeps the rate defined for an empty histogram
    let language_count = languages.len();
    let growth_rate = recent_languages.len() as f64 / language_count.max(1) as f64 * 100.0;
    let diversity = language_count as f64 * 10.0;

    let score = (growth_rate + diversity).min(100.0);

    StrengthScore::new(
        StrengthKind::LearningSpeed,
        score,
        vec![
            format!(
                "{} new technologies adopted in last {} months",
                recent_languages.len(),
                LEARNING_WINDOW_MONTHS
            ),
            format!("{} total languages in tech stack", language_count),
            // Truncated toward zero
            format!(
                "{}% growth rate in technology adoption",
                growth_rate.trunc() as u64
            ),
        ],
    )
}
