use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::{Paginator, PER_PAGE};
use crate::github::provider::GitHubDataProvider;
use crate::github::rate_limiter::{epoch_now, RateLimitSnapshot, RateLimiter};
use crate::models::{total_stars, ContributionSummary, GitHubUser, Repository, UserEvent};

const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!, $from: DateTime, $to: DateTime) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}
"#;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    username: String,
    base_url: String,
    graphql_url: String,
    authenticated: bool,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ContributionsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct ContributionsData {
    user: Option<ContributionsUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsUser {
    contributions_collection: Option<ContributionSummary>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ReadmePayload {
    content: String,
    #[serde(default)]
    encoding: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Build default headers
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("devbrand/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            username: config.github_username.clone(),
            base_url: config.api_url.clone(),
            graphql_url: config.graphql_url.clone(),
            authenticated: config.github_token.is_some(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn fetch_contributions_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<ContributionSummary>> {
        // GitHub's GraphQL API rejects anonymous requests
        if !self.authenticated {
            return Err(Error::Config(
                "GitHub GraphQL API requires GITHUB_TOKEN".to_string(),
            ));
        }

        self.rate_limiter.wait().await;
        tracing::info!("Fetching contributions for: {}", self.username);

        // Build the GraphQL request body
        let body = json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": {
                "username": self.username,
                "from": from.to_rfc3339_opts(SecondsFormat::Millis, true),
                "to": to.to_rfc3339_opts(SecondsFormat::Millis, true),
            }
        });

        let response = self.client.post(&self.graphql_url).json(&body).send().await?;
        self.rate_limiter.update(response.headers()).await;
        let response = check_status(response, "graphql contributions").await?;

        // GraphQL reports failures in-band with a 200 status
        let payload: GraphQlResponse = response.json().await?;
        if !payload.errors.is_empty() {
            let messages: Vec<_> = payload.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQl(messages.join("; ")));
        }

        Ok(payload
            .data
            .and_then(|d| d.user)
            .and_then(|u| u.contributions_collection))
    }

    pub async fn get_events(&self, page: u32, per_page: u32) -> Result<Vec<UserEvent>> {
        let url = format!("{}/users/{}/events/public", self.base_url, self.username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching public events for: {}", self.username);
        Ok(paginator.fetch_page(&url, per_page, page).await?.items)
    }

    pub async fn get_profile_readme(&self) -> Result<Option<String>> {
        self.rate_limiter.wait().await;
        let url = format!(
            "{}/repos/{}/{}/readme",
            self.base_url, self.username, self.username
        );
        tracing::info!("Fetching profile README for: {}", self.username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update(response.headers()).await;

        // No `{login}/{login}` repository or no README in it
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response, &url).await?;
        let payload: ReadmePayload = response.json().await?;
        decode_readme(&payload).map(Some)
    }

    // Aggregates over the same owner-repository listing used for scoring
    pub async fn get_total_stars(&self) -> Result<u64> {
        let repos = self.get_repositories().await?;
        Ok(total_stars(&repos))
    }

    pub async fn get_followers(&self) -> Result<u32> {
        Ok(self.get_user().await?.followers)
    }
}

fn decode_readme(payload: &ReadmePayload) -> Result<String> {
    if payload.encoding != "base64" {
        return Err(Error::ParseError(format!(
            "Unsupported README encoding: {}",
            payload.encoding
        )));
    }

    // GitHub wraps the base64 body at 60 columns
    let compact: String = payload
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::ParseError(format!("README base64 decode failed: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::ParseError(format!("README is not valid UTF-8: {}", e)))
}

#[async_trait]
impl GitHubDataProvider for GitHubClient {
    async fn get_user(&self) -> Result<GitHubUser> {
        self.rate_limiter.wait().await;
        let url = format!("{}/users/{}", self.base_url, self.username);
        tracing::info!("Fetching user: {}", self.username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update(response.headers()).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(self.username.clone()));
        }

        let response = check_status(response, &url).await?;
        Ok(response.json().await?)
    }

    async fn get_repositories(&self) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?type=owner&sort=updated",
            self.base_url, self.username
        );
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", self.username);
        let repos: Vec<Repository> = paginator.fetch_all(&url, PER_PAGE).await?;
        tracing::debug!("Fetched {} repositories", repos.len());
        Ok(repos)
    }

    async fn get_contributions(&self) -> Result<Option<ContributionSummary>> {
        let to = Utc::now();
        self.fetch_contributions_between(to - Duration::days(365), to)
            .await
    }
}

pub(crate) async fn check_status(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An exhausted quota comes back as 403 or 429
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(snapshot) = RateLimitSnapshot::from_headers(response.headers()) {
            if snapshot.remaining == 0 {
                return Err(Error::RateLimited(snapshot.seconds_until_reset(epoch_now())));
            }
        }
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request to {} failed: {} - {}",
        context, status, body
    )))
}
