use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_username: String,
    pub github_token: Option<String>,
    pub api_url: String,
    pub graphql_url: String,
    pub exclude_repos: Vec<String>,
    pub pinned_repos: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_username = get("GITHUB_USERNAME").ok_or_else(|| {
            Error::Config("GITHUB_USERNAME environment variable not set".to_string())
        })?;

        let github_token = get("GITHUB_TOKEN");

        let api_url = get("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let graphql_url = get("GITHUB_GRAPHQL_URL")
            .unwrap_or_else(|| format!("{}/graphql", api_url));

        // Comma-separated repository names for the projects showcase
        let exclude_repos = get("GITHUB_EXCLUDE_REPOS")
            .map(|v| split_list(&v))
            .unwrap_or_default();
        let pinned_repos = get("GITHUB_PINNED_REPOS")
            .map(|v| split_list(&v))
            .unwrap_or_default();

        Ok(Self {
            github_username,
            github_token,
            api_url,
            graphql_url,
            exclude_repos,
            pinned_repos,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("GITHUB_USERNAME", "octocat")])).unwrap();
        assert_eq!(config.github_username, "octocat");
        assert!(config.github_token.is_none());
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.graphql_url, "https://api.github.com/graphql");
    }

    #[test]
    fn test_missing_username() {
        let err = Config::from_lookup(lookup(&[("GITHUB_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_USERNAME", "octocat"),
            ("GITHUB_TOKEN", "ghp_abc"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
            ("GITHUB_GRAPHQL_URL", "https://ghe.example.com/api/graphql"),
        ]))
        .unwrap();
        assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.graphql_url, "https://ghe.example.com/api/graphql");
    }

    #[test]
    fn test_empty_token_is_unset() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_USERNAME", "octocat"),
            ("GITHUB_TOKEN", ""),
        ]))
        .unwrap();
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_showcase_lists() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_USERNAME", "octocat"),
            ("GITHUB_EXCLUDE_REPOS", "dotfiles, scratch,,"),
            ("GITHUB_PINNED_REPOS", "engine"),
        ]))
        .unwrap();
        assert_eq!(config.exclude_repos, vec!["dotfiles", "scratch"]);
        assert_eq!(config.pinned_repos, vec!["engine"]);

        let bare = Config::from_lookup(lookup(&[("GITHUB_USERNAME", "octocat")])).unwrap();
        assert!(bare.exclude_repos.is_empty());
        assert!(bare.pinned_repos.is_empty());
    }
}
