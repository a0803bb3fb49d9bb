use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub public_repos: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub followers: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub following: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Size in kilobytes as reported by GitHub.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub size: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub stargazers_count: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub forks_count: u32,
    #[serde(default, deserialize_with = "null_as_false")]
    pub private: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub fork: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_wiki: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub has_pages: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_public_source(&self) -> bool {
        !self.private && !self.fork
    }

    pub fn created_after(&self, cutoff: DateTime<Utc>) -> bool {
        self.created_at.map(|c| c > cutoff).unwrap_or(false)
    }
}

pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.stargazers_count as u64).sum()
}

pub fn total_forks(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.forks_count as u64).sum()
}

fn null_as_zero<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok().map(|d| d.with_timezone(&Utc))))
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    null_as_zero(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_missing_fields_default_to_zero() {
        let json = r#"{"name": "dotfiles", "stargazers_count": null, "language": null}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "dotfiles");
        assert_eq!(repo.size, 0);
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert!(!repo.fork);
        assert!(repo.language.is_none());
        assert!(repo.created_at.is_none());
        assert!(repo.is_public_source());
    }

    #[test]
    fn test_repository_from_rest_payload() {
        let json = r#"{
            "name": "engine",
            "full_name": "octocat/engine",
            "language": "Rust",
            "size": 2048,
            "stargazers_count": 42,
            "forks_count": 3,
            "private": false,
            "fork": true,
            "has_wiki": true,
            "has_pages": false,
            "created_at": "2024-03-01T12:00:00Z"
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.size, 2048);
        assert!(repo.fork);
        assert!(!repo.is_public_source());
        let cutoff = "2024-02-01T00:00:00Z".parse().unwrap();
        assert!(repo.created_after(cutoff));
    }

    #[test]
    fn test_unparseable_created_at_is_not_recent() {
        let repo: Repository =
            serde_json::from_str(r#"{"name": "old", "created_at": "yesterday"}"#).unwrap();
        assert!(repo.created_at.is_none());
        assert!(!repo.created_after(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_star_and_fork_totals() {
        let repos = vec![
            Repository {
                stargazers_count: u32::MAX,
                forks_count: 2,
                ..Repository::new("a")
            },
            Repository {
                stargazers_count: 5,
                forks_count: 1,
                ..Repository::new("b")
            },
        ];
        assert_eq!(total_stars(&repos), u32::MAX as u64 + 5);
        assert_eq!(total_forks(&repos), 3);
        assert_eq!(total_stars(&[]), 0);
    }

    #[test]
    fn test_user_null_followers() {
        let user: GitHubUser =
            serde_json::from_str(r#"{"login": "octocat", "followers": null}"#).unwrap();
        assert_eq!(user.followers, 0);
        assert_eq!(user.public_repos, 0);
    }
}
