use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Public event from `/users/{login}/events/public`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

impl UserEvent {
    /// One-line summary of the event for activity feeds.
    pub fn describe(&self) -> String {
        let repo = &self.repo.name;
        match self.event_type.as_str() {
            "PushEvent" => {
                let commits = self
                    .payload
                    .get("commits")
                    .and_then(|c| c.as_array())
                    .map(|c| c.len())
                    .filter(|&n| n > 0)
                    .unwrap_or(1);
                let plural = if commits > 1 { "s" } else { "" };
                format!("Pushed {} commit{} to {}", commits, plural, repo)
            }
            "PullRequestEvent" => format!(
                "{} a pull request in {}",
                self.payload_str("action").unwrap_or("updated"),
                repo
            ),
            "WatchEvent" => format!("Starred {}", repo),
            "ForkEvent" => format!("Forked {}", repo),
            "IssueCommentEvent" => format!("Commented on an issue in {}", repo),
            "CreateEvent" => format!(
                "Created {} in {}",
                self.payload_str("ref_type").unwrap_or("repository"),
                repo
            ),
            _ => format!("Activity in {}", repo),
        }
    }

    fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }
}
