use serde::{Deserialize, Serialize};

use super::user::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: u32,
}

/// Repository count per primary language, most used first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageHistogram {
    entries: Vec<LanguageCount>,
}

impl LanguageHistogram {
    /// Counts primary languages across `repos`. Repositories without a language
    /// are skipped; equal counts keep first-seen order.
    pub fn from_repositories(repos: &[Repository]) -> Self {
        let mut entries: Vec<LanguageCount> = Vec::new();

        for language in repos.iter().filter_map(|r| r.language.as_deref()) {
            match entries.iter_mut().find(|e| e.language == language) {
                Some(entry) => entry.count += 1,
                None => entries.push(LanguageCount {
                    language: language.to_string(),
                    count: 1,
                }),
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCount> {
        self.entries.iter()
    }

    pub fn top(&self, n: usize) -> &[LanguageCount] {
        &self.entries[..n.min(self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(language: Option<&str>) -> Repository {
        Repository {
            language: language.map(str::to_string),
            ..Repository::new("r")
        }
    }

    #[test]
    fn test_histogram_counts_and_order() {
        let repos = vec![
            repo(Some("Go")),
            repo(Some("Rust")),
            repo(None),
            repo(Some("Rust")),
            repo(Some("Python")),
        ];
        let histogram = LanguageHistogram::from_repositories(&repos);
        let names: Vec<_> = histogram.iter().map(|e| e.language.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go", "Python"]);
        assert_eq!(histogram.top(1)[0].count, 2);
        assert_eq!(histogram.top(10).len(), 3);
    }

    #[test]
    fn test_histogram_without_languages_is_empty() {
        let repos = vec![repo(None), repo(None)];
        let histogram = LanguageHistogram::from_repositories(&repos);
        assert!(histogram.is_empty());
        assert_eq!(histogram.len(), 0);
    }
}
