use crate::models::Repository;

pub const SHOWCASE_SIZE: usize = 6;

/// Chooses the repositories for the projects section.
pub fn select_showcase(
    repos: &[Repository],
    exclude: &[String],
    pinned: &[String],
) -> Vec<Repository> {
    // Drop excluded names first
    let candidates: Vec<&Repository> = repos
        .iter()
        .filter(|r| !exclude.contains(&r.name))
        .collect();

    // Pinned repositories lead in listing order, the rest fill open slots as listed
    if !pinned.is_empty() {
        let (pinned_repos, others): (Vec<&Repository>, Vec<&Repository>) = candidates
            .into_iter()
            .partition(|r| pinned.contains(&r.name));

        let open_slots = SHOWCASE_SIZE.saturating_sub(pinned_repos.len());
        return pinned_repos
            .into_iter()
            .chain(others.into_iter().take(open_slots))
            .cloned()
            .collect();
    }

    // Otherwise the most-starred non-fork repositories
    let mut sources: Vec<&Repository> = candidates.into_iter().filter(|r| !r.fork).collect();
    sources.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sources.into_iter().take(SHOWCASE_SIZE).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u32, fork: bool) -> Repository {
        Repository {
            stargazers_count: stars,
            fork,
            ..Repository::new(name)
        }
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_top_starred_sources_without_pins() {
        let repos = vec![
            repo("a", 1, false),
            repo("b", 50, true),
            repo("c", 30, false),
            repo("d", 30, false),
            repo("e", 7, false),
            repo("f", 0, false),
            repo("g", 2, false),
            repo("h", 9, false),
        ];

        let showcase = select_showcase(&repos, &strings(&["h"]), &[]);
        assert_eq!(names(&showcase), vec!["c", "d", "e", "g", "a", "f"]);
    }

    #[test]
    fn test_pinned_lead_and_fill_remaining_slots() {
        let repos: Vec<_> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .iter()
            .map(|n| repo(n, 0, *n == "e"))
            .collect();

        let showcase = select_showcase(&repos, &strings(&["b"]), &strings(&["g", "c"]));
        assert_eq!(names(&showcase), vec!["c", "g", "a", "d", "e", "f"]);
    }

    #[test]
    fn test_excluded_pin_is_dropped() {
        let repos = vec![repo("a", 0, false), repo("b", 0, false)];
        let showcase = select_showcase(&repos, &strings(&["a"]), &strings(&["a"]));
        assert_eq!(names(&showcase), vec!["b"]);
    }
}
