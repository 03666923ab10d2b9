use std::collections::HashMap;

use rand::RngExt;

use crate::format::format_number;
use crate::models::{Repository, RepositoryDisplay, RepositorySummary};

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

#[must_use]
pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}

#[must_use]
pub fn total_forks(repos: &[Repository]) -> u64 {
    repos.iter().map(|r| r.forks_count).sum()
}

/// Rounded mean star count; zero for an empty list.
#[must_use]
pub fn average_stars(repos: &[Repository]) -> u64 {
    if repos.is_empty() {
        return 0;
    }
    (total_stars(repos) as f64 / repos.len() as f64).round() as u64
}

/// Repository count per language, with `Unknown` for missing languages.
#[must_use]
pub fn language_histogram(repos: &[Repository]) -> HashMap<String, usize> {
    let mut languages = HashMap::new();
    for repo in repos {
        let language = repo
            .language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(UNKNOWN_LANGUAGE);
        *languages.entry(language.to_string()).or_insert(0) += 1;
    }
    languages
}

/// Build the `/api/github` payload. `repos` must already be in upstream ranking order.
#[must_use]
pub fn summarize(repos: Vec<Repository>, limit: usize) -> RepositorySummary {
    let stars = total_stars(&repos);
    let forks = total_forks(&repos);
    let average = average_stars(&repos);
    let top_languages = language_histogram(&repos);
    let total_repos = repos.len();
    let top_repos: Vec<Repository> = repos.into_iter().take(limit).collect();

    RepositorySummary {
        total_repos,
        total_stars: stars,
        total_forks: forks,
        average_stars: average,
        top_languages,
        top_repos,
        display: RepositoryDisplay {
            total_stars: format_number(stars),
            total_forks: format_number(forks),
            average_stars: format_number(average),
        },
    }
}

const MOCK_LANGUAGES: &[&str] = &["Rust", "TypeScript", "Python", "Go", "JavaScript"];

/// Synthetic search results for when GitHub is unavailable, sorted by stars.
#[must_use]
pub fn mock_repositories(count: usize) -> Vec<Repository> {
    let mut rng = rand::rng();
    let mut repos: Vec<Repository> = (0..count)
        .map(|i| {
            let language = MOCK_LANGUAGES[rng.random_range(0..MOCK_LANGUAGES.len())];
            Repository::new(
                &format!("demo/project-{}", i + 1),
                rng.random_range(100..50_000),
                rng.random_range(10..5_000),
                Some(language),
            )
        })
        .collect();
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Repository> {
        vec![
            Repository::new("a/one", 900, 40, Some("Rust")),
            Repository::new("b/two", 500, 10, Some("Python")),
            Repository::new("c/three", 300, 5, None),
            Repository::new("d/four", 101, 2, Some("Rust")),
            Repository::new("e/five", 100, 1, Some("")),
        ]
    }

    #[test]
    fn test_totals() {
        let repos = sample();
        assert_eq!(total_stars(&repos), 1901);
        assert_eq!(total_forks(&repos), 58);
    }

    #[test]
    fn test_average_stars_rounds() {
        assert_eq!(average_stars(&sample()), 380);
        let repos = vec![Repository::new("x/y", 1, 0, None), Repository::new("x/z", 2, 0, None)];
        assert_eq!(average_stars(&repos), 2);
    }

    #[test]
    fn test_average_stars_empty_is_zero() {
        assert_eq!(average_stars(&[]), 0);
    }

    #[test]
    fn test_histogram_sums_to_repo_count() {
        let repos = sample();
        let histogram = language_histogram(&repos);
        assert_eq!(histogram.values().sum::<usize>(), repos.len());
        assert_eq!(histogram.get("Rust"), Some(&2));
        assert_eq!(histogram.get(UNKNOWN_LANGUAGE), Some(&2));
    }

    #[test]
    fn test_top_repos_keep_upstream_order() {
        let repos: Vec<Repository> = (0..15)
            .map(|i| Repository::new(&format!("r/{i}"), i, 0, None))
            .collect();
        let summary = summarize(repos, 10);
        assert_eq!(summary.total_repos, 15);
        assert_eq!(summary.top_repos.len(), 10);
        assert_eq!(summary.top_repos[0].full_name, "r/0");
        assert_eq!(summary.top_repos[9].full_name, "r/9");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(summarize(sample(), 10)).unwrap();
        assert_eq!(value["totalRepos"], 5);
        assert_eq!(value["totalStars"], 1901);
        assert_eq!(value["averageStars"], 380);
        assert_eq!(value["topLanguages"]["Unknown"], 2);
        assert_eq!(value["display"]["totalStars"], "1.9K");
    }

    #[test]
    fn test_mock_repositories_sorted_by_stars() {
        let repos = mock_repositories(20);
        assert_eq!(repos.len(), 20);
        assert!(repos.windows(2).all(|w| w[0].stargazers_count >= w[1].stargazers_count));
    }
}
