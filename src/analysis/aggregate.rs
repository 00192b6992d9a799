use chrono::{Datelike, Duration};
use std::collections::BTreeSet;

use crate::github::{
    CommitSummary, LanguageDistribution, LanguageSkill, Repository, WeeklyCommitRecord,
    DAYS_PER_WEEK,
};

/// Repositories ordered by star count, most starred first. Ties keep their input order.
pub fn sort_repositories_by_stars(repos: &[Repository]) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted
}

/// Number of repositories per language. Repositories without a language are skipped.
pub fn language_distribution(repos: &[Repository]) -> LanguageDistribution {
    let mut distribution = LanguageDistribution::new();
    for language in repos.iter().filter_map(Repository::language) {
        *distribution.entry(language.to_string()).or_insert(0) += 1;
    }
    distribution
}

/// Stars summed per language. Repositories without a language are skipped.
pub fn language_skill(repos: &[Repository]) -> LanguageSkill {
    let mut skill = LanguageSkill::new();
    for repo in repos {
        if let Some(language) = repo.language() {
            *skill.entry(language.to_string()).or_insert(0) += repo.stargazers_count;
        }
    }
    skill
}

pub fn distinct_languages(repos: &[Repository]) -> BTreeSet<String> {
    repos
        .iter()
        .filter_map(Repository::language)
        .map(str::to_string)
        .collect()
}

/// Fold weekly records into per-weekday totals. The records are kept as they are.
pub fn combine_commits(records: Vec<WeeklyCommitRecord>) -> CommitSummary {
    let mut summary = CommitSummary::default();

    for record in &records {
        summary.total += record.total;
        for (day, count) in summary.daily_commits.iter_mut().zip(record.days) {
            *day += count;
        }
    }

    summary.commits = records;
    summary
}

pub fn yearly_repositories(repos: &[Repository], year: i32) -> Vec<Repository> {
    repos
        .iter()
        .filter(|repo| repo.created_at.year() == year)
        .cloned()
        .collect()
}

/// Weekly records with at least one day in `year`. A week spanning new year
/// belongs to both years.
pub fn yearly_commits(records: &[WeeklyCommitRecord], year: i32) -> Vec<WeeklyCommitRecord> {
    records
        .iter()
        .filter(|record| {
            record.week_start().is_some_and(|start| {
                let end = start + Duration::days(DAYS_PER_WEEK as i64 - 1);
                start.year() == year || end.year() == year
            })
        })
        .cloned()
        .collect()
}

/// `(stars, forks)` summed over every repository, with or without a language.
pub fn total_stars_and_forks(repos: &[Repository]) -> (u64, u64) {
    repos.iter().fold((0, 0), |(stars, forks), repo| {
        (stars + repo.stargazers_count, forks + repo.forks_count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn repo(name: &str, stars: u64, language: Option<&str>) -> Repository {
        Repository {
            name: name.to_string(),
            full_name: None,
            description: None,
            html_url: None,
            fork: false,
            stargazers_count: stars,
            forks_count: 0,
            language: language.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2016, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn share_scenario() {
        let repos = vec![
            repo("a", 10, Some("Go")),
            repo("b", 5, Some("Go")),
            repo("c", 20, None),
        ];

        assert_eq!(names(&sort_repositories_by_stars(&repos)), vec!["c", "a", "b"]);

        let distribution = language_distribution(&repos);
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution["Go"], 2);

        let skill = language_skill(&repos);
        assert_eq!(skill.len(), 1);
        assert_eq!(skill["Go"], 15);

        assert_eq!(total_stars_and_forks(&repos), (35, 0));
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let repos = vec![
            repo("first", 3, None),
            repo("big", 9, None),
            repo("second", 3, None),
            repo("third", 3, None),
        ];
        assert_eq!(
            names(&sort_repositories_by_stars(&repos)),
            vec!["big", "first", "second", "third"]
        );
    }

    #[test]
    fn language_maps_keep_first_encounter_order() {
        let repos = vec![
            repo("a", 1, Some("Rust")),
            repo("b", 2, Some("Go")),
            repo("c", 3, Some("Rust")),
            repo("d", 4, Some("C")),
        ];
        let keys: Vec<_> = language_skill(&repos).into_keys().collect();
        assert_eq!(keys, vec!["Rust", "Go", "C"]);

        let languages: Vec<_> = distinct_languages(&repos).into_iter().collect();
        assert_eq!(languages, vec!["C", "Go", "Rust"]);
    }

    #[test]
    fn combines_weekly_records() {
        let records = vec![
            WeeklyCommitRecord {
                week: 0,
                total: 3,
                days: [0, 1, 0, 2, 0, 0, 0],
            },
            WeeklyCommitRecord {
                week: 604800,
                total: 1,
                days: [1, 0, 0, 0, 0, 0, 0],
            },
        ];

        let summary = combine_commits(records.clone());
        assert_eq!(summary.daily_commits, [1, 1, 0, 2, 0, 0, 0]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.commits, records);
    }

    #[test]
    fn combining_nothing_is_all_zero() {
        assert_eq!(combine_commits(Vec::new()), CommitSummary::default());
        assert_eq!(total_stars_and_forks(&[]), (0, 0));
    }

    #[test]
    fn filters_by_year() {
        let mut old = repo("old", 1, None);
        old.created_at = Utc.with_ymd_and_hms(2015, 12, 31, 23, 59, 59).unwrap();
        let repos = vec![repo("a", 1, None), old, repo("b", 1, None)];
        assert_eq!(names(&yearly_repositories(&repos, 2016)), vec!["a", "b"]);
        assert!(yearly_repositories(&repos, 2017).is_empty());

        let jan_2016 = Utc.with_ymd_and_hms(2016, 1, 3, 0, 0, 0).unwrap().timestamp();
        let week = |start: i64, days: [u64; 7]| WeeklyCommitRecord {
            week: start,
            total: days.iter().sum(),
            days,
        };
        let records = vec![
            week(jan_2016 - 14 * 86400, [2, 0, 0, 0, 0, 0, 0]),
            week(jan_2016 - 7 * 86400, [0, 0, 0, 0, 0, 1, 0]),
            week(jan_2016, [0, 1, 0, 0, 0, 0, 0]),
        ];
        let weeks: Vec<i64> = yearly_commits(&records, 2016).iter().map(|r| r.week).collect();
        assert_eq!(weeks, vec![jan_2016 - 7 * 86400, jan_2016]);
        assert_eq!(yearly_commits(&records, 2015).len(), 2);
    }
}
