use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{first_matching_with_index, index_of_max, yearly_commits, yearly_repositories};
use super::{total_stars_and_forks, AnalysisError};
use crate::github::{
    CommitSummary, LanguageDistribution, LanguageSkill, Repository, WeeklyCommitRecord, WEEKDAYS,
};

/// Text summaries shown next to the charts of a share card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareInsights {
    pub total_stars: u64,
    pub total_forks: u64,
    pub yearly_repository_count: usize,
    pub most_starred_repository: Option<String>,
    pub top_language_by_repositories: Option<String>,
    pub top_language_by_stars: Option<String>,
    pub average_weekly_commits: u64,
    pub busiest_weekday: Option<String>,
    pub first_commit_date: Option<NaiveDate>,
}

impl ShareInsights {
    /// `sorted_repos` must already be ordered by stars.
    pub fn compute(
        sorted_repos: &[Repository],
        commits: &CommitSummary,
        distribution: &LanguageDistribution,
        skill: &LanguageSkill,
        reference_year: i32,
        weeks_per_year: u64,
    ) -> Self {
        let (total_stars, total_forks) = total_stars_and_forks(sorted_repos);

        Self {
            total_stars,
            total_forks,
            yearly_repository_count: yearly_repositories(sorted_repos, reference_year).len(),
            most_starred_repository: sorted_repos.first().map(|repo| repo.name.clone()),
            top_language_by_repositories: top_language(distribution),
            top_language_by_stars: top_language(skill),
            average_weekly_commits: commits.total / weeks_per_year.max(1),
            busiest_weekday: busiest_weekday(commits),
            first_commit_date: first_commit_date(
                &yearly_commits(&commits.commits, reference_year),
                reference_year,
            ),
        }
    }
}

fn top_language(counts: &LanguageSkill) -> Option<String> {
    let values: Vec<u64> = counts.values().copied().collect();
    let index = index_of_max(&values).ok()?;
    counts.get_index(index).map(|(language, _)| language.clone())
}

/// Weekday with the most commits, `None` when nothing was committed.
pub fn busiest_weekday(commits: &CommitSummary) -> Option<String> {
    if commits.total == 0 {
        return None;
    }
    let index = index_of_max(&commits.daily_commits).ok()?;
    Some(WEEKDAYS[index].to_string())
}

/// Date of the first day in `year` with a commit, scanning weeks in order.
pub fn first_commit_date(records: &[WeeklyCommitRecord], year: i32) -> Option<NaiveDate> {
    match locate_first_commit(records, year) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("No first commit in {}: {}", year, err);
            None
        }
    }
}

fn locate_first_commit(
    records: &[WeeklyCommitRecord],
    year: i32,
) -> Result<NaiveDate, AnalysisError> {
    let days: Vec<(NaiveDate, u64)> = records
        .iter()
        .filter(|record| record.total > 0)
        .filter_map(|record| record.week_start().map(|start| (start, record.days)))
        .flat_map(|(start, days)| {
            days.into_iter()
                .enumerate()
                .map(move |(offset, count)| (start + Duration::days(offset as i64), count))
        })
        .collect();

    let (&(date, _), _) =
        first_matching_with_index(&days, |(date, count)| *count > 0 && date.year() == year)?;
    Ok(date)
}
