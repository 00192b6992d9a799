use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::github::{LanguageSkill, ProfileLinker, Repository, WeeklyCommitRecord};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<u64>,
}

/// Stars and forks of the most starred repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryChart {
    pub labels: Vec<String>,
    /// github.com page of each labelled repository.
    pub links: Vec<String>,
    pub series: Vec<Series>,
}

/// Stars received per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageChart {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Weekly commit totals over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTrendChart {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
    /// `start ~ end` label for each point.
    pub ranges: Vec<String>,
}

impl RepositoryChart {
    /// `sorted_repos` must already be ordered by stars.
    pub fn build(
        sorted_repos: &[Repository],
        limit: usize,
        linker: &ProfileLinker<'_>,
    ) -> Option<Self> {
        let top = &sorted_repos[..limit.min(sorted_repos.len())];
        if top.is_empty() {
            return None;
        }

        Some(Self {
            labels: top.iter().map(|repo| repo.name.clone()).collect(),
            links: top.iter().map(|repo| linker.repository_url(repo)).collect(),
            series: vec![
                Series {
                    label: "stars".to_string(),
                    data: top.iter().map(|repo| repo.stargazers_count).collect(),
                },
                Series {
                    label: "forks".to_string(),
                    data: top.iter().map(|repo| repo.forks_count).collect(),
                },
            ],
        })
    }
}

impl LanguageChart {
    pub fn build(skill: &LanguageSkill) -> Option<Self> {
        let (labels, data): (Vec<String>, Vec<u64>) = skill
            .iter()
            .filter(|(_, stars)| **stars > 0)
            .map(|(language, stars)| (language.clone(), *stars))
            .unzip();

        if labels.is_empty() {
            return None;
        }
        Some(Self { labels, data })
    }
}

impl CommitTrendChart {
    pub fn build(records: &[WeeklyCommitRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut chart = Self {
            labels: Vec::with_capacity(records.len()),
            data: Vec::with_capacity(records.len()),
            ranges: Vec::with_capacity(records.len()),
        };

        for record in records {
            let (label, range) = match record.week_start() {
                Some(start) => (
                    start.format(DATE_FORMAT).to_string(),
                    format!(
                        "{} ~ {}",
                        start.format(DATE_FORMAT),
                        (start + Duration::days(7)).format(DATE_FORMAT)
                    ),
                ),
                None => (record.week.to_string(), record.week.to_string()),
            };
            chart.labels.push(label);
            chart.data.push(record.total);
            chart.ranges.push(range);
        }

        Some(chart)
    }
}
