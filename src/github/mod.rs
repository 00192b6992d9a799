use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub mod links;

pub use links::ProfileLinker;

/// Days in a weekly commit record, Sunday first.
pub const DAYS_PER_WEEK: usize = 7;

pub const WEEKDAYS: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Repository count per language, in order of first encounter.
pub type LanguageDistribution = IndexMap<String, u64>;

/// Cumulative star count per language, in order of first encounter.
pub type LanguageSkill = IndexMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "htmlUrl")]
    pub html_url: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default, alias = "stargazersCount")]
    pub stargazers_count: u64,
    #[serde(default, alias = "forksCount")]
    pub forks_count: u64,
    #[serde(default, deserialize_with = "non_empty_language")]
    pub language: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Repository {
    /// The detected language, if the repository has one.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|lang| !lang.is_empty())
    }
}

fn non_empty_language<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let language = Option::<String>::deserialize(deserializer)?;
    Ok(language.filter(|lang| !lang.is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCommitRecord {
    /// Start of the week, seconds since the epoch.
    pub week: i64,
    pub total: u64,
    pub days: [u64; DAYS_PER_WEEK],
}

impl WeeklyCommitRecord {
    pub fn week_start(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp(self.week, 0).map(|dt| dt.date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub daily_commits: [u64; DAYS_PER_WEEK],
    pub total: u64,
    pub commits: Vec<WeeklyCommitRecord>,
}

impl Default for CommitSummary {
    fn default() -> Self {
        Self {
            daily_commits: [0; DAYS_PER_WEEK],
            total: 0,
            commits: Vec::new(),
        }
    }
}

impl CommitSummary {
    /// Element-wise sum of two summaries; records are concatenated in order.
    pub fn merge(mut self, other: CommitSummary) -> Self {
        for (day, count) in self.daily_commits.iter_mut().zip(other.daily_commits) {
            *day += count;
        }
        self.total += other.total;
        self.commits.extend(other.commits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_accepts_snake_and_camel_case() {
        let snake: Repository = serde_json::from_str(
            r#"{"name":"a","stargazers_count":3,"forks_count":1,"language":"Rust","created_at":"2016-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        let camel: Repository = serde_json::from_str(
            r#"{"name":"a","stargazersCount":3,"forksCount":1,"language":"Rust","createdAt":"2016-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.language(), Some("Rust"));
    }

    #[test]
    fn empty_language_is_no_language() {
        let repo: Repository = serde_json::from_str(
            r#"{"name":"a","language":"","created_at":"2016-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(repo.language, None);
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn weekly_record_requires_seven_days() {
        let short =
            serde_json::from_str::<WeeklyCommitRecord>(r#"{"week":0,"total":1,"days":[1,0,0]}"#);
        assert!(short.is_err());
    }

    #[test]
    fn week_start_is_utc_date() {
        let record = WeeklyCommitRecord {
            week: 604800,
            total: 0,
            days: [0; 7],
        };
        assert_eq!(record.week_start(), NaiveDate::from_ymd_opt(1970, 1, 8));
    }
}
