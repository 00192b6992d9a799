use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

pub mod charts;

pub use charts::{CommitTrendChart, LanguageChart, RepositoryChart, Series};

use crate::analysis::{self, ShareInsights};
use crate::api::{ApiClient, ApiError};
use crate::config::ShareConfig;
use crate::github::{
    CommitSummary, LanguageDistribution, LanguageSkill, ProfileLinker, Repository,
    WeeklyCommitRecord,
};

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share data for {0} has not been loaded yet")]
    NotLoaded(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything derived from one fetch of repositories and commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareData {
    pub repositories: Vec<Repository>,
    pub commits: CommitSummary,
    pub languages: BTreeSet<String>,
    pub language_distribution: LanguageDistribution,
    pub language_skill: LanguageSkill,
}

impl ShareData {
    pub fn from_raw(repos: Vec<Repository>, records: Vec<WeeklyCommitRecord>) -> Self {
        Self {
            languages: analysis::distinct_languages(&repos),
            language_distribution: analysis::language_distribution(&repos),
            language_skill: analysis::language_skill(&repos),
            repositories: analysis::sort_repositories_by_stars(&repos),
            commits: analysis::combine_commits(records),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareCard {
    pub login: String,
    pub profile_url: String,
    pub most_starred_url: Option<String>,
    pub reference_year: i32,
    pub generated_at: DateTime<Utc>,
    pub insights: ShareInsights,
    pub repository_chart: Option<RepositoryChart>,
    pub language_chart: Option<LanguageChart>,
    pub commit_chart: Option<CommitTrendChart>,
}

#[derive(Debug, Default)]
pub enum ShareState {
    #[default]
    Uninitialized,
    Loaded(ShareData),
    Rendered(ShareData, ShareCard),
}

/// Share page for one user: load once, render once.
pub struct ShareView {
    login: String,
    settings: ShareConfig,
    state: ShareState,
}

impl ShareView {
    pub fn new(login: impl Into<String>, settings: ShareConfig) -> Self {
        Self {
            login: login.into(),
            settings,
            state: ShareState::Uninitialized,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn state(&self) -> &ShareState {
        &self.state
    }

    pub fn data(&self) -> Option<&ShareData> {
        match &self.state {
            ShareState::Uninitialized => None,
            ShareState::Loaded(data) | ShareState::Rendered(data, _) => Some(data),
        }
    }

    /// Fetch repositories and commits, replacing anything loaded before.
    pub async fn load(
        &mut self,
        client: &ApiClient,
        token: Option<&str>,
    ) -> Result<(), ShareError> {
        info!("Fetching share data for {}", self.login);
        let (repos, records) = tokio::try_join!(
            client.get_user_repositories(&self.login, token),
            client.get_user_commits(&self.login, token),
        )?;
        self.populate(repos, records);
        Ok(())
    }

    pub fn populate(&mut self, repos: Vec<Repository>, records: Vec<WeeklyCommitRecord>) {
        debug!(
            "Aggregating {} repositories and {} weekly records",
            repos.len(),
            records.len()
        );
        self.state = ShareState::Loaded(ShareData::from_raw(repos, records));
    }

    /// Build the card on first call; later calls return the same card.
    pub fn render(&mut self) -> Result<&ShareCard, ShareError> {
        let data = match std::mem::take(&mut self.state) {
            ShareState::Uninitialized => return Err(ShareError::NotLoaded(self.login.clone())),
            ShareState::Loaded(data) => data,
            rendered @ ShareState::Rendered(..) => {
                self.state = rendered;
                return self.card();
            }
        };

        let card = self.build_card(&data);
        info!("Rendered share card for {}", self.login);
        self.state = ShareState::Rendered(data, card);
        self.card()
    }

    fn card(&self) -> Result<&ShareCard, ShareError> {
        match &self.state {
            ShareState::Rendered(_, card) => Ok(card),
            _ => Err(ShareError::NotLoaded(self.login.clone())),
        }
    }

    fn build_card(&self, data: &ShareData) -> ShareCard {
        let generated_at = Utc::now();
        let reference_year = self.settings.reference_year.unwrap_or(generated_at.year());
        let linker = ProfileLinker::new(&self.login);

        ShareCard {
            login: self.login.clone(),
            profile_url: linker.profile_url(),
            most_starred_url: data
                .repositories
                .first()
                .map(|repo| linker.repository_url(repo)),
            reference_year,
            generated_at,
            insights: ShareInsights::compute(
                &data.repositories,
                &data.commits,
                &data.language_distribution,
                &data.language_skill,
                reference_year,
                self.settings.weeks_per_year,
            ),
            repository_chart: RepositoryChart::build(
                &data.repositories,
                self.settings.top_repositories,
                &linker,
            ),
            language_chart: LanguageChart::build(&data.language_skill),
            commit_chart: CommitTrendChart::build(&data.commits.commits),
        }
    }
}
