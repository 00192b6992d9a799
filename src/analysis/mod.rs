use thiserror::Error;

pub mod aggregate;
pub mod helpers;
pub mod insights;

pub use aggregate::{
    combine_commits, distinct_languages, language_distribution, language_skill,
    sort_repositories_by_stars, total_stars_and_forks, yearly_commits, yearly_repositories,
};
pub use helpers::{first_matching_with_index, index_of_max};
pub use insights::ShareInsights;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("cannot take the maximum of an empty sequence")]
    EmptyInput,

    #[error("no element matched the predicate")]
    NotFound,
}
