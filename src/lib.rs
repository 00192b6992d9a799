//! Shareable summaries of a developer's GitHub activity.
//!
//! Repositories and weekly commit records are fetched from the backend through
//! [`api::ApiClient`], aggregated by the functions in [`analysis`], and turned
//! into a [`share::ShareCard`] that [`output::Reporter`] writes as HTML or JSON.

pub mod analysis;
pub mod api;
pub mod config;
pub mod github;
pub mod output;
pub mod share;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use share::{ShareCard, ShareView};
