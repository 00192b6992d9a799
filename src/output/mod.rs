use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod html;
pub mod reporter;

pub use reporter::Reporter;

use crate::share::ShareCard;

/// Share card file format, selectable from the CLI and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// Appends the format's extension unless `path` already ends with it.
pub fn with_extension(path: &str, format: OutputFormat) -> String {
    let extension = format.extension();
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => path.to_string(),
        _ => format!("{}.{}", path, extension),
    }
}

pub trait OutputGenerator {
    fn generate(&mut self, card: &ShareCard) -> Result<String>;
}
