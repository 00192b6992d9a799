use super::*;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use super::html::HtmlGenerator;

pub struct Reporter {
    format: OutputFormat,
    output_path: String,
}

impl Reporter {
    pub fn new(format: OutputFormat, output_path: &str) -> Self {
        Self {
            format,
            output_path: super::with_extension(output_path, format),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn render(&self, card: &ShareCard) -> Result<String> {
        match self.format {
            OutputFormat::Html => HtmlGenerator::new()?.generate(card),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(card)?),
        }
    }

    pub fn write_card(&self, card: &ShareCard) -> Result<()> {
        let content = self.render(card)?;
        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write share card to {}", self.output_path))?;
        info!("Share card saved to {}", self.output_path);
        Ok(())
    }
}
