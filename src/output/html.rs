use super::*;
use anyhow::{anyhow, Result};
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::HashMap;
use tera::{Context, Tera};

const CARD_TEMPLATE: &str = "share.html";

#[derive(RustEmbed)]
#[folder = "src/output/templates/"]
#[include = "*.html"]
struct Templates;

#[derive(RustEmbed)]
#[folder = "src/output/assets/"]
#[include = "*.css"]
#[include = "*.js"]
struct Assets;

pub struct HtmlGenerator {
    tera: Tera,
}

impl HtmlGenerator {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        for file in Templates::iter() {
            let template_name = file.as_ref();
            let template_content = Templates::get(template_name)
                .ok_or_else(|| anyhow!("Template {} not found", template_name))?;
            let template_str = std::str::from_utf8(&template_content.data)
                .map_err(|e| anyhow!("Invalid UTF-8 in template {}: {}", template_name, e))?;

            tera.add_raw_template(template_name, template_str)
                .map_err(|e| anyhow!("Failed to add template {}: {}", template_name, e))?;
        }

        tera.register_filter("compact_number", Self::compact_number_filter);

        Ok(Self { tera })
    }

    fn load_asset(&self, filename: &str) -> Result<String> {
        let asset =
            Assets::get(filename).ok_or_else(|| anyhow!("Asset {} not found", filename))?;
        let content = std::str::from_utf8(&asset.data)
            .map_err(|e| anyhow!("Invalid UTF-8 in asset {}: {}", filename, e))?;
        Ok(content.to_string())
    }

    /// 950 -> "950", 1234 -> "1.2k", 2500000 -> "2.5m"
    fn compact_number_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let number = value
            .as_u64()
            .ok_or_else(|| tera::Error::msg("compact_number expects an unsigned integer"))?;
        let text = match number {
            n if n >= 1_000_000 => format!("{:.1}m", n as f64 / 1_000_000.0),
            n if n >= 1_000 => format!("{:.1}k", n as f64 / 1_000.0),
            n => n.to_string(),
        };
        Ok(Value::String(text))
    }

    fn prepare_template_context(&self, card: &ShareCard) -> Result<Context> {
        let mut context = Context::new();

        context.insert("css_content", &self.load_asset("styles.css")?);
        context.insert("js_content", &self.load_asset("charts.js")?);
        context.insert("card", card);
        context.insert(
            "generated_date",
            &card.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        context.insert(
            "first_commit_date",
            &card
                .insights
                .first_commit_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
        );
        // Embedded in a <script> block, so a closing tag must not appear verbatim.
        let chart_data = serde_json::to_string(card)?.replace("</", "<\\/");
        context.insert("chart_data", &chart_data);

        Ok(context)
    }
}

impl OutputGenerator for HtmlGenerator {
    fn generate(&mut self, card: &ShareCard) -> Result<String> {
        let context = self.prepare_template_context(card)?;
        self.tera
            .render(CARD_TEMPLATE, &context)
            .map_err(|e| anyhow!("Failed to render {}: {:?}", CARD_TEMPLATE, e))
    }
}
