use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use gitshare::config::{ApiConfig, Config};
use gitshare::output::{OutputFormat, Reporter};
use gitshare::share::ShareCard;
use gitshare::{ApiClient, ShareView};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend root, e.g. http://localhost:4000 (overrides both configured base URLs)
    #[arg(long, env = "GITSHARE_API_URL", global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a share card for a user
    Share {
        login: String,

        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Output file (extension is added when missing)
        #[arg(long, default_value = "share_card")]
        output_file: String,

        /// Year for the yearly summaries (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Ask the backend to recompute the user's data first
        #[arg(long)]
        refresh: bool,
    },

    /// Ask the backend to recompute everything it knows about a user
    Refresh {
        login: String,

        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },

    /// Show repository predictions for a user
    Predictions {
        login: String,

        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },

    /// Drop a repository from a user's predictions
    RemovePrediction { login: String, full_name: String },

    /// Rate a predicted repository
    Feedback {
        login: String,
        full_name: String,

        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        liked: bool,
    },

    /// Print a line of GitHub zen
    Zen {
        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

async fn refresh_all(client: &ApiClient, login: &str, token: Option<&str>) -> Result<()> {
    let pb = spinner(&format!("Refreshing {} (this can take a while)", login))?;
    let result = tokio::try_join!(
        client.refresh_user(login, token),
        client.refresh_repositories(login, token),
        client.refresh_commits(login, token),
        client.refresh_organizations(login, token),
        client.refresh_contributed(login, token),
        client.refresh_hotmap(login, token),
    );
    pb.finish_and_clear();
    result.with_context(|| format!("Failed to refresh {}", login))?;
    info!("Backend data for {} refreshed", login);
    Ok(())
}

fn print_summary(card: &ShareCard) {
    let insights = &card.insights;
    println!("\n{}", card.profile_url.bright_white().bold());
    println!(
        "  {} stars, {} forks, {} repositories created in {}",
        insights.total_stars.to_string().bright_yellow(),
        insights.total_forks.to_string().bright_yellow(),
        insights.yearly_repository_count.to_string().bright_yellow(),
        card.reference_year
    );
    if let Some(repo) = &insights.most_starred_repository {
        println!("  most popular repository: {}", repo.bright_green());
    }
    if let Some(language) = &insights.top_language_by_stars {
        println!("  most starred language: {}", language.bright_green());
    }
    println!(
        "  {} commits per week on average",
        insights.average_weekly_commits.to_string().bright_yellow()
    );
    if let Some(day) = &insights.busiest_weekday {
        println!("  busiest day: {}", day.bright_green());
    }
    if let Some(date) = insights.first_commit_date {
        println!("  first commit of {}: {}", card.reference_year, date.to_string().bright_green());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase())),
        )
        .with_target(false)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_url) = &cli.api_url {
        let derived = ApiConfig::from_api_url(api_url);
        config.api.github_base_url = derived.github_base_url;
        config.api.scientific_base_url = derived.scientific_base_url;
    }
    if !config.output.color_output {
        colored::control::set_override(false);
    }

    let client = ApiClient::new(config.api.clone()).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Share {
            login,
            token,
            output,
            output_file,
            year,
            refresh,
        } => {
            println!("{}", "gitshare - GitHub activity share card".bright_cyan().bold());

            if refresh {
                refresh_all(&client, &login, token.as_deref()).await?;
            }

            if year.is_some() {
                config.share.reference_year = year;
            }
            let mut view = ShareView::new(login.as_str(), config.share.clone());

            let pb = spinner(&format!("Fetching repositories and commits of {}", login))?;
            let loaded = view.load(&client, token.as_deref()).await;
            pb.finish_and_clear();
            loaded.with_context(|| format!("Failed to load share data for {}", login))?;

            let card = view.render()?;
            let format = output.unwrap_or(config.output.default_format);
            let reporter = Reporter::new(format, &output_file);
            reporter.write_card(card)?;

            print_summary(card);
            println!(
                "\n{} {}",
                "Share card written to".bright_green().bold(),
                reporter.output_path()
            );
        }
        Command::Refresh { login, token } => {
            refresh_all(&client, &login, token.as_deref()).await?;
            println!("{}", "Refresh complete!".bright_green().bold());
        }
        Command::Predictions { login, token } => {
            let predictions = client
                .get_user_predictions(&login, token.as_deref())
                .await
                .with_context(|| format!("Failed to fetch predictions for {}", login))?;
            println!("{}", serde_json::to_string_pretty(&predictions)?);
        }
        Command::RemovePrediction { login, full_name } => {
            client
                .remove_prediction(&login, &full_name)
                .await
                .with_context(|| format!("Failed to remove prediction {}", full_name))?;
            println!("Removed {} from the predictions of {}", full_name.bright_white(), login);
        }
        Command::Feedback {
            login,
            full_name,
            liked,
        } => {
            client
                .put_predictions_feedback(&login, &full_name, liked)
                .await
                .with_context(|| format!("Failed to send feedback for {}", full_name))?;
            println!("Feedback for {} recorded", full_name.bright_white());
        }
        Command::Zen { token } => match client.get_zen(token.as_deref()).await {
            Ok(zen) => match zen.as_str() {
                Some(text) => println!("{}", text.italic()),
                None => println!("{}", zen),
            },
            Err(err) => {
                warn!("Zen unavailable: {}", err);
                return Err(err.into());
            }
        },
    }

    Ok(())
}
