//! adcraft: fills ad layout templates with brand facts.
//!
//! Command-line driver over the creative engine. Results go to stdout as
//! JSON; logs go to stderr.

use std::path::{Path, PathBuf};

use adcraft_core::{AppConfig, BrandFacts};
use adcraft_creative::{normalize_hex, CreativeEngine};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adcraft")]
#[command(about = "Fill ad layout templates with brand facts")]
#[command(version)]
struct Cli {
    /// TOML config file (environment variables with the ADCRAFT__ prefix still apply)
    #[arg(long, env = "ADCRAFT_CONFIG")]
    config: Option<PathBuf>,

    /// Extra JSON template catalog (overrides config)
    #[arg(long, env = "ADCRAFT__CATALOG__PATH")]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a hex color to #rrggbb
    Hex { value: String },

    /// Substitute {{TOKEN}} placeholders in a piece of text
    Render {
        #[arg(long)]
        text: String,
        /// Brand facts JSON file, or a raw model reply containing one
        #[arg(long)]
        facts: Option<PathBuf>,
    },

    /// Fill a catalog template
    Fill {
        #[arg(long)]
        template: String,
        #[arg(long)]
        facts: Option<PathBuf>,
        /// Print the fill report alongside the template
        #[arg(long, default_value_t = false)]
        report: bool,
    },

    /// List catalog templates
    Templates,
}

#[derive(Serialize)]
struct TemplateSummary<'a> {
    id: &'a str,
    name: &'a str,
    format: adcraft_creative::AdFormat,
    layout: adcraft_creative::TemplateLayout,
    description: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adcraft=info,adcraft_creative=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }

    match cli.command {
        Command::Hex { value } => {
            println!("{}", normalize_hex(Some(&value)));
        }
        Command::Render { text, facts } => {
            let engine = CreativeEngine::from_config(&config)?;
            let facts = read_facts(facts.as_deref()).await?;
            println!("{}", engine.fill_text(&text, &facts));
        }
        Command::Fill {
            template,
            facts,
            report,
        } => {
            let engine = CreativeEngine::from_config(&config)?;
            let facts = read_facts(facts.as_deref()).await?;
            let filled = engine.fill_template(&template, &facts)?;
            let output = if report {
                serde_json::to_string_pretty(&filled)?
            } else {
                serde_json::to_string_pretty(&filled.template)?
            };
            println!("{output}");
        }
        Command::Templates => {
            let engine = CreativeEngine::from_config(&config)?;
            let templates = engine.catalog().list();
            let summaries: Vec<TemplateSummary<'_>> = templates
                .iter()
                .map(|t| TemplateSummary {
                    id: &t.id,
                    name: &t.name,
                    format: t.format,
                    layout: t.layout,
                    description: &t.description,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

/// Read brand facts from a file. Without a file, the fallback facts are
/// used; an unreadable model reply degrades to the fallback as well.
async fn read_facts(path: Option<&Path>) -> anyhow::Result<BrandFacts> {
    let Some(path) = path else {
        info!("No facts file given, using fallback brand facts");
        return Ok(BrandFacts::fallback());
    };

    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read facts file {}", path.display()))?;

    match BrandFacts::from_model_response(&text) {
        Ok(facts) => Ok(facts),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Could not parse brand facts, using fallback");
            Ok(BrandFacts::fallback())
        }
    }
}
