//! Command line and configuration handling.
//!
//! Values are layered: the optional TOML file (`config/warikan.toml` unless
//! `--config` points elsewhere), then `WARIKAN_*` environment variables, then
//! command line flags.
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/warikan.toml";

/// How a result is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable breakdown.
    #[default]
    Text,
    /// The result as JSON.
    Json,
    /// A share token.
    Share,
    /// A history entry as JSON.
    History,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub level: String,
    pub default_pattern: String,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            default_pattern: "equal".to_string(),
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "warikan", about = "Split a bill between friends")]
pub struct Args {
    /// Total amount in yen (e.g. 12000 or 12,000).
    total: Option<String>,
    /// Number of people, organizer included.
    people: Option<String>,
    /// Split pattern: equal, organizer_more, organizer_less, organizer_fixed.
    #[arg(long, short)]
    pattern: Option<String>,
    /// Extra percent the organizer pays (organizer_more).
    #[arg(long)]
    burden: Option<String>,
    /// Percent the organizer pays less (organizer_less).
    #[arg(long)]
    reduction: Option<String>,
    /// Fixed amount the organizer pays (organizer_fixed).
    #[arg(long)]
    fixed: Option<String>,
    /// Note stored with `--format history`.
    #[arg(long)]
    note: Option<String>,
    /// Recompute a shared calculation from its token or share link.
    #[arg(long, conflicts_with_all = ["total", "people", "pattern"])]
    decode: Option<String>,
    /// Output format.
    #[arg(long, short, value_enum)]
    format: Option<OutputFormat>,
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    level: Option<String>,
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Calculate {
        total: String,
        people: String,
        pattern: String,
        parameter: Option<String>,
    },
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub level: String,
    pub format: OutputFormat,
    pub note: String,
    pub request: Request,
}

pub fn load() -> Result<Settings> {
    resolve(Args::parse())
}

pub(crate) fn resolve(args: Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("WARIKAN"));
    let config: AppConfig = builder.build()?.try_deserialize()?;

    let request = match args.decode {
        Some(token) => Request::Decode(token),
        None => {
            let pattern = args.pattern.unwrap_or(config.default_pattern);
            let parameter = match pattern.trim() {
                "organizer_more" => args.burden,
                "organizer_less" => args.reduction,
                "organizer_fixed" => args.fixed,
                _ => None,
            };
            Request::Calculate {
                total: args.total.ok_or(AppError::MissingArgument("TOTAL"))?,
                people: args.people.ok_or(AppError::MissingArgument("PEOPLE"))?,
                pattern,
                parameter,
            }
        }
    };

    Ok(Settings {
        level: args.level.unwrap_or(config.level),
        format: args.format.unwrap_or(config.format),
        note: args.note.unwrap_or_default(),
        request,
    })
}
