use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use skyreport_core::{
    Config, Forecast, ForecastRequest, ForecastResponse, Location, ReportKind, TimeBasis,
    fetch_reports, map_forecast, provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyreport", version, about = "Snow and stargazing forecasts from OpenWeather")]
pub struct Cli {
    /// Verbose logging to stderr (RUST_LOG still wins).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and defaults in the config file.
    Configure,

    /// Fetch a forecast and print one report per three-hour slot.
    Show {
        /// City query ("Chamonix,FR") or "lat,lon"; defaults to the configured location.
        location: Option<String>,

        /// Number of three-hour slots to fetch (1-40).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
        count: Option<u8>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Map a saved OpenWeather forecast JSON file without touching the network.
    Parse {
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Report to produce: snow (alias ski) or stargazing (alias stars).
    #[arg(long, short, value_parser = parse_report_kind)]
    report: Option<ReportKind>,

    /// Clock for dates and the night check: local or location.
    #[arg(long, value_parser = parse_time_basis)]
    time_basis: Option<TimeBasis>,

    /// Print reports as JSON.
    #[arg(long)]
    json: bool,
}

fn parse_report_kind(s: &str) -> Result<ReportKind, String> {
    ReportKind::try_from(s).map_err(|e| e.to_string())
}

fn parse_time_basis(s: &str) -> Result<TimeBasis, String> {
    TimeBasis::try_from(s).map_err(|e| e.to_string())
}

impl OutputArgs {
    fn kind(&self, config: &Config) -> ReportKind {
        self.report.unwrap_or(config.default_report)
    }

    fn basis(&self, config: &Config) -> TimeBasis {
        self.time_basis.unwrap_or(config.time_basis)
    }

    fn print(&self, forecast: &Forecast) -> anyhow::Result<()> {
        if self.json {
            println!("{}", render::json(forecast)?);
        } else {
            print!("{}", render::text(forecast));
        }
        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, count, output } => {
                let config = Config::load()?;

                let location = match location {
                    Some(s) => s
                        .parse::<Location>()
                        .with_context(|| format!("Invalid location '{s}'"))?,
                    None => config.default_location()?,
                };
                let mut request = ForecastRequest::new(location);
                if let Some(count) = count {
                    request = request.with_count(count);
                }

                let provider = provider_from_config(&config)?;
                let forecast = fetch_reports(
                    provider.as_ref(),
                    &request,
                    output.kind(&config),
                    output.basis(&config),
                )
                .await?;

                output.print(&forecast)
            }
            Command::Parse { file, output } => {
                let config = Config::load()?;

                let body = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read forecast file: {}", file.display()))?;
                let response: ForecastResponse = serde_json::from_str(&body)
                    .with_context(|| format!("Failed to parse forecast JSON: {}", file.display()))?;

                let forecast =
                    map_forecast(&response, output.kind(&config), output.basis(&config))?;
                output.print(&forecast)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let has_key = config.api_key.is_some();
    let help = if has_key {
        "Leave empty to keep the current key"
    } else {
        "From openweathermap.org"
    };
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    } else if !has_key {
        anyhow::bail!("An API key is required.");
    }

    let location = Text::new("Default location (city or lat,lon, empty for none):")
        .with_initial_value(config.default_location.as_deref().unwrap_or(""))
        .with_validator(|s: &str| {
            use inquire::validator::Validation;
            if s.trim().is_empty() {
                return Ok(Validation::Valid);
            }
            Ok(match s.parse::<Location>() {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        })
        .prompt()?;
    config.default_location = Some(location.trim().to_string()).filter(|s| !s.is_empty());

    let reports = ReportKind::all().to_vec();
    let start = reports.iter().position(|k| *k == config.default_report).unwrap_or(0);
    config.default_report = Select::new("Default report:", reports)
        .with_starting_cursor(start)
        .prompt()?;

    let bases = vec![TimeBasis::Local, TimeBasis::Location];
    let start = bases.iter().position(|b| *b == config.time_basis).unwrap_or(0);
    config.time_basis = Select::new("Times shown in:", bases)
        .with_starting_cursor(start)
        .prompt()?;

    let path = config.save()?;
    tracing::info!(path = %path.display(), "config saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}
