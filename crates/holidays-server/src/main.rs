//! Holidays CLI - public holiday aggregation service

use std::sync::Arc;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use holidays_core::aggregator::HolidayAggregator;
use holidays_core::clock::FixedClock;
use holidays_core::config::Config;
use holidays_core::model::{CountryHolidayCount, Holiday};
use holidays_core::source::{HttpHolidaySource, is_valid_country_code};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "holidays")]
#[command(author, version, about = "Public holiday aggregation service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.bind_addr)
        #[arg(short, long)]
        bind: Option<String>,
        /// Upstream base URL (overrides upstream.base_url)
        #[arg(short, long)]
        upstream_url: Option<String>,
    },

    /// Show the last three observed holidays of a country
    Last {
        /// Country code (e.g. US)
        country: String,
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Rank countries by number of non-weekend holidays in a year
    Counts {
        /// Year
        year: i32,
        /// Country codes
        #[arg(required = true)]
        countries: Vec<String>,
    },

    /// Show holidays shared by two countries in a year
    Common {
        /// Year
        year: i32,
        /// First country code
        country1: String,
        /// Second country code
        country2: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all configuration values
    Show,
    /// Print the config file path
    Path,
    /// Get a configuration value
    Get {
        /// Key (e.g. upstream.base_url)
        key: String,
    },
    /// Set a configuration value and save it
    Set {
        /// Key (e.g. upstream.timeout_secs)
        key: String,
        /// Value
        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("holidays=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, upstream_url } => cmd_serve(bind, upstream_url).await,

        Commands::Last { country, today } => cmd_last(&country, today, cli.format).await,

        Commands::Counts { year, countries } => cmd_counts(year, &countries, cli.format).await,

        Commands::Common {
            year,
            country1,
            country2,
        } => cmd_common(year, &country1, &country2, cli.format).await,

        Commands::Config { action } => cmd_config(action, cli.format),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_serve(bind: Option<String>, upstream_url: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(addr) = bind {
        config.set("server.bind_addr", &addr)?;
    }
    if let Some(url) = upstream_url {
        config.set("upstream.base_url", &url)?;
    }

    holidays_server::serve(&config).await
}

async fn cmd_last(
    country: &str,
    today: Option<NaiveDate>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let country = country_code(country)?;
    let source = Arc::new(HttpHolidaySource::new(&Config::load()?.upstream)?);
    let aggregator = match today {
        Some(date) => HolidayAggregator::with_clock(source, Arc::new(FixedClock::new(date))),
        None => HolidayAggregator::new(source),
    };

    let holidays = aggregator
        .last_three_holidays(&country)
        .await
        .map_err(report)?;

    print_holidays(&holidays, format, &format!("No holidays found for {}", country))
}

async fn cmd_counts(year: i32, countries: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let countries = countries
        .iter()
        .map(|c| country_code(c))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let counts = aggregator()?
        .non_weekend_holiday_counts(year, &countries)
        .await
        .map_err(report)?;

    match format {
        OutputFormat::Json => print_json(&counts),
        OutputFormat::Text => {
            for CountryHolidayCount {
                country_code,
                count,
            } in &counts
            {
                println!("{:<4} {}", country_code, count);
            }
            Ok(())
        }
    }
}

async fn cmd_common(
    year: i32,
    country1: &str,
    country2: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let country1 = country_code(country1)?;
    let country2 = country_code(country2)?;
    let holidays = aggregator()?
        .common_holidays(year, &country1, &country2)
        .await
        .map_err(report)?;

    print_holidays(
        &holidays,
        format,
        &format!("No common holidays for {} and {} in {}", country1, country2, year),
    )
}

fn cmd_config(action: ConfigAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            match format {
                OutputFormat::Json => print_json(&config),
                OutputFormat::Text => {
                    for (key, value) in config.list()? {
                        println!("{} = {}", key, value);
                    }
                    Ok(())
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
        ConfigAction::Get { key } => {
            println!("{}", Config::load()?.get(&key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            // Persist file values only; environment overrides stay out of the file
            let mut config = Config::load_file()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{} = {}", key, config.get(&key)?);
            Ok(())
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Trim a country code argument and reject blank or non-alphanumeric input
fn country_code(raw: &str) -> anyhow::Result<String> {
    let code = raw.trim();
    if code.is_empty() {
        bail!("Country code must not be blank");
    }
    if !is_valid_country_code(code) {
        bail!("Invalid country code '{}': use letters and digits only", code);
    }
    Ok(code.to_string())
}

fn aggregator() -> anyhow::Result<HolidayAggregator> {
    let source = HttpHolidaySource::new(&Config::load()?.upstream)?;
    Ok(HolidayAggregator::new(Arc::new(source)))
}

/// Attach the error code and suggestion to a core error
fn report(e: holidays_core::Error) -> anyhow::Error {
    match e.suggestion() {
        Some(hint) => anyhow!("[{}] {} (try: {})", e.code(), e, hint),
        None => anyhow!("[{}] {}", e.code(), e),
    }
}

fn print_holidays(holidays: &[Holiday], format: OutputFormat, empty: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&holidays),
        OutputFormat::Text => {
            if holidays.is_empty() {
                println!("{}", empty);
            }
            for holiday in holidays {
                println!("{}  {}", holiday.date, holiday.local_name);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
