use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use weightbot::services::settings::{default_settings_path, load_settings};
use weightbot::{MeasurementRecord, Options, SeriesStats, Weightbot};

/// Fetch your weightbot.com history as a gap-free daily series
#[derive(Parser)]
#[command(name = "weightbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Account email
    #[arg(long, env = "WEIGHTBOT_EMAIL", global = true)]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "WEIGHTBOT_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Service base URL
    #[arg(long, env = "WEIGHTBOT_SITE", global = true)]
    site: Option<String>,

    /// Settings file (default: ~/.weightbot/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the raw export from a file instead of logging in
    #[arg(long, value_name = "PATH", global = true)]
    raw_file: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Print the raw export as received
    Raw,

    /// Print the dense daily series (default)
    Data {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show series statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let mut bot = Weightbot::from_options(self.options()?)?;

        match self.command.unwrap_or(Commands::Data { json: false }) {
            Commands::Raw => {
                print!("{}", bot.raw_data()?);
            }
            Commands::Data { json } => {
                let series = bot.data()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(series)?);
                } else {
                    print!("{}", format_series(series));
                }
            }
            Commands::Stats { json } => {
                let stats = SeriesStats::from_series(bot.data()?);
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print!("{}", format_stats(&stats));
                }
            }
        }
        Ok(())
    }

    /// Flags and env first, then the settings file
    fn options(&self) -> anyhow::Result<Options> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => default_settings_path()?,
        };
        let file = load_settings(&path)?;

        let raw_data = match &self.raw_file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None => None,
        };

        let cli = Options {
            email: self.email.clone(),
            password: self.password.clone(),
            site: self.site.clone(),
            raw_data,
        };
        Ok(cli.or(file))
    }
}

/// `nr, date, kg, lb` per line; placeholders keep empty weight columns
fn format_series(series: &[MeasurementRecord]) -> String {
    let mut out = String::new();
    for record in series {
        out.push_str(&format!(
            "{}, {}, {}, {}\n",
            record.sequence_number, record.date, record.kilograms, record.pounds
        ));
    }
    out
}

fn format_stats(stats: &SeriesStats) -> String {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
    };
    let kg = |v: Option<f64>| {
        v.map(|v| format!("{:.1} kg", v))
            .unwrap_or_else(|| "-".into())
    };

    format!(
        "Days:         {}\nMeasured:     {}\nMissing:      {}\nFirst:        {}\nLast:         {}\nMin weight:   {}\nMax weight:   {}\n",
        stats.total_days,
        stats.measured_days,
        stats.placeholder_days,
        date(stats.first_date),
        date(stats.last_date),
        kg(stats.min_kilograms),
        kg(stats.max_kilograms),
    )
}
