mod browse;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stimlog_core::{
    parse_hour_input, parse_human_date, AppConfig, DayService, Field, FileDayRepository, Setting,
    HOURS_PER_DAY,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stimlog")]
#[command(about = "Hourly log of pain levels and stimulator settings", long_about = None)]
struct Cli {
    /// Day to work on: today, yesterday, -Nd or YYYY-MM-DD
    #[arg(short, long, global = true, default_value = "today")]
    date: String,

    /// Directory holding days.json (default: $STIMLOG_DATA_DIR or ~/.stimlog)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record an hour (usage: set 14 program:2 strength:7 pain:4, keys may be shortened)
    Set {
        /// Hour slot, 14 means 14:00-15:00
        hour: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Empty one hour
    Clear { hour: usize },
    /// Empty every hour of the day
    ClearAll,
    /// Copy an hour into the following COUNT hours
    Copy { hour: usize, count: usize },
    /// List the day's hours
    Show {
        #[arg(long)]
        from: Option<usize>,
        #[arg(long)]
        to: Option<usize>,
    },
    /// Min/max/average of a field, or a day summary when no field is given
    Stats {
        field: Option<Field>,
        #[arg(long)]
        from: Option<usize>,
        #[arg(long)]
        to: Option<usize>,
    },
    /// How many hours each program or strength was used
    Counts { setting: Setting },
    /// List stored days
    List,
    /// Browse stored days in the terminal
    Browse,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STIMLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn hour_window(from: Option<usize>, to: Option<usize>) -> (usize, usize) {
    (from.unwrap_or(0), to.unwrap_or(HOURS_PER_DAY - 1))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let data_dir = cli.data_dir.or(config.data_dir);
    let repo = FileDayRepository::new(data_dir).context("Could not open day store")?;
    tracing::debug!(path = %repo.path().display(), "using day store");
    let service = DayService::new(repo, config.scales);

    let date = parse_human_date(&cli.date)?;

    match cli.command {
        Some(Commands::Set { hour, args }) => {
            let input = parse_hour_input(&args)?;
            let day = service.record_hour(date, hour, input)?;
            report::show_hours(&day, &day.get_range(hour, hour)?);
        }
        Some(Commands::Clear { hour }) => {
            service.clear_hour(date, hour)?;
            println!("Hour {} on {} is now empty.", hour, date);
        }
        Some(Commands::ClearAll) => {
            service.clear_day(date)?;
            println!("All {} records are now empty.", date);
        }
        Some(Commands::Copy { hour, count }) => {
            let day = service.copy_forward(date, hour, count)?;
            println!("Copied hour {} to the next {} hours.", hour, count);
            report::show_hours(&day, &day.get_range(hour, hour + count)?);
        }
        Some(Commands::Show { from, to }) => {
            let (start, end) = hour_window(from, to);
            let day = service.open(date)?;
            report::show_hours(&day, &day.get_range(start, end)?);
        }
        Some(Commands::Stats { field, from, to }) => {
            let (start, end) = hour_window(from, to);
            let day = service.open(date)?;
            let hours = day.get_range(start, end)?;
            match field {
                Some(field) => report::show_field_stats(&day, field, start, end, &hours),
                None => report::show_summary(&day, start, end, &hours),
            }
        }
        Some(Commands::Counts { setting }) => {
            let day = service.open(date)?;
            report::show_counts(&day, setting);
        }
        Some(Commands::List) => {
            let mut days = Vec::new();
            for date in service.list_dates()? {
                days.extend(service.get_day(date)?);
            }
            report::show_days(&days);
        }
        Some(Commands::Browse) | None => {
            browse::run(&service, date)?;
        }
    }
    Ok(())
}
