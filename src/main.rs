//! Day length report for a city over a year

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use clap::Parser;
use tracing::{debug, error};

use day_length::config::AppConfig;
use day_length::{
    format_duration, Error, Extreme, FixedZone, GeocodeCache, Gazetteer, Report, Session,
    TimezoneResolver, ZoneBoundaries,
};

#[derive(Parser, Debug)]
#[command(version, about = "Sunrise, sunset and day length over a year")]
struct Args {
    /// City to report on
    city: String,

    /// Second city to compare sunrise and sunset against
    #[arg(long)]
    compare: Option<String>,

    /// Day to show in detail (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Year to compute, defaults to the configured or current year
    #[arg(long)]
    year: Option<i32>,

    /// Show all times in this IANA zone instead of the location's own
    #[arg(long)]
    timezone: Option<String>,

    /// Extra configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Print every date of the year
    #[arg(long)]
    table: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::LocationNotFound { .. }) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = AppConfig::load(args.config.as_deref())?;
    config.validate()?;

    let year = args.year.unwrap_or_else(|| config.year_or_current());
    let fallback = config.fallback_zone()?;
    let resolver: Box<dyn TimezoneResolver> = match &args.timezone {
        Some(name) => {
            let tz = name
                .parse::<Tz>()
                .map_err(|_| Error::InvalidConfig(format!("unknown timezone {}", name)))?;
            Box::new(FixedZone(tz))
        }
        None => Box::new(ZoneBoundaries),
    };
    let mut geocoder = GeocodeCache::new(Gazetteer::with_places(config.places.clone()));

    let mut session = Session::new(&args.city, year);
    if let Some(other) = &args.compare {
        session = session.compare_with(other);
    }
    if let Some(date) = args.date {
        session = session.on_date(date);
    }

    let report = session.run(&mut geocoder, resolver.as_ref(), fallback, |city, p| {
        if p.done == p.total || p.done % 50 == 0 {
            debug!("{}: {}/{} ({})", city, p.done, p.total, p.date);
        }
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.table);
    }
    Ok(())
}

fn dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_time_extreme(label: &str, extreme: &Option<Extreme<chrono::NaiveTime>>) {
    match extreme {
        Some(e) => println!(
            "  {:<16} {} on {}",
            label,
            e.value.format("%H:%M:%S"),
            dates(&e.dates)
        ),
        None => println!("  {:<16} none", label),
    }
}

fn print_length_extreme(label: &str, extreme: &Option<Extreme<i64>>) {
    if let Some(e) = extreme {
        println!(
            "  {:<16} {} ({} seconds) on {}",
            label,
            format_duration(e.value),
            e.value,
            dates(&e.dates)
        );
    }
}

fn clock(t: &Option<DateTime<Tz>>) -> String {
    t.as_ref()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn hours(h: Option<f64>) -> String {
    h.map(|h| format!("{:.2}", h)).unwrap_or_else(|| "-".to_string())
}

fn print_report(report: &Report, full_table: bool) {
    let loc = &report.location;
    println!("{} {}", loc.name, report.year);
    println!(
        "  Latitude: {} Longitude: {}",
        loc.coordinate.latitude, loc.coordinate.longitude
    );
    println!("  Timezone {}", loc.timezone);
    println!();

    let s = &report.summary;
    println!("The earliest:");
    print_time_extreme("Sunrise", &s.earliest_sunrise);
    print_time_extreme("Sunset", &s.earliest_sunset);
    println!("The latest:");
    print_time_extreme("Sunrise", &s.latest_sunrise);
    print_time_extreme("Sunset", &s.latest_sunset);
    println!();
    print_length_extreme("Longest day", &s.longest_day);
    print_length_extreme("Shortest day", &s.shortest_day);

    if let Some(day) = &report.selected {
        println!();
        println!("{}:", day.date);
        println!("  Sunrise: {}", clock(&day.sunrise));
        println!("  Sunset: {}", clock(&day.sunset));
        println!("  Day length: {} ({:?})", day.day_length_text, day.kind);
    }

    if let Some(other) = &report.comparison {
        println!();
        println!(
            "Compared with {} ({})",
            other.location.name, other.location.timezone
        );
        print_length_extreme("Longest day", &other.summary.longest_day);
        print_length_extreme("Shortest day", &other.summary.shortest_day);
    }

    if full_table {
        println!();
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>7}",
            "date", "dawn", "sunrise", "noon", "sunset", "dusk", "length", "change"
        );
        for (row, delta) in report.table.rows.iter().zip(&report.deltas) {
            println!(
                "{:<10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>7}",
                row.date,
                clock(&row.local.dawn),
                clock(&row.local.sunrise),
                clock(&row.local.noon),
                clock(&row.local.sunset),
                clock(&row.local.dusk),
                format_duration(row.day_length()),
                delta.change.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
            );
        }
        if let Some(other) = &report.comparison {
            println!();
            println!(
                "{:<10} {:>8} {:>8} {:>12} {:>12}",
                "date", "rise", "set", "other rise", "other set"
            );
            for row in &other.series.rows {
                println!(
                    "{:<10} {:>8} {:>8} {:>12} {:>12}",
                    row.date,
                    hours(row.sun_rise),
                    hours(row.sun_set),
                    hours(row.other_rise),
                    hours(row.other_set)
                );
            }
        }
    }
}
