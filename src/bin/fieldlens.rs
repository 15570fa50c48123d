use anyhow::{Context, Result};
use chrono::{Days, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use fieldlens::geometry::Feature;
use fieldlens::selection::SelectionStore;
use fieldlens::{AnalyticsService, Client, project, query, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "fieldlens",
    version,
    about = "Query imagery dates, vegetation-index statistics & imagery overlays for a field polygon"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List dates with imagery available for the polygon.
    Dates(DatesArgs),
    /// Fetch index statistics over a date range (and optionally plot them).
    Stats(StatsArgs),
    /// Fetch a rendered index image and print its overlay URL and extent.
    Imagery(ImageryArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Field polygon: inline GeoJSON (geometry or feature) or a path to a
    /// GeoJSON file.
    #[arg(short, long)]
    polygon: String,
    /// Analytics service origin.
    #[arg(long, default_value = fieldlens::DEFAULT_ORIGIN)]
    base_url: String,
}

#[derive(Args, Debug)]
struct DatesArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Save the date list to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Range start (YYYY-MM-DD). Defaults to 365 days before --end.
    #[arg(long)]
    start: Option<String>,
    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,
    /// Save the series to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct ImageryArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Index to render (e.g. ndvi or smi). Forwarded to the service as-is.
    #[arg(short, long, default_value = "ndvi")]
    index: String,
    /// Imagery date (YYYY-MM-DD), usually one returned by `dates`.
    #[arg(short, long)]
    date: String,
}

/// Treat the argument as inline GeoJSON when it looks like JSON, otherwise
/// as a file path.
fn load_selection(polygon: &str) -> Result<SelectionStore> {
    let text = if polygon.trim_start().starts_with('{') {
        polygon.to_string()
    } else {
        std::fs::read_to_string(polygon)
            .with_context(|| format!("read polygon file {polygon}"))?
    };
    let feature = Feature::from_geojson(&text)?;
    let mut store = SelectionStore::new();
    store.finish_draw(feature);
    Ok(store)
}

fn out_format(format: &Option<OutFormat>, path: &std::path::Path) -> String {
    match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Dates(args) => cmd_dates(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Imagery(args) => cmd_imagery(args),
    }
}

fn cmd_dates(args: DatesArgs) -> Result<()> {
    let client = Client::new(&args.common.base_url);
    let store = load_selection(&args.common.polygon)?;

    let entries = client.fetch_available_dates(&query::dates_query(&store)?)?;
    for entry in &entries {
        match entry.cloud_cover {
            Some(cc) => println!("{}  cloud cover {:.1}%", entry.date, cc),
            None => println!("{}", entry.date),
        }
    }
    if entries.is_empty() {
        eprintln!("No imagery available for this polygon.");
    }

    if let Some(path) = args.out.as_ref() {
        match out_format(&args.format, path).as_str() {
            "csv" => storage::save_dates_csv(&entries, path)?,
            "json" => storage::save_dates_json(&entries, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} dates to {}", entries.len(), path.display());
    }

    Ok(())
}

fn cmd_stats(args: StatsArgs) -> Result<()> {
    let client = Client::new(&args.common.base_url);
    let store = load_selection(&args.common.polygon)?;

    // Default window: the service's catalog depth of one year back.
    let end = match &args.end {
        Some(s) => s.clone(),
        None => Utc::now().date_naive().format("%Y-%m-%d").to_string(),
    };
    let start = match &args.start {
        Some(s) => s.clone(),
        None => {
            let end_day = chrono::NaiveDate::parse_from_str(&end, "%Y-%m-%d")
                .with_context(|| format!("invalid --end date {end}"))?;
            end_day
                .checked_sub_days(Days::new(365))
                .unwrap_or(end_day)
                .format("%Y-%m-%d")
                .to_string()
        }
    };

    let response = client.fetch_statistics(&query::stats_query(&store, &start, &end)?)?;
    let series = project::statistics_series(&response)?;
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("{label}  mean={value:.4}");
    }
    eprintln!("{} samples between {} and {}", series.len(), start, end);

    if let Some(path) = args.out.as_ref() {
        match out_format(&args.format, path).as_str() {
            "csv" => storage::save_series_csv(&series, path)?,
            "json" => storage::save_series_json(&series, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} samples to {}", series.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        viz::plot_series(&series, plot_path, args.width, args.height, "NDVI mean")?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    Ok(())
}

fn cmd_imagery(args: ImageryArgs) -> Result<()> {
    let client = Client::new(&args.common.base_url);
    let store = load_selection(&args.common.polygon)?;

    let q = query::imagery_query(&store, &args.index, &args.date)?;
    let response = client.fetch_imagery(&q)?;
    let overlay = project::imagery_overlay(&response, client.origin(), q.extent);

    println!("{}", overlay.url);
    println!(
        "extent: [{}, {}, {}, {}]",
        overlay.extent.min_x, overlay.extent.min_y, overlay.extent.max_x, overlay.extent.max_y
    );

    Ok(())
}
