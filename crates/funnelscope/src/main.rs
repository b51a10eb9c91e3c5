// crates/funnelscope/src/main.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use polars::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use funnelscope_core::filter::CountryDefaults;
use funnelscope_core::session::CampaignSession;
use funnelscope_parser::{ResolverKind, REQUIRED_COLUMNS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Funnel analysis for messaging campaign exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a campaign export and print funnel reports
    Analyze(AnalyzeArgs),
    /// Print the columns an export must carry
    Columns,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to the campaign export CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Country resolution strategy
    #[arg(long, value_enum, default_value_t = Resolver::DialingPlan)]
    resolver: Resolver,

    /// Default the country selection to every observed country instead of the
    /// Gulf/Levant preset
    #[arg(long)]
    all_countries: bool,

    /// Restrict the reports to these countries
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// Restrict the reports to these dispatch months (YYYY-MM)
    #[arg(long, value_delimiter = ',')]
    months: Vec<String>,

    /// Restrict the reports to these campaigns
    #[arg(long, value_delimiter = ',')]
    campaigns: Vec<String>,

    /// Also print funnel totals per country
    #[arg(long)]
    by_country: bool,

    /// Also print read counts by weekday and by hour of day
    #[arg(long)]
    read_times: bool,

    /// Write the monthly report as an xlsx workbook
    #[arg(long)]
    workbook: Option<PathBuf>,

    /// Write the enriched event table as CSV
    #[arg(long)]
    enriched_csv: Option<PathBuf>,

    /// Print a JSON summary of the run
    #[arg(long)]
    summary: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resolver {
    /// Fixed Gulf/Egypt prefix table
    Prefix,
    /// International dialing plan, longest code first
    DialingPlan,
}

impl From<Resolver> for ResolverKind {
    fn from(value: Resolver) -> Self {
        match value {
            Resolver::Prefix => ResolverKind::Prefix,
            Resolver::DialingPlan => ResolverKind::DialingPlan,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => analyze(args),
        Command::Columns => {
            for column in REQUIRED_COLUMNS {
                println!("{column}");
            }
            Ok(())
        }
    }
}

fn analyze(args: AnalyzeArgs) -> Result<()> {
    let bytes =
        fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;

    let session = CampaignSession::load(&bytes, args.resolver.into())?;

    let country_defaults = if args.all_countries {
        CountryDefaults::AllObserved
    } else {
        CountryDefaults::GulfLevantPreset
    };
    let mut selection = session.default_selection(country_defaults)?;
    if !args.countries.is_empty() {
        selection.countries = args.countries.iter().cloned().collect();
    }
    if !args.months.is_empty() {
        selection.months = args.months.iter().cloned().collect();
    }
    if !args.campaigns.is_empty() {
        selection.campaigns = args.campaigns.iter().cloned().collect();
    }

    let monthly = session.monthly_report(&selection)?;
    println!("Monthly funnel by country and campaign:");
    println!("{}", render(&monthly)?);

    if args.by_country {
        // Highest delivery volume first, the order the geographic view uses.
        let by_country = session.country_report(&selection)?.sort(
            ["Delivered"],
            SortMultipleOptions::default().with_order_descending(true),
        )?;
        println!("\nFunnel totals by country:");
        println!("{}", render(&by_country)?);
    }

    if args.read_times {
        let weekdays = session.reads_by_weekday(&selection)?;
        println!("\nReads by weekday:");
        println!("{}", render(&weekdays)?);

        let hours = session.reads_by_hour(&selection)?;
        println!("\nReads by hour:");
        println!("{}", render(&hours)?);
    }

    if let Some(path) = &args.workbook {
        let bytes = session.monthly_workbook(&selection)?;
        fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "Workbook written");
    }

    if let Some(path) = &args.enriched_csv {
        let bytes = session.enriched_csv()?;
        fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "Enriched CSV written");
    }

    if args.summary {
        let summary = session.summary(&selection)?;
        println!("\n{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn render(df: &DataFrame) -> Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(df.get_column_names_str());

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); df.height()];
    for column in df.get_columns() {
        let cells = column_cells(column)?;
        for (row, cell) in rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }
    for row in rows {
        table.add_row(row);
    }

    Ok(table)
}

fn column_cells(column: &Column) -> Result<Vec<String>> {
    let cells = match column.dtype() {
        DataType::String => {
            let values = column.str()?;
            (0..values.len())
                .map(|idx| values.get(idx).unwrap_or("").to_string())
                .collect()
        }
        DataType::Int64 => {
            let values = column.i64()?;
            (0..values.len())
                .map(|idx| values.get(idx).map(|value| value.to_string()).unwrap_or_default())
                .collect()
        }
        DataType::Float64 => {
            let values = column.f64()?;
            (0..values.len())
                .map(|idx| {
                    values
                        .get(idx)
                        .map(|value| format!("{value:.1}"))
                        .unwrap_or_default()
                })
                .collect()
        }
        other => anyhow::bail!("cannot render column '{}' of type {other:?}", column.name()),
    };

    Ok(cells)
}
