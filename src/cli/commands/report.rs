use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use common::converters::{format_currency, format_percent};
use common::DashboardReport;
use compute::frames::report_frames;
use compute::{default_report, ReportOptions};
use model::{DashboardFilter, DatasetLoader};
use polars::prelude::{CsvWriter, SerWriter};
use tracing::{debug, info, trace};

use crate::cli::ReportFormat;
use crate::config::load_settings;

/// Arguments of the `report` command
#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub data_dir: PathBuf,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
}

pub async fn report(args: ReportArgs) -> Result<()> {
    trace!("Entering report function");
    debug!(?args, "Report arguments");

    let filter = DashboardFilter::new(args.start_date, args.end_date, args.status.clone());
    filter.validate()?;

    if args.format == ReportFormat::Csv && args.output.is_none() {
        bail!("--output <DIR> is required for the csv format");
    }

    let settings = load_settings()?;
    let options = ReportOptions {
        top_limit: args.top.unwrap_or(settings.top_limit),
    };

    info!("Loading dataset from {}", args.data_dir.display());
    let loader = DatasetLoader::new(&args.data_dir);
    let dataset = tokio::task::spawn_blocking(move || loader.load())
        .await
        .context("Dataset loading task failed")?
        .with_context(|| format!("Failed to load dataset from {}", args.data_dir.display()))?;

    let report = default_report(&dataset, &filter, &options)?;

    info!(
        "{} orders, {} customers, revenue {}, {} delivered on time",
        report.overview.total_orders,
        report.overview.total_customers,
        format_currency(report.overview.total_revenue),
        format_percent(report.delivery.on_time_proportion),
    );

    write_report(&report, args.format, args.output.as_deref())
}

/// Write a computed report in the requested format
///
/// JSON goes to `output` when given, stdout otherwise. CSV writes one file
/// per view into the `output` directory, creating it when needed.
pub fn write_report(
    report: &DashboardReport,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            match output {
                Some(path) => {
                    fs::write(path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Report written to {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{}", json)?;
                }
            }
        }
        ReportFormat::Csv => {
            let Some(dir) = output else {
                bail!("--output <DIR> is required for the csv format");
            };
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            for (name, mut df) in report_frames(report)? {
                let path = dir.join(format!("{}.csv", name));
                let mut file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                debug!("Wrote {} rows to {}", df.height(), path.display());
            }
            info!("Report views written to {}", dir.display());
        }
    }
    Ok(())
}
