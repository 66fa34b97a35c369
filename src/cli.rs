use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;

use commands::{report, serve, ReportArgs};

#[derive(Parser)]
#[command(name = "ecomdash")]
#[command(about = "E-commerce dashboard: web server and report generator for an orders dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format of the `report` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Whole report as one JSON document
    Json,
    /// One CSV file per view, written into the output directory
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the dataset and start the web server
    Serve {
        /// Directory containing the dataset CSV files
        #[arg(short, long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Compute every dashboard view once and write the result
    ///
    /// Examples:
    ///   ecomdash report --data-dir data --status delivered
    ///   ecomdash report --start-date 2017-01-01 --end-date 2017-12-31 --format csv --output out/
    Report {
        /// Directory containing the dataset CSV files
        #[arg(short, long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// First purchase date to include (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Last purchase date to include (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Keep only orders with this status (e.g. delivered)
        #[arg(long)]
        status: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (json) or directory (csv). JSON goes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows in ranked views (defaults to the configured top limit)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
        top: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { data_dir, bind_address } => {
                serve(&data_dir, &bind_address).await?;
            }
            Commands::Report {
                data_dir,
                start_date,
                end_date,
                status,
                format,
                output,
                top,
            } => {
                let args = ReportArgs {
                    data_dir,
                    start_date,
                    end_date,
                    status,
                    format,
                    output,
                    top: top.map(usize::from),
                };
                report(args).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["ecomdash", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind_address, .. } => {
                assert!(!bind_address.is_empty());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_parse_report_arguments() {
        let cli = Cli::try_parse_from([
            "ecomdash",
            "report",
            "--data-dir",
            "fixtures",
            "--start-date",
            "2018-01-01",
            "--end-date",
            "2018-06-30",
            "--status",
            "delivered",
            "--format",
            "csv",
            "--output",
            "out",
            "--top",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Report {
                data_dir,
                start_date,
                end_date,
                status,
                format,
                output,
                top,
            } => {
                assert_eq!(data_dir, PathBuf::from("fixtures"));
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2018, 1, 1));
                assert_eq!(end_date, NaiveDate::from_ymd_opt(2018, 6, 30));
                assert_eq!(status.as_deref(), Some("delivered"));
                assert_eq!(format, ReportFormat::Csv);
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(top, Some(5));
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_reject_out_of_range_top() {
        assert!(Cli::try_parse_from(["ecomdash", "report", "--top", "0"]).is_err());
        assert!(Cli::try_parse_from(["ecomdash", "report", "--top", "101"]).is_err());
    }

    #[test]
    fn test_reject_malformed_date() {
        assert!(Cli::try_parse_from(["ecomdash", "report", "--start-date", "01/02/2018"]).is_err());
    }
}
