//! CLI entry point for the GPA explorer.
//!
//! Loads the course grade dataset once, aggregates it into per-course
//! summaries, then either exports them, answers a single query, or serves
//! the dashboard API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gpa_explorer::{
    config::Settings,
    courses::{catalog::CourseCatalog, filter::StudentLevel},
    logging,
    output::{print_pretty, render_json, render_table, rows_to_csv, write_summaries},
    server::{AppState, run_server},
};
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(name = "gpa_explorer")]
#[command(about = "Explore course grade distributions by subject, level and GPA", long_about = None)]
struct Cli {
    /// Path or URL of the grade CSV (overrides GPA_DATA_SOURCE)
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the dataset and write one CSV row per course
    Summarize {
        /// CSV file to write summaries to
        #[arg(short, long, default_value = "course_summaries.csv")]
        output: String,
    },
    /// List the subjects present in the dataset
    Subjects,
    /// Filter courses and print the resulting table
    Query {
        /// Subject code, e.g. CS (defaults to GPA_DEFAULT_SUBJECT)
        #[arg(long)]
        subject: Option<String>,

        /// Student level (defaults to GPA_DEFAULT_LEVEL)
        #[arg(short, long, value_enum)]
        level: Option<StudentLevel>,

        /// Only show courses with an average GPA strictly above this
        #[arg(short, long)]
        min_gpa: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Serve the dashboard API over HTTP
    Serve {
        /// Address to bind (overrides GPA_BIND_ADDR)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _file_guard = logging::init(&settings.log_file_path)?;

    let source = cli.source.unwrap_or_else(|| settings.data_source.clone());

    let catalog = CourseCatalog::load(&source)
        .await
        .with_context(|| format!("failed to load grade data from {source}"))?;

    match cli.command {
        Commands::Summarize { output } => {
            write_summaries(&output, catalog.summaries())?;
        }
        Commands::Subjects => {
            for subject in catalog.subjects() {
                println!("{subject}");
            }
        }
        Commands::Query {
            subject,
            level,
            min_gpa,
            format,
        } => {
            let defaults = &settings.defaults;
            let subject = subject.unwrap_or_else(|| defaults.subject.clone());
            let level = level.unwrap_or(defaults.level);
            let min_gpa = min_gpa.unwrap_or(defaults.min_gpa);

            let view = catalog.query(&subject, level, min_gpa)?;
            print_pretty(&view);
            info!(matches = view.table.len(), "Query complete");

            match format {
                OutputFormat::Table => print!("{}", render_table(&view)),
                OutputFormat::Json => println!("{}", render_json(&view)?),
                OutputFormat::Csv => print!("{}", rows_to_csv(&view.table)?),
            }
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or(settings.bind_addr);
            run_server(AppState::new(catalog, settings.defaults), bind).await?;
        }
    }

    Ok(())
}
