use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_matcher::errors::AppError;
use cv_matcher::extraction::{PdfParser, TextExtractor};
use cv_matcher::output::{self, ColorMode};
use cv_matcher::{Config, CvMatcher};

/// CV Matcher - score a PDF résumé against a job posting
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a résumé against a job description
    Analyze {
        /// Path to the résumé PDF
        pdf_path: PathBuf,

        /// Job posting URL (http/https) or the job description text itself
        job: String,

        /// OpenAI API key (defaults to OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name (defaults to OPENAI_MODEL or gpt-4o-mini)
        #[arg(long)]
        model: Option<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the text extracted from a résumé PDF
    Extract {
        /// Path to the résumé PDF
        pdf_path: PathBuf,
    },

    /// Print a résumé PDF's metadata as JSON
    Metadata {
        /// Path to the résumé PDF
        pdf_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // A bad setting only matters to `analyze`; `extract` and `metadata` still run.
    let config = Config::from_env();

    init_tracing(config.as_ref().ok(), cli.verbose);

    if let Err(e) = run(cli.command, config).await {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn init_tracing(config: Option<&Config>, verbose: bool) {
    let level = match (verbose, config) {
        (true, _) => "debug",
        (false, Some(config)) => config.rust_log.as_str(),
        (false, None) => "info",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("cv_matcher={level}"))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Command, config: Result<Config, AppError>) -> Result<(), AppError> {
    match command {
        Command::Analyze {
            pdf_path,
            job,
            api_key,
            model,
            json,
            no_color,
        } => {
            let config = config?.with_overrides(api_key, model);
            let color = ColorMode(!no_color && !json && std::io::stdout().is_terminal());
            analyze(&config, &pdf_path, &job, json, color).await
        }
        Command::Extract { pdf_path } => extract(&pdf_path).await,
        Command::Metadata { pdf_path } => metadata(&pdf_path).await,
    }
}

async fn analyze(
    config: &Config,
    pdf_path: &Path,
    job: &str,
    json: bool,
    color: ColorMode,
) -> Result<(), AppError> {
    let matcher = CvMatcher::new(config)?;
    info!("Using model {}", matcher.analyzer().model());

    let analysis = matcher.analyze_cv(pdf_path, job).await?;

    if json {
        let stdout = std::io::stdout();
        output::print_json(&mut stdout.lock(), &analysis).map_err(io_error)?;
    } else {
        let metadata = matcher.extractor().extract_metadata(pdf_path).await;
        let stdout = std::io::stdout();
        output::print_report(&mut stdout.lock(), pdf_path, &metadata, &analysis, color)
            .map_err(io_error)?;
    }
    Ok(())
}

async fn extract(pdf_path: &Path) -> Result<(), AppError> {
    let text = PdfParser::new().extract_text(pdf_path).await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{text}").map_err(io_error)
}

async fn metadata(pdf_path: &Path) -> Result<(), AppError> {
    let metadata = PdfParser::new().extract_metadata(pdf_path).await;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &metadata)
        .map_err(|e| AppError::Internal(e.into()))?;
    writeln!(out).map_err(io_error)
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::Internal(anyhow::Error::new(e).context("failed to write output"))
}
