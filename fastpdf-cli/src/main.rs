use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use fastpdf::{extract_zip, ClientConfig, PdfClient, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "fastpdf",
    about = "Process PDFs with the FastPDF service",
    version,
    author
)]
struct Cli {
    /// API key sent with every request
    #[arg(long, env = "FASTPDF_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Service root, without the version segment
    #[arg(long, env = "FASTPDF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API version
    #[arg(long, env = "FASTPDF_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API key is accepted
    ValidateToken,

    /// Split a PDF at the given pages
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Page to split at (repeatable)
        #[arg(long = "at", allow_negative_numbers = true)]
        at: Vec<i64>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a PDF into page ranges, delivered as a zip archive
    SplitZip {
        /// Input PDF file
        input: PathBuf,

        /// Page range such as "0-1" (repeatable)
        #[arg(short, long = "range", value_parser = parse_range)]
        ranges: Vec<[i64; 2]>,

        /// Where to write the zip archive
        #[arg(short, long, required_unless_present = "extract_to")]
        output: Option<PathBuf>,

        /// Directory to unpack the archive into
        #[arg(short = 'x', long)]
        extract_to: Option<PathBuf>,
    },

    /// Replace document metadata entries
    EditMetadata {
        /// Input PDF file
        input: PathBuf,

        /// Metadata entry such as "Title=Annual report" (repeatable)
        #[arg(short = 's', long = "set", value_parser = parse_key_value, required = true)]
        entries: Vec<(String, String)>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fastpdf=info,fastpdf_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::builder(cli.api_key)
        .base_url(cli.base_url)
        .api_version(cli.api_version)
        .build();
    debug!(base_url = %config.base_url(), "Using FastPDF service");
    let client = PdfClient::new(config).context("Failed to create client")?;

    match cli.command {
        Commands::ValidateToken => {
            let valid = client
                .validate_token()
                .context("Token validation failed")?;
            println!("Token is valid: {valid}");
        }

        Commands::Split { input, at, output } => {
            let pdf = client
                .split(&input, &at)
                .with_context(|| format!("Failed to split {}", input.display()))?;
            client
                .save(pdf, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!("✓ Split PDF written to {}", output.display());
        }

        Commands::SplitZip {
            input,
            ranges,
            output,
            extract_to,
        } => {
            let archive = client
                .split_zip(&input, &ranges)
                .with_context(|| format!("Failed to split {}", input.display()))?;

            if let Some(dir) = extract_to {
                extract_zip(&archive, &dir)
                    .with_context(|| format!("Failed to extract into {}", dir.display()))?;
                println!("✓ Split PDFs extracted to {}", dir.display());
            }
            if let Some(output) = output {
                client
                    .save(archive, &output)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("✓ Zip archive written to {}", output.display());
            }
        }

        Commands::EditMetadata {
            input,
            entries,
            output,
        } => {
            let metadata: BTreeMap<String, String> = entries.into_iter().collect();
            let pdf = client
                .edit_metadata(&input, &metadata)
                .with_context(|| format!("Failed to edit metadata of {}", input.display()))?;
            client
                .save(pdf, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!("✓ Updated PDF written to {}", output.display());
        }
    }

    Ok(())
}

/// Parses a page range written as `start-end`
fn parse_range(s: &str) -> Result<[i64; 2]> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| anyhow!("expected START-END, got '{s}'"))?;
    let start = start
        .trim()
        .parse()
        .with_context(|| format!("invalid range start in '{s}'"))?;
    let end = end
        .trim()
        .parse()
        .with_context(|| format!("invalid range end in '{s}'"))?;
    Ok([start, end])
}

/// Parses a metadata entry written as `KEY=VALUE`
fn parse_key_value(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(anyhow!("empty metadata key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
