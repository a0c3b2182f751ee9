//! sheetpick CLI - spreadsheet row projection tool
//!
//! Fetches a workbook from a path or URL and prints the rows of its first
//! sheet as JSON.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use sheetpick::render::{to_json, JsonFormat};
use sheetpick::xlsx::WorkbookReader;
use sheetpick::{ByteSource, DefaultSource, FetchConfig, Field, Location};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Project the rows of a workbook's first sheet onto a fixed set of columns
#[derive(Parser)]
#[command(
    name = "sheetpick",
    author = "iyulab",
    version,
    about = "Extract fixed columns from the first sheet of an Excel workbook",
    long_about = "sheetpick - fetch an .xlsx workbook from a path or URL, read its first sheet\n\
                  using the first row as headers, and print the rows as JSON."
)]
struct Cli {
    /// HTTP timeout in seconds (default: none)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print rows projected onto the fixed fields
    Rows {
        /// Workbook path or URL
        input: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Print every column of every row
    Records {
        /// Workbook path or URL
        input: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show sheets, headers and field coverage of a workbook
    Info {
        /// Workbook path or URL
        input: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FetchConfig::new();
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    match cli.command {
        Commands::Rows {
            input,
            output,
            compact,
        } => {
            let data = fetch(&config, &input).await?;
            let rows = sheetpick::project_bytes(&data)?;
            let json = to_json(&rows, json_format(compact))?;
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} rows: {}",
                    "✓".green().bold(),
                    rows.len(),
                    path.display()
                );
            }
        }

        Commands::Records {
            input,
            output,
            compact,
        } => {
            let data = fetch(&config, &input).await?;
            let records = sheetpick::read_records(&data)?;
            let json = to_json(&records, json_format(compact))?;
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Wrote {} records: {}",
                    "✓".green().bold(),
                    records.len(),
                    path.display()
                );
            }
        }

        Commands::Info { input } => {
            let data = fetch(&config, &input).await?;
            let reader = WorkbookReader::from_bytes(data)?;
            let sheet = reader.first_sheet()?;
            let headers = sheetpick::records::headers(&sheet);
            let records = sheetpick::records::sheet_to_records(&sheet);

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Location".bold(), input);
            println!("{}: {}", "Format".bold(), reader.format());
            println!("{}: {}", "Sheets".bold(), reader.sheet_names().join(", "));
            println!("{}: {}", "First sheet".bold(), sheet.name());
            println!("{}: {}", "Records".bold(), records.len());

            println!("\n{}", "Headers".cyan().bold());
            println!("{}", "─".repeat(40));
            for header in &headers {
                println!("  {}", header);
            }

            println!("\n{}", "Fields".cyan().bold());
            println!("{}", "─".repeat(40));
            for field in Field::ALL {
                if headers.iter().any(|h| h == field.name()) {
                    println!("  {} {}", "✓".green().bold(), field);
                } else {
                    println!("  {} {}", "!".yellow().bold(), field);
                }
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

async fn fetch(config: &FetchConfig, input: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let location = Location::parse(input)?;
    let pb = create_spinner(&format!("Fetching {}...", location));

    let source = DefaultSource::with_config(config)?;
    let result = source.fetch(&location).await;

    pb.finish_and_clear();
    Ok(result?)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn print_version() {
    println!("{} {}", "sheetpick".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Project spreadsheet rows onto a fixed set of columns");
    println!();
    println!("Supported formats: XLSX, XLSM");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
