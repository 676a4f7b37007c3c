//! rowfeed CLI - runs one worksheet extraction and writes the records as CSV

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rowfeed::prelude::*;
use rowfeed::XlsxReader;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rowfeed")]
#[command(author, version, about = "Extract worksheet rows from XLSX files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the data rows of one worksheet to CSV (stdout or file)
    Extract {
        /// Input workbook (overrides the ExcelFilePath variable)
        input: Option<PathBuf>,

        /// Worksheet name (overrides the ExcelSheetName variable)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Column letters to read, in output order
        #[arg(short, long, value_delimiter = ',', default_values = ["A", "B", "C"])]
        columns: Vec<String>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Host variable, as NAME=VALUE (repeatable)
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// JSON file of host variables
        #[arg(long = "vars")]
        vars_file: Option<PathBuf>,

        /// Drop further error reports after the first one
        #[arg(long)]
        stop_after_first_error: bool,
    },

    /// List the worksheets of a workbook in document order
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            sheet,
            columns,
            output,
            vars,
            vars_file,
            stop_after_first_error,
        } => {
            let mut host = match vars_file {
                Some(path) => load_vars(&path)?,
                None => HostVariables::new(),
            };
            host.extend(vars.into_iter().collect());
            if let Some(input) = input {
                host.set(EXCEL_FILE_PATH, input.to_string_lossy());
            }
            if let Some(sheet) = sheet {
                host.set(EXCEL_SHEET_NAME, sheet);
            }

            let policy = if stop_after_first_error {
                ReportPolicy::StopAfterFirst
            } else {
                ReportPolicy::Continue
            };
            extract(&host, &columns, output.as_deref(), policy)
        }
        Commands::Sheets { input } => {
            list_sheets(&input)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Parse a `NAME=VALUE` argument
fn parse_var(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", arg)),
    }
}

fn load_vars(path: &Path) -> Result<HostVariables> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    HostVariables::from_json_str(&json)
        .with_context(|| format!("Failed to parse '{}'", path.display()))
}

fn extract(
    host: &HostVariables,
    columns: &[String],
    output: Option<&Path>,
    policy: ReportPolicy,
) -> Result<ExitCode> {
    let config = SourceConfig::from_variables(host)
        .with_columns(columns)
        .context("Invalid --columns")?;

    let source = ExcelSource::new(config);
    let mut buffer = RecordBuffer::for_columns(&source.config().columns);
    let mut reporter = LogReporter::new(policy);

    // Failures were already reported through the reporter
    let summary = match source.extract(&mut buffer, &mut reporter) {
        Ok(summary) => summary,
        Err(_) => return Ok(ExitCode::FAILURE),
    };

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            write_csv(file, &buffer)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            tracing::info!(
                "Wrote {} rows from '{}' to '{}'",
                summary.rows_emitted,
                summary.sheet_name,
                path.display()
            );
        }
        None => {
            write_csv(io::stdout().lock(), &buffer).context("Failed to write to stdout")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Write the schema as a header line followed by every record
fn write_csv<W: Write>(writer: W, buffer: &RecordBuffer) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(buffer.schema())?;
    for record in buffer.records() {
        csv.write_record(record.values())?;
    }
    csv.flush()?;
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let names = XlsxReader::sheet_names(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    for (i, name) in names.iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}
