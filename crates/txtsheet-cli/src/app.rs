//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use txtsheet_archive::CollisionPolicy;
use txtsheet_core::config::{load_settings, Settings};
use txtsheet_core::export::{export_spreadsheet, failure_notice, package_rows, write_archive};
use txtsheet_core::ingest::{DirectorySelection, IngestStatus, Ingestor, SourceFile};
use txtsheet_core::mapping::{map_grid, output_file_name, HeaderInference};
use txtsheet_core::{Notice, SheetSession, SpreadsheetRow};
use txtsheet_data::parse_spreadsheet_file;

/// Output format for `inspect`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Archive name-collision handling
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollisionArg {
    /// Keep both entries, numbering the later one
    Rename,
    /// Later rows replace earlier ones
    Overwrite,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Rename => CollisionPolicy::Rename,
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
        }
    }
}

/// Command-line overrides applied on top of the loaded config
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Maximum characters kept per text file
    #[arg(long, global = true)]
    pub max_chars: Option<usize>,

    /// Extension of text files to ingest (e.g. ".txt")
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// How to handle rows mapping to the same file name
    #[arg(long, value_enum, global = true)]
    pub collisions: Option<CollisionArg>,
}

impl Overrides {
    /// Apply every flag that was given
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(max_chars) = self.max_chars {
            settings.ingest.max_chars = max_chars;
        }
        if let Some(extension) = &self.extension {
            settings.ingest.extension = if extension.starts_with('.') {
                extension.clone()
            } else {
                format!(".{}", extension)
            };
        }
        if let Some(collisions) = self.collisions {
            settings.export.collisions = collisions.into();
        }
        settings
    }
}

/// A `ROW=COL` title choice, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChoice {
    pub row: usize,
    pub column: usize,
}

/// Parse `ROW=COL` with both numbers starting at 1
pub fn parse_row_choice(value: &str) -> std::result::Result<RowChoice, String> {
    let (row, column) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=COL, got '{}'", value))?;
    let row = parse_position(row)?;
    let column = parse_position(column)?;
    Ok(RowChoice { row, column })
}

fn parse_position(value: &str) -> std::result::Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a positive number", value.trim())),
    }
}

/// Title selections and row deletions for `to-txt`
///
/// Row numbers refer to the rows as listed by `inspect`.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Use title column N (1-based) for every row
    #[arg(short = 't', long, value_parser = parse_position)]
    pub title_column: Option<usize>,

    /// Use title column COL for row ROW (e.g. 3=2)
    #[arg(short, long = "select", value_name = "ROW=COL", value_parser = parse_row_choice)]
    pub select: Vec<RowChoice>,

    /// Remove row ROW before exporting
    #[arg(short, long = "drop", value_name = "ROW", value_parser = parse_position)]
    pub drop: Vec<usize>,
}

#[derive(Parser)]
#[command(name = "txtsheet")]
#[command(author, version, about = "Text files to spreadsheet rows and back", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect text files into a two-column spreadsheet
    ToSheet {
        /// Text files to include
        files: Vec<PathBuf>,

        /// Directory to walk recursively instead of listing files
        #[arg(short, long, conflicts_with = "files")]
        dir: Option<PathBuf>,

        /// Output spreadsheet (defaults to <prefix>_<date>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Turn spreadsheet rows into an archive of text files
    ToTxt {
        /// Input spreadsheet (xlsx, xls, ods, csv, tsv)
        sheet: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output archive (defaults to the configured archive name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a spreadsheet's columns and rows are read
    Inspect {
        /// Input spreadsheet
        sheet: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let settings = load_settings(cli.config.as_deref(), &cwd)?;
    let settings = cli.overrides.apply(settings);
    debug!(?settings, "effective settings");

    match cli.command {
        Commands::ToSheet { files, dir, output } => {
            to_sheet_command(&files, dir.as_deref(), output.as_deref(), &settings)?;
        }
        Commands::ToTxt {
            sheet,
            selection,
            output,
        } => {
            to_txt_command(&sheet, &selection, output.as_deref(), &settings)?;
        }
        Commands::Inspect { sheet, format } => {
            inspect_command(&sheet, format)?;
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber on stderr
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the to-sheet command
///
/// Returns the written spreadsheet path, or `None` when nothing was written.
pub fn to_sheet_command(
    files: &[PathBuf],
    dir: Option<&Path>,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    let ingestor = Ingestor::new(settings.ingest.clone());

    let outcome = match dir {
        Some(dir) => ingestor.read_directory(DirectorySelection::Picked(dir.to_path_buf()))?,
        None if files.is_empty() => {
            anyhow::bail!("No input files given; pass FILES or --dir");
        }
        None => {
            let sources: Vec<SourceFile> = files.iter().map(SourceFile::from_path).collect();
            ingestor.read_files(&sources)
        }
    };

    print_notices(&outcome.notices);
    let ingested = outcome.data;
    if ingested.status != IngestStatus::Loaded {
        return Ok(None);
    }
    if let Some(root) = &ingested.root_name {
        println!("Source folder: {}", root);
    }

    let exported = match export_spreadsheet(&ingested.records, &settings.sheet) {
        Ok(exported) => exported,
        Err(err) => {
            print_notices(&[failure_notice(&err)]);
            return Err(err.into());
        }
    };
    print_notices(&exported.notices);
    let Some(bytes) = exported.data else {
        return Ok(None);
    };

    let base = output.map(|p| p.to_string_lossy().into_owned());
    let today = chrono::Local::now().date_naive();
    let path = PathBuf::from(output_file_name(
        base.as_deref(),
        &settings.sheet.file_prefix,
        today,
    ));

    fs::write(&path, bytes)
        .with_context(|| format!("Failed to write spreadsheet: {}", path.display()))?;

    info!(path = %path.display(), rows = ingested.records.len(), "spreadsheet written");
    println!(
        "✓ Wrote {} row(s) to {}",
        ingested.records.len(),
        path.display()
    );
    Ok(Some(path))
}

/// Execute the to-txt command
///
/// Returns the written archive path, or `None` when there was nothing to export.
pub fn to_txt_command(
    sheet: &Path,
    selection: &SelectionArgs,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    let parsed = parse_spreadsheet_file(sheet)
        .with_context(|| format!("Failed to read spreadsheet: {}", sheet.display()))?;
    debug!(sheet = %parsed.sheet, rows = parsed.grid.len(), "parsed spreadsheet");

    let mapped = map_grid(&parsed.grid);
    print_notices(&mapped.notices);

    let mut session = SheetSession::new();
    session.load(mapped.data);
    apply_selection(&mut session, selection)?;

    let outcome = match package_rows(session.rows(), &settings.export) {
        Ok(outcome) => outcome,
        Err(err) => {
            print_notices(err.violations());
            print_notices(&[failure_notice(&err)]);
            return Err(err.into());
        }
    };

    let Some(archive) = outcome.data else {
        print_notices(&outcome.notices);
        return Ok(None);
    };

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&settings.export.archive_name));
    if let Err(err) = write_archive(&archive, &path) {
        print_notices(&[failure_notice(&err)]);
        return Err(err.into());
    }

    print_notices(&outcome.notices);
    println!("✓ Wrote {}", path.display());
    Ok(Some(path))
}

/// Apply title selections, then row deletions
///
/// Deletions run from the highest row down so every number keeps referring
/// to the row as originally listed.
pub fn apply_selection(session: &mut SheetSession, selection: &SelectionArgs) -> Result<()> {
    if let Some(column) = selection.title_column {
        session.select_all(to_index(column)?)?;
    }
    for choice in &selection.select {
        session.select_title(to_index(choice.row)?, to_index(choice.column)?)?;
    }

    let mut drops = selection.drop.clone();
    drops.sort_unstable();
    drops.dedup();
    for row in drops.into_iter().rev() {
        session.delete_row(to_index(row)?)?;
    }
    Ok(())
}

fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .context("Row and column numbers start at 1")
}

/// JSON view of an inspected sheet
#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    sheet: &'a str,
    sheet_names: &'a [String],
    headers: &'a HeaderInference,
    rows: &'a [SpreadsheetRow],
    notices: &'a [Notice],
}

/// Execute the inspect command
pub fn inspect_command(sheet: &Path, format: OutputFormat) -> Result<()> {
    let parsed = parse_spreadsheet_file(sheet)
        .with_context(|| format!("Failed to read spreadsheet: {}", sheet.display()))?;
    let mapped = map_grid(&parsed.grid);

    match format {
        OutputFormat::Json => {
            let report = InspectReport {
                sheet: &parsed.sheet,
                sheet_names: &parsed.sheet_names,
                headers: &mapped.data.headers,
                rows: &mapped.data.rows,
                notices: &mapped.notices,
            };
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize sheet to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let headers = &mapped.data.headers;
            println!("Sheet: {} ({} columns)", parsed.sheet, headers.total_columns);
            for (i, label) in headers.title_headers.iter().enumerate() {
                println!("  title column {}: {}", i + 1, label);
            }
            if let Some(content) = headers.content_column() {
                println!("  content column: {}", content + 1);
            }
            println!();

            for (i, row) in mapped.data.rows.iter().enumerate() {
                let titles: Vec<&str> = row
                    .titles
                    .iter()
                    .take(headers.title_column_count)
                    .map(String::as_str)
                    .collect();
                println!(
                    "{:>4}  [{}]  {} chars",
                    i + 1,
                    titles.join(" | "),
                    row.content.chars().count()
                );
            }
            println!();
            print_notices(&mapped.notices);
        }
    }

    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        println!("{}", notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_choice() {
        assert_eq!(
            parse_row_choice("3=2"),
            Ok(RowChoice { row: 3, column: 2 })
        );
        assert_eq!(
            parse_row_choice(" 1 = 10 "),
            Ok(RowChoice { row: 1, column: 10 })
        );
        assert!(parse_row_choice("3").is_err());
        assert!(parse_row_choice("0=1").is_err());
        assert!(parse_row_choice("a=1").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            max_chars: Some(10),
            extension: Some("md".to_string()),
            collisions: Some(CollisionArg::Overwrite),
        };
        let settings = overrides.apply(Settings::default());

        assert_eq!(settings.ingest.max_chars, 10);
        assert_eq!(settings.ingest.extension, ".md");
        assert_eq!(settings.export.collisions, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_no_overrides_keep_settings() {
        let settings = Overrides::default().apply(Settings::default());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_parses_to_txt() {
        let cli = Cli::try_parse_from([
            "txtsheet",
            "to-txt",
            "rows.xlsx",
            "-t",
            "2",
            "--select",
            "3=1",
            "--drop",
            "4",
            "--collisions",
            "overwrite",
        ])
        .unwrap();

        match cli.command {
            Commands::ToTxt { selection, .. } => {
                assert_eq!(selection.title_column, Some(2));
                assert_eq!(selection.select, vec![RowChoice { row: 3, column: 1 }]);
                assert_eq!(selection.drop, vec![4]);
            }
            _ => panic!("expected to-txt"),
        }
        assert!(matches!(
            cli.overrides.collisions,
            Some(CollisionArg::Overwrite)
        ));
    }

    #[test]
    fn test_cli_dir_conflicts_with_files() {
        let result = Cli::try_parse_from(["txtsheet", "to-sheet", "a.txt", "--dir", "notes"]);
        assert!(result.is_err());
    }
}
