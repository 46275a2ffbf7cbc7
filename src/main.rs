use std::path::PathBuf;

use availability_merge::config::PipelineConfig;
use availability_merge::io::csv_write;
use availability_merge::merge::MergedTable;
use availability_merge::pipeline;
use availability_merge::{Result, ToolError};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Run(args) => {
            let config = args.paths.resolve()?;
            let summary = pipeline::run(&config)?;
            if args.print {
                print_table(&summary.table)?;
            }
            Ok(())
        }
        Command::Convert(paths) => {
            let config = paths.resolve()?;
            pipeline::convert(&config)?;
            Ok(())
        }
        Command::Merge(args) => {
            let config = args.paths.resolve()?;
            let summary = pipeline::merge(&config)?;
            if args.print {
                print_table(&summary.table)?;
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn print_table(table: &MergedTable) -> Result<()> {
    csv_write::write_table(std::io::stdout().lock(), table)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge per-person availability workbooks into a single date table."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert workbooks to CSV, then merge the CSV directory.
    Run(MergeArgs),
    /// Convert every workbook sheet into a CSV file.
    Convert(PathArgs),
    /// Merge an existing CSV directory into the output table.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    #[command(flatten)]
    paths: PathArgs,

    /// Print the merged table to stdout.
    #[arg(long)]
    print: bool,
}

#[derive(clap::Args)]
struct PathArgs {
    /// JSON configuration file; the flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the `.xlsx` workbooks.
    #[arg(long)]
    workbooks: Option<PathBuf>,

    /// Directory for the intermediate per-sheet CSV files.
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Path of the merged CSV file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Create the CSV directory if it does not exist.
    #[arg(long)]
    create_csv_dir: bool,
}

impl PathArgs {
    fn resolve(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = self.workbooks {
            config.workbook_dir = dir;
        }
        if let Some(dir) = self.csv_dir {
            config.csv_dir = dir;
        }
        if let Some(path) = self.output {
            config.output_path = path;
        }
        config.create_csv_dir |= self.create_csv_dir;
        Ok(config)
    }
}
