use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use ynabify_ingest::DateTemplate;

mod config;
mod convert;
mod delivery;
mod reader;
mod state;

use config::{init_config, load_config, Config};
use convert::{convert_file, ConvertOptions};
use reader::ReaderOptions;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("YNABIFY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "ynabify",
    version,
    long_version = LONG_VERSION,
    about = "Convert ABN AMRO statement exports into YNAB import CSVs"
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one or more exports; each account gets its own CSV
    Convert(ConvertArgs),

    /// Manage ~/.ynabify/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Bank export files (tab separated, no header)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for the generated CSVs (default: config output.dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Cell separator of the export (default: config input.delimiter)
    #[arg(long)]
    delimiter: Option<char>,

    /// Raw date layout, e.g. YYYYMMDD (default: config input.date_template)
    #[arg(long)]
    date_template: Option<String>,

    /// Rows per batch (default: config input.batch_size)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Date stamped into output file names (default: today in config output.timezone)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Convert(args) => {
            let cfg = load_config()?;
            run_convert(args, cfg).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = ["ynabify", "ynabify_core", "ynabify_ingest", "ynabify_ledger"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn convert_options(args: &ConvertArgs, cfg: &Config) -> Result<ConvertOptions> {
    let mut input = cfg.input.clone();
    if let Some(d) = args.delimiter {
        input.delimiter = d;
    }
    if let Some(t) = &args.date_template {
        input.date_template = t.clone();
    }
    if let Some(n) = args.batch_size {
        input.batch_size = n;
    }
    if input.batch_size == 0 {
        bail!("--batch-size must be at least 1");
    }

    let conversion_date = match args.date {
        Some(d) => d,
        None => cfg.output.today()?,
    };

    Ok(ConvertOptions {
        reader: ReaderOptions {
            delimiter: input.delimiter_byte()?,
            batch_size: input.batch_size,
        },
        date_template: DateTemplate::parse(&input.date_template)?,
        out_dir: args.out_dir.clone().unwrap_or_else(|| cfg.output.dir.clone()),
        conversion_date,
    })
}

async fn run_convert(args: ConvertArgs, cfg: Config) -> Result<()> {
    let opts = Arc::new(convert_options(&args, &cfg)?);
    let total = args.files.len();

    let handles: Vec<_> = args
        .files
        .into_iter()
        .map(|path| {
            let opts = Arc::clone(&opts);
            let label = path.display().to_string();
            (label, tokio::task::spawn_blocking(move || convert_file(&path, &opts)))
        })
        .collect();

    let mut failed = 0;
    for (label, handle) in handles {
        let outcome = handle
            .await
            .with_context(|| format!("conversion of {label} did not finish"))?;
        match outcome {
            Ok(report) => {
                tracing::debug!(
                    file = %report.file,
                    written = report.written.len(),
                    unmatched = report.stats.unmatched_descriptions,
                    "file done"
                );
                if !report.succeeded {
                    failed += 1;
                }
            }
            Err(e) => {
                eprintln!("error: {label}: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} files failed to convert");
    }
    Ok(())
}
