use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use malign_core::AlignmentMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod input;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "malign")]
#[command(about = "malign - Sparse banded alignment of marker sequences")]
#[command(version)]
#[command(long_about = "
malign aligns two long sequences of markers (integer k-mer ids) without building
the full alignment matrix. Matches are binned into cells along the diagonals and
dynamic programming runs only inside the dense cells.

Marker files contain whitespace-separated k-mer ids; '#' starts a comment.

Examples:
  malign align --seq0 read0.txt --seq1 read1.txt
  malign align --seq0 read0.txt --seq1 read1.txt -m 3 --format tsv --ordinals
  malign batch --pairs pairs.tsv --threads 8
  malign config --example > malign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two marker sequences
    Align {
        /// First marker sequence file
        #[arg(long, required = true)]
        seq0: PathBuf,

        /// Second marker sequence file
        #[arg(long, required = true)]
        seq1: PathBuf,

        /// Directory for debug images and CSV files
        #[arg(long)]
        debug_dir: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Also print the ordinals of the matched markers
        #[arg(long)]
        ordinals: bool,

        #[command(flatten)]
        overrides: AlignArgs,
    },

    /// Align many pairs of marker sequences in parallel
    Batch {
        /// Tab-separated file with one pair of marker files per line
        #[arg(long, required = true)]
        pairs: PathBuf,

        #[command(flatten)]
        overrides: AlignArgs,
    },

    /// Show or write the configuration
    Config {
        /// Print the default configuration
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Command-line overrides of the `[align]` configuration table.
#[derive(Args, Debug, Default, Clone)]
pub struct AlignArgs {
    /// Feature length (0 or 1 for markers, up to 8)
    #[arg(short, long)]
    pub m: Option<u32>,

    /// Cell size along the diagonals
    #[arg(long)]
    pub delta_x: Option<u32>,

    /// Cell size across the diagonals
    #[arg(long)]
    pub delta_y: Option<u32>,

    /// Minimum number of matrix entries in a cell of the band
    #[arg(long)]
    pub min_entry_count_per_cell: Option<u32>,

    /// Cells added around each selected cell
    #[arg(long)]
    pub band_padding: Option<u32>,

    /// Score of a match
    #[arg(long, allow_negative_numbers = true)]
    pub match_score: Option<i64>,

    /// Score of a mismatch
    #[arg(long, allow_negative_numbers = true)]
    pub mismatch_score: Option<i64>,

    /// Score of a gap
    #[arg(long, allow_negative_numbers = true)]
    pub gap_score: Option<i64>,

    /// Alignment mode
    #[arg(long)]
    pub mode: Option<ModeArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Tsv,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Global,
    SemiGlobal,
    Local,
}

impl From<ModeArg> for AlignmentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Global => AlignmentMode::Global,
            ModeArg::SemiGlobal => AlignmentMode::SemiGlobal,
            ModeArg::Local => AlignmentMode::Local,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // Set global thread count if specified
    if let Some(threads) = cli.threads.or(config.general.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Align {
            seq0,
            seq1,
            debug_dir,
            format,
            ordinals,
            overrides,
        } => {
            config.apply_overrides(&overrides);
            if let Some(format) = format {
                config.output.format = format;
            }
            config.output.ordinals |= ordinals;
            commands::align::execute(&config, &seq0, &seq1, debug_dir.as_deref())?;
        }

        Commands::Batch { pairs, overrides } => {
            config.apply_overrides(&overrides);
            commands::batch::execute(&config, &pairs)?;
        }

        Commands::Config { example, output } => {
            let content = if example { Config::example_toml()? } else { config.to_toml()? };
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;
                    log::info!("Configuration written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        if let Some(cli_error) = e.downcast_ref::<CliError>() {
            print_error_and_exit(cli_error);
        }
        return Err(e);
    }
    Ok(())
}
