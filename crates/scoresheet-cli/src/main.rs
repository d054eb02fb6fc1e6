mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use scoresheet_core::config::RollingPanelPolicy;
use scoresheet_core::scoring::rounding::RoundingMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scoresheet",
    version,
    about = "Extract structured results from barbershop contest scoresheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file of parse options
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rounding for percentages (overrides the config file)
    #[arg(long, global = true, value_enum)]
    rounding: Option<RoundingArg>,

    /// Rolling-panel handling (overrides the config file)
    #[arg(long, global = true, value_enum)]
    rolling_panel: Option<RollingPanelArg>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an official result document (PDF, or text already run through pdftotext -raw)
    Parse {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Source URL, recorded on the document
        #[arg(long)]
        url: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the parsed document to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Import line-oriented (tab-separated) scoresheets
    Import {
        /// Text files, or directories of .txt files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write a .json file next to each input
        #[arg(long)]
        write_json: bool,
    },
    /// Merge the acts of one parsed document into another
    Merge {
        /// Existing document (JSON)
        existing: PathBuf,

        /// Document whose acts are added (JSON)
        incoming: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the detected layout of a result document
    Detect {
        /// Path to PDF or text file
        input_file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoundingArg {
    HalfUp,
    HalfEven,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => RoundingMode::HalfUp,
            RoundingArg::HalfEven => RoundingMode::HalfEven,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RollingPanelArg {
    Detect,
    Always,
    Never,
}

impl From<RollingPanelArg> for RollingPanelPolicy {
    fn from(arg: RollingPanelArg) -> Self {
        match arg {
            RollingPanelArg::Detect => RollingPanelPolicy::Detect,
            RollingPanelArg::Always => RollingPanelPolicy::Always,
            RollingPanelArg::Never => RollingPanelPolicy::Never,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match commands::build_options(
        cli.config.as_deref(),
        cli.rounding.map(Into::into),
        cli.rolling_panel.map(Into::into),
    ) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Parse {
            input_file,
            url,
            output,
            out,
        } => commands::parse::run(input_file, url.as_deref(), &output, out, &options),
        Commands::Import {
            paths,
            output,
            write_json,
        } => commands::import::run(&paths, &output, write_json, &options),
        Commands::Merge {
            existing,
            incoming,
            output,
        } => commands::merge::run(&existing, &incoming, &output, &options),
        Commands::Detect { input_file } => commands::detect::run(&input_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
