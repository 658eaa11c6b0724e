//! Spreader detector CLI
//!
//! Usage: spreader_detector <PEOPLE> <MEETINGS> [options]
//!
//! Options:
//!   --output <PATH>  Report file (default: SpreaderDetectorAnalysis.out)
//!   --config <PATH>  TOML file with calibration and thresholds
//!   --lenient        Coerce malformed numbers and unknown IDs instead of failing
//!   -v, --verbose    Debug logging
//!
//! Example: spreader_detector People.in Meetings.in

use clap::Parser;
use spreader_core::{
    DetectorConfig, DetectorError, OUTPUT_FILE, ParsePolicy, load_config, run_files,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

const INPUT_FILES_ERR: &str = "Error in input files.";
const OUTPUT_FILE_ERR: &str = "Error in output file.";
const STANDARD_LIB_ERR: &str = "ERROR: standard library function failed.";
const CONFIG_ERR: &str = "Error in config file.";

#[derive(Parser, Debug)]
#[command(
    name = "spreader_detector",
    version,
    about = "Rank a population by infection risk from a contact log"
)]
struct Args {
    /// Path to the population file (`name ID` per line)
    people: PathBuf,

    /// Path to the meetings file (root ID, then `ID1 ID2 distance duration`)
    meetings: PathBuf,

    /// Report file to write
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Coerce malformed numbers to 0 and unknown IDs to the nearest match
    #[arg(long)]
    lenient: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("spreader_core=debug,spreader_detector=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn error_message(err: &DetectorError) -> &'static str {
    match err {
        DetectorError::Input { .. } => INPUT_FILES_ERR,
        DetectorError::Alloc(_) => STANDARD_LIB_ERR,
        DetectorError::Build(_) => INPUT_FILES_ERR,
        DetectorError::Output { .. } => OUTPUT_FILE_ERR,
        DetectorError::Config(_) => CONFIG_ERR,
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) if e.use_stderr() => {
            // Wrong argument count and unknown options
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("{}", e);
                eprintln!("{}", CONFIG_ERR);
                return ExitCode::FAILURE;
            }
        },
        None => DetectorConfig::default(),
    };
    if args.lenient {
        config = config.with_parse_policy(ParsePolicy::Lenient);
    }

    let start = Instant::now();

    match run_files(&args.people, &args.meetings, &args.output, &config) {
        Ok(report) => {
            tracing::info!(
                records = report.len(),
                output = %args.output.display(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "analysis written"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}
