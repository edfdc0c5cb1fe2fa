//! ssas-doc: Export a tabular model definition to Excel documentation reports
//!
//! Writes five workbooks into the output directory: `table_data.xlsx`,
//! `relationships.xlsx`, `table_translations.xlsx`,
//! `column_translations.xlsx` and `measure_translations.xlsx`.
//!
//! Usage:
//!   ssas-doc Model.bim ./docs
//!
//!   # Show which files were written
//!   ssas-doc -v Model.bim ./docs
//!
//! Exit codes: 0 success, 1 unreadable or incomplete model, 2 input file not
//! found, 3 output directory could not be created.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use log::{LevelFilter, Metadata, Record};
use ssas_doc::{generate_report, ReportConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ssas-doc")]
#[command(
    about = "Extract table/column names and translations from a model definition and save them as Excel files",
    long_about = None
)]
struct Args {
    /// Path to the input JSON (.bim) file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for the Excel files
    #[arg(value_name = "OUTDIR")]
    outdir: PathBuf,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());

    let config = ReportConfig::new(args.input, args.outdir);

    match generate_report(&config) {
        Ok(summary) => {
            let rows: usize = summary.files.iter().map(|f| f.rows).sum();
            log::info!(
                "wrote {} reports ({} rows) to {}",
                summary.files.len(),
                rows,
                summary.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            if err.is_preflight() {
                eprintln!("Error: {}", err);
            } else {
                // Full cause chain for structural failures
                eprintln!("Error: {:?}", anyhow::Error::new(err));
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(level: LevelFilter) {
    static LOGGER: StderrLogger = StderrLogger;
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
