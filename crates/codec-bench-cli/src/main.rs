//! bench-8k12 - 8K 12-bit mono lossless round-trip benchmark

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use codec_bench::config::parse_loop_count;
use codec_bench::{BenchConfig, BenchSession, ErrorKind, PngCodec};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const BIN_NAME: &str = "bench-8k12";

/// Environment variable naming a path for the JSON report.
const REPORT_ENV: &str = "CODEC_BENCH_REPORT";

/// Encode/decode round-trip benchmark on a synthetic 7680x4320 12-bit mono image.
#[derive(Parser)]
#[command(name = BIN_NAME)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Iterations per phase (positive integer, default 10)
    #[arg(allow_hyphen_values = true)]
    loop_count: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => return usage(),
    };

    let loop_count = match cli.loop_count.as_deref().map(parse_loop_count).transpose() {
        Ok(loop_count) => loop_count,
        Err(_) => return usage(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(loop_count) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

fn run(loop_count: Option<usize>) -> Result<()> {
    let mut builder = BenchConfig::builder();
    if let Some(loop_count) = loop_count {
        builder = builder.loop_count(loop_count);
    }
    if let Some(path) = std::env::var_os(REPORT_ENV) {
        builder = builder.report_path(path);
    }
    let config = builder.build()?;
    debug!(?config, "starting benchmark");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    BenchSession::new(config).run(&PngCodec, &mut out)?;
    Ok(())
}

fn usage_line() -> String {
    format!("Usage: {} [loop_count]", BIN_NAME)
}

fn usage() -> ExitCode {
    println!("{}", usage_line());
    ExitCode::FAILURE
}

/// Text printed to stdout for a failed run, or `None` when the run already
/// wrote its own diagnostics.
fn failure_message(err: &anyhow::Error) -> Option<String> {
    let kind = err.downcast_ref::<codec_bench::Error>().map(codec_bench::Error::kind);
    match kind {
        // The mismatch dump is already on stdout.
        Some(ErrorKind::Verification) => None,
        Some(ErrorKind::Usage) => Some(usage_line()),
        Some(ErrorKind::Codec) => Some(err.to_string()),
        _ => Some(format!("Error: {:#}", err)),
    }
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    if let Some(message) = failure_message(err) {
        println!("{}", message);
    }
    let _ = std::io::stdout().flush();
    ExitCode::FAILURE
}
