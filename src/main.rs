use std::path::{Path, PathBuf};

use clap::Parser;
use runr::fuzz::{FuzzBatch, FuzzConfig};
use runr::{ConsoleHost, Grid, Interpreter, InterpreterConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runr", about = "RunR: a two-dimensional esoteric language interpreter")]
struct Cli {
    /// Program to run.
    #[arg(required_unless_present = "fuzz")]
    file: Option<PathBuf>,

    /// Log a state snapshot to stderr before every step.
    #[arg(long)]
    trace: bool,

    /// Stop after this many instructions (unlimited by default; 8192 when fuzzing).
    #[arg(long)]
    step_limit: Option<u64>,

    /// Run N random programs instead of a file and print outcome counts.
    #[arg(long)]
    fuzz: Option<usize>,

    /// Random seed for --fuzz.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Grid size for --fuzz programs (e.g. 16x8).
    #[arg(long, default_value = "16x8")]
    grid: String,
}

/// Parse a "WxH" grid specification string.
fn parse_grid(s: &str) -> Result<(usize, usize), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid grid format '{s}', expected WxH (e.g. 16x8)"));
    }
    let w = parts[0].parse::<usize>().map_err(|e| format!("Invalid grid width: {e}"))?;
    let h = parts[1].parse::<usize>().map_err(|e| format!("Invalid grid height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("Grid dimensions must be positive".to_string());
    }
    Ok((w, h))
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.trace { "runr=trace" } else { "runr=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(programs) = cli.fuzz {
        run_fuzz(&cli, programs);
    } else if let Some(ref path) = cli.file {
        run_file(&cli, path);
    }
}

fn run_file(cli: &Cli, path: &Path) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let config = InterpreterConfig {
        step_limit: cli.step_limit,
    };
    let interp = Interpreter::with_config(Grid::parse(&source), config);
    info!(
        width = interp.grid().width(),
        height = interp.grid().height(),
        "loaded {}",
        path.display()
    );

    let mut host = ConsoleHost::new(cli.trace);
    let result = interp.run(&mut host);
    let flushed = host.flush();

    match result {
        Ok(outcome) => {
            info!(halt = ?outcome.halt, steps = outcome.steps, "done");
            if let Err(e) = flushed {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_fuzz(cli: &Cli, programs: usize) {
    let (width, height) = match parse_grid(&cli.grid) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let defaults = FuzzConfig::default();
    let config = FuzzConfig {
        programs,
        width,
        height,
        step_limit: cli.step_limit.unwrap_or(defaults.step_limit),
        ..defaults
    };

    let start = std::time::Instant::now();
    let batch = FuzzBatch::new(config, cli.seed);
    let report = batch.run();
    let elapsed = start.elapsed();

    println!("{report}");
    eprintln!("  Elapsed:             {elapsed:.2?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        assert_eq!(parse_grid("16x8"), Ok((16, 8)));
        assert!(parse_grid("16").is_err());
        assert!(parse_grid("0x8").is_err());
        assert!(parse_grid("ax8").is_err());
        assert!(parse_grid("1x2x3").is_err());
    }

    #[test]
    fn test_cli_requires_file_or_fuzz() {
        assert!(Cli::try_parse_from(["runr"]).is_err());
        assert!(Cli::try_parse_from(["runr", "hello.runr"]).is_ok());
        assert!(Cli::try_parse_from(["runr", "--fuzz", "10"]).is_ok());
    }
}
