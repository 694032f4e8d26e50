//! vtstate Headless Runner
//!
//! Feeds a file or stdin through the engine and prints the final state as
//! JSON, or the active screen as text.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vtstate::{Config, Error, Terminal};

#[derive(Parser, Debug)]
#[command(name = "vtstate-headless")]
#[command(version)]
#[command(about = "Run terminal output through a headless VT100/xterm engine", long_about = None)]
struct CliArgs {
    /// Columns (overrides the config file)
    #[arg(short, long, value_name = "COLS")]
    cols: Option<usize>,

    /// Rows (overrides the config file)
    #[arg(short, long, value_name = "ROWS")]
    rows: Option<usize>,

    /// Path to a JSON config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input file (defaults to stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the active screen as text instead of a JSON snapshot
    #[arg(short, long)]
    text: bool,
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    tracing::debug!("Headless runner: {}x{}", config.cols, config.rows);

    let term = Terminal::from_config(&config);
    let source: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let mut reader = BufReader::new(source);
    loop {
        match term.parse(&mut reader) {
            Ok(()) => continue,
            Err(Error::StreamClosed) => break,
            Err(e) => return Err(e.into()),
        }
    }

    let rendered = if args.text {
        term.text()
    } else {
        term.snapshot().to_json()?
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    out.write_all(rendered.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
