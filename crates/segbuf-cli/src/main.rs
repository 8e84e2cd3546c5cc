//! segbuf CLI
//!
//! Command-line tool that runs byte streams through a segmented buffer.
//!
//! ## Commands
//!
//! ```bash
//! # Buffer stdin, then drain it to stdout
//! cat access.log | segbuf pipe --chunk-size 512 > copy.log
//!
//! # Show how a file lays out in segments
//! segbuf stats access.log --format json
//!
//! # Hex dump the first 32 bytes
//! segbuf peek access.log --bytes 32
//! ```
//!
//! ## Configuration
//!
//! - `--config <FILE>` / `SEGBUF_CONFIG`: TOML file with a `BufferConfig`
//! - `--label <NAME>`: overrides the config label
//! - `RUST_LOG` or `--log-level`: log filter (logs go to stderr)
//! - `--metrics`: print Prometheus metrics to stderr on exit

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use segbuf_core::Buffer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod format;

use format::OutputFormat;

#[derive(Parser)]
#[command(name = "segbuf")]
#[command(about = "Pipe and inspect byte streams through a segmented buffer", long_about = None)]
struct Cli {
    /// Buffer config file (TOML)
    #[arg(short, long, env = "SEGBUF_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Buffer label used in logs and metrics
    #[arg(long, global = true)]
    label: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Buffer all of stdin, then drain it to stdout
    Pipe {
        /// Bytes read from stdin per write
        #[arg(long, default_value_t = 4096)]
        chunk_size: usize,
    },
    /// Ingest a file (or stdin) and print buffer stats
    Stats {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Ingest a file (or stdin) and hex dump its first bytes
    Peek {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,

        /// Number of bytes to show
        #[arg(long, default_value_t = 64)]
        bytes: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.metrics {
        segbuf_observability::init();
    }

    let mut buffer_config = config::load(cli.config.as_deref())?;
    if let Some(label) = cli.label.clone() {
        buffer_config.label = label;
    }
    debug!(config = ?buffer_config, "Loaded buffer config");
    let buffer = Buffer::with_config(buffer_config);

    match cli.command {
        Commands::Pipe { chunk_size } => {
            anyhow::ensure!(chunk_size > 0, "--chunk-size must be greater than 0");

            let ingested = ingest(&buffer, io::stdin().lock(), chunk_size)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let sent = buffer
                .drain_to(&mut out)
                .context("Failed to drain buffer to stdout")?;
            out.flush().context("Failed to flush stdout")?;

            info!(ingested, sent, segments = buffer.segment_count(), "Pipe complete");
        }
        Commands::Stats { file, format } => {
            ingest_input(&buffer, file)?;
            println!("{}", format::render_stats(&buffer.stats(), format)?);
        }
        Commands::Peek { file, bytes } => {
            ingest_input(&buffer, file)?;
            let mut dst = vec![0u8; bytes];
            let n = buffer.read_at(&mut dst, 0)?;
            println!("{}", format::hex_dump(&dst[..n]));
        }
    }

    if cli.metrics {
        let stderr = io::stderr();
        segbuf_observability::exporter::write_text(&mut stderr.lock())
            .context("Failed to encode metrics")?;
    }

    Ok(())
}

fn ingest_input(buffer: &Buffer, file: Option<PathBuf>) -> Result<u64> {
    match file {
        Some(path) => {
            let reader = File::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            ingest(buffer, reader, 64 * 1024)
        }
        None => ingest(buffer, io::stdin().lock(), 64 * 1024),
    }
}

/// Read `reader` to the end, writing each chunk into `buffer`
fn ingest<R: Read>(buffer: &Buffer, mut reader: R, chunk_size: usize) -> Result<u64> {
    let mut chunk = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        total += buffer.write(&chunk[..n]) as u64;
    }

    Ok(total)
}
