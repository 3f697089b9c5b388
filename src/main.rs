// src/main.rs
mod logger;
mod report;
mod utils;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use huffpack::{Observer, TracingObserver};
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Compress and restore files with Huffman coding.", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Print the frequency table, heap, tree and code table
        #[arg(long)]
        stages: bool,
    },
    /// Restore a file written by `compress`
    Decompress { input: PathBuf, output: PathBuf },
}

impl Cli {
    fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level())?;

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match cli.command {
        Commands::Compress {
            input,
            output,
            stages,
        } => compress_file(&input, &output, stages),
        Commands::Decompress { input, output } => decompress_file(&input, &output),
    }
}

fn compress_file(input: &Path, output: &Path, stages: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut console = report::ConsoleObserver;
    let mut tracer = TracingObserver;
    let observer: &mut dyn Observer = if stages { &mut console } else { &mut tracer };

    let compressed = huffpack::compress_with(&data, observer)?;
    fs::write(output, &compressed)
        .with_context(|| format!("failed to write {}", output.display()))?;
    let elapsed = start.elapsed();

    let original = data.len() as u64;
    let packed = compressed.len() as u64;
    info!(input = %input.display(), output = %output.display(), original, packed, "compressed");

    println!("\nSTAGE 5: Compression summary");
    println!("Original size...: {} ({})", original, utils::format_bytes(original));
    println!("Compressed size.: {} ({})", packed, utils::format_bytes(packed));
    println!("Ratio...........: {:.2}%", utils::compression_ratio(original, packed));
    println!("Time............: {:.3} ms", utils::millis(elapsed));
    Ok(())
}

fn decompress_file(input: &Path, output: &Path) -> anyhow::Result<()> {
    let start = Instant::now();
    let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let restored = match huffpack::decompress_with(&data, &mut TracingObserver) {
        Ok(bytes) => bytes,
        Err(e) if e.is_malformed() => {
            warn!(input = %input.display(), error = %e, "rejecting corrupt container");
            return Err(e).with_context(|| format!("{} is not a valid container", input.display()));
        }
        Err(e) => return Err(e.into()),
    };

    fs::write(output, &restored)
        .with_context(|| format!("failed to write {}", output.display()))?;
    let elapsed = start.elapsed();

    info!(input = %input.display(), output = %output.display(), restored = restored.len(), "decompressed");
    println!("File decompressed successfully.");
    println!("Time: {:.3} ms", utils::millis(elapsed));
    Ok(())
}
