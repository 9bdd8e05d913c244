//! Trace-driven cache simulator CLI.
//!
//! This binary replays an access trace through one simulated cache. It performs:
//! 1. **Configuration:** Geometry, protocol and policy from flags, optionally layered
//!    over a JSON config file.
//! 2. **Replay:** Every record of the trace (or stdin) is fed to the cache; the first
//!    malformed record aborts the run with its line number.
//! 3. **Reporting:** Statistics are printed as text or JSON.

use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use cachesim_core::config::{CacheConfig, Protocol, ReplacementPolicy};
use cachesim_core::sim::Simulator;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a memory access trace through a simulated cache and report hits, misses and writebacks.\n\nTrace records are `<kind> <address>`, one per line, where kind is 0/load, 1/store, 2/ld_miss or 3/st_miss.\n\nExamples:\n  cachesim --capacity 32768 --block-size 64 --assoc 4 trace.txt\n  cachesim --protocol msi --config l1.json trace.txt\n  cat trace.txt | cachesim --json -"
)]
struct Cli {
    /// Trace file, or `-` for stdin.
    trace: PathBuf,

    /// JSON cache configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capacity in bytes.
    #[arg(long)]
    capacity: Option<usize>,

    /// Block size in bytes.
    #[arg(long)]
    block_size: Option<usize>,

    /// Associativity (ways per set).
    #[arg(long)]
    assoc: Option<usize>,

    /// Coherence protocol: plain, vi or msi.
    #[arg(long)]
    protocol: Option<Protocol>,

    /// Replacement policy: rr or lru.
    #[arg(long)]
    policy: Option<ReplacementPolicy>,

    /// Plain protocol: snoop hits invalidate the line and make it the next victim.
    #[arg(long)]
    lru_on_invalidate: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print every access and its outcome.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Builds the cache configuration: file (or defaults), then flag overrides.
    fn cache_config(&self) -> Result<CacheConfig, String> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CacheConfig::default(),
        };
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(assoc) = self.assoc {
            config.associativity = assoc;
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        config.lru_on_invalidate |= self.lru_on_invalidate;
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Builds the cache, replays the trace and prints the report.
fn run(cli: &Cli) -> Result<(), String> {
    let config = cli.cache_config()?;
    let mut sim = Simulator::new(&config).map_err(|e| format!("invalid cache configuration: {e}"))?;
    let reader = open_trace(&cli.trace)?;

    let replayed = if cli.verbose {
        sim.run_with(reader, |record, outcome| {
            println!("{:>6}  {:<7} {:#010x}  {}", record.line, record.kind, record.address, outcome);
        })
    } else {
        sim.run(reader)
    }
    .map_err(|e| e.to_string())?;
    tracing::info!(replayed, "trace complete");

    let report = sim.report();
    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        report.print();
    }
    Ok(())
}

/// Reads and parses a JSON cache configuration.
fn load_config(path: &Path) -> Result<CacheConfig, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    CacheConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Opens the trace file, or stdin for `-`.
fn open_trace(path: &Path) -> Result<Box<dyn BufRead>, String> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
