//! Command-line front end.
//!
//! `xorfold run` with no flags reproduces the classic benchmark: five million
//! 14-character keys into an XOR-fold `HashMap`, sampled every 50,000 inserts
//! and dumped to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use xorfold::report::run_and_report;
use xorfold::{digest, trace_digest, BenchConfig, Destination, RunParams, TableKind};

#[derive(Parser, Debug)]
#[command(name = "xorfold")]
#[command(about = "XOR-fold string hashing and hash table insertion benchmark")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a table with random keys and report elapsed time samples
    Run(RunArgs),
    /// Print the digest of each argument in decimal and binary
    Digest {
        /// Strings to hash
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Number of insertions
    #[arg(long, default_value_t = 5_000_000)]
    ops: u64,

    /// Insertions between two timing samples
    #[arg(long, default_value_t = 50_000, value_parser = clap::value_parser!(u64).range(1..))]
    stride: u64,

    /// Length of the generated keys
    #[arg(long, default_value_t = 14)]
    key_len: usize,

    /// Table implementation to benchmark
    #[arg(short, long, value_enum, default_value_t = TableKind::XorFold)]
    table: TableKind,

    /// Fixed RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Write samples to this CSV file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl From<RunArgs> for BenchConfig {
    fn from(a: RunArgs) -> Self {
        BenchConfig {
            params: RunParams {
                total_ops: a.ops,
                sample_stride: a.stride,
                key_len: a.key_len,
            },
            table: a.table,
            seed: a.seed,
            destination: a.output.map_or(Destination::Stdout, Destination::File),
        }
    }
}

fn run_benchmark(config: BenchConfig) -> anyhow::Result<()> {
    let mut harness = config.harness();
    if config.seed.is_none() {
        eprintln!("seed: {} (repeat with --seed {})", harness.seed(), harness.seed());
    }
    let mut out = io::stdout().lock();
    run_and_report(&mut harness, &config.destination, &mut out)?;
    Ok(())
}

fn print_digests(inputs: &[String]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for s in inputs {
        let v = if log::log_enabled!(log::Level::Trace) {
            trace_digest(s.as_bytes())
        } else {
            digest(s.as_bytes())
        };
        writeln!(out, "{s}\t{v}\t{v:064b}")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match args.command {
        Command::Run(run) => run_benchmark(run.into()),
        Command::Digest { inputs } => print_digests(&inputs),
    }
}
