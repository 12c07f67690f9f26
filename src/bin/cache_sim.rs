//! Interactive cache simulator.
//!
//! Run with: cargo run --bin cache_sim --features cli -- --policy lfu --capacity 2
//!
//! Reads one command per line from stdin: `put <key> <value>`, `get <key>`,
//! `display`, `exit`. Input is validated here; only well-formed integer
//! commands reach the cache.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use policy_cache::builder::{Cache, CacheBuilder, CachePolicy};
use policy_cache::traits::CoreCache;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Drive an LRU or LFU cache from stdin", long_about = None)]
struct Args {
    /// Eviction policy (LRU or LFU)
    #[arg(long, default_value = "lru")]
    policy: CachePolicy,

    /// Maximum number of entries; must be greater than 0
    #[arg(long, allow_negative_numbers = true)]
    capacity: i64,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Put(i64, i64),
    Get(i64),
    Display,
    Exit,
}

fn parse_command(line: &str) -> Result<Command, &'static str> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match (verb.as_str(), args.as_slice()) {
        ("put", [key, value]) => match (key.parse(), value.parse()) {
            (Ok(key), Ok(value)) => Ok(Command::Put(key, value)),
            _ => Err("Enter valid key and value."),
        },
        ("put", _) => Err("Enter valid key and value."),
        ("get", [key]) => key.parse().map(Command::Get).map_err(|_| "Enter a valid key."),
        ("get", _) => Err("Enter a valid key."),
        ("display", []) => Ok(Command::Display),
        ("exit" | "quit", []) => Ok(Command::Exit),
        _ => Err("Unknown command (expected put, get, display or exit)."),
    }
}

/// Runs the command loop until `exit` or end of input.
fn run<R, W>(cache: &mut Cache<i64, i64>, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Put(key, value)) => {
                cache.put(key, value);
                writeln!(out, "Inserted key {key} with value {value}")?;
            },
            Ok(Command::Get(key)) => match cache.get(&key) {
                Some(value) => writeln!(out, "Value: {value}")?,
                None => writeln!(out, "Key not found.")?,
            },
            Ok(Command::Display) => writeln!(out, "{}", cache.display())?,
            Ok(Command::Exit) => break,
            Err(msg) => {
                debug!(input = %line, "rejected command");
                writeln!(out, "{msg}")?;
            },
        }
    }
    Ok(())
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let mut cache = match CacheBuilder::new(args.capacity).try_build::<i64, i64>(args.policy) {
        Ok(cache) => cache,
        Err(err) => {
            error!(%err, "cache initialisation failed");
            println!("Capacity must be greater than 0.");
            return ExitCode::FAILURE;
        },
    };
    println!(
        "Initialized {} Cache with capacity {}",
        args.policy, args.capacity
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if let Err(err) = run(&mut cache, stdin.lock(), &mut stdout) {
        error!(%err, "i/o failure");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
