//! Prints the distinct permutations of the multiset formed by the items given
//! on the command line, one permutation per line.
//!
//! Items that are equal as strings are indistinguishable, so
//! `multipermute a a b` prints three lines: `b a a`, `a b a` and `a a b`.
//! Set `RUST_LOG=multipermute=debug` to follow the generation session on
//! standard error.
use clap::Parser;
use multipermute::Multiset;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "multipermute")]
#[command(about = "Output the multiset permutations of the items using an efficient loopless algorithm")]
struct Args {
    /// Items of the multiset; repeated items are indistinguishable
    #[arg(required = true)]
    items: Vec<String>,

    /// Print only the number of distinct permutations
    #[arg(long)]
    count: bool,

    /// Start over with the first permutation after printing the last one
    #[arg(long)]
    cycle: bool,

    /// Stop after printing this many permutations
    #[arg(long)]
    limit: Option<usize>,

    /// Separator printed between the items of a permutation
    #[arg(long, default_value = " ")]
    separator: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        // The reader went away, e.g. `multipermute --cycle a b | head`.
        Err(RunError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Count(#[from] multipermute::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

fn run(args: Args) -> Result<(), RunError> {
    let multiset: Multiset<String> = args.items.into_iter().collect();
    let mut out = BufWriter::new(io::stdout().lock());
    if args.count {
        writeln!(out, "{}", multiset.count()?)?;
        return Ok(out.flush()?);
    }

    let permutations = multiset.permutations(args.cycle);
    let limit = args.limit.unwrap_or(usize::MAX);
    for permutation in permutations.take(limit) {
        writeln!(out, "{}", permutation.join(args.separator.as_str()))?;
    }
    Ok(out.flush()?)
}
