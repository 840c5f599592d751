//! `blockdtw` — global block-DTW distance between two strings.
//!
//! Grounded on `examples/Schaudge-astar-pairwise-aligner/pa-bitpacking`'s
//! clap-derive CLI shape: a flat struct of flags, `main` parses once and
//! dispatches.

use std::process::ExitCode;

use clap::Parser;

/// Compute the global block-DTW distance between two strings.
#[derive(Parser, Debug)]
#[command(name = "blockdtw", version, about)]
struct Args {
    /// First string (Q).
    q: String,

    /// Second string (T).
    t: String,

    /// Bound every internal DP value at this cap, trading exactness for
    /// `O(|Q| * |T| * cap)` time instead of `O(|Q| * |T|)`-worst-case
    /// border growth.
    #[arg(long)]
    max_value: Option<i64>,

    /// Also run the dense oracle and fail if it disagrees.
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    blockdtw::logging::init();
    let args = Args::parse();

    if args.q.is_empty() || args.t.is_empty() {
        eprintln!("error: both Q and T must be non-empty");
        return ExitCode::from(2);
    }

    let q = args.q.as_bytes();
    let t = args.t.as_bytes();

    let result = match args.max_value {
        Some(cap) => blockdtw::BlockMatrix::with_cap(q, t, blockdtw::Mode::Global, cap)
            .map(|bm| bm.global_value()),
        None => blockdtw::block_dtw(q, t),
    };

    let value = match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(3);
        }
    };

    if args.verify {
        match blockdtw::oracle_dtw(q, t) {
            Ok(expected) if expected != value => {
                eprintln!("error: block engine gave {value}, oracle gave {expected}");
                return ExitCode::from(3);
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(3);
            }
            _ => {}
        }
    }

    println!("{value}");
    ExitCode::SUCCESS
}
