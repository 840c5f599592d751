//! `patmatch` — pattern-matching occurrences of `Q` inside `T`, reporting
//! the `k` cheapest end positions.

use std::process::ExitCode;

use clap::Parser;

/// Find the cheapest occurrences of a pattern Q within a text T.
#[derive(Parser, Debug)]
#[command(name = "patmatch", version, about)]
struct Args {
    /// Pattern to search for (Q).
    pattern: String,

    /// Text to search within (T).
    text: String,

    /// Report this many of the cheapest end positions.
    #[arg(long, default_value_t = 1)]
    k: usize,

    /// Also run the dense oracle and fail if it disagrees.
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    blockdtw::logging::init();
    let args = Args::parse();

    if args.pattern.is_empty() || args.text.is_empty() {
        eprintln!("error: both pattern and text must be non-empty");
        return ExitCode::from(2);
    }

    let q = args.pattern.as_bytes();
    let t = args.text.as_bytes();

    let matrix = match blockdtw::BlockMatrix::build(q, t, blockdtw::Mode::PatternMatch) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(3);
        }
    };
    let row = matrix.last_row();

    if args.verify {
        match blockdtw::Oracle::<blockdtw::Dtw>::fill(q, t, blockdtw::Mode::PatternMatch) {
            Ok(oracle) if oracle.last_row() != row.as_slice() => {
                eprintln!("error: block engine's last row disagrees with the oracle");
                return ExitCode::from(3);
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(3);
            }
            _ => {}
        }
    }

    let mut ranked: Vec<(i64, usize)> = row.into_iter().enumerate().map(|(j, v)| (v, j)).collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    ranked.truncate(args.k.max(1));

    for (cost, end) in ranked {
        println!("{end}\t{cost}");
    }
    ExitCode::SUCCESS
}
