//! `json-cbor-pack`: encode JSON (stdin) to CBOR (stdout).

use std::io;
use std::process::ExitCode;

use clap::Parser;
use json_cbor::cli::{init_tracing, pack_stream, CliOptions};
use tracing::error;

#[derive(Parser)]
#[command(name = "json-cbor-pack", about = "Encode JSON from stdin as CBOR on stdout")]
struct Args {
    /// Maximum nesting depth of arrays/maps
    #[arg(long)]
    max_depth: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = CliOptions {
        max_depth: args.max_depth,
        ..CliOptions::default()
    };
    match pack_stream(io::stdin().lock(), io::stdout().lock(), &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
