//! `json-cbor-unpack`: decode CBOR (stdin) to JSON (stdout).

use std::io;
use std::process::ExitCode;

use clap::Parser;
use json_cbor::cli::{init_tracing, unpack_stream, CliOptions};
use tracing::error;

#[derive(Parser)]
#[command(name = "json-cbor-unpack", about = "Decode CBOR from stdin as JSON on stdout")]
struct Args {
    /// Maximum nesting depth of arrays/maps
    #[arg(long)]
    max_depth: Option<usize>,

    /// Fail if bytes follow the first data item
    #[arg(long)]
    exact: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = CliOptions {
        max_depth: args.max_depth,
        exact: args.exact,
        pretty: args.pretty,
    };
    match unpack_stream(io::stdin().lock(), io::stdout().lock(), &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
